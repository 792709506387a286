//! Arena identifier for entities
//!
//! Entities live in the file's arena; every cross-entity relationship is an
//! `EntityId` into that arena rather than an owning pointer.

use std::fmt;

/// Index of an entity in its file's arena
///
/// Files produced by the reader keep the arena in directory order, so
/// entity `k` is the one whose directory entry starts at sequence number
/// `2k + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(usize);

impl EntityId {
    /// Create an id from a raw arena index
    #[inline]
    pub const fn new(index: usize) -> Self {
        EntityId(index)
    }

    /// Get the raw arena index
    #[inline]
    pub const fn index(&self) -> usize {
        self.0
    }

    /// Map a directory pointer (the sequence number of the first record of
    /// a directory entry) to an arena id.
    ///
    /// Zero, negative and even values never designate an entry.
    pub fn from_directory_pointer(pointer: i64) -> Option<Self> {
        if pointer <= 0 || pointer % 2 == 0 {
            return None;
        }
        usize::try_from((pointer - 1) / 2).ok().map(EntityId)
    }

    /// Directory pointer of this entity in directory order
    #[inline]
    pub const fn directory_pointer(&self) -> usize {
        self.0 * 2 + 1
    }
}

impl From<usize> for EntityId {
    fn from(index: usize) -> Self {
        EntityId(index)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_pointer_mapping() {
        assert_eq!(EntityId::from_directory_pointer(1), Some(EntityId::new(0)));
        assert_eq!(EntityId::from_directory_pointer(5), Some(EntityId::new(2)));
        assert_eq!(EntityId::new(2).directory_pointer(), 5);
    }

    #[test]
    fn test_invalid_directory_pointers() {
        assert_eq!(EntityId::from_directory_pointer(0), None);
        assert_eq!(EntityId::from_directory_pointer(-3), None);
        assert_eq!(EntityId::from_directory_pointer(4), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(EntityId::new(7).to_string(), "#7");
    }
}
