//! Directory entry attribute types
//!
//! The status number (directory field 9) packs four two-digit sub-fields;
//! line font and level are literal values or, when negative on disk,
//! pointers to definition entities.

use super::EntityId;

/// Blank status (digits 1-2 of the status number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlankStatus {
    #[default]
    Visible,
    Blanked,
}

/// Subordinate entity switch (digits 3-4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SubordinateEntitySwitch {
    #[default]
    Independent,
    PhysicallyDependent,
    LogicallyDependent,
    PhysicallyAndLogicallyDependent,
}

/// Entity use flag (digits 5-6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntityUse {
    #[default]
    Geometry,
    Annotation,
    Definition,
    Other,
    LogicalOrPositional,
    TwoDimensionalParametric,
    ConstructionGeometry,
}

/// Hierarchy (digits 7-8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Hierarchy {
    #[default]
    GlobalTopDown,
    GlobalDefer,
    UseHierarchyProperty,
}

/// Decoded status number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EntityStatus {
    pub blank: BlankStatus,
    pub subordinate: SubordinateEntitySwitch,
    pub entity_use: EntityUse,
    pub hierarchy: Hierarchy,
}

impl EntityStatus {
    /// Decode the packed 8-digit status number. Unknown sub-field values
    /// fall back to their defaults.
    pub fn from_code(code: i64) -> Self {
        let pair = |shift: i64| (code / shift) % 100;
        EntityStatus {
            blank: match pair(1_000_000) {
                1 => BlankStatus::Blanked,
                _ => BlankStatus::Visible,
            },
            subordinate: match pair(10_000) {
                1 => SubordinateEntitySwitch::PhysicallyDependent,
                2 => SubordinateEntitySwitch::LogicallyDependent,
                3 => SubordinateEntitySwitch::PhysicallyAndLogicallyDependent,
                _ => SubordinateEntitySwitch::Independent,
            },
            entity_use: match pair(100) {
                1 => EntityUse::Annotation,
                2 => EntityUse::Definition,
                3 => EntityUse::Other,
                4 => EntityUse::LogicalOrPositional,
                5 => EntityUse::TwoDimensionalParametric,
                6 => EntityUse::ConstructionGeometry,
                _ => EntityUse::Geometry,
            },
            hierarchy: match pair(1) {
                1 => Hierarchy::GlobalDefer,
                2 => Hierarchy::UseHierarchyProperty,
                _ => Hierarchy::GlobalTopDown,
            },
        }
    }

    /// The four sub-field values in column order
    pub fn pairs(&self) -> [u8; 4] {
        [
            self.blank as u8,
            self.subordinate as u8,
            self.entity_use as u8,
            self.hierarchy as u8,
        ]
    }

    /// The packed status number (`10200` for `00010200`)
    pub fn code(&self) -> i64 {
        self.pairs()
            .iter()
            .fold(0, |code, pair| code * 100 + i64::from(*pair))
    }

    /// Render as the 8-digit directory field (`00010200`)
    pub fn to_field(&self) -> String {
        self.pairs().iter().map(|p| format!("{:02}", p)).collect()
    }
}

/// Predefined line font patterns (directory field 4, non-negative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineFontPattern {
    #[default]
    None,
    Solid,
    Dashed,
    Phantom,
    Centerline,
    Dotted,
}

impl LineFontPattern {
    /// Decode a pattern code; unknown codes fall back to `None`
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => LineFontPattern::Solid,
            2 => LineFontPattern::Dashed,
            3 => LineFontPattern::Phantom,
            4 => LineFontPattern::Centerline,
            5 => LineFontPattern::Dotted,
            _ => LineFontPattern::None,
        }
    }

    pub fn code(&self) -> i64 {
        *self as i64
    }
}

/// Line font: a predefined pattern or a line font definition entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineFont {
    Pattern(LineFontPattern),
    Custom(EntityId),
}

impl Default for LineFont {
    fn default() -> Self {
        LineFont::Pattern(LineFontPattern::None)
    }
}

/// Level: a single level number or a definition-levels property entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Number(i64),
    Multiple(EntityId),
}

impl Default for Level {
    fn default() -> Self {
        Level::Number(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_pairs_decode_independently() {
        let status = EntityStatus::from_code(10200);
        assert_eq!(status.blank, BlankStatus::Visible);
        assert_eq!(status.subordinate, SubordinateEntitySwitch::PhysicallyDependent);
        assert_eq!(status.entity_use, EntityUse::Definition);
        assert_eq!(status.hierarchy, Hierarchy::GlobalTopDown);
        assert_eq!(status.to_field(), "00010200");
    }

    #[test]
    fn test_status_all_fields() {
        let status = EntityStatus::from_code(1_03_06_02);
        assert_eq!(status.blank, BlankStatus::Blanked);
        assert_eq!(status.subordinate, SubordinateEntitySwitch::PhysicallyAndLogicallyDependent);
        assert_eq!(status.entity_use, EntityUse::ConstructionGeometry);
        assert_eq!(status.hierarchy, Hierarchy::UseHierarchyProperty);
        assert_eq!(status.to_field(), "01030602");
        assert_eq!(status.code(), 1_03_06_02);
    }

    #[test]
    fn test_default_status() {
        assert_eq!(EntityStatus::from_code(0), EntityStatus::default());
        assert_eq!(EntityStatus::default().to_field(), "00000000");
    }

    #[test]
    fn test_line_font_codes() {
        assert_eq!(LineFontPattern::from_code(3), LineFontPattern::Phantom);
        assert_eq!(LineFontPattern::Dotted.code(), 5);
        assert_eq!(LineFontPattern::from_code(99), LineFontPattern::None);
    }
}
