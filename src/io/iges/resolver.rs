//! Cross-reference resolution
//!
//! Entities are decoded with pending arena ids straight from their pointer
//! values. Once the whole arena exists, the link pass checks every pending
//! id against it: ids past the end of the arena, and typed references that
//! designate the wrong kind of entity, are dropped with a warning.

use crate::entities::EntityType;
use crate::notification::NotificationCollection;
use crate::types::EntityId;
use std::collections::{HashSet, VecDeque};
use tracing::warn;

/// Validates pending references of one entity against the arena
pub struct Linker<'a> {
    kinds: &'a [i64],
    owner: EntityId,
    notifications: &'a mut NotificationCollection,
}

impl<'a> Linker<'a> {
    /// `kinds[k]` is the type number of the entity with id `k`
    pub fn new(
        kinds: &'a [i64],
        owner: EntityId,
        notifications: &'a mut NotificationCollection,
    ) -> Self {
        Self {
            kinds,
            owner,
            notifications,
        }
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    fn report(&mut self, message: String) {
        warn!(entity = %self.owner, "{}", message);
        self.notifications
            .warn(format!("entity {} (directory entry {}): {}", self.owner, self.owner.directory_pointer(), message));
    }

    /// Keep `id` when it designates an entity of any kind
    pub fn any(&mut self, id: Option<EntityId>, what: &str) -> Option<EntityId> {
        let id = id?;
        if id.index() < self.kinds.len() {
            Some(id)
        } else {
            self.report(format!(
                "{} pointer {} is past the last directory entry",
                what,
                id.directory_pointer()
            ));
            None
        }
    }

    /// Keep `id` only when it designates an entity of `expected` type
    pub fn typed(&mut self, id: Option<EntityId>, expected: i64, what: &str) -> Option<EntityId> {
        let id = self.any(id, what)?;
        let actual = self.kinds[id.index()];
        if actual == expected {
            Some(id)
        } else {
            self.report(format!(
                "{} pointer {} designates a type {} entity, expected type {}",
                what,
                id.directory_pointer(),
                actual,
                expected
            ));
            None
        }
    }

    /// Drop ids that designate nothing
    pub fn retain(&mut self, ids: &mut Vec<EntityId>, what: &str) {
        let before = ids.len();
        let kinds = self.kinds.len();
        ids.retain(|id| id.index() < kinds);
        let dropped = before - ids.len();
        if dropped > 0 {
            self.report(format!("dropped {} dangling {} pointer(s)", dropped, what));
        }
    }
}

/// Run the link pass over the whole arena
pub fn link_all(entities: &mut [EntityType], notifications: &mut NotificationCollection) {
    let kinds: Vec<i64> = entities
        .iter()
        .map(|e| e.as_entity().entity_type_number())
        .collect();
    for (index, entity) in entities.iter_mut().enumerate() {
        let mut linker = Linker::new(&kinds, EntityId::new(index), notifications);
        entity.link(&mut linker);
    }
}

/// Entities no other entity refers to, in arena order. Self references do
/// not count. A reference cycle nothing outside points into has no such
/// entity, so the first member of each unreached cycle joins the roots.
pub fn find_roots(entities: &[EntityType]) -> Vec<EntityId> {
    let references: Vec<Vec<EntityId>> = entities
        .iter()
        .enumerate()
        .map(|(index, entity)| {
            entity
                .all_references()
                .into_iter()
                .filter(|id| id.index() != index && id.index() < entities.len())
                .collect()
        })
        .collect();

    let referenced: HashSet<EntityId> = references.iter().flatten().copied().collect();
    let mut roots: Vec<EntityId> = (0..entities.len())
        .map(EntityId::new)
        .filter(|id| !referenced.contains(id))
        .collect();

    let mut reached = vec![false; entities.len()];
    let mut queue: VecDeque<EntityId> = roots.iter().copied().collect();
    loop {
        while let Some(id) = queue.pop_front() {
            if std::mem::replace(&mut reached[id.index()], true) {
                continue;
            }
            queue.extend(references[id.index()].iter().copied());
        }
        let Some(index) = reached.iter().position(|r| !r) else {
            break;
        };
        let id = EntityId::new(index);
        roots.push(id);
        queue.push_back(id);
    }
    roots.sort();
    roots
}
