//! In-memory IGES file

use crate::entities::EntityType;
use crate::error::Result;
use crate::global::GlobalSection;
use crate::io::iges::{IgesReader, IgesWriter};
use crate::notification::NotificationCollection;
use crate::types::{EntityId, TransformationMatrix};
use std::collections::HashSet;
use std::io::{Read, Write};
use std::path::Path;

/// An IGES file: Start text, Global settings and the entity graph
///
/// Entities live in an arena owned by the file and refer to each other by
/// [`EntityId`]. Only entities reachable from the roots are written.
#[derive(Debug, Clone)]
pub struct IgesFile {
    /// Start section text, one string per line
    pub start_lines: Vec<String>,
    pub global: GlobalSection,
    /// Notifications collected during the last read
    pub notifications: NotificationCollection,
    entities: Vec<EntityType>,
    roots: Vec<EntityId>,
}

impl IgesFile {
    /// Create an empty file with default global settings
    pub fn new() -> Self {
        IgesFile {
            start_lines: Vec::new(),
            global: GlobalSection::new(),
            notifications: NotificationCollection::new(),
            entities: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Read a file from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        IgesReader::from_file(path)?.read()
    }

    /// Read a file from any byte source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        IgesReader::from_reader(reader)?.read()
    }

    /// Write the file to disk; nothing is written if encoding fails
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        IgesWriter::new(self).write_to_file(path)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        IgesWriter::new(self).write_to_writer(writer)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        IgesWriter::new(self).write_to_vec()
    }

    /// Add a top-level entity
    pub fn add_entity(&mut self, entity: impl Into<EntityType>) -> EntityId {
        let id = self.insert_entity(entity);
        self.roots.push(id);
        id
    }

    /// Add an entity that is only written when something refers to it
    pub fn insert_entity(&mut self, entity: impl Into<EntityType>) -> EntityId {
        let id = EntityId::new(self.entities.len());
        self.entities.push(entity.into());
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&EntityType> {
        self.entities.get(id.index())
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut EntityType> {
        self.entities.get_mut(id.index())
    }

    /// All entities in arena order, roots or not
    pub fn entities(&self) -> &[EntityType] {
        &self.entities
    }

    pub fn root_ids(&self) -> &[EntityId] {
        &self.roots
    }

    /// Top-level entities in order
    pub fn roots(&self) -> impl Iterator<Item = &EntityType> {
        self.roots.iter().filter_map(|id| self.entity(*id))
    }

    pub(crate) fn set_arena(&mut self, entities: Vec<EntityType>, roots: Vec<EntityId>) {
        self.entities = entities;
        self.roots = roots;
    }

    /// Effective transformation of an entity: its matrix followed by the
    /// matrices that matrix is itself transformed by. Identity when the
    /// entity has none.
    pub fn transformation_matrix(&self, id: EntityId) -> TransformationMatrix {
        let mut result = TransformationMatrix::identity();
        let mut seen = HashSet::new();
        let mut next = self.entity(id).and_then(|e| e.as_entity().transformation());

        while let Some(matrix_id) = next {
            if !seen.insert(matrix_id) {
                break;
            }
            let Some(matrix) = self.entity(matrix_id).and_then(EntityType::as_transformation_matrix)
            else {
                break;
            };
            result = result.then(&matrix.matrix);
            next = matrix.common.transformation;
        }
        result
    }
}

impl Default for IgesFile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Line, TransformationMatrixEntity};
    use crate::types::Vector3;

    fn translation(x: f64, y: f64, z: f64) -> TransformationMatrixEntity {
        TransformationMatrixEntity::from_matrix(TransformationMatrix::from_translation(
            Vector3::new(x, y, z),
        ))
    }

    #[test]
    fn test_add_and_insert() {
        let mut file = IgesFile::new();
        let root = file.add_entity(Line::new());
        let child = file.insert_entity(TransformationMatrixEntity::new());
        assert_eq!(file.entities().len(), 2);
        assert_eq!(file.root_ids(), &[root]);
        assert!(file.entity(child).is_some());
        assert!(file.entity(EntityId::new(9)).is_none());
        assert_eq!(file.roots().count(), 1);
    }

    #[test]
    fn test_identity_without_matrix() {
        let mut file = IgesFile::new();
        let line = file.add_entity(Line::new());
        assert!(file.transformation_matrix(line).is_identity());
    }

    #[test]
    fn test_chained_matrices_compose() {
        let mut file = IgesFile::new();
        let outer = file.insert_entity(translation(0.0, 0.0, 5.0));
        let mut inner = translation(1.0, 0.0, 0.0);
        inner.common.transformation = Some(outer);
        let inner = file.insert_entity(inner);
        let mut line = Line::new();
        line.common.transformation = Some(inner);
        let line = file.add_entity(line);

        let matrix = file.transformation_matrix(line);
        assert_eq!(matrix.transform_point(Vector3::ZERO), Vector3::new(1.0, 0.0, 5.0));
    }

    #[test]
    fn test_matrix_cycle_terminates() {
        let mut file = IgesFile::new();
        let a = file.insert_entity(translation(1.0, 0.0, 0.0));
        let mut b = translation(0.0, 1.0, 0.0);
        b.common.transformation = Some(a);
        let b = file.insert_entity(b);
        if let Some(EntityType::TransformationMatrix(m)) = file.entity_mut(a) {
            m.common.transformation = Some(b);
        }
        let mut line = Line::new();
        line.common.transformation = Some(a);
        let line = file.add_entity(line);

        let matrix = file.transformation_matrix(line);
        assert_eq!(matrix.transform_point(Vector3::ZERO), Vector3::new(1.0, 1.0, 0.0));
    }
}
