//! Direction entity (type 123)

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::iges::{ParameterReader, ParameterWriter};
use crate::types::{EntityStatus, EntityUse, SubordinateEntitySwitch, Vector3};

/// A non-zero direction vector
///
/// Directions only exist to serve other entities, so new ones are flagged
/// physically dependent definition entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Direction {
    pub common: EntityCommon,
    pub vector: Vector3,
}

impl Direction {
    pub fn new() -> Self {
        Direction {
            common: EntityCommon::with_status(EntityStatus {
                subordinate: SubordinateEntitySwitch::PhysicallyDependent,
                entity_use: EntityUse::Definition,
                ..EntityStatus::default()
            }),
            vector: Vector3::UNIT_Z,
        }
    }

    pub fn from_vector(vector: Vector3) -> Self {
        Direction {
            vector,
            ..Self::new()
        }
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Direction {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type_number(&self) -> i64 {
        123
    }

    fn entity_type(&self) -> &'static str {
        "DIRECTION"
    }

    fn read_parameters(&mut self, reader: &mut ParameterReader<'_>) -> Result<()> {
        self.vector = reader.point()?;
        Ok(())
    }

    fn write_parameters(&self, writer: &mut ParameterWriter) {
        writer.point(self.vector);
    }
}
