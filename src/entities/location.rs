//! Location entity (type 116), a point in model space

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::iges::{Linker, ParameterReader, ParameterWriter};
use crate::types::{EntityId, Vector3};

/// A point, optionally drawn with a subfigure as its display symbol
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub common: EntityCommon,
    pub point: Vector3,
    /// Subfigure definition (type 308) used as display symbol
    pub display_symbol: Option<EntityId>,
}

impl Location {
    pub fn new() -> Self {
        Location {
            common: EntityCommon::new(),
            point: Vector3::ZERO,
            display_symbol: None,
        }
    }

    pub fn from_point(point: Vector3) -> Self {
        Location {
            point,
            ..Self::new()
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Location {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type_number(&self) -> i64 {
        116
    }

    fn entity_type(&self) -> &'static str {
        "LOCATION"
    }

    fn read_parameters(&mut self, reader: &mut ParameterReader<'_>) -> Result<()> {
        self.point = reader.point()?;
        self.display_symbol = reader.pointer()?;
        Ok(())
    }

    fn write_parameters(&self, writer: &mut ParameterWriter) {
        writer
            .real(self.point.x)
            .real(self.point.y)
            .real_or(self.point.z, 0.0)
            .optional_pointer(self.display_symbol);
    }

    fn references(&self, refs: &mut Vec<EntityId>) {
        refs.extend(self.display_symbol);
    }

    fn link(&mut self, linker: &mut Linker<'_>) {
        self.display_symbol = linker.typed(self.display_symbol, 308, "display symbol");
    }
}
