//! Subfigure definition entity (type 308)

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::iges::{Linker, ParameterReader, ParameterWriter};
use crate::types::{EntityId, EntityStatus, EntityUse};

/// A named, reusable group of entities
#[derive(Debug, Clone, PartialEq)]
pub struct SubfigureDefinition {
    pub common: EntityCommon,
    /// Nesting depth; 0 when no member is itself a subfigure
    pub depth: i64,
    pub name: String,
    /// Member entities
    pub entities: Vec<EntityId>,
}

impl SubfigureDefinition {
    pub fn new() -> Self {
        SubfigureDefinition {
            common: EntityCommon::with_status(EntityStatus {
                entity_use: EntityUse::Definition,
                ..EntityStatus::default()
            }),
            depth: 0,
            name: String::new(),
            entities: Vec::new(),
        }
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        SubfigureDefinition {
            name: name.into(),
            ..Self::new()
        }
    }
}

impl Default for SubfigureDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for SubfigureDefinition {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type_number(&self) -> i64 {
        308
    }

    fn entity_type(&self) -> &'static str {
        "SUBFIGURE_DEFINITION"
    }

    fn read_parameters(&mut self, reader: &mut ParameterReader<'_>) -> Result<()> {
        self.depth = reader.integer()?;
        self.name = reader.string()?;
        self.entities = reader.pointer_list()?;
        Ok(())
    }

    fn write_parameters(&self, writer: &mut ParameterWriter) {
        writer
            .integer(self.depth)
            .string(&self.name)
            .pointer_list(&self.entities);
    }

    fn references(&self, refs: &mut Vec<EntityId>) {
        refs.extend(self.entities.iter().copied());
    }

    fn link(&mut self, linker: &mut Linker<'_>) {
        linker.retain(&mut self.entities, "subfigure member");
    }
}
