//! Label display associativity entity (type 402, form 5)
//!
//! Places an entity's label in one or more views. Entities point to it
//! through their directory label display field.

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::iges::{Linker, ParameterReader, ParameterWriter};
use crate::types::{EntityId, EntityStatus, EntityUse, Vector3};

/// Where and how a label appears in one view
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlacement {
    /// View entity the placement applies to
    pub view: Option<EntityId>,
    pub location: Vector3,
    /// Leader (arrow) entity
    pub leader: Option<EntityId>,
    pub level: i64,
    /// Annotation entity displaying the label
    pub label: Option<EntityId>,
}

impl Default for LabelPlacement {
    fn default() -> Self {
        LabelPlacement {
            view: None,
            location: Vector3::ZERO,
            leader: None,
            level: 0,
            label: None,
        }
    }
}

/// Label placements for an entity
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDisplayAssociativity {
    pub common: EntityCommon,
    pub placements: Vec<LabelPlacement>,
}

impl LabelDisplayAssociativity {
    pub fn new() -> Self {
        LabelDisplayAssociativity {
            common: EntityCommon::with_status(EntityStatus {
                entity_use: EntityUse::Definition,
                ..EntityStatus::default()
            }),
            placements: Vec::new(),
        }
    }
}

impl Default for LabelDisplayAssociativity {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for LabelDisplayAssociativity {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type_number(&self) -> i64 {
        402
    }

    fn form_number(&self) -> i64 {
        5
    }

    fn entity_type(&self) -> &'static str {
        "LABEL_DISPLAY_ASSOCIATIVITY"
    }

    fn read_parameters(&mut self, reader: &mut ParameterReader<'_>) -> Result<()> {
        let count = reader.count()?;
        self.placements = Vec::with_capacity(count);
        for _ in 0..count {
            self.placements.push(LabelPlacement {
                view: reader.pointer()?,
                location: reader.point()?,
                leader: reader.pointer()?,
                level: reader.integer()?,
                label: reader.pointer()?,
            });
        }
        Ok(())
    }

    fn write_parameters(&self, writer: &mut ParameterWriter) {
        writer.integer(self.placements.len() as i64);
        for placement in &self.placements {
            writer
                .pointer(placement.view)
                .point(placement.location)
                .pointer(placement.leader)
                .integer(placement.level)
                .pointer(placement.label);
        }
    }

    fn references(&self, refs: &mut Vec<EntityId>) {
        for placement in &self.placements {
            refs.extend(placement.view);
            refs.extend(placement.leader);
            refs.extend(placement.label);
        }
    }

    fn link(&mut self, linker: &mut Linker<'_>) {
        for placement in &mut self.placements {
            placement.view = linker.any(placement.view, "label view");
            placement.leader = linker.any(placement.leader, "label leader");
            placement.label = linker.any(placement.label, "label");
        }
    }
}
