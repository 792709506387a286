//! Null entity (type 0)
//!
//! Placeholder entries some writers leave in the directory. Any parameter
//! data is ignored.

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::iges::{ParameterReader, ParameterWriter};

/// An entity with no content
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Null {
    pub common: EntityCommon,
}

impl Null {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Entity for Null {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type_number(&self) -> i64 {
        0
    }

    fn entity_type(&self) -> &'static str {
        "NULL"
    }

    fn read_parameters(&mut self, reader: &mut ParameterReader<'_>) -> Result<()> {
        reader.skip_remaining();
        Ok(())
    }

    fn write_parameters(&self, _writer: &mut ParameterWriter) {}
}
