//! Color definition entity (type 314)

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::iges::{ParameterReader, ParameterWriter};
use crate::types::{EntityStatus, EntityUse};

/// An RGB color referenced through a negative directory color field.
/// Components are percentages (0-100).
#[derive(Debug, Clone, PartialEq)]
pub struct ColorDefinition {
    pub common: EntityCommon,
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    /// Optional color name
    pub name: String,
}

impl ColorDefinition {
    pub fn new() -> Self {
        ColorDefinition {
            common: EntityCommon::with_status(EntityStatus {
                entity_use: EntityUse::Definition,
                ..EntityStatus::default()
            }),
            red: 0.0,
            green: 0.0,
            blue: 0.0,
            name: String::new(),
        }
    }

    pub fn from_rgb(red: f64, green: f64, blue: f64) -> Self {
        ColorDefinition {
            red,
            green,
            blue,
            ..Self::new()
        }
    }
}

impl Default for ColorDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for ColorDefinition {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type_number(&self) -> i64 {
        314
    }

    fn entity_type(&self) -> &'static str {
        "COLOR_DEFINITION"
    }

    fn read_parameters(&mut self, reader: &mut ParameterReader<'_>) -> Result<()> {
        self.red = reader.real()?;
        self.green = reader.real()?;
        self.blue = reader.real()?;
        self.name = reader.string()?;
        Ok(())
    }

    fn write_parameters(&self, writer: &mut ParameterWriter) {
        writer
            .real(self.red)
            .real(self.green)
            .real(self.blue)
            .optional_string(&self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_status() {
        let color = ColorDefinition::from_rgb(10.0, 20.0, 30.0);
        assert_eq!(color.common.status.entity_use, EntityUse::Definition);
        assert_eq!(color.entity_type_number(), 314);
        assert!(color.name.is_empty());
    }
}
