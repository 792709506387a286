//! Opaque placeholder for unsupported entity types.
//!
//! When the reader meets a type/form combination with no registered entity,
//! it keeps the directory attributes and every raw parameter field so the
//! entity can be written back unchanged. Line font, color and status codes
//! outside the ranges the attribute types know are kept as read. Pointers
//! inside the raw fields are not renumbered.

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::iges::{Field, ParameterReader, ParameterWriter};
use crate::types::{Color, ColorNumber, EntityStatus, LineFont, LineFontPattern};

/// Non-pointer directory codes exactly as read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryCodes {
    pub line_font: i64,
    pub color: i64,
    pub status: i64,
}

impl DirectoryCodes {
    /// The line font code read, while `font` still holds what it decoded to
    pub fn line_font_for(&self, font: LineFont) -> Option<i64> {
        let decoded = LineFont::Pattern(LineFontPattern::from_code(self.line_font));
        (self.line_font >= 0 && font == decoded).then_some(self.line_font)
    }

    /// The color code read, while `color` still holds what it decoded to
    pub fn color_for(&self, color: Color) -> Option<i64> {
        let decoded = Color::Number(ColorNumber::from_code(self.color));
        (self.color >= 0 && color == decoded).then_some(self.color)
    }

    /// The status number read, while `status` still holds what it decoded to
    pub fn status_for(&self, status: EntityStatus) -> Option<i64> {
        (status == EntityStatus::from_code(self.status)).then_some(self.status)
    }
}

/// An entity whose type/form combination is not supported
#[derive(Debug, Clone, PartialEq)]
pub struct Unsupported {
    /// Common entity data
    pub common: EntityCommon,
    type_number: i64,
    form: i64,
    /// Parameter fields after the type number, verbatim
    pub fields: Vec<Field>,
    /// Directory codes from the file this entity was read from
    pub directory_codes: Option<DirectoryCodes>,
}

impl Unsupported {
    /// Create a placeholder for the given type and form numbers
    pub fn new(type_number: i64, form: i64) -> Self {
        Self {
            common: EntityCommon::new(),
            type_number,
            form,
            fields: Vec::new(),
            directory_codes: None,
        }
    }
}

impl Entity for Unsupported {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type_number(&self) -> i64 {
        self.type_number
    }

    fn form_number(&self) -> i64 {
        self.form
    }

    fn entity_type(&self) -> &'static str {
        "UNSUPPORTED"
    }

    fn read_parameters(&mut self, reader: &mut ParameterReader<'_>) -> Result<()> {
        self.fields = reader.remaining().to_vec();
        reader.skip_remaining();
        Ok(())
    }

    fn write_parameters(&self, writer: &mut ParameterWriter) {
        for field in &self.fields {
            writer.field(field);
        }
    }
}
