//! Directory entries
//!
//! Each entity has a two-record directory entry of nine 8-column fields
//! per record. Structure, line font, level and color hold a literal value
//! or, when negative, the negated directory index of another entity.

use super::record::{right_align, Record, DIRECTORY_FIELD_WIDTH};
use crate::entities::EntityCommon;
use crate::error::{IgesError, Result};
use crate::types::{Color, ColorNumber, EntityId, EntityStatus, Level, LineFont, LineFontPattern};

/// Raw directory entry fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectoryEntry {
    pub entity_type: i64,
    /// 1-based Parameter record where the entity's data starts
    pub parameter_pointer: i64,
    pub structure: i64,
    pub line_font: i64,
    pub level: i64,
    pub view: i64,
    pub transformation: i64,
    pub label_display: i64,
    /// Packed status number as written
    pub status: i64,
    pub line_weight: i64,
    pub color: i64,
    pub parameter_line_count: i64,
    pub form: i64,
    pub label: String,
    pub subscript: i64,
}

fn field_text(record: &Record, index: usize) -> &[u8] {
    let start = index * DIRECTORY_FIELD_WIDTH;
    &record.content[start..start + DIRECTORY_FIELD_WIDTH]
}

fn integer_field(record: &Record, index: usize, name: &str) -> Result<i64> {
    let raw = field_text(record, index);
    let text = String::from_utf8_lossy(raw);
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    text.parse::<i64>().map_err(|_| {
        IgesError::malformed(
            record.line,
            format!("directory field '{}' holds '{}'", name, text),
        )
    })
}

impl DirectoryEntry {
    /// Decode the two records of one entry
    pub fn parse(first: &Record, second: &Record) -> Result<Self> {
        let entity_type = integer_field(first, 0, "entity type")?;
        let repeated_type = integer_field(second, 0, "entity type")?;
        if entity_type != repeated_type {
            return Err(IgesError::malformed(
                second.line,
                format!(
                    "directory entry type {} does not match its first record ({})",
                    repeated_type, entity_type
                ),
            ));
        }

        Ok(DirectoryEntry {
            entity_type,
            parameter_pointer: integer_field(first, 1, "parameter data")?,
            structure: integer_field(first, 2, "structure")?,
            line_font: integer_field(first, 3, "line font pattern")?,
            level: integer_field(first, 4, "level")?,
            view: integer_field(first, 5, "view")?,
            transformation: integer_field(first, 6, "transformation matrix")?,
            label_display: integer_field(first, 7, "label display")?,
            status: integer_field(first, 8, "status number")?,
            line_weight: integer_field(second, 1, "line weight")?,
            color: integer_field(second, 2, "color number")?,
            parameter_line_count: integer_field(second, 3, "parameter line count")?,
            form: integer_field(second, 4, "form number")?,
            label: String::from_utf8_lossy(field_text(second, 7)).trim().to_string(),
            subscript: integer_field(second, 8, "entity subscript")?,
        })
    }

    /// Copy the attributes onto an entity, mapping pointers to arena ids.
    /// Pointer values that can never designate an entry are dropped and
    /// reported through `warn`.
    pub fn apply(&self, common: &mut EntityCommon, mut warn: impl FnMut(String)) {
        let mut pointer = |value: i64, name: &str| -> Option<EntityId> {
            if value == 0 {
                return None;
            }
            let id = EntityId::from_directory_pointer(value);
            if id.is_none() {
                warn(format!("{} pointer {} does not designate a directory entry", name, value));
            }
            id
        };

        common.structure = if self.structure < 0 {
            pointer(-self.structure, "structure")
        } else {
            None
        };
        common.line_font = if self.line_font < 0 {
            pointer(-self.line_font, "line font")
                .map_or(LineFont::default(), LineFont::Custom)
        } else {
            LineFont::Pattern(LineFontPattern::from_code(self.line_font))
        };
        common.level = if self.level < 0 {
            pointer(-self.level, "level").map_or(Level::default(), Level::Multiple)
        } else {
            Level::Number(self.level)
        };
        common.view = pointer(self.view, "view");
        common.transformation = pointer(self.transformation, "transformation matrix");
        common.label_display = pointer(self.label_display, "label display");
        common.status = EntityStatus::from_code(self.status);
        common.line_weight = self.line_weight;
        common.color = if self.color < 0 {
            pointer(-self.color, "color").map_or(Color::DEFAULT, Color::Custom)
        } else {
            Color::Number(ColorNumber::from_code(self.color))
        };
        common.label = self.label.clone();
        common.subscript = self.subscript;
    }

    /// Build an entry from entity attributes; `directory_index` renumbers
    /// arena ids. Returns the unmapped id on failure.
    pub fn from_common<F>(
        common: &EntityCommon,
        entity_type: i64,
        form: i64,
        directory_index: F,
    ) -> std::result::Result<Self, EntityId>
    where
        F: Fn(EntityId) -> Option<usize>,
    {
        let index = |id: EntityId| -> std::result::Result<i64, EntityId> {
            directory_index(id).map(|i| i as i64).ok_or(id)
        };
        let optional = |id: Option<EntityId>| -> std::result::Result<i64, EntityId> {
            id.map_or(Ok(0), |id| index(id))
        };

        Ok(DirectoryEntry {
            entity_type,
            parameter_pointer: 0,
            structure: -optional(common.structure)?,
            line_font: match common.line_font {
                LineFont::Pattern(pattern) => pattern.code(),
                LineFont::Custom(id) => -index(id)?,
            },
            level: match common.level {
                Level::Number(level) => level,
                Level::Multiple(id) => -index(id)?,
            },
            view: optional(common.view)?,
            transformation: optional(common.transformation)?,
            label_display: optional(common.label_display)?,
            status: common.status.code(),
            line_weight: common.line_weight,
            color: match common.color {
                Color::Number(number) => number.code(),
                Color::Custom(id) => -index(id)?,
            },
            parameter_line_count: 0,
            form,
            label: common.label.clone(),
            subscript: common.subscript,
        })
    }

    /// Render the 72-column content of both records. Fails with the name of
    /// the field that does not fit its columns.
    pub fn format(&self) -> std::result::Result<[String; 2], String> {
        let fit = |value: String, name: &str| -> std::result::Result<String, String> {
            right_align(&value, DIRECTORY_FIELD_WIDTH)
                .ok_or_else(|| format!("{} '{}' does not fit in 8 columns", name, value))
        };
        let number = |value: i64, name: &str| fit(value.to_string(), name);
        let blank_zero = |value: i64, name: &str| {
            fit(
                if value == 0 { String::new() } else { value.to_string() },
                name,
            )
        };

        let first = [
            number(self.entity_type, "entity type")?,
            number(self.parameter_pointer, "parameter data pointer")?,
            number(self.structure, "structure")?,
            number(self.line_font, "line font pattern")?,
            number(self.level, "level")?,
            blank_zero(self.view, "view")?,
            blank_zero(self.transformation, "transformation matrix")?,
            blank_zero(self.label_display, "label display")?,
            fit(format!("{:08}", self.status), "status number")?,
        ]
        .concat();

        let second = [
            number(self.entity_type, "entity type")?,
            number(self.line_weight, "line weight")?,
            number(self.color, "color number")?,
            number(self.parameter_line_count, "parameter line count")?,
            number(self.form, "form number")?,
            fit(String::new(), "reserved")?,
            fit(String::new(), "reserved")?,
            fit(self.label.clone(), "entity label")?,
            blank_zero(self.subscript, "entity subscript")?,
        ]
        .concat();

        Ok([first, second])
    }
}
