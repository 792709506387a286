//! Text display template entity (type 312)

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::iges::{Linker, ParameterReader, ParameterWriter};
use crate::types::{EntityId, EntityStatus, EntityUse, Vector3};

/// Mirroring of displayed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextMirrorAxis {
    #[default]
    None,
    /// Mirrored about the axis perpendicular to the text base line
    PerpendicularToTextBase,
    /// Mirrored about the text base line
    TextBaseLine,
}

impl TextMirrorAxis {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => TextMirrorAxis::PerpendicularToTextBase,
            2 => TextMirrorAxis::TextBaseLine,
            _ => TextMirrorAxis::None,
        }
    }

    pub fn code(&self) -> i64 {
        *self as i64
    }
}

/// Orientation of displayed text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextRotation {
    #[default]
    Horizontal,
    Vertical,
}

impl TextRotation {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => TextRotation::Vertical,
            _ => TextRotation::Horizontal,
        }
    }

    pub fn code(&self) -> i64 {
        *self as i64
    }
}

/// Text appearance shared by annotation entities
///
/// Form 0 gives an absolute text location, form 1 an increment applied to
/// the location of the text it is used with.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDisplayTemplate {
    pub common: EntityCommon,
    pub box_width: f64,
    pub box_height: f64,
    /// Built-in font code, used when `font` is `None`
    pub font_code: i64,
    /// Text font definition (type 310)
    pub font: Option<EntityId>,
    /// Slant angle in radians
    pub slant_angle: f64,
    /// Rotation angle in radians
    pub rotation_angle: f64,
    pub mirror_axis: TextMirrorAxis,
    pub rotation: TextRotation,
    pub location: Vector3,
    /// Form 1 when set
    pub incremental: bool,
}

impl TextDisplayTemplate {
    pub fn new() -> Self {
        TextDisplayTemplate {
            common: EntityCommon::with_status(EntityStatus {
                entity_use: EntityUse::Definition,
                ..EntityStatus::default()
            }),
            box_width: 0.0,
            box_height: 0.0,
            font_code: 1,
            font: None,
            slant_angle: std::f64::consts::FRAC_PI_2,
            rotation_angle: 0.0,
            mirror_axis: TextMirrorAxis::None,
            rotation: TextRotation::Horizontal,
            location: Vector3::ZERO,
            incremental: false,
        }
    }
}

impl Default for TextDisplayTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for TextDisplayTemplate {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type_number(&self) -> i64 {
        312
    }

    fn form_number(&self) -> i64 {
        i64::from(self.incremental)
    }

    fn entity_type(&self) -> &'static str {
        "TEXT_DISPLAY_TEMPLATE"
    }

    fn read_parameters(&mut self, reader: &mut ParameterReader<'_>) -> Result<()> {
        self.box_width = reader.real()?;
        self.box_height = reader.real()?;
        let font = reader.integer_or(1)?;
        if font < 0 {
            self.font = reader.resolve_negated_pointer(font);
            self.font_code = 0;
        } else {
            self.font = None;
            self.font_code = font;
        }
        self.slant_angle = reader.real_or(std::f64::consts::FRAC_PI_2)?;
        self.rotation_angle = reader.real()?;
        self.mirror_axis = TextMirrorAxis::from_code(reader.integer()?);
        self.rotation = TextRotation::from_code(reader.integer()?);
        self.location = reader.point()?;
        Ok(())
    }

    fn write_parameters(&self, writer: &mut ParameterWriter) {
        writer.real(self.box_width).real(self.box_height);
        match self.font {
            Some(font) => writer.negated_pointer(font),
            None => writer.integer_or(self.font_code, 1),
        };
        writer
            .real_or(self.slant_angle, std::f64::consts::FRAC_PI_2)
            .real(self.rotation_angle)
            .integer(self.mirror_axis.code())
            .integer(self.rotation.code())
            .point(self.location);
    }

    fn references(&self, refs: &mut Vec<EntityId>) {
        refs.extend(self.font);
    }

    fn link(&mut self, linker: &mut Linker<'_>) {
        self.font = linker.typed(self.font, 310, "text font");
    }
}
