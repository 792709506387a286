//! Text font definition entity (type 310)
//!
//! Glyphs are drawn on an integer grid as pen moves. A font may supersede
//! a built-in font code or, through a negated pointer, another font
//! definition entity.

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::iges::{Linker, ParameterReader, ParameterWriter};
use crate::types::{EntityId, EntityStatus, EntityUse};

/// Point on the font grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridPoint {
    pub x: i64,
    pub y: i64,
}

impl GridPoint {
    pub fn new(x: i64, y: i64) -> Self {
        GridPoint { x, y }
    }
}

/// One pen motion of a glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PenMovement {
    /// Pen lifted while moving to `location`
    pub pen_up: bool,
    pub location: GridPoint,
}

/// A glyph definition
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontCharacter {
    pub ascii_code: i64,
    /// Origin of the next character
    pub origin: GridPoint,
    pub movements: Vec<PenMovement>,
}

/// A stroke font
#[derive(Debug, Clone, PartialEq)]
pub struct TextFontDefinition {
    pub common: EntityCommon,
    pub font_code: i64,
    pub name: String,
    /// Superseded built-in font code; 0 when none
    pub supersedes_code: i64,
    /// Superseded font definition (type 310)
    pub supersedes_font: Option<EntityId>,
    /// Grid units per text height
    pub scale: i64,
    pub characters: Vec<FontCharacter>,
}

impl TextFontDefinition {
    pub fn new() -> Self {
        TextFontDefinition {
            common: EntityCommon::with_status(EntityStatus {
                entity_use: EntityUse::Definition,
                ..EntityStatus::default()
            }),
            font_code: 0,
            name: String::new(),
            supersedes_code: 0,
            supersedes_font: None,
            scale: 0,
            characters: Vec::new(),
        }
    }

    /// Look up a glyph by character code
    pub fn character(&self, ascii_code: i64) -> Option<&FontCharacter> {
        self.characters.iter().find(|c| c.ascii_code == ascii_code)
    }
}

impl Default for TextFontDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for TextFontDefinition {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type_number(&self) -> i64 {
        310
    }

    fn entity_type(&self) -> &'static str {
        "TEXT_FONT_DEFINITION"
    }

    fn read_parameters(&mut self, reader: &mut ParameterReader<'_>) -> Result<()> {
        self.font_code = reader.integer()?;
        self.name = reader.string()?;
        let supersedes = reader.integer()?;
        if supersedes < 0 {
            self.supersedes_font = reader.resolve_negated_pointer(supersedes);
            self.supersedes_code = 0;
        } else {
            self.supersedes_font = None;
            self.supersedes_code = supersedes;
        }
        self.scale = reader.integer()?;

        let count = reader.count()?;
        self.characters = Vec::with_capacity(count);
        for _ in 0..count {
            let ascii_code = reader.integer()?;
            let origin = GridPoint::new(reader.integer()?, reader.integer()?);
            let moves = reader.count()?;
            let mut movements = Vec::with_capacity(moves);
            for _ in 0..moves {
                let pen_up = reader.boolean()?;
                let location = GridPoint::new(reader.integer()?, reader.integer()?);
                movements.push(PenMovement { pen_up, location });
            }
            self.characters.push(FontCharacter {
                ascii_code,
                origin,
                movements,
            });
        }
        Ok(())
    }

    fn write_parameters(&self, writer: &mut ParameterWriter) {
        writer.integer(self.font_code).string(&self.name);
        match self.supersedes_font {
            Some(font) => writer.negated_pointer(font),
            None if self.supersedes_code == 0 => writer.absent(),
            None => writer.integer(self.supersedes_code),
        };
        writer
            .integer(self.scale)
            .integer(self.characters.len() as i64);
        for character in &self.characters {
            writer
                .integer(character.ascii_code)
                .integer(character.origin.x)
                .integer(character.origin.y)
                .integer(character.movements.len() as i64);
            for movement in &character.movements {
                writer
                    .boolean(movement.pen_up)
                    .integer(movement.location.x)
                    .integer(movement.location.y);
            }
        }
    }

    fn references(&self, refs: &mut Vec<EntityId>) {
        refs.extend(self.supersedes_font);
    }

    fn link(&mut self, linker: &mut Linker<'_>) {
        self.supersedes_font = linker.typed(self.supersedes_font, 310, "superseded font");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::iges::{tokenize, Delimiters};
    use encoding_rs::WINDOWS_1252;

    #[test]
    fn test_read_glyphs() {
        let fields = tokenize(
            b"310,1,5HSTD-1,-3,8,1,65,11,0,2,1,4,8,0,8,0;",
            Delimiters::default(),
            WINDOWS_1252,
        )
        .unwrap();
        let mut reader = ParameterReader::new(&fields, 5);
        reader.integer().unwrap();

        let mut font = TextFontDefinition::new();
        font.read_parameters(&mut reader).unwrap();
        assert_eq!(font.font_code, 1);
        assert_eq!(font.name, "STD-1");
        assert_eq!(font.supersedes_font, Some(EntityId::new(1)));
        assert_eq!(font.supersedes_code, 0);
        assert_eq!(font.scale, 8);

        let glyph = font.character(65).unwrap();
        assert_eq!(glyph.origin, GridPoint::new(11, 0));
        assert_eq!(
            glyph.movements,
            vec![
                PenMovement { pen_up: true, location: GridPoint::new(4, 8) },
                PenMovement { pen_up: false, location: GridPoint::new(8, 0) },
            ]
        );
    }

    #[test]
    fn test_supersedes_code() {
        let fields = tokenize(b"310,2,0H,1001,4,0;", Delimiters::default(), WINDOWS_1252).unwrap();
        let mut reader = ParameterReader::new(&fields, 1);
        reader.integer().unwrap();

        let mut font = TextFontDefinition::new();
        font.read_parameters(&mut reader).unwrap();
        assert_eq!(font.supersedes_code, 1001);
        assert_eq!(font.supersedes_font, None);
        assert!(font.characters.is_empty());
    }
}
