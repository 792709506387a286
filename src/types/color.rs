//! Color representation for IGES entities

use super::EntityId;
use std::fmt;

/// Predefined IGES color numbers (directory field 13)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorNumber {
    /// No color assigned (0)
    #[default]
    Default,
    Black,
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    White,
}

impl ColorNumber {
    /// Decode a color number; values outside 0..=8 fall back to `Default`
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => ColorNumber::Black,
            2 => ColorNumber::Red,
            3 => ColorNumber::Green,
            4 => ColorNumber::Blue,
            5 => ColorNumber::Yellow,
            6 => ColorNumber::Magenta,
            7 => ColorNumber::Cyan,
            8 => ColorNumber::White,
            _ => ColorNumber::Default,
        }
    }

    /// The numeric code written to the directory entry
    pub fn code(&self) -> i64 {
        match self {
            ColorNumber::Default => 0,
            ColorNumber::Black => 1,
            ColorNumber::Red => 2,
            ColorNumber::Green => 3,
            ColorNumber::Blue => 4,
            ColorNumber::Yellow => 5,
            ColorNumber::Magenta => 6,
            ColorNumber::Cyan => 7,
            ColorNumber::White => 8,
        }
    }
}

/// Entity color: a predefined number or a color definition entity
///
/// On disk a negative value is a pointer to a Color Definition (314).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Number(ColorNumber),
    Custom(EntityId),
}

impl Color {
    pub const DEFAULT: Color = Color::Number(ColorNumber::Default);
    pub const BLACK: Color = Color::Number(ColorNumber::Black);
    pub const RED: Color = Color::Number(ColorNumber::Red);
    pub const GREEN: Color = Color::Number(ColorNumber::Green);
    pub const BLUE: Color = Color::Number(ColorNumber::Blue);
    pub const YELLOW: Color = Color::Number(ColorNumber::Yellow);
    pub const MAGENTA: Color = Color::Number(ColorNumber::Magenta);
    pub const CYAN: Color = Color::Number(ColorNumber::Cyan);
    pub const WHITE: Color = Color::Number(ColorNumber::White);

    /// The color definition entity, if any
    pub fn definition(&self) -> Option<EntityId> {
        match self {
            Color::Custom(id) => Some(*id),
            Color::Number(_) => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::DEFAULT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Number(n) => write!(f, "{:?}", n),
            Color::Custom(id) => write!(f, "Custom({})", id),
        }
    }
}
