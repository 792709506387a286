//! Enumerated global-section settings

/// Model units (global field 14)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Units {
    #[default]
    Inches,
    Millimeters,
    /// Named by the custom units field (global field 15)
    Custom,
    Feet,
    Miles,
    Meters,
    Kilometers,
    Mils,
    Microns,
    Centimeters,
    Microinches,
}

impl Units {
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            1 => Units::Inches,
            2 => Units::Millimeters,
            3 => Units::Custom,
            4 => Units::Feet,
            5 => Units::Miles,
            6 => Units::Meters,
            7 => Units::Kilometers,
            8 => Units::Mils,
            9 => Units::Microns,
            10 => Units::Centimeters,
            11 => Units::Microinches,
            _ => return None,
        })
    }

    pub fn code(&self) -> i64 {
        *self as i64 + 1
    }
}

/// IGES version the file conforms to (global field 23)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum IgesVersion {
    V1_0,
    AnsiY14_26m1981,
    V2_0,
    V3_0,
    AsmeAnsiY14_26m1987,
    V4_0,
    AsmeY14_26m1989,
    V5_0,
    V5_1,
    V5_2,
    #[default]
    V5_3,
}

impl IgesVersion {
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            1 => IgesVersion::V1_0,
            2 => IgesVersion::AnsiY14_26m1981,
            3 => IgesVersion::V2_0,
            4 => IgesVersion::V3_0,
            5 => IgesVersion::AsmeAnsiY14_26m1987,
            6 => IgesVersion::V4_0,
            7 => IgesVersion::AsmeY14_26m1989,
            8 => IgesVersion::V5_0,
            9 => IgesVersion::V5_1,
            10 => IgesVersion::V5_2,
            11 => IgesVersion::V5_3,
            _ => return None,
        })
    }

    pub fn code(&self) -> i64 {
        *self as i64 + 1
    }
}

/// Drafting standard (global field 24)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DraftingStandard {
    #[default]
    None,
    Iso,
    Afnor,
    Ansi,
    Bsi,
    Csa,
    Din,
    Jis,
}

impl DraftingStandard {
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            0 => DraftingStandard::None,
            1 => DraftingStandard::Iso,
            2 => DraftingStandard::Afnor,
            3 => DraftingStandard::Ansi,
            4 => DraftingStandard::Bsi,
            5 => DraftingStandard::Csa,
            6 => DraftingStandard::Din,
            7 => DraftingStandard::Jis,
            _ => return None,
        })
    }

    pub fn code(&self) -> i64 {
        *self as i64
    }
}
