//! File-wide settings from the Global section

use crate::io::iges::Delimiters;
use crate::types::{DraftingStandard, IgesVersion, Units};
use chrono::{Local, NaiveDateTime, Timelike};

/// Global section values, in field order
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalSection {
    /// Fields 1 and 2
    pub delimiters: Delimiters,
    /// Product identification from the sending system (field 3)
    pub identification: String,
    pub full_file_name: String,
    pub system_identifier: String,
    pub system_version: String,
    /// Bits in an integer (field 7)
    pub integer_size: i64,
    pub single_size: i64,
    pub decimal_digits: i64,
    pub double_magnitude: i64,
    pub double_precision: i64,
    /// Product identification for the receiving system (field 12)
    pub receiving_identifier: String,
    pub model_space_scale: f64,
    pub units: Units,
    /// Units name when `units` is [`Units::Custom`]
    pub custom_units: String,
    pub max_line_weight_graduations: i64,
    pub max_line_weight: f64,
    /// Time the file was generated (field 18)
    pub timestamp: NaiveDateTime,
    pub minimum_resolution: f64,
    pub max_coordinate_value: f64,
    pub author: String,
    pub organization: String,
    pub version: IgesVersion,
    pub drafting_standard: DraftingStandard,
    /// Time the model was last modified (field 25)
    pub modified_time: NaiveDateTime,
    pub application_protocol: String,
}

impl GlobalSection {
    /// Defaults, time-stamped with the current local time
    pub fn new() -> Self {
        let now = Local::now().naive_local();
        let now = now.with_nanosecond(0).unwrap_or(now);
        Self::with_time(now)
    }

    /// Defaults with both time stamps set to `time`
    pub fn with_time(time: NaiveDateTime) -> Self {
        GlobalSection {
            delimiters: Delimiters::default(),
            identification: String::new(),
            full_file_name: String::new(),
            system_identifier: String::new(),
            system_version: String::new(),
            integer_size: 32,
            single_size: 8,
            decimal_digits: 23,
            double_magnitude: 11,
            double_precision: 52,
            receiving_identifier: String::new(),
            model_space_scale: 1.0,
            units: Units::Inches,
            custom_units: String::new(),
            max_line_weight_graduations: 0,
            max_line_weight: 1.0,
            timestamp: time,
            minimum_resolution: 1e-10,
            max_coordinate_value: 0.0,
            author: String::new(),
            organization: String::new(),
            version: IgesVersion::V5_3,
            drafting_standard: DraftingStandard::None,
            modified_time: time,
            application_protocol: String::new(),
        }
    }
}

impl Default for GlobalSection {
    fn default() -> Self {
        Self::new()
    }
}
