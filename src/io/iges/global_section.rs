//! Global section codec
//!
//! The first two fields declare the delimiters used by everything after
//! them, so they are scanned by hand before the rest of the section goes
//! through the regular tokenizer.

use super::parameter::{tokenize, Delimiters, ParameterReader, ParameterWriter, ValueError};
use crate::error::{IgesError, Result};
use crate::global::GlobalSection;
use crate::types::{DraftingStandard, IgesVersion, Units};
use chrono::NaiveDateTime;
use encoding_rs::Encoding;

const TIMESTAMP_FORMAT: &str = "%Y%m%d.%H%M%S";

fn invalid(field: usize, reason: impl Into<String>) -> IgesError {
    IgesError::InvalidGlobal {
        field,
        reason: reason.into(),
    }
}

fn skip_blanks(data: &[u8], mut pos: usize) -> usize {
    while data.get(pos) == Some(&b' ') {
        pos += 1;
    }
    pos
}

/// One delimiter declaration: `1H<c>` or empty for the default
fn delimiter_declaration(data: &[u8], pos: usize, field: usize, default: u8) -> Result<(u8, usize)> {
    let pos = skip_blanks(data, pos);
    if data[pos.min(data.len())..].starts_with(b"1H") {
        let delimiter = *data
            .get(pos + 2)
            .ok_or_else(|| invalid(field, "delimiter declaration is cut short"))?;
        Ok((delimiter, pos + 3))
    } else {
        Ok((default, pos))
    }
}

/// Scan the delimiter preamble. Returns the delimiters and the offset of
/// field 3, or `None` when the section ends after the preamble.
pub fn parse_delimiters(data: &[u8]) -> Result<(Delimiters, Option<usize>)> {
    let start = skip_blanks(data, 0);
    if start >= data.len() || data[start] == Delimiters::DEFAULT_RECORD {
        return Ok((Delimiters::default(), None));
    }

    let (field, pos) = delimiter_declaration(data, start, 1, Delimiters::DEFAULT_FIELD)?;
    let pos = skip_blanks(data, pos);
    match data.get(pos) {
        Some(&b) if b == field => {}
        Some(&b) => {
            return Err(invalid(
                1,
                format!("expected field delimiter '{}', found '{}'", field as char, b as char),
            ))
        }
        None => return Ok((Delimiters::new(field, Delimiters::DEFAULT_RECORD), None)),
    }

    let (record, pos) = delimiter_declaration(data, pos + 1, 2, Delimiters::DEFAULT_RECORD)?;
    if record == field {
        return Err(invalid(2, "field and record delimiters are the same"));
    }
    let delimiters = Delimiters::new(field, record);

    let pos = skip_blanks(data, pos);
    match data.get(pos) {
        Some(&b) if b == field => Ok((delimiters, Some(pos + 1))),
        Some(&b) if b == record => Ok((delimiters, None)),
        None => Ok((delimiters, None)),
        Some(&b) => Err(invalid(
            2,
            format!("unexpected '{}' after delimiter declarations", b as char),
        )),
    }
}

fn parse_timestamp(text: &str, field: usize) -> Result<Option<NaiveDateTime>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    let full = if text.len() == 13 {
        format!("19{}", text)
    } else {
        text.to_string()
    };
    NaiveDateTime::parse_from_str(&full, TIMESTAMP_FORMAT)
        .map(Some)
        .map_err(|e| invalid(field, format!("invalid time stamp '{}': {}", text, e)))
}

/// Decode the joined Global section content. Recovered anomalies are
/// returned as warnings.
pub fn read_global(
    data: &[u8],
    encoding: &'static Encoding,
) -> Result<(GlobalSection, Vec<String>)> {
    let mut global = GlobalSection::new();
    let (delimiters, rest) = parse_delimiters(data)?;
    global.delimiters = delimiters;

    let fields = match rest {
        Some(offset) => tokenize(&data[offset..], delimiters, encoding)
            .map_err(|e| invalid(e.position + 2, e.reason))?,
        None => Vec::new(),
    };

    let mut reader = ParameterReader::new(&fields, 0);
    let mut warnings = Vec::new();
    let to_global = |e: IgesError| match e {
        IgesError::InvalidParameter {
            position, reason, ..
        } => invalid(position + 2, reason),
        other => other,
    };

    global.identification = reader.string().map_err(to_global)?;
    global.full_file_name = reader.string().map_err(to_global)?;
    global.system_identifier = reader.string().map_err(to_global)?;
    global.system_version = reader.string().map_err(to_global)?;
    global.integer_size = reader.integer_or(global.integer_size).map_err(to_global)?;
    global.single_size = reader.integer_or(global.single_size).map_err(to_global)?;
    global.decimal_digits = reader.integer_or(global.decimal_digits).map_err(to_global)?;
    global.double_magnitude = reader.integer_or(global.double_magnitude).map_err(to_global)?;
    global.double_precision = reader.integer_or(global.double_precision).map_err(to_global)?;
    global.receiving_identifier = reader.string().map_err(to_global)?;
    global.model_space_scale = reader.real_or(global.model_space_scale).map_err(to_global)?;

    let units = reader.integer_or(global.units.code()).map_err(to_global)?;
    global.units = Units::from_code(units).unwrap_or_else(|| {
        warnings.push(format!("unknown units code {}, using inches", units));
        Units::Inches
    });
    global.custom_units = reader.string().map_err(to_global)?;
    global.max_line_weight_graduations = reader
        .integer_or(global.max_line_weight_graduations)
        .map_err(to_global)?;
    global.max_line_weight = reader.real_or(global.max_line_weight).map_err(to_global)?;
    if let Some(time) = parse_timestamp(&reader.string().map_err(to_global)?, 18)? {
        global.timestamp = time;
    }
    global.minimum_resolution = reader.real_or(global.minimum_resolution).map_err(to_global)?;
    global.max_coordinate_value = reader
        .real_or(global.max_coordinate_value)
        .map_err(to_global)?;
    global.author = reader.string().map_err(to_global)?;
    global.organization = reader.string().map_err(to_global)?;

    let version = reader.integer_or(global.version.code()).map_err(to_global)?;
    global.version = IgesVersion::from_code(version).unwrap_or_else(|| {
        warnings.push(format!("unknown IGES version code {}, using 5.3", version));
        IgesVersion::V5_3
    });
    let standard = reader.integer().map_err(to_global)?;
    global.drafting_standard = DraftingStandard::from_code(standard).unwrap_or_else(|| {
        warnings.push(format!("unknown drafting standard code {}", standard));
        DraftingStandard::None
    });
    global.modified_time = match parse_timestamp(&reader.string().map_err(to_global)?, 25)? {
        Some(time) => time,
        None => global.timestamp,
    };
    global.application_protocol = reader.string().map_err(to_global)?;

    warnings.extend(
        reader
            .take_warnings()
            .into_iter()
            .map(|w| format!("global section: {}", w)),
    );
    Ok((global, warnings))
}

fn check_delimiter(delimiter: u8, field: usize) -> Result<()> {
    if !delimiter.is_ascii_graphic() || delimiter.is_ascii_digit() || delimiter == b'H' {
        return Err(invalid(
            field,
            format!("'{}' cannot be used as a delimiter", delimiter.escape_ascii()),
        ));
    }
    Ok(())
}

/// Encode the Global section into content lines of `width` columns.
/// Every field is written; empty strings are absent.
pub fn write_global(
    global: &GlobalSection,
    encoding: &'static Encoding,
    width: usize,
) -> Result<Vec<Vec<u8>>> {
    let delimiters = global.delimiters;
    check_delimiter(delimiters.field, 1)?;
    check_delimiter(delimiters.record, 2)?;
    if delimiters.field == delimiters.record {
        return Err(invalid(2, "field and record delimiters are the same"));
    }

    let mut writer = ParameterWriter::new();
    writer
        .string(&(delimiters.field as char).to_string())
        .string(&(delimiters.record as char).to_string())
        .string(&global.identification)
        .string(&global.full_file_name)
        .string(&global.system_identifier)
        .string(&global.system_version)
        .integer(global.integer_size)
        .integer(global.single_size)
        .integer(global.decimal_digits)
        .integer(global.double_magnitude)
        .integer(global.double_precision)
        .string(&global.receiving_identifier)
        .real(global.model_space_scale)
        .integer(global.units.code())
        .string(&global.custom_units)
        .integer(global.max_line_weight_graduations)
        .real(global.max_line_weight)
        .string(&global.timestamp.format(TIMESTAMP_FORMAT).to_string())
        .real(global.minimum_resolution)
        .real(global.max_coordinate_value)
        .string(&global.author)
        .string(&global.organization)
        .integer(global.version.code())
        .integer(global.drafting_standard.code())
        .string(&global.modified_time.format(TIMESTAMP_FORMAT).to_string())
        .string(&global.application_protocol);

    let tokens = writer
        .to_tokens(delimiters, encoding, |_| None)
        .map_err(|e| match e {
            ValueError::Unencodable { .. } => IgesError::Encoding(e.to_string()),
            ValueError::NonFinite { position, .. } | ValueError::UnassignedPointer { position, .. } => {
                invalid(position, e.to_string())
            }
        })?;
    Ok(super::parameter::wrap_tokens(&tokens, width, width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use encoding_rs::WINDOWS_1252;

    fn time(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn lines(global: &GlobalSection) -> Vec<String> {
        write_global(global, WINDOWS_1252, 72)
            .unwrap()
            .into_iter()
            .map(|l| String::from_utf8(l).unwrap())
            .collect()
    }

    #[test]
    fn test_parse_default_delimiters() {
        let (delimiters, rest) = parse_delimiters(b"1H,,1H;,4Habcd;").unwrap();
        assert_eq!(delimiters, Delimiters::default());
        assert_eq!(rest, Some(8));

        let (delimiters, rest) = parse_delimiters(b",,4Habcd;").unwrap();
        assert_eq!(delimiters, Delimiters::default());
        assert_eq!(rest, Some(2));
    }

    #[test]
    fn test_parse_custom_delimiters() {
        let (delimiters, rest) = parse_delimiters(b"1H//1H##").unwrap();
        assert_eq!(delimiters, Delimiters::new(b'/', b'#'));
        assert_eq!(rest, None);

        let (delimiters, rest) = parse_delimiters(b"  1H//1H#/8HIxMilia#").unwrap();
        assert_eq!(delimiters, Delimiters::new(b'/', b'#'));
        assert_eq!(rest, Some(10));
    }

    #[test]
    fn test_parse_empty_section() {
        assert_eq!(parse_delimiters(b"").unwrap(), (Delimiters::default(), None));
        assert_eq!(parse_delimiters(b";").unwrap(), (Delimiters::default(), None));
        assert_eq!(
            parse_delimiters(b"        ").unwrap(),
            (Delimiters::default(), None)
        );
    }

    #[test]
    fn test_parse_bad_preamble() {
        assert!(matches!(
            parse_delimiters(b"1H,x"),
            Err(IgesError::InvalidGlobal { field: 1, .. })
        ));
        assert!(matches!(
            parse_delimiters(b"1H,,1H,,"),
            Err(IgesError::InvalidGlobal { field: 2, .. })
        ));
    }

    #[test]
    fn test_read_specific_values() {
        let text = "1H,,1H;,10Hidentifier,28HC:\\path\\to\\full\\filename.igs,4Habcd,3H1.0,16,7,\
                    22,10,51,6Hident2,0.75,10,,4,0.8,15H20001225.130811,0.001,500.,5HBrett,\
                    7HIxMilia,8,4,15H19870508.123456,8Hprotocol;";
        let (global, warnings) = read_global(text.as_bytes(), WINDOWS_1252).unwrap();
        assert!(warnings.is_empty());
        assert_eq!(global.identification, "identifier");
        assert_eq!(global.full_file_name, "C:\\path\\to\\full\\filename.igs");
        assert_eq!(global.system_identifier, "abcd");
        assert_eq!(global.system_version, "1.0");
        assert_eq!(global.integer_size, 16);
        assert_eq!(global.single_size, 7);
        assert_eq!(global.decimal_digits, 22);
        assert_eq!(global.double_magnitude, 10);
        assert_eq!(global.double_precision, 51);
        assert_eq!(global.receiving_identifier, "ident2");
        assert_eq!(global.model_space_scale, 0.75);
        assert_eq!(global.units, Units::Centimeters);
        assert_eq!(global.custom_units, "");
        assert_eq!(global.max_line_weight_graduations, 4);
        assert_eq!(global.max_line_weight, 0.8);
        assert_eq!(global.timestamp, time(2000, 12, 25, 13, 8, 11));
        assert_eq!(global.minimum_resolution, 0.001);
        assert_eq!(global.max_coordinate_value, 500.0);
        assert_eq!(global.author, "Brett");
        assert_eq!(global.organization, "IxMilia");
        assert_eq!(global.version, IgesVersion::V5_0);
        assert_eq!(global.drafting_standard, DraftingStandard::Bsi);
        assert_eq!(global.modified_time, time(1987, 5, 8, 12, 34, 56));
        assert_eq!(global.application_protocol, "protocol");
    }

    #[test]
    fn test_read_short_timestamp() {
        let text = "1H,,1H;,,,,,32,8,23,11,52,,1.,1,,0,1.,13H870508.123456;";
        let (global, _) = read_global(text.as_bytes(), WINDOWS_1252).unwrap();
        assert_eq!(global.timestamp, time(1987, 5, 8, 12, 34, 56));
        assert_eq!(global.modified_time, global.timestamp);
    }

    #[test]
    fn test_read_bad_timestamp() {
        let text = "1H,,1H;,,,,,32,8,23,11,52,,1.,1,,0,1.,15H2000122X.130811;";
        assert!(matches!(
            read_global(text.as_bytes(), WINDOWS_1252),
            Err(IgesError::InvalidGlobal { field: 18, .. })
        ));
    }

    #[test]
    fn test_read_bad_number_names_field() {
        let text = "1H,,1H;,,,,,abc;";
        assert!(matches!(
            read_global(text.as_bytes(), WINDOWS_1252),
            Err(IgesError::InvalidGlobal { field: 7, .. })
        ));
    }

    #[test]
    fn test_unknown_units_warns() {
        let text = "1H,,1H;,,,,,32,8,23,11,52,,1.,99;";
        let (global, warnings) = read_global(text.as_bytes(), WINDOWS_1252).unwrap();
        assert_eq!(global.units, Units::Inches);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_write_default_global() {
        let global = GlobalSection::with_time(time(2000, 12, 25, 13, 8, 5));
        assert_eq!(
            lines(&global),
            vec![
                "1H,,1H;,,,,,32,8,23,11,52,,1.,1,,0,1.,15H20001225.130805,1E-10,0.,,,11,",
                "0,15H20001225.130805,;",
            ]
        );
    }

    #[test]
    fn test_write_custom_delimiters() {
        let mut global = GlobalSection::with_time(time(2000, 1, 1, 0, 0, 0));
        global.delimiters = Delimiters::new(b'/', b'#');
        let text = lines(&global).concat();
        assert!(text.starts_with("1H//1H#/"));
        assert!(text.ends_with("/#"));
    }

    #[test]
    fn test_write_rejects_bad_delimiters() {
        let mut global = GlobalSection::with_time(time(2000, 1, 1, 0, 0, 0));
        global.delimiters = Delimiters::new(b' ', b';');
        assert!(matches!(
            write_global(&global, WINDOWS_1252, 72),
            Err(IgesError::InvalidGlobal { field: 1, .. })
        ));
    }

    #[test]
    fn test_write_non_finite_scale() {
        let mut global = GlobalSection::with_time(time(2000, 1, 1, 0, 0, 0));
        global.model_space_scale = f64::NAN;
        assert!(matches!(
            write_global(&global, WINDOWS_1252, 72),
            Err(IgesError::InvalidGlobal { field: 13, .. })
        ));
    }
}
