//! Fixed-column physical records
//!
//! Every line of an IGES file is 80 columns: 72 columns of content, the
//! section letter in column 73 and a right-aligned sequence number in
//! columns 74-80.

use crate::error::{IgesError, Result};
use std::fmt;

/// Width of a physical record, excluding the line terminator
pub const RECORD_WIDTH: usize = 80;

/// Width of the content field
pub const CONTENT_WIDTH: usize = 72;

/// Width of the parameter data field in Parameter records; columns 65-72
/// hold the pointer back to the owning directory entry.
pub const PARAMETER_DATA_WIDTH: usize = 64;

/// Width of one directory entry field
pub const DIRECTORY_FIELD_WIDTH: usize = 8;

/// The five file sections, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Start,
    Global,
    Directory,
    Parameter,
    Terminate,
}

impl Section {
    /// Section from its column-73 letter
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'S' => Some(Section::Start),
            b'G' => Some(Section::Global),
            b'D' => Some(Section::Directory),
            b'P' => Some(Section::Parameter),
            b'T' => Some(Section::Terminate),
            _ => None,
        }
    }

    /// Column-73 letter
    pub fn tag(&self) -> u8 {
        match self {
            Section::Start => b'S',
            Section::Global => b'G',
            Section::Directory => b'D',
            Section::Parameter => b'P',
            Section::Terminate => b'T',
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag() as char)
    }
}

/// One decoded physical record
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Columns 1-72
    pub content: Vec<u8>,
    pub section: Section,
    pub sequence: usize,
    /// 1-based physical line number in the source
    pub line: usize,
}

impl Record {
    /// Decode one physical line (without its `\n`). A trailing `\r` is
    /// tolerated.
    pub fn parse(bytes: &[u8], line: usize) -> Result<Self> {
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
        if bytes.len() != RECORD_WIDTH {
            return Err(IgesError::malformed(
                line,
                format!("record is {} columns wide, expected {}", bytes.len(), RECORD_WIDTH),
            ));
        }

        let tag = bytes[CONTENT_WIDTH];
        let section = Section::from_tag(tag).ok_or_else(|| {
            IgesError::malformed(line, format!("unknown section tag '{}'", tag as char))
        })?;

        let sequence_field = &bytes[CONTENT_WIDTH + 1..];
        let sequence = std::str::from_utf8(sequence_field)
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .ok_or_else(|| {
                IgesError::malformed(
                    line,
                    format!(
                        "invalid sequence number '{}'",
                        String::from_utf8_lossy(sequence_field)
                    ),
                )
            })?;

        Ok(Record {
            content: bytes[..CONTENT_WIDTH].to_vec(),
            section,
            sequence,
            line,
        })
    }

    /// Parameter data columns (1-64)
    pub fn parameter_data(&self) -> &[u8] {
        &self.content[..PARAMETER_DATA_WIDTH]
    }

    /// Pointer-back column of a Parameter record (65-72); `None` when blank
    /// or not numeric
    pub fn parameter_owner(&self) -> Option<usize> {
        std::str::from_utf8(&self.content[PARAMETER_DATA_WIDTH..])
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
    }
}

/// Split a byte buffer into records. Empty lines are skipped.
pub fn parse_records(data: &[u8]) -> Result<Vec<Record>> {
    let mut records = Vec::new();
    for (index, line) in data.split(|&b| b == b'\n').enumerate() {
        if line.is_empty() || line == b"\r" {
            continue;
        }
        records.push(Record::parse(line, index + 1)?);
    }
    Ok(records)
}

/// Concatenate the first `width` content columns of each record without
/// trimming padding
pub fn join_section<'a, I>(records: I, width: usize) -> Vec<u8>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut joined = Vec::new();
    for record in records {
        joined.extend_from_slice(&record.content[..width.min(record.content.len())]);
    }
    joined
}

/// Format one physical record, terminated by a single `\n`.
///
/// Content longer than 72 columns is a caller bug and is cut.
pub fn format_line(content: &[u8], section: Section, sequence: usize) -> Vec<u8> {
    let mut line = Vec::with_capacity(RECORD_WIDTH + 1);
    let content = &content[..content.len().min(CONTENT_WIDTH)];
    line.extend_from_slice(content);
    line.resize(CONTENT_WIDTH, b' ');
    line.push(section.tag());
    line.extend_from_slice(format!("{:>7}", sequence).as_bytes());
    line.push(b'\n');
    line
}

/// Right-align a value in a fixed-width field, or `None` if it does not fit
pub fn right_align(value: &str, width: usize) -> Option<String> {
    if value.len() > width {
        None
    } else {
        Some(format!("{}{}", " ".repeat(width - value.len()), value))
    }
}
