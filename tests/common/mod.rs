//! Shared test utilities for igesrust integration tests.
//!
//! Helpers to lay out fixed-column records, read files from text, and
//! render written files back to text.

#![allow(dead_code)]

pub mod builders;
pub mod comparison;

use igesrust::entities::EntityType;
use igesrust::{IgesFile, IgesReader};
use std::path::PathBuf;

pub use builders::FileText;

// ===========================================================================
// Record layout
// ===========================================================================

/// One 80-column record with its newline.
pub fn record(content: &str, section: char, sequence: usize) -> String {
    format!("{:<72}{}{:>7}\n", content, section, sequence)
}

/// Nine directory fields, each right-aligned in 8 columns.
pub fn directory_fields(fields: [&str; 9]) -> String {
    fields.iter().map(|f| format!("{:>8}", f)).collect()
}

/// Parameter record content: 64 data columns then the pointer-back.
pub fn parameter_content(data: &str, owner: Option<usize>) -> String {
    match owner {
        Some(owner) => format!("{:<64}{:>8}", data, owner),
        None => data.to_string(),
    }
}

// ===========================================================================
// Read / write helpers
// ===========================================================================

/// Read a file from text, panicking with the error on failure.
pub fn read_text(text: &str) -> IgesFile {
    IgesReader::from_bytes(text.as_bytes())
        .read()
        .unwrap_or_else(|e| panic!("failed to read file: {e}"))
}

/// Read a file that must hold exactly one top-level entity.
pub fn parse_single_entity(text: &str) -> EntityType {
    let file = read_text(text);
    assert_eq!(file.root_ids().len(), 1, "expected one top-level entity");
    let entity = file
        .roots()
        .next()
        .cloned()
        .expect("root entity should exist");
    entity
}

/// Write a file and return the text.
pub fn write_text(file: &IgesFile) -> String {
    let bytes = file.to_bytes().unwrap_or_else(|e| panic!("failed to write file: {e}"));
    String::from_utf8(bytes).expect("written file should be ASCII")
}

/// Lines of a written file carrying the given section tag, without the
/// tag and sequence columns.
pub fn section_lines(text: &str, section: char) -> Vec<String> {
    text.lines()
        .filter(|l| l.len() == 80 && l.as_bytes()[72] == section as u8)
        .map(|l| l[..72].to_string())
        .collect()
}

/// Resolve path into the `test_output/` directory, creating it if needed.
pub fn test_output_path(filename: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    let _ = std::fs::create_dir_all(&dir);
    dir.join(filename)
}

// ===========================================================================
// Round trip
// ===========================================================================

/// Write, read back and write again; both outputs must be identical.
/// Returns the file read back.
pub fn assert_byte_round_trip(file: &IgesFile) -> IgesFile {
    let first = file.to_bytes().expect("first write");
    let read = IgesFile::from_reader(first.as_slice()).expect("read back");
    let second = read.to_bytes().expect("second write");
    assert_eq!(
        String::from_utf8_lossy(&first),
        String::from_utf8_lossy(&second),
        "rewritten file differs"
    );
    read
}
