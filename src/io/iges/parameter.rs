//! Free-field parameter grammar
//!
//! Global and Parameter data are sequences of fields separated by a field
//! delimiter and closed by a record delimiter. A field is empty (absent), a
//! plain value (integer, real, pointer) or a Hollerith string `nH<n bytes>`
//! whose content is taken by count, so delimiters inside it are data.

use crate::error::{IgesError, Result};
use crate::types::{EntityId, Vector3};
use encoding_rs::Encoding;
use nom::bytes::complete::{take, take_till};
use nom::character::complete::{char, space0};
use nom::sequence::terminated;
use nom::IResult;
use thiserror::Error;

/// Field and record delimiters declared by the global section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub field: u8,
    pub record: u8,
}

impl Delimiters {
    pub const DEFAULT_FIELD: u8 = b',';
    pub const DEFAULT_RECORD: u8 = b';';

    pub fn new(field: u8, record: u8) -> Self {
        Self { field, record }
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FIELD, Self::DEFAULT_RECORD)
    }
}

/// One tokenized field
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    /// Nothing between two delimiters
    Absent,
    /// Plain value with surrounding whitespace removed
    Value(String),
    /// Decoded Hollerith string content
    Hollerith(String),
}

impl Field {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }
}

/// Tokenizer failure; `position` is the 1-based field number
#[derive(Debug, Clone, PartialEq)]
pub struct TokenError {
    pub position: usize,
    pub reason: String,
}

/// `<count>H`, with leading blanks allowed
fn hollerith_prefix(input: &[u8]) -> IResult<&[u8], u64> {
    let (input, _) = space0(input)?;
    terminated(nom::character::complete::u64, char('H'))(input)
}

fn plain_field(input: &[u8], delimiters: Delimiters) -> IResult<&[u8], &[u8]> {
    take_till(|b| b == delimiters.field || b == delimiters.record)(input)
}

fn hollerith_body(input: &[u8], count: usize) -> IResult<&[u8], &[u8]> {
    take(count)(input)
}

fn skip_blanks(input: &[u8]) -> &[u8] {
    let start = input.iter().position(|b| *b != b' ').unwrap_or(input.len());
    &input[start..]
}

/// Split parameter text into fields, stopping at the record delimiter or
/// the end of the input, whichever comes first.
pub fn tokenize(
    input: &[u8],
    delimiters: Delimiters,
    encoding: &'static Encoding,
) -> std::result::Result<Vec<Field>, TokenError> {
    let mut fields = Vec::new();
    let mut rest = input;

    loop {
        let position = fields.len() + 1;
        let (after, field) = match hollerith_prefix(rest) {
            Ok((body, count)) => {
                let count = usize::try_from(count).unwrap_or(usize::MAX);
                let (after, text) = hollerith_body(body, count).map_err(|_| TokenError {
                    position,
                    reason: format!(
                        "Hollerith string declares {} bytes but only {} remain",
                        count,
                        body.len()
                    ),
                })?;
                let (decoded, _) = encoding.decode_without_bom_handling(text);
                (skip_blanks(after), Field::Hollerith(decoded.into_owned()))
            }
            Err(_) => {
                let (after, raw) = plain_field(rest, delimiters).map_err(|_| TokenError {
                    position,
                    reason: "unreadable field".to_string(),
                })?;
                let text = String::from_utf8_lossy(raw);
                let text = text.trim();
                let field = if text.is_empty() {
                    Field::Absent
                } else {
                    Field::Value(text.to_string())
                };
                (after, field)
            }
        };

        fields.push(field);
        match after.first() {
            None => break,
            Some(&b) if b == delimiters.record => break,
            Some(&b) if b == delimiters.field => rest = &after[1..],
            Some(&b) => {
                return Err(TokenError {
                    position,
                    reason: format!("unexpected '{}' after Hollerith string", b as char),
                })
            }
        }
    }

    Ok(fields)
}

/// Parse a real, accepting `E`/`D` exponents in either case
pub fn parse_real(text: &str) -> Option<f64> {
    let normalized: String = text
        .trim()
        .chars()
        .map(|c| if c == 'D' || c == 'd' { 'E' } else { c })
        .collect();
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an integer; integral values in real notation (`3.`) are accepted
pub fn parse_integer(text: &str) -> Option<i64> {
    let text = text.trim();
    if let Ok(value) = text.parse::<i64>() {
        return Some(value);
    }
    let real = parse_real(text)?;
    if real.fract() == 0.0 && real.abs() <= i64::MAX as f64 {
        Some(real as i64)
    } else {
        None
    }
}

/// Shortest round-tripping text for a real, always carrying a decimal
/// point or an exponent (`1.`, `0.75`, `1E-10`). `None` for NaN/infinity.
pub fn format_real(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let text = format!("{:?}", value).replace('e', "E");
    let (mantissa, exponent) = match text.find('E') {
        Some(i) => text.split_at(i),
        None => (text.as_str(), ""),
    };
    let mantissa = match mantissa.strip_suffix(".0") {
        Some(whole) => format!("{}.", whole),
        None => mantissa.to_string(),
    };
    Some(format!("{}{}", mantissa, exponent))
}

/// Hollerith encoding of a string in the given encoding
pub fn encode_hollerith(text: &str, encoding: &'static Encoding) -> Option<Vec<u8>> {
    let (bytes, _, had_errors) = encoding.encode(text);
    if had_errors {
        return None;
    }
    let mut out = format!("{}H", bytes.len()).into_bytes();
    out.extend_from_slice(&bytes);
    Some(out)
}

/// Sequential typed access to one entity's fields
///
/// Reading past the last field yields absent values, so optional trailing
/// parameters take their defaults.
pub struct ParameterReader<'a> {
    fields: &'a [Field],
    index: usize,
    directory_index: usize,
    warnings: Vec<String>,
}

impl<'a> ParameterReader<'a> {
    pub fn new(fields: &'a [Field], directory_index: usize) -> Self {
        Self {
            fields,
            index: 0,
            directory_index,
            warnings: Vec::new(),
        }
    }

    /// Directory index of the entry being decoded
    pub fn directory_index(&self) -> usize {
        self.directory_index
    }

    /// Number of fields consumed so far
    pub fn position(&self) -> usize {
        self.index
    }

    pub fn has_more(&self) -> bool {
        self.index < self.fields.len()
    }

    /// Unconsumed fields
    pub fn remaining(&self) -> &'a [Field] {
        &self.fields[self.index.min(self.fields.len())..]
    }

    pub fn skip_remaining(&mut self) {
        self.index = self.fields.len();
    }

    /// Drain recovered anomalies recorded while reading
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }

    fn next_field(&mut self) -> Option<&'a Field> {
        let field = self.fields.get(self.index);
        self.index += 1;
        field
    }

    fn error(&self, reason: impl Into<String>) -> IgesError {
        IgesError::InvalidParameter {
            directory_index: self.directory_index,
            position: self.index,
            reason: reason.into(),
        }
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(format!(
            "directory entry {} parameter {}: {}",
            self.directory_index, self.index, message
        ));
    }

    pub fn integer(&mut self) -> Result<i64> {
        self.integer_or(0)
    }

    pub fn integer_or(&mut self, default: i64) -> Result<i64> {
        match self.next_field() {
            None | Some(Field::Absent) => Ok(default),
            Some(Field::Value(text)) => {
                parse_integer(text).ok_or_else(|| self.error(format!("'{}' is not an integer", text)))
            }
            Some(Field::Hollerith(text)) => {
                self.warn(format!("expected an integer, found string '{}'", text));
                Ok(default)
            }
        }
    }

    pub fn real(&mut self) -> Result<f64> {
        self.real_or(0.0)
    }

    pub fn real_or(&mut self, default: f64) -> Result<f64> {
        match self.next_field() {
            None | Some(Field::Absent) => Ok(default),
            Some(Field::Value(text)) => {
                parse_real(text).ok_or_else(|| self.error(format!("'{}' is not a real", text)))
            }
            Some(Field::Hollerith(text)) => {
                self.warn(format!("expected a real, found string '{}'", text));
                Ok(default)
            }
        }
    }

    pub fn string(&mut self) -> Result<String> {
        match self.next_field() {
            None | Some(Field::Absent) => Ok(String::new()),
            Some(Field::Hollerith(text)) => Ok(text.clone()),
            Some(Field::Value(text)) => {
                self.warn(format!("expected a Hollerith string, found '{}'", text));
                Ok(text.clone())
            }
        }
    }

    pub fn boolean(&mut self) -> Result<bool> {
        Ok(self.integer()? != 0)
    }

    pub fn point(&mut self) -> Result<Vector3> {
        self.point_or(Vector3::ZERO)
    }

    pub fn point_or(&mut self, default: Vector3) -> Result<Vector3> {
        Ok(Vector3::new(
            self.real_or(default.x)?,
            self.real_or(default.y)?,
            self.real_or(default.z)?,
        ))
    }

    /// Read a pointer field; zero is "no reference"
    pub fn pointer(&mut self) -> Result<Option<EntityId>> {
        let value = self.integer()?;
        Ok(self.resolve_pointer(value))
    }

    /// Map a directory pointer value to an arena id. Values that can never
    /// designate a directory entry are recorded as warnings.
    pub fn resolve_pointer(&mut self, value: i64) -> Option<EntityId> {
        if value == 0 {
            return None;
        }
        let id = EntityId::from_directory_pointer(value);
        if id.is_none() {
            self.warn(format!("pointer {} does not designate a directory entry", value));
        }
        id
    }

    /// Map a negated pointer (`-n`) to an arena id
    pub fn resolve_negated_pointer(&mut self, value: i64) -> Option<EntityId> {
        self.resolve_pointer(value.checked_neg().unwrap_or(0))
    }

    /// A count followed by that many pointers
    pub fn pointer_list(&mut self) -> Result<Vec<EntityId>> {
        let count = self.count()?;
        let mut ids = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(id) = self.pointer()? {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    /// A non-negative count of items that follow. Every item occupies at
    /// least one field, so a count beyond the fields left is rejected.
    pub fn count(&mut self) -> Result<usize> {
        let value = self.integer()?;
        let count =
            usize::try_from(value).map_err(|_| self.error(format!("negative count {}", value)))?;
        let left = self.remaining().len();
        if count > left {
            return Err(self.error(format!(
                "count {} exceeds the {} fields that follow",
                count, left
            )));
        }
        Ok(count)
    }
}

/// Typed value pushed by an entity when writing
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Absent,
    Integer(i64),
    Real(f64),
    String(String),
    /// Positive directory pointer, renumbered at write time
    Pointer(EntityId),
    /// Pointer written as the negated directory index
    NegatedPointer(EntityId),
    /// Verbatim plain field text, used for opaque entities
    Raw(String),
}

/// Failure to encode a parameter value; `position` is the 1-based field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("parameter {position}: {value} is not a finite real")]
    NonFinite { position: usize, value: f64 },

    #[error("parameter {position}: entity {id} has no directory index")]
    UnassignedPointer { position: usize, id: EntityId },

    #[error("parameter {position}: '{text}' cannot be encoded as {encoding}")]
    Unencodable {
        position: usize,
        text: String,
        encoding: &'static str,
    },
}

static ABSENT: ParameterValue = ParameterValue::Absent;

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    value: ParameterValue,
    default: Option<ParameterValue>,
}

impl Entry {
    fn is_default(&self) -> bool {
        self.default.as_ref() == Some(&self.value)
    }
}

/// Ordered parameter values with default elision
///
/// Values tagged with a default are dropped when they form a trailing run
/// of defaults and written as absent when something non-default follows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterWriter {
    entries: Vec<Entry>,
}

impl ParameterWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, value: ParameterValue, default: Option<ParameterValue>) -> &mut Self {
        self.entries.push(Entry { value, default });
        self
    }

    pub fn absent(&mut self) -> &mut Self {
        self.push(ParameterValue::Absent, None)
    }

    pub fn integer(&mut self, value: i64) -> &mut Self {
        self.push(ParameterValue::Integer(value), None)
    }

    pub fn integer_or(&mut self, value: i64, default: i64) -> &mut Self {
        self.push(
            ParameterValue::Integer(value),
            Some(ParameterValue::Integer(default)),
        )
    }

    pub fn real(&mut self, value: f64) -> &mut Self {
        self.push(ParameterValue::Real(value), None)
    }

    pub fn real_or(&mut self, value: f64, default: f64) -> &mut Self {
        self.push(ParameterValue::Real(value), Some(ParameterValue::Real(default)))
    }

    pub fn string(&mut self, value: &str) -> &mut Self {
        self.push(ParameterValue::String(value.to_string()), None)
    }

    /// String whose default is the empty string
    pub fn optional_string(&mut self, value: &str) -> &mut Self {
        self.push(
            ParameterValue::String(value.to_string()),
            Some(ParameterValue::String(String::new())),
        )
    }

    pub fn boolean(&mut self, value: bool) -> &mut Self {
        self.integer(i64::from(value))
    }

    pub fn point(&mut self, point: Vector3) -> &mut Self {
        self.real(point.x).real(point.y).real(point.z)
    }

    pub fn point_or(&mut self, point: Vector3, default: Vector3) -> &mut Self {
        self.real_or(point.x, default.x)
            .real_or(point.y, default.y)
            .real_or(point.z, default.z)
    }

    /// Pointer field; `None` is written as zero
    pub fn pointer(&mut self, id: Option<EntityId>) -> &mut Self {
        let value = match id {
            Some(id) => ParameterValue::Pointer(id),
            None => ParameterValue::Integer(0),
        };
        self.push(value, None)
    }

    /// Pointer field whose default is "no reference"
    pub fn optional_pointer(&mut self, id: Option<EntityId>) -> &mut Self {
        let value = match id {
            Some(id) => ParameterValue::Pointer(id),
            None => ParameterValue::Integer(0),
        };
        self.push(value, Some(ParameterValue::Integer(0)))
    }

    pub fn negated_pointer(&mut self, id: EntityId) -> &mut Self {
        self.push(ParameterValue::NegatedPointer(id), None)
    }

    /// Re-emit a tokenized field unchanged
    pub fn field(&mut self, field: &Field) -> &mut Self {
        let value = match field {
            Field::Absent => ParameterValue::Absent,
            Field::Value(text) => ParameterValue::Raw(text.clone()),
            Field::Hollerith(text) => ParameterValue::String(text.clone()),
        };
        self.push(value, None)
    }

    /// Count followed by the pointers
    pub fn pointer_list(&mut self, ids: &[EntityId]) -> &mut Self {
        self.integer(ids.len() as i64);
        for id in ids {
            self.pointer(Some(*id));
        }
        self
    }

    /// Values after default elision
    pub fn elided(&self) -> Vec<&ParameterValue> {
        let keep = self
            .entries
            .iter()
            .rposition(|e| !e.is_default())
            .map_or(0, |i| i + 1);
        self.entries[..keep]
            .iter()
            .map(|e| {
                if e.is_default() {
                    &ABSENT
                } else {
                    &e.value
                }
            })
            .collect()
    }

    /// Encode into `value + delimiter` tokens; the last token carries the
    /// record delimiter. Pointers are renumbered through `directory_index`.
    pub fn to_tokens<F>(
        &self,
        delimiters: Delimiters,
        encoding: &'static Encoding,
        directory_index: F,
    ) -> std::result::Result<Vec<Vec<u8>>, ValueError>
    where
        F: Fn(EntityId) -> Option<usize>,
    {
        let values = self.elided();
        let last = values.len().saturating_sub(1);
        let mut tokens = Vec::with_capacity(values.len().max(1));

        for (i, value) in values.iter().enumerate() {
            let position = i + 1;
            let mut token = match value {
                ParameterValue::Absent => Vec::new(),
                ParameterValue::Integer(v) => v.to_string().into_bytes(),
                ParameterValue::Real(v) => format_real(*v)
                    .ok_or(ValueError::NonFinite { position, value: *v })?
                    .into_bytes(),
                ParameterValue::String(text) if text.is_empty() => Vec::new(),
                ParameterValue::String(text) => {
                    encode_hollerith(text, encoding).ok_or_else(|| ValueError::Unencodable {
                        position,
                        text: text.clone(),
                        encoding: encoding.name(),
                    })?
                }
                ParameterValue::Pointer(id) => directory_index(*id)
                    .ok_or(ValueError::UnassignedPointer { position, id: *id })?
                    .to_string()
                    .into_bytes(),
                ParameterValue::NegatedPointer(id) => {
                    let index = directory_index(*id)
                        .ok_or(ValueError::UnassignedPointer { position, id: *id })?;
                    format!("-{}", index).into_bytes()
                }
                ParameterValue::Raw(text) => text.clone().into_bytes(),
            };
            token.push(if i == last {
                delimiters.record
            } else {
                delimiters.field
            });
            tokens.push(token);
        }

        if tokens.is_empty() {
            tokens.push(vec![delimiters.record]);
        }
        Ok(tokens)
    }
}

/// Pack tokens into lines for records holding `record_width` data columns.
///
/// Tokens are packed up to `width` bytes per line and move to a new line
/// when they would overflow it. A token longer than `width` but not longer
/// than a record gets a line of its own. Only a token longer than a whole
/// record is split, and it fills every record it touches completely, since
/// the reader joins records at `record_width` columns.
pub fn wrap_tokens(tokens: &[Vec<u8>], width: usize, record_width: usize) -> Vec<Vec<u8>> {
    let record_width = record_width.max(1);
    let width = width.clamp(1, record_width);
    let mut lines = Vec::new();
    let mut current: Vec<u8> = Vec::new();

    for token in tokens {
        if token.len() <= width {
            if current.len() + token.len() > width {
                lines.push(std::mem::take(&mut current));
            }
            current.extend_from_slice(token);
            continue;
        }

        if token.len() <= record_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current.extend_from_slice(token);
            continue;
        }

        let mut rest = token.as_slice();
        while !rest.is_empty() {
            if current.len() == record_width {
                lines.push(std::mem::take(&mut current));
            }
            let take = (record_width - current.len()).min(rest.len());
            current.extend_from_slice(&rest[..take]);
            rest = &rest[take..];
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
