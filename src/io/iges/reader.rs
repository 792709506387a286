//! IGES file reader

use super::directory::DirectoryEntry;
use super::global_section::read_global;
use super::parameter::{tokenize, Delimiters, Field, ParameterReader};
use super::record::{join_section, parse_records, Record, Section, CONTENT_WIDTH, PARAMETER_DATA_WIDTH};
use super::resolver::{find_roots, link_all};
use crate::entities::{DirectoryCodes, EntityType};
use crate::error::{IgesError, Result};
use crate::file::IgesFile;
use crate::global::GlobalSection;
use crate::notification::{NotificationCollection, NotificationType};
use encoding_rs::{Encoding, WINDOWS_1252};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Configuration for the IGES reader.
#[derive(Debug, Clone)]
pub struct ReaderConfiguration {
    /// Encoding of Hollerith strings and Start section text.
    ///
    /// Default: windows-1252.
    pub encoding: &'static Encoding,
}

impl Default for ReaderConfiguration {
    fn default() -> Self {
        Self {
            encoding: WINDOWS_1252,
        }
    }
}

impl ReaderConfiguration {
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// Records of one file split by section
#[derive(Default)]
struct Sections<'a> {
    start: Vec<&'a Record>,
    global: Vec<&'a Record>,
    directory: Vec<&'a Record>,
    parameter: Vec<&'a Record>,
    terminate: Vec<&'a Record>,
}

impl<'a> Sections<'a> {
    /// Group records, enforcing S, G, D, P, T order
    fn split(records: &'a [Record], notifications: &mut NotificationCollection) -> Result<Self> {
        let mut sections = Sections::default();
        let mut current: Option<Section> = None;
        let mut expected_sequence = 1;

        for record in records {
            if let Some(previous) = current {
                if record.section < previous {
                    return Err(IgesError::malformed(
                        record.line,
                        format!("{} record after {} section", record.section, previous),
                    ));
                }
                if record.section != previous {
                    expected_sequence = 1;
                }
            }
            current = Some(record.section);

            if record.sequence != expected_sequence {
                notifications.warn(format!(
                    "line {}: sequence number {} where {} was expected",
                    record.line, record.sequence, expected_sequence
                ));
            }
            expected_sequence = record.sequence + 1;

            let list = match record.section {
                Section::Start => &mut sections.start,
                Section::Global => &mut sections.global,
                Section::Directory => &mut sections.directory,
                Section::Parameter => &mut sections.parameter,
                Section::Terminate => &mut sections.terminate,
            };
            list.push(record);
        }

        if sections.directory.len() % 2 != 0 {
            let line = sections.directory.last().map_or(0, |r| r.line);
            return Err(IgesError::malformed(
                line,
                format!(
                    "directory section has {} records; entries take two each",
                    sections.directory.len()
                ),
            ));
        }
        if sections.terminate.len() > 1 {
            return Err(IgesError::malformed(
                sections.terminate[1].line,
                "more than one terminate record",
            ));
        }
        Ok(sections)
    }

    /// Compare the Terminate record with the actual section sizes
    fn check_terminate(&self, notifications: &mut NotificationCollection) {
        let Some(record) = self.terminate.first() else {
            return;
        };
        let actual = [
            (Section::Start, self.start.len()),
            (Section::Global, self.global.len()),
            (Section::Directory, self.directory.len()),
            (Section::Parameter, self.parameter.len()),
        ];
        for (i, (section, count)) in actual.iter().enumerate() {
            let field = &record.content[i * 8..(i + 1) * 8];
            let declared = std::str::from_utf8(&field[1..])
                .ok()
                .and_then(|s| s.trim().parse::<usize>().ok());
            if field[0] != section.tag() || declared != Some(*count) {
                let message = format!(
                    "terminate record declares '{}' but the file has {} {} record(s)",
                    String::from_utf8_lossy(field),
                    count,
                    section
                );
                warn!("{}", message);
                notifications.warn(message);
            }
        }
    }
}

/// IGES file reader
pub struct IgesReader {
    data: Vec<u8>,
    config: ReaderConfiguration,
}

impl IgesReader {
    /// Create a reader over a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Create a reader by draining any byte source
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self::from_bytes(data))
    }

    /// Create a reader over an in-memory file
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            config: ReaderConfiguration::default(),
        }
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: ReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Decode the whole file
    pub fn read(self) -> Result<IgesFile> {
        let encoding = self.config.encoding;
        let records = parse_records(&self.data)?;
        let mut notifications = NotificationCollection::new();
        let sections = Sections::split(&records, &mut notifications)?;
        sections.check_terminate(&mut notifications);

        debug!(
            start = sections.start.len(),
            global = sections.global.len(),
            directory = sections.directory.len(),
            parameter = sections.parameter.len(),
            "read IGES records"
        );

        let start_lines = read_start(&sections.start, encoding);
        let global = if sections.global.is_empty() {
            GlobalSection::new()
        } else {
            let data = join_section(sections.global.iter().copied(), CONTENT_WIDTH);
            let (global, warnings) = read_global(&data, encoding)?;
            for message in warnings {
                warn!("{}", message);
                notifications.warn(message);
            }
            global
        };

        let mut entities = read_entities(&sections, global.delimiters, encoding, &mut notifications)?;
        link_all(&mut entities, &mut notifications);
        let roots = find_roots(&entities);

        debug!(
            entities = entities.len(),
            roots = roots.len(),
            notifications = notifications.len(),
            "decoded IGES entities"
        );

        let mut file = IgesFile::new();
        file.start_lines = start_lines;
        file.global = global;
        file.notifications = notifications;
        file.set_arena(entities, roots);
        Ok(file)
    }
}

/// Start section text, one string per record. Trailing blank records are
/// dropped.
fn read_start(records: &[&Record], encoding: &'static Encoding) -> Vec<String> {
    let mut lines: Vec<String> = records
        .iter()
        .map(|r| {
            let (text, _) = encoding.decode_without_bom_handling(&r.content);
            text.trim_end().to_string()
        })
        .collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

fn read_entities(
    sections: &Sections<'_>,
    delimiters: Delimiters,
    encoding: &'static Encoding,
    notifications: &mut NotificationCollection,
) -> Result<Vec<EntityType>> {
    let parameter_data = join_section(sections.parameter.iter().copied(), PARAMETER_DATA_WIDTH);
    let mut entities = Vec::with_capacity(sections.directory.len() / 2);

    for pair in sections.directory.chunks_exact(2) {
        let directory_index = pair[0].sequence;
        let entry = DirectoryEntry::parse(pair[0], pair[1])?;

        let pointer = usize::try_from(entry.parameter_pointer)
            .ok()
            .filter(|p| (1..=sections.parameter.len()).contains(p))
            .ok_or_else(|| {
                IgesError::malformed(
                    pair[0].line,
                    format!(
                        "parameter data pointer {} is outside the parameter section",
                        entry.parameter_pointer
                    ),
                )
            })?;

        if let Some(owner) = sections.parameter[pointer - 1].parameter_owner() {
            if owner != directory_index {
                notifications.warn(format!(
                    "parameter record {} points back to directory entry {}, expected {}",
                    pointer, owner, directory_index
                ));
            }
        }

        let offset = (pointer - 1) * PARAMETER_DATA_WIDTH;
        let fields = tokenize(&parameter_data[offset..], delimiters, encoding).map_err(|e| {
            IgesError::InvalidParameter {
                directory_index,
                position: e.position.saturating_sub(1),
                reason: e.reason,
            }
        })?;

        let entity = read_entity(&entry, directory_index, &fields, notifications)?;
        entities.push(entity);
    }

    Ok(entities)
}

fn read_entity(
    entry: &DirectoryEntry,
    directory_index: usize,
    fields: &[Field],
    notifications: &mut NotificationCollection,
) -> Result<EntityType> {
    let mut entity = EntityType::create(entry.entity_type, entry.form);
    let mut warnings = Vec::new();
    entry.apply(entity.as_entity_mut().common_mut(), |message| {
        warnings.push(format!("directory entry {}: {}", directory_index, message))
    });
    if let EntityType::Unsupported(unsupported) = &mut entity {
        unsupported.directory_codes = Some(DirectoryCodes {
            line_font: entry.line_font,
            color: entry.color,
            status: entry.status,
        });
    }

    let (first, parameters) = match fields.split_first() {
        Some((first, rest)) => (Some(first), rest),
        None => (None, fields),
    };
    match first {
        Some(Field::Value(text)) if text.parse::<i64>().ok() == Some(entry.entity_type) => {}
        other => warnings.push(format!(
            "directory entry {}: parameter data starts with {:?}, expected type {}",
            directory_index, other, entry.entity_type
        )),
    }

    let mut reader = ParameterReader::new(parameters, directory_index);
    entity.as_entity_mut().read_parameters(&mut reader)?;
    if !entity.is_opaque() && reader.has_more() {
        let common = entity.as_entity_mut().common_mut();
        common.associated_entities = reader.pointer_list()?;
        common.properties = reader.pointer_list()?;
        if reader.has_more() {
            warnings.push(format!(
                "directory entry {}: {} unread parameter field(s)",
                directory_index,
                reader.remaining().len()
            ));
        }
    }
    warnings.extend(reader.take_warnings());

    if let EntityType::Unsupported(_) = entity {
        notifications.notify(
            NotificationType::NotSupported,
            format!(
                "directory entry {}: entity type {} form {} is not supported",
                directory_index, entry.entity_type, entry.form
            ),
        );
    }
    for message in warnings {
        warn!("{}", message);
        notifications.warn(message);
    }

    Ok(entity)
}
