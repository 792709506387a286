//! IGES file writer
//!
//! Writing runs in two passes. Discovery walks the entity graph from the
//! roots and fixes the directory index of every reachable entity; emission
//! then encodes each entity with its pointers renumbered. The whole file is
//! assembled in memory before anything reaches the output.

use super::directory::DirectoryEntry;
use super::global_section::write_global;
use super::parameter::{wrap_tokens, ParameterWriter, ValueError};
use super::record::{format_line, Section, CONTENT_WIDTH, PARAMETER_DATA_WIDTH};
use crate::entities::{EntityType, Unsupported};
use crate::error::{IgesError, Result};
use crate::file::IgesFile;
use crate::types::EntityId;
use encoding_rs::{Encoding, WINDOWS_1252};
use indexmap::IndexSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Configuration for the IGES writer.
#[derive(Debug, Clone)]
pub struct WriterConfiguration {
    /// Columns of each Parameter record used for data, 1 to 64.
    ///
    /// Default: 64.
    pub parameter_width: usize,
    /// Encoding of Hollerith strings and Start section text.
    ///
    /// Default: windows-1252.
    pub encoding: &'static Encoding,
}

impl Default for WriterConfiguration {
    fn default() -> Self {
        Self {
            parameter_width: PARAMETER_DATA_WIDTH,
            encoding: WINDOWS_1252,
        }
    }
}

impl WriterConfiguration {
    pub fn with_parameter_width(mut self, width: usize) -> Self {
        self.parameter_width = width;
        self
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(1..=PARAMETER_DATA_WIDTH).contains(&self.parameter_width) {
            return Err(IgesError::InvalidConfiguration(format!(
                "parameter width {} is outside 1..={}",
                self.parameter_width, PARAMETER_DATA_WIDTH
            )));
        }
        Ok(())
    }
}

/// IGES file writer
pub struct IgesWriter<'a> {
    file: &'a IgesFile,
    config: WriterConfiguration,
}

impl<'a> IgesWriter<'a> {
    pub fn new(file: &'a IgesFile) -> Self {
        Self {
            file,
            config: WriterConfiguration::default(),
        }
    }

    /// Set the writer configuration.
    pub fn with_configuration(mut self, config: WriterConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Write to a file path. The file is only created once encoding has
    /// succeeded.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.write_to_vec()?;
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Write to any byte sink
    pub fn write_to_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        let bytes = self.write_to_vec()?;
        writer.write_all(&bytes)?;
        Ok(())
    }

    /// Encode the file into memory
    pub fn write_to_vec(&self) -> Result<Vec<u8>> {
        self.config.validate()?;
        let order = discover(self.file)?;

        let start = self.start_lines()?;
        let global = write_global(&self.file.global, self.config.encoding, CONTENT_WIDTH)?;
        let (directory, parameter) = self.entity_lines(&order)?;

        debug!(
            entities = order.len(),
            directory = directory.len(),
            parameter = parameter.len(),
            "encoded IGES file"
        );

        let mut out = Vec::new();
        for (i, content) in start.iter().enumerate() {
            out.extend(format_line(content, Section::Start, i + 1));
        }
        for (i, content) in global.iter().enumerate() {
            out.extend(format_line(content, Section::Global, i + 1));
        }
        for line in directory.iter().chain(parameter.iter()) {
            out.extend_from_slice(line);
        }
        let terminate = format!(
            "S{:>7}G{:>7}D{:>7}P{:>7}",
            start.len(),
            global.len(),
            directory.len(),
            parameter.len()
        );
        out.extend(format_line(terminate.as_bytes(), Section::Terminate, 1));
        Ok(out)
    }

    /// Start section content; at least one record is always written
    fn start_lines(&self) -> Result<Vec<Vec<u8>>> {
        let mut lines = Vec::new();
        for text in &self.file.start_lines {
            let (encoded, _, had_errors) = self.config.encoding.encode(text);
            if had_errors {
                return Err(IgesError::Encoding(format!(
                    "start line '{}' cannot be encoded as {}",
                    text,
                    self.config.encoding.name()
                )));
            }
            if encoded.is_empty() {
                lines.push(Vec::new());
            } else {
                lines.extend(encoded.chunks(CONTENT_WIDTH).map(<[u8]>::to_vec));
            }
        }
        if lines.is_empty() {
            lines.push(Vec::new());
        }
        Ok(lines)
    }

    /// Directory and Parameter records, formatted, in discovery order
    fn entity_lines(&self, order: &IndexSet<EntityId>) -> Result<(Vec<Vec<u8>>, Vec<Vec<u8>>)> {
        let delimiters = self.file.global.delimiters;
        let encoding = self.config.encoding;
        let directory_index = |id: EntityId| order.get_index_of(&id).map(|k| 2 * k + 1);

        let mut directory = Vec::with_capacity(order.len() * 2);
        let mut parameter = Vec::new();

        for (k, &id) in order.iter().enumerate() {
            let own_index = 2 * k + 1;
            let entity = self
                .file
                .entity(id)
                .ok_or_else(|| IgesError::entity_write(id, "entity is not in the file"))?;
            let e = entity.as_entity();

            let mut writer = ParameterWriter::new();
            writer.integer(e.entity_type_number());
            e.write_parameters(&mut writer);
            if !entity.is_opaque() {
                let common = e.common();
                if !common.associated_entities.is_empty() || !common.properties.is_empty() {
                    writer.pointer_list(&common.associated_entities);
                }
                if !common.properties.is_empty() {
                    writer.pointer_list(&common.properties);
                }
            }

            let tokens = writer
                .to_tokens(delimiters, encoding, directory_index)
                .map_err(|err| match err {
                    ValueError::Unencodable { .. } => {
                        IgesError::Encoding(format!("entity {}: {}", id, err))
                    }
                    other => IgesError::entity_write(id, other.to_string()),
                })?;
            let lines = wrap_tokens(&tokens, self.config.parameter_width, PARAMETER_DATA_WIDTH);

            let mut entry = DirectoryEntry::from_common(
                e.common(),
                e.entity_type_number(),
                e.form_number(),
                directory_index,
            )
            .map_err(|missing| {
                IgesError::entity_write(id, format!("reference to {} was never discovered", missing))
            })?;
            if let EntityType::Unsupported(Unsupported {
                common,
                directory_codes: Some(codes),
                ..
            }) = entity
            {
                entry.line_font = codes.line_font_for(common.line_font).unwrap_or(entry.line_font);
                entry.color = codes.color_for(common.color).unwrap_or(entry.color);
                entry.status = codes.status_for(common.status).unwrap_or(entry.status);
            }
            entry.parameter_pointer = parameter.len() as i64 + 1;
            entry.parameter_line_count = lines.len() as i64;
            let [first, second] = entry
                .format()
                .map_err(|reason| IgesError::entity_write(id, reason))?;
            directory.push(format_line(first.as_bytes(), Section::Directory, own_index));
            directory.push(format_line(second.as_bytes(), Section::Directory, own_index + 1));

            for line in lines {
                let mut content = line;
                content.resize(PARAMETER_DATA_WIDTH, b' ');
                content.extend_from_slice(format!("{:>8}", own_index).as_bytes());
                let sequence = parameter.len() + 1;
                parameter.push(format_line(&content, Section::Parameter, sequence));
            }
        }

        Ok((directory, parameter))
    }
}

/// Every entity reachable from the roots, breadth first, roots leading.
/// Position `k` in the set is directory index `2k + 1`.
pub fn discover(file: &IgesFile) -> Result<IndexSet<EntityId>> {
    let mut order = IndexSet::new();
    for &root in file.root_ids() {
        if file.entity(root).is_none() {
            return Err(IgesError::entity_write(root, "root entity is not in the file"));
        }
        order.insert(root);
    }

    let mut next = 0;
    while let Some(&id) = order.get_index(next) {
        let entity = file
            .entity(id)
            .ok_or_else(|| IgesError::entity_write(id, "entity is not in the file"))?;
        for reference in entity.all_references() {
            if file.entity(reference).is_none() {
                return Err(IgesError::entity_write(
                    id,
                    format!("references {} which is not in the file", reference),
                ));
            }
            order.insert(reference);
        }
        next += 1;
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Line, SubfigureDefinition, TransformationMatrixEntity};
    use crate::types::Vector3;

    #[test]
    fn test_discover_roots_first() {
        let mut file = IgesFile::new();
        let matrix = file.insert_entity(TransformationMatrixEntity::new());
        let mut line = Line::new();
        line.common.transformation = Some(matrix);
        let line = file.add_entity(line);
        let other = file.add_entity(Line::new());

        let order = discover(&file).unwrap();
        assert_eq!(order.iter().copied().collect::<Vec<_>>(), vec![line, other, matrix]);
    }

    #[test]
    fn test_discover_handles_cycles() {
        let mut file = IgesFile::new();
        let figure = file.add_entity(SubfigureDefinition::new());
        let mut line = Line::new();
        line.common.associated_entities = vec![figure];
        let line = file.insert_entity(line);
        if let Some(crate::entities::EntityType::SubfigureDefinition(f)) = file.entity_mut(figure) {
            f.entities.push(line);
        }
        let order = discover(&file).unwrap();
        assert_eq!(order.len(), 2);
    }

    #[test]
    fn test_dangling_reference_names_entity() {
        let mut file = IgesFile::new();
        let mut line = Line::new();
        line.common.transformation = Some(EntityId::new(42));
        let id = file.add_entity(line);
        match discover(&file) {
            Err(IgesError::EntityWrite { id: failing, .. }) => assert_eq!(failing, id),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_invalid_parameter_width() {
        let file = IgesFile::new();
        let config = WriterConfiguration::default().with_parameter_width(65);
        assert!(matches!(
            IgesWriter::new(&file).with_configuration(config).write_to_vec(),
            Err(IgesError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_narrow_parameter_width() {
        let mut file = IgesFile::new();
        file.add_entity(Line::from_points(Vector3::new(1.0, 2.0, 3.0), Vector3::new(4.0, 5.0, 6.0)));
        let config = WriterConfiguration::default().with_parameter_width(10);
        let bytes = IgesWriter::new(&file).with_configuration(config).write_to_vec().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let parameter: Vec<&str> = text.lines().filter(|l| l.as_bytes()[72] == b'P').collect();
        assert_eq!(parameter.len(), 3);
        assert!(parameter[0].starts_with("110,1.,2.,"));
    }

    #[test]
    fn test_long_label_is_write_error() {
        let mut file = IgesFile::new();
        let mut line = Line::new();
        line.common.label = "TOO-LONG-LABEL".to_string();
        file.add_entity(line);
        assert!(matches!(
            file.to_bytes(),
            Err(IgesError::EntityWrite { .. })
        ));
    }

    #[test]
    fn test_non_finite_is_write_error() {
        let mut file = IgesFile::new();
        file.add_entity(Line::from_points(Vector3::new(f64::INFINITY, 0.0, 0.0), Vector3::ZERO));
        assert!(matches!(
            file.to_bytes(),
            Err(IgesError::EntityWrite { .. })
        ));
    }

    #[test]
    fn test_start_lines_split_at_72_columns() {
        let mut file = IgesFile::new();
        file.start_lines = vec!["x".repeat(80)];
        let text = String::from_utf8(file.to_bytes().unwrap()).unwrap();
        let start: Vec<&str> = text.lines().filter(|l| l.as_bytes()[72] == b'S').collect();
        assert_eq!(start.len(), 2);
    }
}
