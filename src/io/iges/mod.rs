//! IGES (Initial Graphics Exchange Specification) reading and writing

mod directory;
mod global_section;
mod parameter;
mod reader;
mod record;
mod resolver;
mod writer;

pub use directory::DirectoryEntry;
pub use global_section::{parse_delimiters, read_global, write_global};
pub use parameter::{
    format_real, parse_integer, parse_real, tokenize, wrap_tokens, Delimiters, Field,
    ParameterReader, ParameterValue, ParameterWriter, TokenError, ValueError,
};
pub use reader::{IgesReader, ReaderConfiguration};
pub use record::{format_line, join_section, parse_records, Record, Section};
pub use resolver::{find_roots, link_all, Linker};
pub use writer::{discover, IgesWriter, WriterConfiguration};
