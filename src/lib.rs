//! # igesrust
//!
//! A pure Rust library for reading and writing CAD files in IGES format.
//!
//! An IGES file is a flat, cross-referenced graph of geometric and
//! annotation entities stored in fixed 80-column records. This crate decodes
//! those records into a typed entity graph with resolved references and
//! encodes an in-memory graph back into byte-exact records.
//!
//! ## Features
//!
//! - Read and write the Start, Global, Directory, Parameter and Terminate
//!   sections
//! - Custom field and record delimiters, Hollerith strings, `D` exponents
//! - Cross-reference resolution with typed checks, including negative
//!   pointer fields (custom line fonts, level lists, color definitions)
//! - Unsupported entity types are kept as opaque placeholders and written
//!   back unchanged
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use igesrust::{IgesFile, Line, Vector3};
//!
//! // Read a file
//! let file = IgesFile::load("part.igs")?;
//! for entity in file.roots() {
//!     println!("{}", entity.as_entity().entity_type());
//! }
//!
//! // Build and write a file
//! let mut file = IgesFile::new();
//! file.add_entity(Line::from_points(Vector3::ZERO, Vector3::new(1.0, 2.0, 3.0)));
//! file.save("line.igs")?;
//! # Ok::<(), igesrust::IgesError>(())
//! ```
//!
//! ## Architecture
//!
//! - `Entity` - Trait implemented by every entity type
//! - `EntityType` - Closed enum over the supported entities
//! - `IgesFile` - Arena of entities addressed by `EntityId`
//! - `IgesReader` / `IgesWriter` - The two directions of the codec

#![allow(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod entities;
pub mod error;
pub mod file;
pub mod global;
pub mod io;
pub mod notification;
pub mod types;

// Re-export commonly used types
pub use error::{IgesError, Result};
pub use types::{
    Color, ColorNumber, DraftingStandard, EntityId, EntityStatus, IgesVersion, Level, LineFont,
    TransformationMatrix, Units, Vector3,
};

// Re-export entity types
pub use entities::{
    CircularArc, ColorDefinition, Direction, Entity, EntityCommon, EntityType,
    LabelDisplayAssociativity, Line, Location, Null, Sphere, SubfigureDefinition,
    TextDisplayTemplate, TextFontDefinition, Torus, TransformationMatrixEntity, Unsupported,
};

pub use file::IgesFile;
pub use global::GlobalSection;
pub use notification::{Notification, NotificationCollection, NotificationType};

// Re-export I/O types
pub use io::iges::{IgesReader, IgesWriter, ReaderConfiguration, WriterConfiguration};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_empty_file_creation() {
        let file = IgesFile::new();
        assert!(file.entities().is_empty());
        assert_eq!(file.global.version, IgesVersion::V5_3);
    }
}
