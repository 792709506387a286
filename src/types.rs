//! Core value types shared by entities and the codec

pub mod color;
pub mod entity_id;
pub mod status;
pub mod transform;
pub mod units;
pub mod vector;

pub use color::{Color, ColorNumber};
pub use entity_id::EntityId;
pub use status::{
    BlankStatus, EntityStatus, EntityUse, Hierarchy, Level, LineFont, LineFontPattern,
    SubordinateEntitySwitch,
};
pub use transform::{Matrix3, TransformationMatrix};
pub use units::{DraftingStandard, IgesVersion, Units};
pub use vector::Vector3;
