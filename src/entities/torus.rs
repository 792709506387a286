//! Torus entity (type 160)

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::iges::{ParameterReader, ParameterWriter};
use crate::types::Vector3;

/// A solid ring torus
#[derive(Debug, Clone, PartialEq)]
pub struct Torus {
    pub common: EntityCommon,
    /// Distance from the center to the center of the disc
    pub ring_radius: f64,
    /// Radius of the swept disc
    pub disc_radius: f64,
    pub center: Vector3,
    /// Axis of the ring
    pub normal: Vector3,
}

impl Torus {
    pub fn new() -> Self {
        Torus {
            common: EntityCommon::new(),
            ring_radius: 0.0,
            disc_radius: 0.0,
            center: Vector3::ZERO,
            normal: Vector3::UNIT_Z,
        }
    }

    pub fn from_radii(ring_radius: f64, disc_radius: f64) -> Self {
        Torus {
            ring_radius,
            disc_radius,
            ..Self::new()
        }
    }
}

impl Default for Torus {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Torus {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type_number(&self) -> i64 {
        160
    }

    fn entity_type(&self) -> &'static str {
        "TORUS"
    }

    fn read_parameters(&mut self, reader: &mut ParameterReader<'_>) -> Result<()> {
        self.ring_radius = reader.real()?;
        self.disc_radius = reader.real()?;
        self.center = reader.point()?;
        self.normal = reader.point_or(Vector3::UNIT_Z)?;
        Ok(())
    }

    fn write_parameters(&self, writer: &mut ParameterWriter) {
        writer
            .real(self.ring_radius)
            .real(self.disc_radius)
            .point_or(self.center, Vector3::ZERO)
            .point_or(self.normal, Vector3::UNIT_Z);
    }
}
