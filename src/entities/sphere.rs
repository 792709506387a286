//! Sphere entity (type 158)

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::iges::{ParameterReader, ParameterWriter};
use crate::types::Vector3;

/// A solid sphere
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub common: EntityCommon,
    pub radius: f64,
    pub center: Vector3,
}

impl Sphere {
    pub fn new() -> Self {
        Sphere {
            common: EntityCommon::new(),
            radius: 1.0,
            center: Vector3::ZERO,
        }
    }

    pub fn from_center_radius(center: Vector3, radius: f64) -> Self {
        Sphere {
            radius,
            center,
            ..Self::new()
        }
    }

    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * std::f64::consts::PI * self.radius.powi(3)
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Sphere {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type_number(&self) -> i64 {
        158
    }

    fn entity_type(&self) -> &'static str {
        "SPHERE"
    }

    fn read_parameters(&mut self, reader: &mut ParameterReader<'_>) -> Result<()> {
        self.radius = reader.real_or(1.0)?;
        self.center = reader.point()?;
        Ok(())
    }

    fn write_parameters(&self, writer: &mut ParameterWriter) {
        writer
            .real(self.radius)
            .point_or(self.center, Vector3::ZERO);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let sphere = Sphere::new();
        assert_eq!(sphere.radius, 1.0);
        assert_eq!(sphere.center, Vector3::ZERO);
        assert!((sphere.volume() - 4.18879).abs() < 1e-5);
    }
}
