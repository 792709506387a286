//! Circular arc entity (type 100)

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::iges::{ParameterReader, ParameterWriter};
use crate::types::Vector3;

/// A circular arc in a plane parallel to XY
///
/// The center, start and end points are stored with `z = 0`; the plane
/// lies at `z = plane_displacement`. The arc runs counterclockwise from
/// start to end; coinciding start and end points make a full circle.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularArc {
    /// Common entity data
    pub common: EntityCommon,
    /// Z of the arc's plane
    pub plane_displacement: f64,
    pub center: Vector3,
    pub start: Vector3,
    pub end: Vector3,
}

impl CircularArc {
    /// Create a new degenerate arc at the origin
    pub fn new() -> Self {
        CircularArc {
            common: EntityCommon::new(),
            plane_displacement: 0.0,
            center: Vector3::ZERO,
            start: Vector3::ZERO,
            end: Vector3::ZERO,
        }
    }

    /// Create a full circle in the plane `z = center.z`
    pub fn circle(center: Vector3, radius: f64) -> Self {
        let start = Vector3::new(center.x + radius, center.y, 0.0);
        CircularArc {
            plane_displacement: center.z,
            center: Vector3::new(center.x, center.y, 0.0),
            start,
            end: start,
            ..Self::new()
        }
    }

    /// Center lifted to the arc's plane
    pub fn proper_center(&self) -> Vector3 {
        self.lift(self.center)
    }

    /// Start point lifted to the arc's plane
    pub fn proper_start(&self) -> Vector3 {
        self.lift(self.start)
    }

    /// End point lifted to the arc's plane
    pub fn proper_end(&self) -> Vector3 {
        self.lift(self.end)
    }

    /// Distance from center to start point
    pub fn radius(&self) -> f64 {
        let dx = self.start.x - self.center.x;
        let dy = self.start.y - self.center.y;
        (dx * dx + dy * dy).sqrt()
    }

    fn lift(&self, point: Vector3) -> Vector3 {
        Vector3::new(point.x, point.y, self.plane_displacement)
    }
}

impl Default for CircularArc {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for CircularArc {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type_number(&self) -> i64 {
        100
    }

    fn entity_type(&self) -> &'static str {
        "CIRCULAR_ARC"
    }

    fn read_parameters(&mut self, reader: &mut ParameterReader<'_>) -> Result<()> {
        self.plane_displacement = reader.real()?;
        for point in [&mut self.center, &mut self.start, &mut self.end] {
            *point = Vector3::new(reader.real()?, reader.real()?, 0.0);
        }
        Ok(())
    }

    fn write_parameters(&self, writer: &mut ParameterWriter) {
        writer.real(self.plane_displacement);
        for point in [self.center, self.start, self.end] {
            writer.real(point.x).real(point.y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proper_points_use_plane_displacement() {
        let arc = CircularArc {
            plane_displacement: 11.0,
            center: Vector3::new(22.0, 33.0, 0.0),
            start: Vector3::new(44.0, 55.0, 0.0),
            end: Vector3::new(66.0, 77.0, 0.0),
            ..CircularArc::new()
        };
        assert_eq!(arc.proper_center(), Vector3::new(22.0, 33.0, 11.0));
        assert_eq!(arc.proper_start(), Vector3::new(44.0, 55.0, 11.0));
        assert_eq!(arc.proper_end(), Vector3::new(66.0, 77.0, 11.0));
    }

    #[test]
    fn test_circle() {
        let circle = CircularArc::circle(Vector3::new(1.0, 2.0, 3.0), 2.0);
        assert_eq!(circle.start, circle.end);
        assert_eq!(circle.radius(), 2.0);
        assert_eq!(circle.proper_center(), Vector3::new(1.0, 2.0, 3.0));
    }
}
