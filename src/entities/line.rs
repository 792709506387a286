//! Line entity (type 110)

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::iges::{ParameterReader, ParameterWriter};
use crate::types::Vector3;

/// Extent of a line (form number)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineBounding {
    /// Bounded segment between both points (form 0)
    #[default]
    Segment,
    /// Starts at the first point, unbounded past the second (form 1)
    Ray,
    /// Unbounded in both directions (form 2)
    Infinite,
}

impl LineBounding {
    pub fn from_form(form: i64) -> Option<Self> {
        match form {
            0 => Some(LineBounding::Segment),
            1 => Some(LineBounding::Ray),
            2 => Some(LineBounding::Infinite),
            _ => None,
        }
    }

    pub fn form(&self) -> i64 {
        *self as i64
    }
}

/// A line defined by two points
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Common entity data
    pub common: EntityCommon,
    /// Start point of the line
    pub p1: Vector3,
    /// End point (or a second point on a ray/infinite line)
    pub p2: Vector3,
    pub bounding: LineBounding,
}

impl Line {
    /// Create a new segment from origin to origin
    pub fn new() -> Self {
        Line {
            common: EntityCommon::new(),
            p1: Vector3::ZERO,
            p2: Vector3::ZERO,
            bounding: LineBounding::Segment,
        }
    }

    /// Create a new segment between two points
    pub fn from_points(p1: Vector3, p2: Vector3) -> Self {
        Line {
            p1,
            p2,
            ..Self::new()
        }
    }

    /// Get the distance between the two defining points
    pub fn length(&self) -> f64 {
        self.p1.distance(&self.p2)
    }

    /// Get the direction vector (normalized)
    pub fn direction(&self) -> Vector3 {
        (self.p2 - self.p1).normalize()
    }
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for Line {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type_number(&self) -> i64 {
        110
    }

    fn form_number(&self) -> i64 {
        self.bounding.form()
    }

    fn entity_type(&self) -> &'static str {
        "LINE"
    }

    fn read_parameters(&mut self, reader: &mut ParameterReader<'_>) -> Result<()> {
        self.p1 = reader.point()?;
        self.p2 = reader.point()?;
        Ok(())
    }

    fn write_parameters(&self, writer: &mut ParameterWriter) {
        writer.point(self.p1).point(self.p2);
    }
}
