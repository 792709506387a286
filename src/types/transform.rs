//! Affine transformation value types
//!
//! IGES transformation matrices (entity 124) are a 3x3 rotation/scale block
//! plus a translation column: `p' = R * p + T`.

use crate::types::Vector3;
use std::ops::Mul;

/// 3x3 matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix3 {
    /// Matrix elements stored in row-major order
    pub m: [[f64; 3]; 3],
}

impl Matrix3 {
    /// Create identity matrix
    pub fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Create zero matrix
    pub fn zero() -> Self {
        Self { m: [[0.0; 3]; 3] }
    }

    /// Create matrix from rows
    pub fn from_rows(row0: [f64; 3], row1: [f64; 3], row2: [f64; 3]) -> Self {
        Self {
            m: [row0, row1, row2],
        }
    }

    /// Create rotation matrix around Z axis
    pub fn rotation_z(angle: f64) -> Self {
        let cos = angle.cos();
        let sin = angle.sin();
        Self {
            m: [[cos, -sin, 0.0], [sin, cos, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Calculate determinant
    pub fn determinant(&self) -> f64 {
        self.m[0][0] * (self.m[1][1] * self.m[2][2] - self.m[1][2] * self.m[2][1])
            - self.m[0][1] * (self.m[1][0] * self.m[2][2] - self.m[1][2] * self.m[2][0])
            + self.m[0][2] * (self.m[1][0] * self.m[2][1] - self.m[1][1] * self.m[2][0])
    }

    /// Multiply a vector by this matrix
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        Vector3::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z,
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z,
            self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z,
        )
    }
}

impl Mul for Matrix3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut result = Self::zero();
        for i in 0..3 {
            for j in 0..3 {
                for k in 0..3 {
                    result.m[i][j] += self.m[i][k] * rhs.m[k][j];
                }
            }
        }
        result
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rotation/scale block plus translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformationMatrix {
    /// R11..R33
    pub rotation: Matrix3,
    /// T1, T2, T3
    pub translation: Vector3,
}

impl TransformationMatrix {
    /// Create identity transform
    pub fn identity() -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation: Vector3::ZERO,
        }
    }

    /// Create a pure translation
    pub fn from_translation(translation: Vector3) -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation,
        }
    }

    /// Create from the twelve values in parameter order
    /// (`R11 R12 R13 T1 R21 R22 R23 T2 R31 R32 R33 T3`)
    pub fn from_parameters(v: [f64; 12]) -> Self {
        Self {
            rotation: Matrix3::from_rows([v[0], v[1], v[2]], [v[4], v[5], v[6]], [v[8], v[9], v[10]]),
            translation: Vector3::new(v[3], v[7], v[11]),
        }
    }

    /// The twelve values in parameter order
    pub fn to_parameters(&self) -> [f64; 12] {
        let r = &self.rotation.m;
        let t = &self.translation;
        [
            r[0][0], r[0][1], r[0][2], t.x, r[1][0], r[1][1], r[1][2], t.y, r[2][0], r[2][1],
            r[2][2], t.z,
        ]
    }

    /// Apply to a point: multiply, then translate
    pub fn transform_point(&self, point: Vector3) -> Vector3 {
        self.rotation.transform_vector(point) + self.translation
    }

    /// Apply only the rotation block (directions are not translated)
    pub fn transform_direction(&self, direction: Vector3) -> Vector3 {
        self.rotation.transform_vector(direction)
    }

    /// Combine with another transform (this transform applied first)
    pub fn then(&self, other: &TransformationMatrix) -> TransformationMatrix {
        TransformationMatrix {
            rotation: other.rotation * self.rotation,
            translation: other.transform_point(self.translation),
        }
    }

    /// Check if transform is identity
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

impl Default for TransformationMatrix {
    fn default() -> Self {
        Self::identity()
    }
}
