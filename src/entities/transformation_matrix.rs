//! Transformation matrix entity (type 124)
//!
//! Form 0 is a right-handed rotation with translation, form 1 left-handed;
//! forms 10-12 qualify the coordinate system for finite element use. The
//! entity's own directory transformation field may point at another
//! matrix, which is applied after this one.

use super::{Entity, EntityCommon};
use crate::error::Result;
use crate::io::iges::{ParameterReader, ParameterWriter};
use crate::types::TransformationMatrix;

/// A 3x4 affine transformation stored as an entity
#[derive(Debug, Clone, PartialEq)]
pub struct TransformationMatrixEntity {
    pub common: EntityCommon,
    pub matrix: TransformationMatrix,
    form: i64,
}

impl TransformationMatrixEntity {
    pub fn new() -> Self {
        Self::with_form(0)
    }

    pub(crate) fn with_form(form: i64) -> Self {
        TransformationMatrixEntity {
            common: EntityCommon::new(),
            matrix: TransformationMatrix::identity(),
            form,
        }
    }

    pub fn from_matrix(matrix: TransformationMatrix) -> Self {
        TransformationMatrixEntity {
            matrix,
            ..Self::new()
        }
    }

    /// Whether the rotation block describes a right-handed system (form 0)
    pub fn is_right_handed(&self) -> bool {
        self.form == 0
    }
}

impl Default for TransformationMatrixEntity {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for TransformationMatrixEntity {
    fn common(&self) -> &EntityCommon {
        &self.common
    }

    fn common_mut(&mut self) -> &mut EntityCommon {
        &mut self.common
    }

    fn entity_type_number(&self) -> i64 {
        124
    }

    fn form_number(&self) -> i64 {
        self.form
    }

    fn entity_type(&self) -> &'static str {
        "TRANSFORMATION_MATRIX"
    }

    fn read_parameters(&mut self, reader: &mut ParameterReader<'_>) -> Result<()> {
        let mut values = [0.0; 12];
        for value in values.iter_mut() {
            *value = reader.real()?;
        }
        self.matrix = TransformationMatrix::from_parameters(values);
        Ok(())
    }

    fn write_parameters(&self, writer: &mut ParameterWriter) {
        for value in self.matrix.to_parameters() {
            writer.real(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vector3;

    #[test]
    fn test_default_is_identity() {
        let entity = TransformationMatrixEntity::new();
        assert!(entity.matrix.is_identity());
        assert!(entity.is_right_handed());
        assert_eq!(entity.form_number(), 0);
    }

    #[test]
    fn test_write_order() {
        let entity = TransformationMatrixEntity::from_matrix(TransformationMatrix::from_translation(
            Vector3::new(4.0, 8.0, 12.0),
        ));
        let mut writer = ParameterWriter::new();
        entity.write_parameters(&mut writer);
        assert_eq!(writer.len(), 12);
    }
}
