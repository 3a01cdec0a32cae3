use crate::error::{GeometryError, Result};
use crate::math::{Matrix4, Vector3, TOLERANCE};

use super::vector::Vector3D;

/// An affine map over 3D vectors.
///
/// Stored as a homogeneous 4x4 matrix together with its inverse. The inverse
/// is built analytically by each constructor (negated translation, transposed
/// rotation, reciprocal scale), so `apply_inverse` does not go through a
/// general matrix inversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transformation {
    matrix: Matrix4,
    inverse: Option<Matrix4>,
}

impl Transformation {
    /// The identity map.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
            inverse: Some(Matrix4::identity()),
        }
    }

    /// Translation by `vector`.
    #[must_use]
    pub fn translation(vector: &Vector3D) -> Self {
        let offset = *vector.as_svector();
        Self {
            matrix: Matrix4::new_translation(&offset),
            inverse: Some(Matrix4::new_translation(&(-offset))),
        }
    }

    /// Rotation by `angle` radians around `axis` through the origin.
    ///
    /// The axis does not need to be normalized.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if the axis has zero length.
    pub fn rotation(angle: f64, axis: &Vector3D) -> Result<Self> {
        let len = axis.length();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let axis = axis.as_svector() / len;
        let matrix = rotation_matrix(&axis, angle);
        Ok(Self {
            matrix,
            inverse: Some(matrix.transpose()),
        })
    }

    /// Uniform scale about the origin.
    ///
    /// `scale(0.0)` is accepted but has no inverse.
    #[must_use]
    pub fn scale(factor: f64) -> Self {
        let inverse = (factor != 0.0).then(|| Matrix4::new_scaling(1.0 / factor));
        Self {
            matrix: Matrix4::new_scaling(factor),
            inverse,
        }
    }

    /// Wraps a homogeneous matrix whose inverse is already known.
    pub(crate) fn from_parts(matrix: Matrix4, inverse: Matrix4) -> Self {
        Self {
            matrix,
            inverse: Some(inverse),
        }
    }

    /// Returns the homogeneous matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix4 {
        &self.matrix
    }

    /// Maps a point through the transformation.
    #[must_use]
    pub fn apply(&self, vector: &Vector3D) -> Vector3D {
        transform_point(&self.matrix, vector)
    }

    /// Maps a point through the inverse transformation.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the transformation is not
    /// invertible.
    pub fn apply_inverse(&self, vector: &Vector3D) -> Result<Vector3D> {
        let inverse = self.inverse_matrix()?;
        Ok(transform_point(&inverse, vector))
    }

    /// Returns the inverse transformation.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the transformation is not
    /// invertible.
    pub fn inverse(&self) -> Result<Self> {
        let inverse = self.inverse_matrix()?;
        Ok(Self {
            matrix: inverse,
            inverse: Some(self.matrix),
        })
    }

    /// Returns a transformation that applies `self` first and `other` second.
    ///
    /// `a.chain(&b).apply(v) == b.apply(a.apply(v))`.
    #[must_use]
    pub fn chain(&self, other: &Self) -> Self {
        let inverse = match (self.inverse, other.inverse) {
            (Some(first), Some(second)) => Some(first * second),
            _ => None,
        };
        Self {
            matrix: other.matrix * self.matrix,
            inverse,
        }
    }

    fn inverse_matrix(&self) -> Result<Matrix4> {
        self.inverse.ok_or_else(|| {
            GeometryError::Degenerate("transformation is not invertible".into()).into()
        })
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::identity()
    }
}

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
fn transform_point(matrix: &Matrix4, point: &Vector3D) -> Vector3D {
    let v = matrix * nalgebra::Vector4::new(point.x(), point.y(), point.z(), 1.0);
    Vector3D::new([v.x, v.y, v.z])
}

/// Builds a 4x4 rotation matrix around a unit axis by an angle (Rodrigues).
#[allow(clippy::many_single_char_names)]
fn rotation_matrix(axis: &Vector3, angle: f64) -> Matrix4 {
    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    #[allow(clippy::suspicious_operation_groupings)]
    Matrix4::new(
        t * x * x + c,     t * x * y - s * z, t * x * z + s * y, 0.0,
        t * x * y + s * z, t * y * y + c,     t * y * z - s * x, 0.0,
        t * x * z - s * y, t * y * z + s * x, t * z * z + c,     0.0,
        0.0,               0.0,               0.0,               1.0,
    )
}
