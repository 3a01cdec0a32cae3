use crate::error::{GeometryError, Result};
use crate::math::{Matrix4, TOLERANCE};

use super::polyline::{PolyLine2D, PolyLine3D};
use super::transform::Transformation;
use super::vector::{Vector2D, Vector3D};

/// A plane in 3D space with its own 2D coordinate system.
///
/// Defined by an origin `p0` and two basis vectors. The basis vectors do not
/// have to be orthogonal or of unit length; local coordinates `(u, v)` map to
/// `p0 + u * x_vector + v * y_vector`.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    p0: Vector3D,
    x_vector: Vector3D,
    y_vector: Vector3D,
    normvector: Vector3D,
    frame: Matrix4,
    inverse: Matrix4,
}

impl Plane {
    /// Creates a new plane from an origin and two basis vectors.
    ///
    /// # Errors
    ///
    /// Returns an error if a basis vector is zero-length or the two are
    /// parallel.
    pub fn new(p0: Vector3D, x_vector: Vector3D, y_vector: Vector3D) -> Result<Self> {
        let x_len = x_vector.length();
        let y_len = y_vector.length();
        if x_len < TOLERANCE || y_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }

        let normvector = x_vector.cross(&y_vector);
        if normvector.length() <= TOLERANCE * x_len * y_len {
            return Err(GeometryError::Degenerate("plane basis vectors are parallel".into()).into());
        }

        let (x, y, n) = (x_vector, y_vector, normvector);
        let frame = Matrix4::new(
            x.x(), y.x(), n.x(), p0.x(),
            x.y(), y.y(), n.y(), p0.y(),
            x.z(), y.z(), n.z(), p0.z(),
            0.0,   0.0,   0.0,   1.0,
        );
        let inverse = frame.try_inverse().ok_or_else(|| {
            GeometryError::Degenerate("plane frame is not invertible".into())
        })?;

        Ok(Self {
            p0,
            x_vector,
            y_vector,
            normvector,
            frame,
            inverse,
        })
    }

    #[must_use]
    pub fn p0(&self) -> &Vector3D {
        &self.p0
    }

    #[must_use]
    pub fn x_vector(&self) -> &Vector3D {
        &self.x_vector
    }

    #[must_use]
    pub fn y_vector(&self) -> &Vector3D {
        &self.y_vector
    }

    /// Returns `x_vector × y_vector` (not normalized).
    #[must_use]
    pub fn normvector(&self) -> &Vector3D {
        &self.normvector
    }

    /// Returns the map from local `(u, v, w)` to world coordinates, where `w`
    /// runs along the normal.
    #[must_use]
    pub fn transformation(&self) -> Transformation {
        Transformation::from_parts(self.frame, self.inverse)
    }

    /// Resolves a point in the plane basis and returns its `(u, v)`
    /// coordinates. The offset along the normal is dropped.
    #[must_use]
    pub fn project(&self, point: &Vector3D) -> Vector2D {
        let local = self.inverse * nalgebra::Vector4::new(point.x(), point.y(), point.z(), 1.0);
        Vector2D::new([local.x, local.y])
    }

    /// Maps local `(u, v)` coordinates back into 3D.
    #[must_use]
    pub fn align(&self, point: &Vector2D) -> Vector3D {
        self.p0 + self.x_vector * point.x() + self.y_vector * point.y()
    }

    #[must_use]
    pub fn project_polyline(&self, line: &PolyLine3D) -> PolyLine2D {
        line.iter().map(|p| self.project(p)).collect()
    }

    #[must_use]
    pub fn align_polyline(&self, line: &PolyLine2D) -> PolyLine3D {
        line.iter().map(|p| self.align(p)).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn v(x: f64, y: f64, z: f64) -> Vector3D {
        Vector3D::new([x, y, z])
    }

    fn sample_plane() -> Plane {
        Plane::new(v(2.0, 3.0, 4.0), v(-4.0, -3.0, -2.0), v(4.0, 5.0, 6.0)).unwrap()
    }

    #[test]
    fn normvector_is_cross_product() {
        let plane = sample_plane();
        assert_abs_diff_eq!(*plane.normvector(), v(-8.0, 16.0, -8.0), epsilon = 1e-12);
    }

    #[test]
    fn project_origin() {
        let plane = sample_plane();
        assert_abs_diff_eq!(
            plane.project(plane.p0()),
            Vector2D::new([0.0, 0.0]),
            epsilon = 1e-9
        );
    }

    #[test]
    fn align_origin() {
        let plane = sample_plane();
        assert_abs_diff_eq!(plane.align(&Vector2D::zero()), v(2.0, 3.0, 4.0), epsilon = 1e-12);
    }

    #[test]
    fn project_resolves_basis() {
        let plane = sample_plane();
        let point = *plane.p0() + *plane.x_vector() * 2.0 - *plane.y_vector() * 3.0;
        assert_abs_diff_eq!(plane.project(&point), Vector2D::new([2.0, -3.0]), epsilon = 1e-9);

        // Offsets along the normal are ignored.
        let lifted = point + *plane.normvector() * 0.25;
        assert_abs_diff_eq!(plane.project(&lifted), Vector2D::new([2.0, -3.0]), epsilon = 1e-9);
    }

    #[test]
    fn project_align_round_trip() {
        let plane = sample_plane();
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (-2.5, 4.0), (10.0, -7.0)] {
            let local = Vector2D::new([x, y]);
            let world = plane.align(&local);
            assert_abs_diff_eq!(plane.project(&world), local, epsilon = 1e-9);
            assert_abs_diff_eq!(plane.align(&plane.project(&world)), world, epsilon = 1e-9);
        }
    }

    #[test]
    fn transformation_maps_local_frame() {
        let plane = sample_plane();
        let frame = plane.transformation();
        assert_abs_diff_eq!(frame.apply(&v(0.0, 0.0, 0.0)), *plane.p0(), epsilon = 1e-12);
        assert_abs_diff_eq!(
            frame.apply(&v(1.0, 2.0, 0.0)),
            plane.align(&Vector2D::new([1.0, 2.0])),
            epsilon = 1e-12
        );
        let back = frame.apply_inverse(&frame.apply(&v(1.0, 2.0, 3.0))).unwrap();
        assert_abs_diff_eq!(back, v(1.0, 2.0, 3.0), epsilon = 1e-9);
    }

    #[test]
    fn polyline_round_trip() {
        let plane = sample_plane();
        let local = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
        let world = plane.align_polyline(&local);
        assert_eq!(world.len(), 3);
        let back = plane.project_polyline(&world);
        for (a, b) in back.iter().zip(local.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-9);
        }
    }

    #[test]
    fn parallel_basis_fails() {
        let result = Plane::new(v(0.0, 0.0, 0.0), v(1.0, 2.0, 3.0), v(2.0, 4.0, 6.0));
        assert!(result.is_err());
    }

    #[test]
    fn zero_basis_fails() {
        let result = Plane::new(v(0.0, 0.0, 0.0), v(0.0, 0.0, 0.0), v(0.0, 1.0, 0.0));
        assert!(result.is_err());
    }
}
