pub mod error;
pub mod geometry;
pub mod math;

pub use error::{EuklidError, Result};
pub use geometry::{
    BSplineCurve, BezierCurve, CutResult, Plane, PolyLine2D, PolyLine3D, Transformation,
    Vector2D, Vector3D,
};
