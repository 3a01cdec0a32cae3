pub mod curve;
pub mod plane;
pub mod polyline;
pub mod transform;
pub mod vector;

pub use curve::{BSplineBasis, BSplineCurve, Basis, BezierBasis, BezierCurve, Curve};
pub use plane::Plane;
pub use polyline::{CutResult, PolyLine, PolyLine2D, PolyLine3D};
pub use transform::Transformation;
pub use vector::{Vector, Vector2D, Vector3D};
