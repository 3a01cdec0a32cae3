pub mod intersect_2d;
pub mod polygon_2d;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Snapping distance (in segment parameter units) used when a cut lands
/// on a polyline node.
pub const CUT_TOLERANCE: f64 = 1e-5;

/// Segments shorter than this are removed by polyline repair.
pub const MIN_SEGMENT_LENGTH: f64 = 1e-6;

/// Walks shorter than this return the start position unchanged.
pub const WALK_EPSILON: f64 = 1e-8;
