use super::{Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `a0 + t * (a1 - a0)` and `b0 + u * (b1 - b0)`, returns `(t, u)`
/// if the lines are not parallel. Zero-length direction vectors count as
/// parallel.
#[must_use]
pub fn line_line_intersect_2d(
    a0: &Vector2,
    a1: &Vector2,
    b0: &Vector2,
    b1: &Vector2,
) -> Option<(f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = da.x * db.y - da.y * db.x;
    if cross.abs() <= TOLERANCE * da.norm() * db.norm() {
        return None;
    }

    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let t = (dx * db.y - dy * db.x) / cross;
    let u = (dx * da.y - dy * da.x) / cross;
    Some((t, u))
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are clamped to
/// `[0, 1]`. Parameters within `eps` outside the segments still count as a hit.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Vector2,
    a1: &Vector2,
    b0: &Vector2,
    b1: &Vector2,
    eps: f64,
) -> Option<(Vector2, f64, f64)> {
    let (t, u) = line_line_intersect_2d(a0, a1, b0, b1)?;

    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t_clamped = t.clamp(0.0, 1.0);
        let pt = point_at(a0, &(a1 - a0), t_clamped);
        Some((pt, t_clamped, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Linear interpolation: `origin + dir * t`.
#[must_use]
pub fn point_at(origin: &Vector2, dir: &Vector2, t: f64) -> Vector2 {
    origin + dir * t
}
