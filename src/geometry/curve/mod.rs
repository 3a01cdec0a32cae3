mod basis;

pub use basis::{BSplineBasis, Basis, BezierBasis};

use super::polyline::PolyLine2D;
use super::vector::Vector2D;

/// Bézier curve over all control points.
pub type BezierCurve = Curve<BezierBasis>;

/// Cubic B-spline curve.
pub type BSplineCurve = Curve<BSplineBasis<3>>;

/// A parametric 2D curve over a control polygon.
///
/// The curve runs over `t ∈ [0, 1]`; `get(t)` blends the control points
/// with the basis functions of `B`.
#[derive(Debug, Clone)]
pub struct Curve<B: Basis> {
    controlpoints: PolyLine2D,
    basis: B,
}

impl<B: Basis> Curve<B> {
    #[must_use]
    pub fn new(controlpoints: PolyLine2D) -> Self {
        let basis = B::new(controlpoints.len());
        Self {
            controlpoints,
            basis,
        }
    }

    #[must_use]
    pub fn controlpoints(&self) -> &PolyLine2D {
        &self.controlpoints
    }

    #[must_use]
    pub fn basis(&self) -> &B {
        &self.basis
    }

    /// Replaces the control polygon, rebuilding the basis if the number of
    /// control points changed.
    pub fn set_controlpoints(&mut self, controlpoints: PolyLine2D) {
        if self.basis.dimension() != controlpoints.len() {
            self.basis = B::new(controlpoints.len());
        }
        self.controlpoints = controlpoints;
    }

    /// Evaluates the curve at `t`, clamped to `[0, 1]`.
    ///
    /// A curve without control points evaluates to the origin.
    #[must_use]
    pub fn get(&self, t: f64) -> Vector2D {
        let t = t.clamp(0.0, 1.0);
        self.controlpoints
            .iter()
            .enumerate()
            .fold(Vector2D::zero(), |acc, (i, point)| {
                let weight = self.basis.get(i, t);
                if weight == 0.0 {
                    acc
                } else {
                    acc + *point * weight
                }
            })
    }

    /// Samples `count` points at evenly spaced parameters from `0` to `1`
    /// inclusive.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn get_sequence(&self, count: usize) -> PolyLine2D {
        match count {
            0 => PolyLine2D::default(),
            1 => PolyLine2D::new(vec![self.get(0.0)]),
            _ => {
                let last = (count - 1) as f64;
                (0..count).map(|i| self.get(i as f64 / last)).collect()
            }
        }
    }
}
