/// A family of scalar basis functions on `[0, 1]`.
///
/// A curve point is the sum of its control points weighted by the basis
/// functions evaluated at the curve parameter.
pub trait Basis: Clone {
    /// Builds the basis for `size` control points.
    fn new(size: usize) -> Self;

    /// Returns the number of basis functions.
    fn dimension(&self) -> usize;

    /// Evaluates basis function `index` at `t`. Indices outside the basis
    /// evaluate to zero.
    fn get(&self, index: usize, t: f64) -> f64;
}

/// Bernstein polynomials of degree `size - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierBasis {
    coefficients: Vec<f64>,
}

impl Basis for BezierBasis {
    fn new(size: usize) -> Self {
        let degree = size.saturating_sub(1);
        Self {
            coefficients: (0..size).map(|k| binomial(degree, k)).collect(),
        }
    }

    fn dimension(&self) -> usize {
        self.coefficients.len()
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn get(&self, index: usize, t: f64) -> f64 {
        let Some(coefficient) = self.coefficients.get(index) else {
            return 0.0;
        };
        let degree = self.coefficients.len() - 1;
        coefficient * t.powi(index as i32) * (1.0 - t).powi((degree - index) as i32)
    }
}

/// `n` choose `k` as a float.
#[allow(clippy::cast_precision_loss)]
fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// B-spline basis on a clamped uniform knot vector over `[0, 1]`.
///
/// The degree is `DEGREE`, lowered to `size - 1` when there are too few
/// control points. The clamped knots make the curve start at the first and
/// end at the last control point.
#[derive(Debug, Clone, PartialEq)]
pub struct BSplineBasis<const DEGREE: usize> {
    size: usize,
    degree: usize,
    knots: Vec<f64>,
}

impl<const DEGREE: usize> BSplineBasis<DEGREE> {
    /// Returns the effective degree.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    #[must_use]
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// Cox-de Boor recursion.
    fn evaluate(&self, degree: usize, index: usize, t: f64) -> f64 {
        let k = &self.knots;
        if degree == 0 {
            let (lo, hi) = (k[index], k[index + 1]);
            // The last non-empty span also owns its right end.
            let closes = index + 1 == self.size && t >= hi;
            return if (lo <= t && t < hi) || (closes && lo < hi) {
                1.0
            } else {
                0.0
            };
        }

        let mut value = 0.0;
        let left = k[index + degree] - k[index];
        if left > 0.0 {
            value += (t - k[index]) / left * self.evaluate(degree - 1, index, t);
        }
        let right = k[index + degree + 1] - k[index + 1];
        if right > 0.0 {
            value += (k[index + degree + 1] - t) / right * self.evaluate(degree - 1, index + 1, t);
        }
        value
    }
}

impl<const DEGREE: usize> Basis for BSplineBasis<DEGREE> {
    #[allow(clippy::cast_precision_loss)]
    fn new(size: usize) -> Self {
        if size == 0 {
            return Self {
                size,
                degree: 0,
                knots: Vec::new(),
            };
        }
        let degree = DEGREE.min(size - 1);
        let spans = size - degree;

        let mut knots = Vec::with_capacity(size + degree + 1);
        knots.extend(std::iter::repeat_n(0.0, degree + 1));
        knots.extend((1..spans).map(|i| i as f64 / spans as f64));
        knots.extend(std::iter::repeat_n(1.0, degree + 1));

        Self {
            size,
            degree,
            knots,
        }
    }

    fn dimension(&self) -> usize {
        self.size
    }

    fn get(&self, index: usize, t: f64) -> f64 {
        if index >= self.size {
            return 0.0;
        }
        self.evaluate(self.degree, index, t)
    }
}
