use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Index, Mul, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use nalgebra::SVector;

use crate::error::{normalize_index, GeometryError, Result};

/// A fixed-dimension vector of `f64` components.
///
/// Equality is exact component-wise comparison. Ordering (`<`, `<=`, ...)
/// compares lengths, so two different vectors of equal length are neither
/// less nor greater than each other.
///
/// `partial_cmp` therefore returns `Some(Equal)` for unequal vectors of the
/// same length. Sorting or taking the maximum orders by length only and
/// keeps no particular order among equally long vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<const N: usize> {
    v: SVector<f64, N>,
}

/// 2D vector.
pub type Vector2D = Vector<2>;

/// 3D vector.
pub type Vector3D = Vector<3>;

impl<const N: usize> Vector<N> {
    /// Number of components.
    pub const DIMENSIONS: usize = N;

    /// Creates a vector from its components.
    #[must_use]
    pub fn new(coords: [f64; N]) -> Self {
        Self {
            v: SVector::from(coords),
        }
    }

    /// Creates a vector from a coordinate slice.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DimensionMismatch` if `coords.len() != N`.
    pub fn from_slice(coords: &[f64]) -> Result<Self> {
        <[f64; N]>::try_from(coords)
            .map(Self::new)
            .map_err(|_| {
                GeometryError::DimensionMismatch {
                    expected: N,
                    actual: coords.len(),
                }
                .into()
            })
    }

    /// The zero vector.
    #[must_use]
    pub fn zero() -> Self {
        Self::scalar(0.0)
    }

    /// A vector with every component set to `value`.
    #[must_use]
    pub fn scalar(value: f64) -> Self {
        Self::new([value; N])
    }

    /// Returns the underlying nalgebra vector.
    #[must_use]
    pub fn as_svector(&self) -> &SVector<f64, N> {
        &self.v
    }

    /// Returns the components as an array.
    #[must_use]
    pub fn to_array(&self) -> [f64; N] {
        self.v.into()
    }

    /// Returns the component at `index`; negative indices count from the end.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::IndexOutOfRange` outside `-N..N`.
    pub fn component(&self, index: isize) -> Result<f64> {
        normalize_index(index, N).map(|i| self.v[i])
    }

    /// Sets the component at `index`; negative indices count from the end.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::IndexOutOfRange` outside `-N..N`.
    pub fn set_component(&mut self, index: isize, value: f64) -> Result<()> {
        let i = normalize_index(index, N)?;
        self.v[i] = value;
        Ok(())
    }

    /// Euclidean norm.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.v.norm()
    }

    /// Returns `self / self.length()`.
    ///
    /// A zero-length vector yields NaN components.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            v: self.v / self.v.norm(),
        }
    }

    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.v.dot(&other.v)
    }

    /// Returns a duplicate of this vector.
    #[must_use]
    pub fn copy(&self) -> Self {
        *self
    }

    /// Component-wise product.
    #[must_use]
    pub fn scale(&self, factors: &Self) -> Self {
        Self {
            v: self.v.component_mul(&factors.v),
        }
    }

    /// Iterates over the components.
    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.v.iter().copied()
    }
}

impl Vector<2> {
    /// Angle to the x-axis, `atan2(y, x)`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.v[1].atan2(self.v[0])
    }

    /// Scalar pseudo cross product `x1 * y2 - y1 * x2`.
    #[must_use]
    pub fn cross(&self, other: &Self) -> f64 {
        self.v[0] * other.v[1] - self.v[1] * other.v[0]
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.v[0]
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.v[1]
    }
}

impl Vector<3> {
    /// Vector cross product.
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            v: self.v.cross(&other.v),
        }
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.v[0]
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.v[1]
    }

    #[must_use]
    pub fn z(&self) -> f64 {
        self.v[2]
    }
}

impl<const N: usize> Default for Vector<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> From<[f64; N]> for Vector<N> {
    fn from(coords: [f64; N]) -> Self {
        Self::new(coords)
    }
}

impl<const N: usize> From<SVector<f64, N>> for Vector<N> {
    fn from(v: SVector<f64, N>) -> Self {
        Self { v }
    }
}

impl<const N: usize> TryFrom<&[f64]> for Vector<N> {
    type Error = crate::error::EuklidError;

    fn try_from(coords: &[f64]) -> Result<Self> {
        Self::from_slice(coords)
    }
}

impl<const N: usize> TryFrom<Vec<f64>> for Vector<N> {
    type Error = crate::error::EuklidError;

    fn try_from(coords: Vec<f64>) -> Result<Self> {
        Self::from_slice(&coords)
    }
}

impl<const N: usize> Index<usize> for Vector<N> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.v[index]
    }
}

impl<const N: usize> PartialOrd for Vector<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.length().partial_cmp(&other.length())
    }
}

impl<const N: usize> fmt::Display for Vector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vector{}D(", N)?;
        for (i, c) in self.v.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{c:.4}")?;
        }
        write!(f, ")")
    }
}

impl<const N: usize> Add for Vector<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { v: self.v + rhs.v }
    }
}

impl<const N: usize> Sub for Vector<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { v: self.v - rhs.v }
    }
}

impl<const N: usize> Neg for Vector<N> {
    type Output = Self;

    fn neg(self) -> Self {
        Self { v: -self.v }
    }
}

impl<const N: usize> Mul<f64> for Vector<N> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self { v: self.v * rhs }
    }
}

impl<const N: usize> Div<f64> for Vector<N> {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self { v: self.v / rhs }
    }
}

impl<const N: usize> AddAssign for Vector<N> {
    fn add_assign(&mut self, rhs: Self) {
        self.v += rhs.v;
    }
}

impl<const N: usize> SubAssign for Vector<N> {
    fn sub_assign(&mut self, rhs: Self) {
        self.v -= rhs.v;
    }
}

impl<const N: usize> AbsDiffEq for Vector<N> {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.v.abs_diff_eq(&other.v, epsilon)
    }
}

impl<const N: usize> RelativeEq for Vector<N> {
    fn default_max_relative() -> f64 {
        f64::EPSILON
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.v.relative_eq(&other.v, epsilon, max_relative)
    }
}
