mod polyline_2d;
mod self_intersect;

use std::ops::Index;

use crate::error::{normalize_index, OperationError, Result};
use crate::math::{CUT_TOLERANCE, TOLERANCE, WALK_EPSILON};

use super::vector::Vector;

pub use polyline_2d::CutResult;

/// An ordered sequence of nodes.
///
/// Positions along the line are addressed by an index coordinate `ik`:
/// node `i` sits at `ik == i` and fractional values interpolate linearly
/// between neighbours. Outside `[0, len - 1]` the boundary segments are
/// extended.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolyLine<const N: usize> {
    nodes: Vec<Vector<N>>,
}

/// Polyline in the plane.
pub type PolyLine2D = PolyLine<2>;

/// Polyline in space.
pub type PolyLine3D = PolyLine<3>;

impl<const N: usize> PolyLine<N> {
    #[must_use]
    pub fn new(nodes: Vec<Vector<N>>) -> Self {
        Self { nodes }
    }

    /// Creates a polyline from raw coordinate arrays.
    #[must_use]
    pub fn from_list(coords: &[[f64; N]]) -> Self {
        coords.iter().copied().map(Vector::new).collect()
    }

    /// Creates a polyline from variable-length coordinate rows.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DimensionMismatch` if any row does not have
    /// exactly `N` entries.
    pub fn try_from_coords(coords: &[Vec<f64>]) -> Result<Self> {
        coords
            .iter()
            .map(|row| Vector::from_slice(row))
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    #[must_use]
    pub fn to_list(&self) -> Vec<[f64; N]> {
        self.nodes.iter().map(Vector::to_array).collect()
    }

    #[must_use]
    pub fn nodes(&self) -> &[Vector<N>] {
        &self.nodes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Vector<N>> {
        self.nodes.iter()
    }

    /// Returns the node at `index`; negative indices count from the end.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::IndexOutOfRange` outside `-len..len`.
    pub fn node(&self, index: isize) -> Result<&Vector<N>> {
        let i = normalize_index(index, self.nodes.len())?;
        Ok(&self.nodes[i])
    }

    /// Replaces the node at `index`; negative indices count from the end.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::IndexOutOfRange` outside `-len..len`.
    pub fn set_node(&mut self, index: isize, node: Vector<N>) -> Result<()> {
        let i = normalize_index(index, self.nodes.len())?;
        self.nodes[i] = node;
        Ok(())
    }

    /// Evaluates the line at index coordinate `ik`.
    ///
    /// Integral values inside the line return the node itself. Values
    /// outside `[0, len - 1]` are extrapolated along the first or last
    /// segment. A single-node line returns that node everywhere.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for an empty line.
    pub fn get(&self, ik: f64) -> Result<Vector<N>> {
        match self.nodes.len() {
            0 => Err(
                OperationError::InvalidInput("cannot evaluate an empty polyline".into()).into(),
            ),
            1 => Ok(self.nodes[0]),
            _ => {
                if ik.fract() == 0.0 && ik >= 0.0 && ik <= self.last_index() {
                    return Ok(self.nodes[to_index(ik)]);
                }
                let seg = self.clamp_segment(ik.floor());
                let start = self.nodes[seg];
                let end = self.nodes[seg + 1];
                Ok(start + (end - start) * (ik - to_coordinate(seg)))
            }
        }
    }

    /// Sum of all segment lengths.
    #[must_use]
    pub fn get_length(&self) -> f64 {
        self.nodes.windows(2).map(|w| (w[1] - w[0]).length()).sum()
    }

    /// Returns the difference vectors `nodes[i + 1] - nodes[i]`.
    #[must_use]
    pub fn get_segments(&self) -> Vec<Vector<N>> {
        self.nodes.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Returns one unit tangent per node.
    ///
    /// End tangents follow the boundary segments. Interior tangents bisect
    /// the adjacent segment directions; where those cancel out (a hairpin)
    /// the incoming direction is used.
    #[must_use]
    pub fn get_tangents(&self) -> Vec<Vector<N>> {
        let directions: Vec<Vector<N>> = self
            .get_segments()
            .iter()
            .map(Vector::normalized)
            .collect();
        let (Some(first), Some(last)) = (directions.first(), directions.last()) else {
            return Vec::new();
        };

        let mut tangents = Vec::with_capacity(self.nodes.len());
        tangents.push(*first);
        for pair in directions.windows(2) {
            let sum = pair[0] + pair[1];
            if sum.length() > TOLERANCE {
                tangents.push(sum.normalized());
            } else {
                tangents.push(pair[0]);
            }
        }
        tangents.push(*last);
        tangents
    }

    /// Moves `distance` of arc length from `start` and returns the index
    /// coordinate reached. Negative distances walk backwards; walking past
    /// either end continues along the extended boundary segment.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the line has fewer than two
    /// nodes.
    pub fn walk(&self, start: f64, distance: f64) -> Result<f64> {
        if self.nodes.len() < 2 {
            return Err(
                OperationError::InvalidInput("walking needs at least two nodes".into()).into(),
            );
        }
        if distance.abs() < WALK_EPSILON {
            return Ok(start);
        }
        if distance > 0.0 {
            Ok(self.walk_forward(start, distance))
        } else {
            Ok(self.walk_backward(start, -distance))
        }
    }

    fn walk_forward(&self, mut ik: f64, mut remaining: f64) -> f64 {
        let last = self.nodes.len() - 2;
        loop {
            let seg = self.clamp_segment(ik.floor());
            let length = self.segment_length(seg);
            if seg == last {
                return if length > TOLERANCE { ik + remaining / length } else { ik };
            }
            let to_end = (to_coordinate(seg + 1) - ik) * length;
            if remaining <= to_end {
                return ik + remaining / length;
            }
            remaining -= to_end;
            ik = to_coordinate(seg + 1);
        }
    }

    fn walk_backward(&self, mut ik: f64, mut remaining: f64) -> f64 {
        loop {
            let seg = self.clamp_segment(ik.ceil() - 1.0);
            let length = self.segment_length(seg);
            if seg == 0 {
                return if length > TOLERANCE { ik - remaining / length } else { ik };
            }
            let to_start = (ik - to_coordinate(seg)) * length;
            if remaining <= to_start {
                return ik - remaining / length;
            }
            remaining -= to_start;
            ik = to_coordinate(seg);
        }
    }

    /// Returns a polyline with `count` nodes spaced evenly by arc length.
    ///
    /// The first and last node are copied exactly.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if `count < 2` or the line has
    /// fewer than two nodes.
    pub fn resample(&self, count: usize) -> Result<Self> {
        if count < 2 {
            return Err(OperationError::InvalidInput(format!(
                "resampling needs at least two output nodes, got {count}"
            ))
            .into());
        }
        let (Some(first), Some(last)) = (self.nodes.first(), self.nodes.last()) else {
            return Err(
                OperationError::InvalidInput("cannot resample an empty polyline".into()).into(),
            );
        };
        if self.nodes.len() < 2 {
            return Err(
                OperationError::InvalidInput("resampling needs at least two nodes".into()).into(),
            );
        }

        let step = self.get_length() / to_coordinate(count - 1);
        let mut nodes = Vec::with_capacity(count);
        nodes.push(*first);
        let mut ik = 0.0;
        for _ in 1..count - 1 {
            ik = self.walk(ik, step)?;
            nodes.push(self.get(ik)?);
        }
        nodes.push(*last);
        Ok(Self::new(nodes))
    }

    /// Returns the index coordinates visited when travelling from
    /// `ik_start` to `ik_end`: both ends plus every node strictly between
    /// them, in travel order.
    #[must_use]
    pub fn get_positions(&self, ik_start: f64, ik_end: f64) -> Vec<f64> {
        let (low, high) = if ik_start <= ik_end {
            (ik_start, ik_end)
        } else {
            (ik_end, ik_start)
        };
        let mut interior: Vec<f64> = (1..self.nodes.len().saturating_sub(1))
            .map(to_coordinate)
            .filter(|&ik| ik > low + CUT_TOLERANCE && ik < high - CUT_TOLERANCE)
            .collect();
        if ik_end < ik_start {
            interior.reverse();
        }

        let mut positions = Vec::with_capacity(interior.len() + 2);
        positions.push(ik_start);
        positions.extend(interior);
        positions.push(ik_end);
        positions
    }

    /// Returns the part of the line between two index coordinates.
    ///
    /// If `ik_end < ik_start` the section runs backwards.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for an empty line.
    pub fn get_section(&self, ik_start: f64, ik_end: f64) -> Result<Self> {
        self.get_positions(ik_start, ik_end)
            .into_iter()
            .map(|ik| self.get(ik))
            .collect::<Result<Vec<_>>>()
            .map(Self::new)
    }

    /// Scales every node uniformly about the origin.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        self.nodes.iter().map(|node| *node * factor).collect()
    }

    /// Scales every node componentwise about the origin.
    #[must_use]
    pub fn scale_by(&self, factors: &Vector<N>) -> Self {
        self.nodes.iter().map(|node| node.scale(factors)).collect()
    }

    /// Blends two lines node by node: `self * (1 - amount) + other * amount`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the node counts differ.
    pub fn mix(&self, other: &Self, amount: f64) -> Result<Self> {
        self.zip_nodes(other, |a, b| a * (1.0 - amount) + b * amount)
    }

    /// Adds two lines node by node.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the node counts differ.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.zip_nodes(other, |a, b| a + b)
    }

    /// Subtracts two lines node by node.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the node counts differ.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.zip_nodes(other, |a, b| a - b)
    }

    /// Returns the line with its node order reversed.
    #[must_use]
    pub fn reversed(&self) -> Self {
        self.nodes.iter().rev().copied().collect()
    }

    fn zip_nodes(
        &self,
        other: &Self,
        op: impl Fn(Vector<N>, Vector<N>) -> Vector<N>,
    ) -> Result<Self> {
        if self.nodes.len() != other.nodes.len() {
            return Err(OperationError::InvalidInput(format!(
                "node count mismatch: {} vs {}",
                self.nodes.len(),
                other.nodes.len()
            ))
            .into());
        }
        Ok(self
            .nodes
            .iter()
            .zip(&other.nodes)
            .map(|(a, b)| op(*a, *b))
            .collect())
    }

    fn last_index(&self) -> f64 {
        to_coordinate(self.nodes.len().saturating_sub(1))
    }

    fn segment_length(&self, seg: usize) -> f64 {
        (self.nodes[seg + 1] - self.nodes[seg]).length()
    }

    /// Maps an integral-valued coordinate onto a valid segment index.
    fn clamp_segment(&self, index: f64) -> usize {
        let last = self.nodes.len().saturating_sub(2);
        if index > 0.0 {
            to_index(index).min(last)
        } else {
            0
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_coordinate(index: usize) -> f64 {
    index as f64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_index(ik: f64) -> usize {
    ik as usize
}

impl<const N: usize> Index<usize> for PolyLine<N> {
    type Output = Vector<N>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.nodes[index]
    }
}

impl<const N: usize> FromIterator<Vector<N>> for PolyLine<N> {
    fn from_iter<I: IntoIterator<Item = Vector<N>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a, const N: usize> IntoIterator for &'a PolyLine<N> {
    type Item = &'a Vector<N>;
    type IntoIter = std::slice::Iter<'a, Vector<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
