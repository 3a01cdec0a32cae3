use crate::error::{OperationError, Result};
use crate::geometry::vector::Vector2D;
use crate::math::intersect_2d::{line_line_intersect_2d, point_at, segment_segment_intersect_2d};
use crate::math::polygon_2d::{left_normal, signed_area_2d};
use crate::math::{Vector2, CUT_TOLERANCE, TOLERANCE};

use super::{to_coordinate, PolyLine2D};

/// Turns with `|sin(angle)|` below this are offset as if straight.
const STRAIGHT_TURN_SIN: f64 = 0.1;

/// A crossing between a polyline and another geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutResult {
    /// Index coordinate on the polyline being cut.
    pub ik_1: f64,
    /// Parameter on the other geometry: the probe parameter for line cuts,
    /// the index coordinate for polyline cuts.
    pub ik_2: f64,
    /// The crossing point.
    pub point: Vector2D,
}

impl PolyLine2D {
    /// Finds every crossing with the segment `p1 → p2`.
    ///
    /// The polyline's boundary segments are extended like [`get`](Self::get)
    /// does; the probe is not. A crossing on a node is reported once.
    #[must_use]
    pub fn cut(&self, p1: &Vector2D, p2: &Vector2D) -> Vec<CutResult> {
        self.cut_probe(p1, p2, true)
    }

    /// Finds every crossing with the infinite line through `p1` and `p2`.
    #[must_use]
    pub fn cut_line(&self, p1: &Vector2D, p2: &Vector2D) -> Vec<CutResult> {
        self.cut_probe(p1, p2, false)
    }

    /// Returns the crossing with the line through `p1` and `p2` that lies
    /// closest to `ik_start`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::Failed` if the line does not cross the
    /// polyline.
    pub fn cut_nearest(&self, p1: &Vector2D, p2: &Vector2D, ik_start: f64) -> Result<CutResult> {
        self.cut_line(p1, p2)
            .into_iter()
            .min_by(|a, b| (a.ik_1 - ik_start).abs().total_cmp(&(b.ik_1 - ik_start).abs()))
            .ok_or_else(|| OperationError::Failed("no cut found".into()).into())
    }

    fn cut_probe(&self, p1: &Vector2D, p2: &Vector2D, bounded: bool) -> Vec<CutResult> {
        let n = self.nodes.len();
        if n < 2 {
            return Vec::new();
        }
        let last = n - 2;
        let (b0, b1) = (*p1.as_svector(), *p2.as_svector());

        let mut results = Vec::new();
        for i in 0..=last {
            let a0 = *self.nodes[i].as_svector();
            let a1 = *self.nodes[i + 1].as_svector();
            let Some((t, u)) = line_line_intersect_2d(&a0, &a1, &b0, &b1) else {
                continue;
            };

            // Crossings just past a node count; the outer segments extend to infinity.
            let lower = if i == 0 { f64::NEG_INFINITY } else { -CUT_TOLERANCE };
            let upper = if i == last { f64::INFINITY } else { 1.0 + CUT_TOLERANCE };
            if t < lower || t > upper {
                continue;
            }
            if bounded && !(-CUT_TOLERANCE..=1.0 + CUT_TOLERANCE).contains(&u) {
                continue;
            }

            results.push(CutResult {
                ik_1: to_coordinate(i) + t,
                ik_2: u,
                point: point_at(&a0, &(a1 - a0), t).into(),
            });
        }

        // Both segments next to a node may report the same crossing.
        results.sort_by(|a, b| a.ik_1.total_cmp(&b.ik_1));
        results.dedup_by(|later, kept| (later.ik_1 - kept.ik_1).abs() < CUT_TOLERANCE);
        results
    }

    /// Finds every crossing between the two polylines.
    ///
    /// Neither line is extended. Results are sorted along `self`; a crossing
    /// on a shared node is reported once.
    #[must_use]
    pub fn cut_with_polyline(&self, other: &Self) -> Vec<CutResult> {
        let mut results = Vec::new();
        for (i, a) in self.nodes.windows(2).enumerate() {
            let (a0, a1) = (*a[0].as_svector(), *a[1].as_svector());
            for (j, b) in other.nodes.windows(2).enumerate() {
                let (b0, b1) = (*b[0].as_svector(), *b[1].as_svector());
                if let Some((point, t, u)) =
                    segment_segment_intersect_2d(&a0, &a1, &b0, &b1, CUT_TOLERANCE)
                {
                    results.push(CutResult {
                        ik_1: to_coordinate(i) + t,
                        ik_2: to_coordinate(j) + u,
                        point: point.into(),
                    });
                }
            }
        }

        results.sort_by(|a, b| a.ik_1.total_cmp(&b.ik_1).then(a.ik_2.total_cmp(&b.ik_2)));
        results.dedup_by(|a, b| {
            (a.ik_1 - b.ik_1).abs() < CUT_TOLERANCE && (a.ik_2 - b.ik_2).abs() < CUT_TOLERANCE
        });
        results
    }

    /// Unit normals of every segment, pointing to the right of the travel
    /// direction.
    #[must_use]
    pub fn segment_normals(&self) -> Vec<Vector2D> {
        self.get_segments()
            .iter()
            .map(|s| Vector2D::new([s.y(), -s.x()]).normalized())
            .collect()
    }

    /// Unit normals at every node, averaging the adjacent segment normals.
    ///
    /// Where the adjacent normals cancel out (a hairpin) the incoming
    /// segment direction is used.
    #[must_use]
    pub fn normvectors(&self) -> Vec<Vector2D> {
        let normals = self.segment_normals();
        let (Some(first), Some(last)) = (normals.first(), normals.last()) else {
            return Vec::new();
        };
        let segments = self.get_segments();

        let mut result = Vec::with_capacity(self.nodes.len());
        result.push(*first);
        for (i, pair) in normals.windows(2).enumerate() {
            let sum = pair[0] + pair[1];
            if sum.length() > TOLERANCE {
                result.push(sum.normalized());
            } else {
                result.push(segments[i].normalized());
            }
        }
        result.push(*last);
        result
    }

    /// Moves every node by `amount` along its node normal.
    #[must_use]
    pub fn offset_simple(&self, amount: f64) -> Self {
        self.nodes
            .iter()
            .zip(self.normvectors())
            .map(|(node, normal)| *node + normal * amount)
            .collect()
    }

    /// Offsets the line by `amount` to the right (negative: to the left).
    ///
    /// Each segment is shifted along its normal. Outside turns are joined
    /// with a miter point; at inside turns both shifted end points are kept,
    /// leaving a small loop that [`fix_errors`](Self::fix_errors) removes.
    #[must_use]
    pub fn offset(&self, amount: f64) -> Self {
        let n = self.nodes.len();
        if n < 2 {
            return self.clone();
        }
        let normals = self.segment_normals();
        let directions: Vec<Vector2D> = self
            .get_segments()
            .iter()
            .map(Vector2D::normalized)
            .collect();
        let shifted: Vec<(Vector2D, Vector2D)> = self
            .nodes
            .windows(2)
            .zip(&normals)
            .map(|(w, normal)| (w[0] + *normal * amount, w[1] + *normal * amount))
            .collect();

        let mut nodes = Vec::with_capacity(n + n / 2);
        nodes.push(shifted[0].0);
        for i in 0..n - 2 {
            let (first, second) = (shifted[i], shifted[i + 1]);
            let sin_angle = directions[i].cross(&directions[i + 1]);

            if sin_angle.abs() < STRAIGHT_TURN_SIN {
                nodes.push((first.1 + second.0) * 0.5);
            } else if sin_angle * amount > 0.0 {
                match line_line_intersect_2d(
                    first.0.as_svector(),
                    first.1.as_svector(),
                    second.0.as_svector(),
                    second.1.as_svector(),
                ) {
                    Some((t, _)) => nodes.push(first.0 + (first.1 - first.0) * t),
                    None => nodes.push((first.1 + second.0) * 0.5),
                }
            } else {
                nodes.push(first.1);
                nodes.push(second.0);
            }
        }
        nodes.push(shifted[n - 2].1);
        Self::new(nodes)
    }

    /// Returns the axis-aligned bounding box as `(min, max)`, or `None` for
    /// an empty line.
    #[must_use]
    pub fn boundary(&self) -> Option<(Vector2D, Vector2D)> {
        let first = *self.nodes.first()?;
        let bounds = self.nodes.iter().fold((first, first), |(min, max), node| {
            (
                Vector2D::new([min.x().min(node.x()), min.y().min(node.y())]),
                Vector2D::new([max.x().max(node.x()), max.y().max(node.y())]),
            )
        });
        Some(bounds)
    }

    /// Signed area enclosed by the line, closing it from the last node back
    /// to the first. Positive for counter-clockwise.
    #[must_use]
    pub fn get_area(&self) -> f64 {
        let points: Vec<Vector2> = self.nodes.iter().map(|n| *n.as_svector()).collect();
        signed_area_2d(&points)
    }

    /// Reflects the line across the infinite line through `p1` and `p2`.
    #[must_use]
    pub fn mirror(&self, p1: &Vector2D, p2: &Vector2D) -> Self {
        let normal = Vector2D::from(left_normal((*p1 - *p2).as_svector())).normalized();
        self.nodes
            .iter()
            .map(|node| *node - normal * (2.0 * (*node - *p1).dot(&normal)))
            .collect()
    }

    /// Rotates the line counter-clockwise by `angle` radians around `origin`.
    #[must_use]
    pub fn rotate(&self, angle: f64, origin: &Vector2D) -> Self {
        let (sin, cos) = angle.sin_cos();
        self.nodes
            .iter()
            .map(|node| {
                let d = *node - *origin;
                *origin + Vector2D::new([cos * d.x() - sin * d.y(), sin * d.x() + cos * d.y()])
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;

    use super::*;

    fn v(x: f64, y: f64) -> Vector2D {
        Vector2D::new([x, y])
    }

    fn kite() -> PolyLine2D {
        PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0], [2.0, 1.0], [1.0, 3.0], [0.0, 0.0]])
    }

    #[test]
    fn cut_single_crossing() {
        let cuts = kite().cut(&v(0.5, -1.0), &v(0.5, 1.0));
        assert_eq!(cuts.len(), 1);
        assert_abs_diff_eq!(cuts[0].ik_1, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(cuts[0].ik_2, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(cuts[0].point, v(0.5, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn cut_line_is_unbounded() {
        let cuts = kite().cut_line(&v(0.5, -1.0), &v(0.5, 1.0));
        assert_eq!(cuts.len(), 2);
        assert_abs_diff_eq!(cuts[0].ik_1, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(cuts[1].ik_1, 3.5, epsilon = 1e-9);
        assert_abs_diff_eq!(cuts[1].point, v(0.5, 1.5), epsilon = 1e-9);
    }

    #[test]
    fn cut_through_node_reported_once() {
        let line = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);
        let cuts = line.cut(&v(1.0, -1.0), &v(1.0, 1.0));
        assert_eq!(cuts.len(), 1);
        assert_abs_diff_eq!(cuts[0].ik_1, 1.0, epsilon = 1e-9);

        let bent = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0], [2.0, 1.0]]);
        let cuts = bent.cut(&v(1.0, -1.0), &v(1.0, 1.0));
        assert_eq!(cuts.len(), 1);
        assert_abs_diff_eq!(cuts[0].ik_1, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn cut_near_node_before_parallel_segment() {
        let line = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
        for x in [1.0 - 5e-6, 1.0, 1.0 + 5e-6] {
            let cuts = line.cut(&v(x, -1.0), &v(x, 1.0));
            assert_eq!(cuts.len(), 1, "x = {x}");
            assert_abs_diff_eq!(cuts[0].ik_1, x, epsilon = 1e-9);
            assert_abs_diff_eq!(cuts[0].point, v(x, 0.0), epsilon = 1e-9);

            let cuts = line.cut_line(&v(x, -1.0), &v(x, 1.0));
            assert_eq!(cuts.len(), 1, "x = {x}");
        }
    }

    #[test]
    fn cut_near_node_before_turn() {
        let line = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0], [2.0, 1.0]]);
        for x in [1.0 - 5e-6, 1.0 + 5e-6] {
            let cuts = line.cut(&v(x, -1.0), &v(x, 1.0));
            assert_eq!(cuts.len(), 1, "x = {x}");
            assert_abs_diff_eq!(cuts[0].ik_1, x, epsilon = 1e-9);
        }
    }

    #[test]
    fn cut_nearest_at_node_before_parallel_segment() {
        let line = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
        let cut = line.cut_nearest(&v(1.0, -1.0), &v(1.0, 1.0), 0.0).unwrap();
        assert_abs_diff_eq!(cut.ik_1, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cut.ik_2, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn cut_extends_line_ends() {
        let line = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);
        let before = line.cut(&v(-1.0, -1.0), &v(-1.0, 1.0));
        assert_eq!(before.len(), 1);
        assert_abs_diff_eq!(before[0].ik_1, -1.0, epsilon = 1e-9);

        let after = line.cut(&v(3.0, -1.0), &v(3.0, 1.0));
        assert_eq!(after.len(), 1);
        assert_abs_diff_eq!(after[0].ik_1, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn cut_parallel_probe_is_ignored() {
        let line = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0]]);
        assert!(line.cut(&v(0.0, 1.0), &v(1.0, 1.0)).is_empty());
        assert!(PolyLine2D::from_list(&[[0.0, 0.0]]).cut(&v(0.0, 1.0), &v(1.0, 0.0)).is_empty());
    }

    #[test]
    fn cut_nearest_picks_closest() {
        let line = kite();
        let near_start = line.cut_nearest(&v(0.5, -1.0), &v(0.5, 1.0), 0.0).unwrap();
        assert_abs_diff_eq!(near_start.ik_1, 0.5, epsilon = 1e-9);
        let near_end = line.cut_nearest(&v(0.5, -1.0), &v(0.5, 1.0), 3.0).unwrap();
        assert_abs_diff_eq!(near_end.ik_1, 3.5, epsilon = 1e-9);

        let segment = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0]]);
        assert!(segment.cut_nearest(&v(0.0, 1.0), &v(1.0, 1.0), 0.0).is_err());
    }

    #[test]
    fn cut_with_polyline_crossings() {
        let line = PolyLine2D::from_list(&[[0.0, 0.0], [4.0, 0.0]]);
        let wave = PolyLine2D::from_list(&[[0.0, -1.0], [1.0, 1.0], [2.0, -1.0], [3.0, 1.0]]);
        let cuts = line.cut_with_polyline(&wave);
        assert_eq!(cuts.len(), 3);
        for (cut, (ik_1, ik_2)) in cuts.iter().zip([(0.125, 0.5), (0.375, 1.5), (0.625, 2.5)]) {
            assert_abs_diff_eq!(cut.ik_1, ik_1, epsilon = 1e-9);
            assert_abs_diff_eq!(cut.ik_2, ik_2, epsilon = 1e-9);
        }
    }

    #[test]
    fn cut_with_polyline_shared_node_once() {
        let line = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);
        let other = PolyLine2D::from_list(&[[1.0, -1.0], [1.0, 0.0], [1.0, 1.0]]);
        let cuts = line.cut_with_polyline(&other);
        assert_eq!(cuts.len(), 1);
        assert_abs_diff_eq!(cuts[0].ik_1, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(cuts[0].ik_2, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn cut_with_polyline_disjoint() {
        let line = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0]]);
        let other = PolyLine2D::from_list(&[[0.0, 1.0], [1.0, 2.0]]);
        assert!(line.cut_with_polyline(&other).is_empty());
    }

    #[test]
    fn normals_point_right() {
        let line = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]]);
        assert_eq!(line.segment_normals(), vec![v(0.0, -1.0), v(1.0, 0.0)]);
        let normvectors = line.normvectors();
        assert_eq!(normvectors.len(), 3);
        assert_abs_diff_eq!(normvectors[1], v(1.0, -1.0).normalized(), epsilon = 1e-12);
    }

    #[test]
    fn normvectors_at_hairpin() {
        let line = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]);
        assert_abs_diff_eq!(line.normvectors()[1], v(1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn offset_simple_moves_nodes() {
        let line = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]);
        let offset = line.offset_simple(0.5);
        assert_eq!(offset, PolyLine2D::from_list(&[[0.0, -0.5], [1.0, -0.5], [2.0, -0.5]]));
    }

    #[test]
    fn offset_outside_turn_miters() {
        // Left turn, offset to the right: the corner is on the outside.
        let line = PolyLine2D::from_list(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0]]);
        let offset = line.offset(0.5);
        assert_eq!(offset.len(), 3);
        assert_abs_diff_eq!(offset[0], v(0.0, -0.5), epsilon = 1e-12);
        assert_abs_diff_eq!(offset[1], v(2.5, -0.5), epsilon = 1e-12);
        assert_abs_diff_eq!(offset[2], v(2.5, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn offset_inside_turn_keeps_both_points() {
        let line = PolyLine2D::from_list(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0]]);
        let offset = line.offset(-0.5);
        assert_eq!(offset.len(), 4);
        assert_abs_diff_eq!(offset[1], v(2.0, 0.5), epsilon = 1e-12);
        assert_abs_diff_eq!(offset[2], v(1.5, 0.0), epsilon = 1e-12);
        let repaired = offset.fix_errors();
        assert_eq!(repaired.len(), 3);
        assert_abs_diff_eq!(repaired[1], v(1.5, 0.5), epsilon = 1e-9);
    }

    #[test]
    fn offset_nearly_straight_uses_midpoint() {
        let line = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.01]]);
        let offset = line.offset(1.0);
        assert_eq!(offset.len(), 3);
        let normals = line.segment_normals();
        let expected = (v(1.0, 0.0) + normals[0] + v(1.0, 0.0) + normals[1]) * 0.5;
        assert_abs_diff_eq!(offset[1], expected, epsilon = 1e-12);
    }

    #[test]
    fn boundary_box() {
        let (min, max) = kite().boundary().unwrap();
        assert_eq!(min, v(0.0, 0.0));
        assert_eq!(max, v(2.0, 3.0));
        assert!(PolyLine2D::default().boundary().is_none());
    }

    #[test]
    fn area_is_signed() {
        let square = PolyLine2D::from_list(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]);
        assert_abs_diff_eq!(square.get_area(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(square.reversed().get_area(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn mirror_across_axis() {
        let line = PolyLine2D::from_list(&[[1.0, 2.0], [3.0, -1.0]]);
        let mirrored = line.mirror(&v(0.0, 0.0), &v(0.0, 1.0));
        assert_abs_diff_eq!(mirrored[0], v(-1.0, 2.0), epsilon = 1e-12);
        assert_abs_diff_eq!(mirrored[1], v(-3.0, -1.0), epsilon = 1e-12);

        let diagonal = line.mirror(&v(0.0, 0.0), &v(1.0, 1.0));
        assert_abs_diff_eq!(diagonal[0], v(2.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn rotate_about_origin() {
        let line = PolyLine2D::from_list(&[[2.0, 1.0], [3.0, 1.0]]);
        let rotated = line.rotate(FRAC_PI_2, &v(2.0, 1.0));
        assert_abs_diff_eq!(rotated[0], v(2.0, 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(rotated[1], v(2.0, 2.0), epsilon = 1e-12);
    }
}
