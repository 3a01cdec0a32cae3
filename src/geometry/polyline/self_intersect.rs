use crate::geometry::vector::Vector2D;
use crate::math::{CUT_TOLERANCE, MIN_SEGMENT_LENGTH};

use super::{to_index, PolyLine2D};

impl PolyLine2D {
    /// Removes self-intersection loops and near zero-length segments.
    ///
    /// Each round finds the first segment that crosses a later,
    /// non-adjacent part of the line and splices out everything between
    /// the two crossing segments, inserting the crossing point. Runs at most
    /// `len()` rounds. The first and last node are kept.
    #[must_use]
    pub fn fix_errors(&self) -> Self {
        let mut nodes = self.nodes.clone();
        for _ in 0..self.nodes.len() {
            match remove_first_loop(&nodes) {
                Some(spliced) => nodes = spliced,
                None => break,
            }
        }
        Self::new(remove_short_segments(nodes))
    }
}

/// Splices out the loop closed by the first self-crossing, if any.
///
/// Of all crossings of segment `start` with the rest of the line, the one
/// furthest along is used so the whole loop goes at once.
fn remove_first_loop(nodes: &[Vector2D]) -> Option<Vec<Vector2D>> {
    for start in 0..nodes.len().saturating_sub(3) {
        let rest = PolyLine2D::new(nodes[start + 2..].to_vec());
        let rest_end = rest.last_index() - CUT_TOLERANCE;

        let crossing = rest
            .cut_line(&nodes[start], &nodes[start + 1])
            .into_iter()
            .filter(|cut| {
                (0.0..rest_end).contains(&cut.ik_1) && (0.0..1.0).contains(&cut.ik_2)
            })
            .max_by(|a, b| a.ik_1.total_cmp(&b.ik_1));

        if let Some(cut) = crossing {
            let next = cut.ik_1.ceil();
            let mut resume = start + 2 + to_index(next);
            // The crossing replaces a node it sits on.
            if next - cut.ik_1 < CUT_TOLERANCE {
                resume += 1;
            }

            let mut spliced = nodes[..=start].to_vec();
            spliced.push(cut.point);
            spliced.extend_from_slice(&nodes[resume..]);
            return Some(spliced);
        }
    }
    None
}

fn remove_short_segments(nodes: Vec<Vector2D>) -> Vec<Vector2D> {
    let Some(&last) = nodes.last() else {
        return nodes;
    };
    let mut result: Vec<Vector2D> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match result.last() {
            Some(prev) if (node - *prev).length() <= MIN_SEGMENT_LENGTH => {}
            _ => result.push(node),
        }
    }
    if result.len() > 1 {
        if let Some(end) = result.last_mut() {
            *end = last;
        }
    }
    result
}
