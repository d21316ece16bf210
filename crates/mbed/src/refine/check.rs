//! Postcondition verifier for a finished refinement.

use nalgebra::{DVector, DVectorView};

use super::{tol, RefineError, Refinement};
use crate::mesh::LineMesh;

impl Refinement {
    /// Verify the refinement of `original` at `threshold`:
    /// - the parent map is aligned, in range and grouped by ascending parent;
    /// - the input vertices are a bit-exact prefix of the output vertices;
    /// - every edge is at most `threshold` long and lies on its parent segment
    ///   with the same orientation;
    /// - total length is preserved.
    pub fn check(&self, original: &LineMesh, threshold: f64) -> Result<(), RefineError> {
        let fail =
            |msg: String| -> Result<(), RefineError> { Err(RefineError::Postcondition(msg)) };
        let refined = &self.mesh;

        if self.parent_map.len() != refined.num_edges() {
            return fail(format!(
                "parent map has {} entries for {} edges",
                self.parent_map.len(),
                refined.num_edges()
            ));
        }
        if refined.num_edges() < original.num_edges() {
            return fail("refinement lost edges".into());
        }
        if refined.dim() != original.dim() {
            return fail(format!("dimension changed {} -> {}", original.dim(), refined.dim()));
        }
        let nv = original.num_vertices();
        if refined.num_vertices() < nv {
            return fail("refinement lost vertices".into());
        }
        let prefix = &refined.coordinates().as_slice()[..original.dim() * nv];
        let same = prefix
            .iter()
            .zip(original.coordinates().as_slice())
            .all(|(a, b)| a.to_bits() == b.to_bits());
        if !same {
            return fail("input vertices were not preserved bit-for-bit".into());
        }
        if self.parent_map.as_slice().windows(2).any(|w| w[0] > w[1]) {
            return fail("edges are not grouped by ascending parent".into());
        }

        for (edge, &[a, b]) in refined.edges().iter().enumerate() {
            let parent = self.parent_map[edge];
            let (p0, p1) = original
                .edge_vertices(parent)
                .map_err(|_| RefineError::ParentIndex {
                    edge,
                    parent,
                    len: original.num_edges(),
                })?;
            let (x0, x1) = (original.vertex(p0), original.vertex(p1));
            let (y0, y1) = (refined.vertex(a), refined.vertex(b));
            let scale = 1.0 + x0.amax().max(x1.amax());

            let len = y0.metric_distance(&y1);
            if len > threshold * (1.0 + tol::THRESHOLD_REL) + tol::COORD_ABS * scale {
                return fail(format!("edge {edge} has length {len} > {threshold}"));
            }
            let mid = (y0 + y1) * 0.5;
            if !on_segment(&mid, x0, x1, scale) {
                return fail(format!("edge {edge} is off its parent edge {parent}"));
            }
            let (e, f) = (x1 - x0, y1 - y0);
            let (ne, nf) = (e.norm(), f.norm());
            if ne > 0.0 && nf > 0.0 && 1.0 - e.dot(&f) / (ne * nf) > tol::DIRECTION {
                return fail(format!("edge {edge} is not aligned with parent edge {parent}"));
            }
        }

        let before = original.total_length();
        let after = refined.total_length();
        if (after - before).abs() > tol::LENGTH_REL * before + tol::COORD_ABS {
            return fail(format!("total length changed {before} -> {after}"));
        }
        Ok(())
    }
}

fn on_segment(
    p: &DVector<f64>,
    a: DVectorView<'_, f64>,
    b: DVectorView<'_, f64>,
    scale: f64,
) -> bool {
    let eps = tol::ON_SEGMENT * scale;
    let e = b - a;
    let ee = e.norm_squared();
    if ee == 0.0 {
        return (p - a).norm() <= eps;
    }
    let t = (p - a).dot(&e) / ee;
    let slack = eps / ee.sqrt();
    if !(-slack..=1.0 + slack).contains(&t) {
        return false;
    }
    (p - (a + e * t)).norm() <= eps
}
