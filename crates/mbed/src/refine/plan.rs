//! Planning pass: split counts and prefix sums.
//!
//! Offsets are exclusive prefix sums with a trailing total, so edge `c` owns
//! output edges `edge_offsets[c]..edge_offsets[c + 1]` and new vertices
//! `vertex_offsets[c]..vertex_offsets[c + 1]` (global indices, starting at the
//! input vertex count).

use super::RefineError;
use crate::mesh::LineMesh;

/// Number of equal pieces an edge of `length` is cut into.
///
/// `1` when `length <= threshold` (this covers zero-length edges), otherwise
/// `ceil(length / threshold)`, never below 2. `None` when the count does not
/// fit in a `usize`.
#[inline]
pub fn split_count(length: f64, threshold: f64) -> Option<usize> {
    if length <= threshold {
        return Some(1);
    }
    let ratio = (length / threshold).ceil();
    // usize::MAX as f64 rounds up to 2^64; also catches an infinite ratio
    if ratio >= usize::MAX as f64 {
        return None;
    }
    // L/t can round down to exactly 1.0 when L is one ulp above t.
    Some((ratio as usize).max(2))
}

/// Per-edge split counts and output slot offsets for one refinement pass.
#[derive(Clone, Debug)]
pub struct RefinePlan {
    threshold: f64,
    splits: Vec<usize>,
    edge_offsets: Vec<usize>,
    vertex_offsets: Vec<usize>,
}

impl RefinePlan {
    pub fn new(mesh: &LineMesh, threshold: f64) -> Result<Self, RefineError> {
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(RefineError::InvalidThreshold(threshold));
        }
        if mesh.num_edges() == 0 {
            return Err(RefineError::EmptyMesh);
        }
        let mut splits = Vec::with_capacity(mesh.num_edges());
        for (edge, length) in mesh.edge_lengths().into_iter().enumerate() {
            if !length.is_finite() {
                return Err(RefineError::NonFiniteLength { edge });
            }
            let n = split_count(length, threshold).ok_or(RefineError::TooManySplits { edge })?;
            splits.push(n);
        }

        let mut edge_offsets = Vec::with_capacity(splits.len() + 1);
        let mut vertex_offsets = Vec::with_capacity(splits.len() + 1);
        let (mut e, mut v) = (0usize, mesh.num_vertices());
        for (edge, &n) in splits.iter().enumerate() {
            edge_offsets.push(e);
            vertex_offsets.push(v);
            // the coordinate buffer holds d * v values
            let (next_e, next_v) = e
                .checked_add(n)
                .zip(v.checked_add(n - 1))
                .filter(|&(_, v)| v.checked_mul(mesh.dim()).is_some())
                .ok_or(RefineError::TooManySplits { edge })?;
            e = next_e;
            v = next_v;
        }
        edge_offsets.push(e);
        vertex_offsets.push(v);

        Ok(Self {
            threshold,
            splits,
            edge_offsets,
            vertex_offsets,
        })
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Split count per input edge.
    #[inline]
    pub fn splits(&self) -> &[usize] {
        &self.splits
    }

    /// Number of input edges longer than the threshold.
    pub fn num_split_edges(&self) -> usize {
        self.splits.iter().filter(|&&n| n > 1).count()
    }

    /// First output edge index owned by input edge `c` (`c == len` gives the total).
    #[inline]
    pub fn edge_offset(&self, c: usize) -> usize {
        self.edge_offsets[c]
    }

    /// First new global vertex index owned by input edge `c` (`c == len` gives the end).
    #[inline]
    pub fn vertex_offset(&self, c: usize) -> usize {
        self.vertex_offsets[c]
    }

    #[inline]
    pub fn num_output_edges(&self) -> usize {
        self.edge_offsets[self.splits.len()]
    }

    #[inline]
    pub fn num_new_vertices(&self) -> usize {
        self.vertex_offsets[self.splits.len()] - self.vertex_offsets[0]
    }
}
