//! Length-threshold refinement of 1D meshes with parent-edge tracking.
//!
//! Purpose
//! - Produce a mesh in which every edge has length `<= threshold` by inserting
//!   evenly spaced interior vertices along each violating edge, and record for
//!   every output edge the input edge it descends from (`ParentMap`).
//!
//! Algorithm
//! - An edge of length `L <= threshold` is copied unchanged. Otherwise it is
//!   split into `n = ceil(L / threshold)` equal pieces by the points
//!   `x0 + (k/n)(x1 - x0)`, `k = 1..n`. The formula is kept as is even when it
//!   yields pieces much shorter than `threshold / 2`.
//! - Output edges are grouped by ascending input edge index and run `v0 → v1`
//!   within a group. New vertices follow the originals in the same order, so
//!   the first `num_vertices` columns are a bit-exact copy of the input.
//!
//! Structure
//! - `plan`: sequential pass computing split counts and the two prefix sums
//!   (output-edge offsets, new-vertex offsets).
//! - `fill`: writes every edge's disjoint output slots; parallel over edges with
//!   the `rayon` feature, sequential otherwise. Both give identical output.
//! - `parent`: the dense `ParentMap`, kept apart from the mesh.
//! - `check`: postcondition verifier used by tests and the CLI.

mod check;
mod fill;
mod parent;
mod plan;
pub mod tol;

pub use parent::ParentMap;
pub use plan::{split_count, RefinePlan};

use nalgebra::DMatrix;
use thiserror::Error;

use crate::mesh::{LineMesh, MeshError};

#[derive(Clone, Debug, Error, PartialEq)]
pub enum RefineError {
    #[error("refinement threshold must be positive and finite, got {0}")]
    InvalidThreshold(f64),
    #[error("cannot refine a mesh without edges")]
    EmptyMesh,
    #[error("edge {edge} has non-finite length")]
    NonFiniteLength { edge: usize },
    #[error("edge {edge} needs more pieces than the output can index")]
    TooManySplits { edge: usize },
    #[error("parent map entry {edge} points to edge {parent}, but only {len} exist")]
    ParentIndex {
        edge: usize,
        parent: usize,
        len: usize,
    },
    #[error("refinement postcondition violated: {0}")]
    Postcondition(String),
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Refined mesh plus the parent map aligned with its edges.
#[derive(Clone, Debug, PartialEq)]
pub struct Refinement {
    pub mesh: LineMesh,
    pub parent_map: ParentMap,
}

/// Refine `mesh` so that no edge is longer than `threshold`.
///
/// The input is never modified. Fails on a non-positive or non-finite
/// threshold, an edgeless mesh, an edge of non-finite length, or when the
/// refined mesh would be too large to index.
pub fn refine(mesh: &LineMesh, threshold: f64) -> Result<Refinement, RefineError> {
    let plan = RefinePlan::new(mesh, threshold)?;
    tracing::debug!(
        threshold,
        edges = mesh.num_edges(),
        split = plan.num_split_edges(),
        new_vertices = plan.num_new_vertices(),
        "refine"
    );
    Ok(refine_with_plan(mesh, &plan))
}

/// Execute a plan computed for `mesh`.
pub(crate) fn refine_with_plan(mesh: &LineMesh, plan: &RefinePlan) -> Refinement {
    let out = fill::fill(mesh, plan);

    let d = mesh.dim();
    let mut data = Vec::with_capacity(d * (mesh.num_vertices() + plan.num_new_vertices()));
    data.extend_from_slice(mesh.coordinates().as_slice());
    data.extend_from_slice(&out.coords);
    let coords = DMatrix::from_vec(d, mesh.num_vertices() + plan.num_new_vertices(), data);

    Refinement {
        mesh: LineMesh::from_parts_unchecked(coords, out.edges),
        parent_map: ParentMap::from_vec(out.parents),
    }
}

#[cfg(test)]
mod props;
#[cfg(test)]
mod tests;
