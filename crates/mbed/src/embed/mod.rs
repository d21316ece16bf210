//! Hand-off of a (refined) curve mesh to a volumetric meshing kernel.
//!
//! Purpose
//! - Define the seams to the two external collaborators: the bounding shape
//!   (containment oracle) and the meshing kernel (point or line insertion).
//! - Validate the call and dispatch on `EmbedMode`; geometry predicates and
//!   the kernel itself live outside this crate.
//!
//! Curves that leave the bounding shape would need the shape surface to be
//! split around them; that case is reported as `EmbedError::Unsupported`.

mod options;

pub use options::{EmbedOptions, ResolvedOptions};

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use thiserror::Error;

use crate::mesh::LineMesh;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("unsupported embedding mode `{0}` (expected `as_points` or `as_lines`)")]
    UnsupportedMode(String),
    #[error("curve must live in R^d with d > 1, got d = {0}")]
    CurveDimension(usize),
    #[error("mesh is in R^{mesh} but the bounding shape is in R^{shape}")]
    DimensionMismatch { mesh: usize, shape: usize },
    #[error("not implemented: {0}")]
    Unsupported(&'static str),
    #[error("meshing kernel failed: {0}")]
    Kernel(String),
    #[error("creating output directory {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How the kernel inserts the curve into the volume mesh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmbedMode {
    /// Vertices only, as embedded points.
    AsPoints,
    /// Edges as embedded line segments.
    AsLines,
}

impl FromStr for EmbedMode {
    type Err = EmbedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "as_points" => Ok(EmbedMode::AsPoints),
            "as_lines" => Ok(EmbedMode::AsLines),
            _ => Err(EmbedError::UnsupportedMode(s.to_string())),
        }
    }
}

/// Containment oracle for the bounding domain.
pub trait BoundingShape {
    /// Ambient dimension of the shape.
    fn dim(&self) -> usize;
    /// True when every vertex of `mesh` lies inside the shape.
    fn contains(&self, mesh: &LineMesh) -> bool;
}

/// External meshing session. `embed_mesh1d` calls exactly one method per run.
pub trait MeshingKernel {
    type Output;

    fn embed_lines<S: BoundingShape + ?Sized>(
        &mut self,
        mesh: &LineMesh,
        shape: &S,
        options: &ResolvedOptions,
    ) -> Result<Self::Output, EmbedError>;

    fn embed_points<S: BoundingShape + ?Sized>(
        &mut self,
        mesh: &LineMesh,
        shape: &S,
        options: &ResolvedOptions,
    ) -> Result<Self::Output, EmbedError>;
}

/// Validate and dispatch `mesh` to `kernel` inside `shape`.
///
/// Resolves `options` first (this creates the requested output directories).
pub fn embed_mesh1d<S, K>(
    mesh: &LineMesh,
    shape: &S,
    mode: EmbedMode,
    kernel: &mut K,
    options: &EmbedOptions,
) -> Result<K::Output, EmbedError>
where
    S: BoundingShape + ?Sized,
    K: MeshingKernel,
{
    let d = mesh.dim();
    if d < 2 {
        return Err(EmbedError::CurveDimension(d));
    }
    if shape.dim() != d {
        return Err(EmbedError::DimensionMismatch {
            mesh: d,
            shape: shape.dim(),
        });
    }
    let started = Instant::now();
    let options = options.resolve()?;
    if !shape.contains(mesh) {
        return Err(EmbedError::Unsupported(
            "embedding a curve that leaves the bounding shape",
        ));
    }
    let out = match mode {
        EmbedMode::AsLines => kernel.embed_lines(mesh, shape, &options)?,
        EmbedMode::AsPoints => kernel.embed_points(mesh, shape, &options)?,
    };
    tracing::info!(
        vertices = mesh.num_vertices(),
        edges = mesh.num_edges(),
        dim = d,
        ?mode,
        elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
        "embedded {} vertices and {} edges in R^{}",
        mesh.num_vertices(),
        mesh.num_edges(),
        d
    );
    Ok(out)
}
