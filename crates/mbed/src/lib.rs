//! Curve-mesh preprocessing for volumetric embedding.
//!
//! A 1D mesh (open polylines or closed loops in R^d) is refined so that no
//! edge exceeds a target length before it is handed to an external meshing
//! kernel. Every refined edge keeps a pointer back to the edge it came from.
//!
//! Layout
//! - `mesh`: `LineMesh` (vertex matrix + edge connectivity) and samplers.
//! - `refine`: length-threshold refinement with parent tracking.
//! - `embed`: interfaces to the bounding shape and meshing kernel, plus the
//!   option bundle passed through to them.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.

pub mod api;
pub mod embed;
mod error;
pub mod mesh;
pub mod refine;

pub use error::{Error, Result};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::embed::{
        embed_mesh1d, BoundingShape, EmbedError, EmbedMode, EmbedOptions, MeshingKernel,
        ResolvedOptions,
    };
    pub use crate::mesh::{LineMesh, MeshError};
    pub use crate::refine::{refine, ParentMap, RefineError, Refinement};
    pub use nalgebra::{DMatrix, DVector};
}
