//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the CLI, the
//!   Python bindings and benchmarks. Breaking changes are allowed.

// Mesh representation
pub use crate::mesh::rand::{draw_random_walk, ReplayToken, WalkCfg};
pub use crate::mesh::{find_edges, LineMesh, MeshError};
// Refinement
pub use crate::refine::{refine, split_count, ParentMap, RefineError, RefinePlan, Refinement};
// Embedding interfaces
pub use crate::embed::{
    embed_mesh1d, BoundingShape, EmbedError, EmbedMode, EmbedOptions, MeshingKernel,
    ResolvedOptions,
};
