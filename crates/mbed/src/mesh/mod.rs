//! 1D simplicial meshes embedded in R^d.
//!
//! Purpose
//! - Hold vertex coordinates and edge→vertex connectivity for open polylines
//!   and closed loops, with the per-edge length queries the refiner needs.
//!
//! Conventions
//! - Coordinates are a column-major `d × n` matrix: column `j` is vertex `j`.
//!   Column storage keeps each vertex contiguous, so copying a prefix of the
//!   vertex set is a plain slice copy.
//! - Edges are `[v0, v1]` pairs; the position of an edge in the sequence is its
//!   cell index. Orientation `v0 → v1` is kept by every operation.
//! - Degenerate edges (`v0 == v1`) are a caller bug; checked in debug builds only.

pub mod rand;
mod types;

pub use types::{find_edges, LineMesh, MeshError};
