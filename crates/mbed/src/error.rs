//! Crate-level error: one variant per module error.

use thiserror::Error;

use crate::embed::EmbedError;
use crate::mesh::MeshError;
use crate::refine::RefineError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error(transparent)]
    Refine(#[from] RefineError),
    #[error(transparent)]
    Embed(#[from] EmbedError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
