use tessera_core::error::{ConfigError, GridError};
use tessera_core::types::ChunkCoord;
use thiserror::Error;

/// Errors raised by chunk management.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no chunk loaded at {0}")]
    ChunkNotLoaded(ChunkCoord),

    #[error("chunk at {0} is already loaded")]
    ChunkAlreadyLoaded(ChunkCoord),
}
