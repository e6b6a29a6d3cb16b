use thiserror::Error;

use crate::constants::MAX_CHUNK_SIZE;

/// Errors raised by voxel grid construction and access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid size {0} (must be between 1 and {max})", max = MAX_CHUNK_SIZE)]
    InvalidSize(usize),

    #[error("voxel ({x}, {y}, {z}) is outside a grid of size {size}")]
    OutOfBounds { x: i32, y: i32, z: i32, size: usize },
}

/// Errors raised while loading chunk configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse chunk config RON: {0}")]
    Parse(String),

    #[error("Invalid chunk config: {0}")]
    Invalid(String),
}
