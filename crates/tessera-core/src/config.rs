use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CHUNK_SIZE, DEFAULT_FILL_PROBABILITY, DEFAULT_REBUILD_BUDGET, MAX_CHUNK_SIZE,
};
use crate::error::ConfigError;
use crate::grid::VoxelGrid;

/// Chunk generation and rebuild settings, loaded from RON.
///
/// Every field is optional in the source text; missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    /// Chunk edge length in voxels.
    pub chunk_size: usize,
    /// Base seed for random population.
    pub seed: u64,
    /// Probability a cell is solid under random population.
    pub fill_probability: f64,
    /// Maximum chunks rebuilt per scheduler tick. 0 = no limit.
    pub rebuild_budget: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            seed: 0,
            fill_probability: DEFAULT_FILL_PROBABILITY,
            rebuild_budget: DEFAULT_REBUILD_BUDGET,
        }
    }
}

impl ChunkConfig {
    /// Check value ranges. Does not touch the filesystem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if VoxelGrid::check_size(self.chunk_size).is_err() {
            return Err(ConfigError::Invalid(format!(
                "chunk_size must be between 1 and {MAX_CHUNK_SIZE}, got {}",
                self.chunk_size
            )));
        }
        if !(0.0..=1.0).contains(&self.fill_probability) {
            return Err(ConfigError::Invalid(format!(
                "fill_probability must be within [0, 1], got {}",
                self.fill_probability
            )));
        }
        Ok(())
    }
}

/// Parse and validate a chunk config from a RON string.
pub fn load_config_from_str(ron_str: &str) -> Result<ChunkConfig, ConfigError> {
    let options = ron::Options::default();
    let config: ChunkConfig = options
        .from_str(ron_str)
        .map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    log::debug!("Loaded chunk config: {config:?}");
    Ok(config)
}

/// Serialize a config back to pretty-printed RON.
pub fn config_to_ron_string(config: &ChunkConfig) -> Result<String, ConfigError> {
    ron::ser::to_string_pretty(config, ron::ser::PrettyConfig::default())
        .map_err(|e| ConfigError::Parse(e.to_string()))
}
