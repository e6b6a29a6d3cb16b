pub mod config;
pub mod constants;
pub mod error;
pub mod face;
pub mod grid;
pub mod types;
pub mod uv;

pub use config::{config_to_ron_string, load_config_from_str, ChunkConfig};
pub use error::{ConfigError, GridError};
pub use face::{Face, FaceAxes, FACE_EMISSION_ORDER};
pub use grid::VoxelGrid;
pub use types::{BlockId, ChunkCoord, LocalCoord};
pub use uv::{EmptyUvMapper, UvMapper, UvRect};
