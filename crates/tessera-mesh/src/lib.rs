pub mod buffers;
pub mod error;
pub mod mesher;

pub use buffers::{MeshBuffers, MeshVertex};
pub use error::MeshError;
pub use mesher::ChunkMesher;
