pub mod chunk;
pub mod chunk_map;
pub mod error;
pub mod scheduler;
pub mod terrain;

pub use chunk::Chunk;
pub use chunk_map::ChunkMap;
pub use error::WorldError;
pub use scheduler::{RebuildReport, RebuildScheduler};
pub use terrain::{EmptyFill, FillPolicy, RandomFill, SolidFill};

use tessera_core::config::ChunkConfig;
use tessera_core::types::{BlockId, ChunkCoord};
use tessera_mesh::ChunkMesher;

/// Primary public struct for the tessera-world crate.
/// Owns the loaded chunks, the mesher and the rebuild scheduler.
#[derive(Debug)]
pub struct World {
    config: ChunkConfig,
    chunk_map: ChunkMap,
    mesher: ChunkMesher,
    scheduler: RebuildScheduler,
    terrain: RandomFill,
}

impl World {
    /// Create an empty world using the default (empty UV) mesher.
    pub fn new(config: ChunkConfig) -> Result<Self, WorldError> {
        Self::with_mesher(config, ChunkMesher::new())
    }

    pub fn with_mesher(config: ChunkConfig, mesher: ChunkMesher) -> Result<Self, WorldError> {
        config.validate()?;
        if config.rebuild_budget == 0 {
            log::warn!("Rebuild budget is 0: every dirty chunk is remeshed each tick");
        }
        log::info!(
            "World created: chunk size {}, seed {}, fill probability {}",
            config.chunk_size,
            config.seed,
            config.fill_probability
        );

        Ok(Self {
            terrain: RandomFill::new(config.seed, config.fill_probability),
            scheduler: RebuildScheduler::new(config.rebuild_budget),
            chunk_map: ChunkMap::new(),
            mesher,
            config,
        })
    }

    /// Load a randomly populated chunk. Its first mesh is built on the next tick.
    pub fn spawn_chunk(&mut self, coord: ChunkCoord) -> Result<&Chunk, WorldError> {
        let policy = self.terrain.for_chunk(coord);
        self.spawn_chunk_with(coord, &policy)
    }

    /// Load a chunk populated by `policy`.
    pub fn spawn_chunk_with(
        &mut self,
        coord: ChunkCoord,
        policy: &dyn FillPolicy,
    ) -> Result<&Chunk, WorldError> {
        if self.chunk_map.contains(&coord) {
            return Err(WorldError::ChunkAlreadyLoaded(coord));
        }
        let chunk = Chunk::generate(coord, self.config.chunk_size, policy)?;
        log::debug!("Spawned chunk {coord}");
        self.chunk_map.insert(chunk)
    }

    /// Unload a chunk. Its last mesh stays alive for anyone still holding it.
    pub fn despawn_chunk(&mut self, coord: ChunkCoord) -> Result<Chunk, WorldError> {
        self.chunk_map
            .remove(&coord)
            .ok_or(WorldError::ChunkNotLoaded(coord))
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunk_map.get(&coord)
    }

    /// Read one cell of a loaded chunk (local coordinates).
    pub fn get_block(
        &self,
        coord: ChunkCoord,
        x: i32,
        y: i32,
        z: i32,
    ) -> Result<BlockId, WorldError> {
        let chunk = self.loaded(coord)?;
        Ok(chunk.get(x, y, z)?)
    }

    /// Edit one cell of a loaded chunk and queue its rebuild.
    pub fn set_block(
        &self,
        coord: ChunkCoord,
        x: i32,
        y: i32,
        z: i32,
        id: BlockId,
    ) -> Result<BlockId, WorldError> {
        let chunk = self.loaded(coord)?;
        Ok(chunk.set(x, y, z, id)?)
    }

    /// Run one rebuild pass over dirty chunks.
    pub fn tick(&self) -> RebuildReport {
        self.scheduler.tick(&self.chunk_map, &self.mesher)
    }

    pub fn chunk_map(&self) -> &ChunkMap {
        &self.chunk_map
    }

    pub fn config(&self) -> &ChunkConfig {
        &self.config
    }

    pub fn mesher(&self) -> &ChunkMesher {
        &self.mesher
    }

    fn loaded(&self, coord: ChunkCoord) -> Result<&Chunk, WorldError> {
        self.chunk_map
            .get(&coord)
            .ok_or(WorldError::ChunkNotLoaded(coord))
    }
}
