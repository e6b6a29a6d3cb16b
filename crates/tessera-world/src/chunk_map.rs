use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tessera_core::types::ChunkCoord;

use crate::chunk::Chunk;
use crate::error::WorldError;

/// Spatial container for all loaded chunks.
#[derive(Debug, Default)]
pub struct ChunkMap {
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl ChunkMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chunk under its own coordinate. Fails if that slot is taken.
    pub fn insert(&mut self, chunk: Chunk) -> Result<&Chunk, WorldError> {
        match self.chunks.entry(chunk.coord()) {
            Entry::Occupied(entry) => Err(WorldError::ChunkAlreadyLoaded(*entry.key())),
            Entry::Vacant(entry) => Ok(entry.insert(chunk)),
        }
    }

    /// Unload a chunk, handing it back to the caller.
    pub fn remove(&mut self, coord: &ChunkCoord) -> Option<Chunk> {
        self.chunks.remove(coord)
    }

    pub fn get(&self, coord: &ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(coord)
    }

    pub fn contains(&self, coord: &ChunkCoord) -> bool {
        self.chunks.contains_key(coord)
    }

    /// Iterator over all loaded chunks (unordered).
    pub fn iter(&self) -> impl Iterator<Item = (&ChunkCoord, &Chunk)> {
        self.chunks.iter()
    }

    /// Loaded coordinates ordered by (x, y, z).
    pub fn sorted_coords(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<_> = self.chunks.keys().copied().collect();
        coords.sort_by_key(|c| c.to_array());
        coords
    }

    /// Coordinates of chunks with a pending rebuild, ordered by (x, y, z).
    pub fn dirty_coords(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<_> = self
            .chunks
            .iter()
            .filter(|(_, chunk)| chunk.is_dirty())
            .map(|(coord, _)| *coord)
            .collect();
        coords.sort_by_key(|c| c.to_array());
        coords
    }

    pub fn dirty_count(&self) -> usize {
        self.chunks.values().filter(|c| c.is_dirty()).count()
    }

    /// Number of loaded chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
