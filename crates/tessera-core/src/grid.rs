use crate::constants::MAX_CHUNK_SIZE;
use crate::error::GridError;
use crate::types::{BlockId, LocalCoord};

/// Dense cubic grid of block identifiers for one chunk.
///
/// Cells are stored X-major (`index = (x * size + y) * size + z`), which is
/// also the scan order used by population and meshing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    size: usize,
    blocks: Vec<BlockId>,
}

impl VoxelGrid {
    /// Create an all-air grid of `size`^3 cells.
    ///
    /// `size` must be within `1..=MAX_CHUNK_SIZE`, so even a fully solid grid
    /// meshes without overflowing `u32` indices.
    pub fn new(size: usize) -> Result<Self, GridError> {
        let volume = Self::check_size(size)?;
        Ok(Self {
            size,
            blocks: vec![BlockId::AIR; volume],
        })
    }

    /// Validate an edge length without allocating. Returns the cell count.
    pub fn check_size(size: usize) -> Result<usize, GridError> {
        if !(1..=MAX_CHUNK_SIZE).contains(&size) {
            return Err(GridError::InvalidSize(size));
        }
        Ok(size * size * size)
    }

    /// Edge length in voxels.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (size^3).
    pub fn volume(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the coordinate lies inside `[0, size)` on every axis.
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        let size = self.size as i64;
        [x, y, z]
            .iter()
            .all(|&c| (0..size).contains(&(c as i64)))
    }

    /// Linear storage index of a coordinate.
    pub fn index_of(&self, x: i32, y: i32, z: i32) -> Result<usize, GridError> {
        if !self.contains(x, y, z) {
            return Err(GridError::OutOfBounds {
                x,
                y,
                z,
                size: self.size,
            });
        }
        Ok(self.linearize(x as usize, y as usize, z as usize))
    }

    /// Coordinate of a linear storage index. Inverse of `index_of`.
    pub fn coord_of(&self, index: usize) -> LocalCoord {
        let s = self.size;
        LocalCoord::new((index / (s * s)) as i32, ((index / s) % s) as i32, (index % s) as i32)
    }

    /// Read one cell.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Result<BlockId, GridError> {
        let idx = self.index_of(x, y, z)?;
        Ok(self.blocks[idx])
    }

    /// Overwrite one cell, returning the identifier it held before.
    pub fn set(&mut self, x: i32, y: i32, z: i32, id: BlockId) -> Result<BlockId, GridError> {
        let idx = self.index_of(x, y, z)?;
        Ok(std::mem::replace(&mut self.blocks[idx], id))
    }

    /// Assign every cell from a per-cell decision, visiting cells in scan order.
    pub fn populate(&mut self, mut decide: impl FnMut(LocalCoord) -> BlockId) {
        for idx in 0..self.blocks.len() {
            let pos = self.coord_of(idx);
            self.blocks[idx] = decide(pos);
        }
    }

    /// Set every cell to the same identifier.
    pub fn fill(&mut self, id: BlockId) {
        self.blocks.fill(id);
    }

    /// Number of non-air cells.
    pub fn solid_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_solid()).count()
    }

    /// Solid cells with their coordinates, in scan order (X outer, Y, Z inner).
    pub fn iter_solid(&self) -> impl Iterator<Item = (LocalCoord, BlockId)> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_solid())
            .map(|(idx, &b)| (self.coord_of(idx), b))
    }

    /// Raw cell storage in scan order.
    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    fn linearize(&self, x: usize, y: usize, z: usize) -> usize {
        (x * self.size + y) * self.size + z
    }
}
