use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tessera_core::error::GridError;
use tessera_core::grid::VoxelGrid;
use tessera_core::types::{BlockId, ChunkCoord};
use tessera_mesh::{ChunkMesher, MeshBuffers};

use crate::terrain::FillPolicy;

/// One chunk: a voxel grid, its dirty flag and the last published mesh.
///
/// All methods take `&self`; edits, rebuilds and mesh reads may come from
/// different threads.
///
/// Every edit sets the dirty flag while still holding the grid write lock,
/// and a rebuild clears the flag before reading the grid. An edit therefore
/// either lands before the rebuild's read (and is meshed now) or re-raises
/// the flag afterwards (and is meshed on the next rebuild).
pub struct Chunk {
    coord: ChunkCoord,
    grid: RwLock<VoxelGrid>,
    dirty: AtomicBool,
    /// Serializes rebuilds so publishes happen in swap order.
    rebuild_lock: Mutex<()>,
    mesh: RwLock<Option<Arc<MeshBuffers>>>,
    generation: AtomicU64,
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("coord", &self.coord)
            .field("size", &self.size())
            .field("dirty", &self.is_dirty())
            .field("generation", &self.generation())
            .finish_non_exhaustive()
    }
}

impl Chunk {
    /// Empty (all air) chunk. Not dirty and has no mesh yet.
    pub fn new(coord: ChunkCoord, size: usize) -> Result<Self, GridError> {
        Ok(Self {
            coord,
            grid: RwLock::new(VoxelGrid::new(size)?),
            dirty: AtomicBool::new(false),
            rebuild_lock: Mutex::new(()),
            mesh: RwLock::new(None),
            generation: AtomicU64::new(0),
        })
    }

    /// Populated chunk with a rebuild already requested.
    pub fn generate(
        coord: ChunkCoord,
        size: usize,
        policy: &dyn FillPolicy,
    ) -> Result<Self, GridError> {
        let chunk = Self::new(coord, size)?;
        chunk.repopulate(policy);
        Ok(chunk)
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Edge length in voxels.
    pub fn size(&self) -> usize {
        self.grid.read().size()
    }

    pub fn get(&self, x: i32, y: i32, z: i32) -> Result<BlockId, GridError> {
        self.grid.read().get(x, y, z)
    }

    /// Write one cell and request a rebuild. Returns the previous identifier.
    ///
    /// Writing the value a cell already holds still requests a rebuild.
    pub fn set(&self, x: i32, y: i32, z: i32, id: BlockId) -> Result<BlockId, GridError> {
        let mut grid = self.grid.write();
        let previous = grid.set(x, y, z, id)?;
        self.dirty.store(true, Ordering::Release);
        Ok(previous)
    }

    /// Refill every cell from `policy` and request a rebuild.
    pub fn repopulate(&self, policy: &dyn FillPolicy) {
        let mut grid = self.grid.write();
        policy.populate(&mut grid);
        self.dirty.store(true, Ordering::Release);
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::Release);
    }

    /// Remesh if an edit is pending and publish the result.
    ///
    /// Returns the new mesh, or `None` when the chunk was clean.
    pub fn rebuild_if_dirty(&self, mesher: &ChunkMesher) -> Option<Arc<MeshBuffers>> {
        let _rebuild = self.rebuild_lock.lock();
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return None;
        }

        let pending = RedirtyOnUnwind(&self.dirty);
        let mesh = {
            let grid = self.grid.read();
            Arc::new(mesher.mesh(&grid))
        };
        drop(pending);
        *self.mesh.write() = Some(Arc::clone(&mesh));
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;

        log::debug!(
            "Rebuilt chunk {} (generation {generation}): {} vertices, {} triangles",
            self.coord,
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Some(mesh)
    }

    /// Last published mesh. Shared by renderer and collider; never mutated.
    pub fn mesh(&self) -> Option<Arc<MeshBuffers>> {
        self.mesh.read().clone()
    }

    /// Number of meshes published so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Run `f` against the grid under a read lock.
    pub fn with_grid<R>(&self, f: impl FnOnce(&VoxelGrid) -> R) -> R {
        f(&self.grid.read())
    }
}

/// Re-raises the dirty flag if meshing unwinds, so the edits it consumed
/// are rebuilt on a later pass and the previous mesh stays published.
struct RedirtyOnUnwind<'a>(&'a AtomicBool);

impl Drop for RedirtyOnUnwind<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.store(true, Ordering::Release);
        }
    }
}
