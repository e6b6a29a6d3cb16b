use rayon::prelude::*;
use tessera_core::types::ChunkCoord;
use tessera_mesh::ChunkMesher;

use crate::chunk_map::ChunkMap;

/// Outcome of one scheduler tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebuildReport {
    /// Chunks remeshed this tick, ordered by (x, y, z).
    pub rebuilt: Vec<ChunkCoord>,
    /// Chunks still dirty once the tick finished.
    pub pending: usize,
}

/// Polls dirty flags and remeshes up to `budget` chunks per tick.
///
/// Chunks are rebuilt in coordinate order, so a budget-limited backlog
/// drains deterministically. Separate chunks share no mutable state and
/// rebuild in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebuildScheduler {
    budget: usize,
}

impl RebuildScheduler {
    /// `budget` of 0 rebuilds every dirty chunk each tick.
    pub fn new(budget: usize) -> Self {
        Self { budget }
    }

    pub fn unbounded() -> Self {
        Self::new(0)
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn tick(&self, map: &ChunkMap, mesher: &ChunkMesher) -> RebuildReport {
        let mut dirty = map.dirty_coords();
        if self.budget > 0 {
            dirty.truncate(self.budget);
        }

        let rebuilt: Vec<ChunkCoord> = dirty
            .par_iter()
            .filter_map(|coord| {
                let chunk = map.get(coord)?;
                chunk.rebuild_if_dirty(mesher).map(|_| *coord)
            })
            .collect();

        let pending = map.dirty_count();
        if !rebuilt.is_empty() {
            log::debug!("Rebuilt {} chunk meshes, {pending} pending", rebuilt.len());
        }
        RebuildReport { rebuilt, pending }
    }
}

impl Default for RebuildScheduler {
    fn default() -> Self {
        Self::new(tessera_core::constants::DEFAULT_REBUILD_BUDGET)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::Chunk;
    use crate::terrain::SolidFill;
    use glam::IVec3;
    use tessera_core::types::BlockId;

    fn dirty_map(coords: &[(i32, i32, i32)]) -> ChunkMap {
        let mut map = ChunkMap::new();
        for &(x, y, z) in coords {
            let chunk = Chunk::generate(IVec3::new(x, y, z), 2, &SolidFill).expect("valid size");
            map.insert(chunk).expect("free slot");
        }
        map
    }

    #[test]
    fn test_unbounded_rebuilds_everything_in_order() {
        let map = dirty_map(&[(2, 0, 0), (0, 0, 0), (1, 0, 0), (0, 3, 0)]);
        let report = RebuildScheduler::unbounded().tick(&map, &ChunkMesher::new());
        assert_eq!(
            report.rebuilt,
            vec![
                IVec3::new(0, 0, 0),
                IVec3::new(0, 3, 0),
                IVec3::new(1, 0, 0),
                IVec3::new(2, 0, 0),
            ]
        );
        assert_eq!(report.pending, 0);
        for (_, chunk) in map.iter() {
            assert_eq!(chunk.mesh().expect("meshed").vertex_count(), 8 * 24);
        }
    }

    #[test]
    fn test_budget_drains_backlog_over_ticks() {
        let map = dirty_map(&[(0, 0, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0), (4, 0, 0)]);
        let mesher = ChunkMesher::new();
        let scheduler = RebuildScheduler::new(2);

        let first = scheduler.tick(&map, &mesher);
        assert_eq!(first.rebuilt, vec![IVec3::new(0, 0, 0), IVec3::new(1, 0, 0)]);
        assert_eq!(first.pending, 3);

        let second = scheduler.tick(&map, &mesher);
        assert_eq!(second.rebuilt, vec![IVec3::new(2, 0, 0), IVec3::new(3, 0, 0)]);
        assert_eq!(second.pending, 1);

        let third = scheduler.tick(&map, &mesher);
        assert_eq!(third.rebuilt, vec![IVec3::new(4, 0, 0)]);
        assert_eq!(third.pending, 0);

        assert_eq!(scheduler.tick(&map, &mesher), RebuildReport::default());
    }

    #[test]
    fn test_clean_chunks_are_skipped() {
        let mut map = dirty_map(&[(0, 0, 0)]);
        map.insert(Chunk::new(IVec3::new(5, 5, 5), 2).expect("valid size"))
            .expect("free slot");
        let report = RebuildScheduler::unbounded().tick(&map, &ChunkMesher::new());
        assert_eq!(report.rebuilt, vec![IVec3::ZERO]);
        assert!(map.get(&IVec3::new(5, 5, 5)).expect("loaded").mesh().is_none());
    }

    #[test]
    fn test_edit_after_tick_is_picked_up_next_tick() {
        let map = dirty_map(&[(0, 0, 0)]);
        let mesher = ChunkMesher::new();
        let scheduler = RebuildScheduler::default();
        scheduler.tick(&map, &mesher);

        let chunk = map.get(&IVec3::ZERO).expect("loaded");
        chunk.set(1, 1, 1, BlockId::AIR).expect("in range");
        let report = scheduler.tick(&map, &mesher);
        assert_eq!(report.rebuilt, vec![IVec3::ZERO]);
        assert_eq!(chunk.mesh().expect("meshed").vertex_count(), 7 * 24);
    }
}
