use tessera_core::error::GridError;
use tessera_core::grid::VoxelGrid;
use tessera_core::types::{BlockId, LocalCoord};
use tessera_world::terrain::{FillPolicy, RandomFill};

/// Seed for the random scenes, fixed so runs are comparable.
const SCENE_SEED: u64 = 0x7E55_E7A0;

/// Chunk sizes every pattern is measured at.
pub const SCENE_CHUNK_SIZES: [usize; 2] = [16, 32];

/// How a benchmark grid is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenePattern {
    /// All air.
    Empty,
    /// One solid voxel at the center.
    Single,
    /// Alternating solid and air cells in all three axes.
    Checker,
    /// Seeded coin flip per cell.
    Random50,
    /// Every cell solid (worst case for a non-culling mesher).
    Solid,
    /// Solid one-voxel shell around an air interior.
    Hollow,
}

impl ScenePattern {
    pub const ALL: [ScenePattern; 6] = [
        ScenePattern::Empty,
        ScenePattern::Single,
        ScenePattern::Checker,
        ScenePattern::Random50,
        ScenePattern::Solid,
        ScenePattern::Hollow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScenePattern::Empty => "empty",
            ScenePattern::Single => "single",
            ScenePattern::Checker => "checker",
            ScenePattern::Random50 => "random50",
            ScenePattern::Solid => "solid",
            ScenePattern::Hollow => "hollow",
        }
    }
}

/// Configuration for a single benchmark scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneConfig {
    pub name: String,
    pub pattern: ScenePattern,
    pub chunk_size: usize,
}

/// Every pattern at every standard chunk size, smallest size first.
pub fn standard_scenes() -> Vec<SceneConfig> {
    SCENE_CHUNK_SIZES
        .iter()
        .flat_map(|&chunk_size| {
            ScenePattern::ALL.iter().map(move |&pattern| SceneConfig {
                name: format!("{}-{}", pattern.name(), chunk_size),
                pattern,
                chunk_size,
            })
        })
        .collect()
}

/// Build the grid a scene meshes.
pub fn build_scene_grid(config: &SceneConfig) -> Result<VoxelGrid, GridError> {
    let mut grid = VoxelGrid::new(config.chunk_size)?;
    let last = config.chunk_size as i32 - 1;

    match config.pattern {
        ScenePattern::Empty => {}
        ScenePattern::Single => {
            let mid = last / 2;
            grid.set(mid, mid, mid, BlockId::SOLID)?;
        }
        ScenePattern::Checker => grid.populate(|p: LocalCoord| {
            if (p.x + p.y + p.z) % 2 == 0 {
                BlockId::SOLID
            } else {
                BlockId::AIR
            }
        }),
        ScenePattern::Random50 => RandomFill::coin_flip(SCENE_SEED).populate(&mut grid),
        ScenePattern::Solid => grid.fill(BlockId::SOLID),
        ScenePattern::Hollow => grid.populate(|p: LocalCoord| {
            let on_shell = p.to_array().iter().any(|&c| c == 0 || c == last);
            if on_shell {
                BlockId::SOLID
            } else {
                BlockId::AIR
            }
        }),
    }

    Ok(grid)
}
