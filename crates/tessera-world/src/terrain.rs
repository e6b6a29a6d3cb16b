use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tessera_core::constants::DEFAULT_FILL_PROBABILITY;
use tessera_core::grid::VoxelGrid;
use tessera_core::types::{BlockId, ChunkCoord, LocalCoord};

/// Decides the contents of a freshly created or refilled chunk grid.
pub trait FillPolicy: Send + Sync {
    /// Assign every cell of `grid`.
    fn populate(&self, grid: &mut VoxelGrid);
}

/// Any per-cell decision function is a policy.
impl<F> FillPolicy for F
where
    F: Fn(LocalCoord) -> BlockId + Send + Sync,
{
    fn populate(&self, grid: &mut VoxelGrid) {
        grid.populate(self);
    }
}

/// Independent coin flip per cell, reproducible from a seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomFill {
    seed: u64,
    probability: f64,
}

impl RandomFill {
    /// `probability` is the chance a cell is solid, clamped into [0, 1].
    /// NaN is treated as 0.
    pub fn new(seed: u64, probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self { seed, probability }
    }

    /// Fair coin per cell.
    pub fn coin_flip(seed: u64) -> Self {
        Self::new(seed, DEFAULT_FILL_PROBABILITY)
    }

    /// Same probability, seed mixed with the chunk coordinate so neighboring
    /// chunks don't repeat each other.
    pub fn for_chunk(&self, coord: ChunkCoord) -> Self {
        Self {
            seed: chunk_seed(self.seed, coord),
            probability: self.probability,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

impl FillPolicy for RandomFill {
    fn populate(&self, grid: &mut VoxelGrid) {
        let mut rng = StdRng::seed_from_u64(self.seed);
        grid.populate(|_| {
            if rng.gen_bool(self.probability) {
                BlockId::SOLID
            } else {
                BlockId::AIR
            }
        });
    }
}

/// Every cell solid.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidFill;

impl FillPolicy for SolidFill {
    fn populate(&self, grid: &mut VoxelGrid) {
        grid.fill(BlockId::SOLID);
    }
}

/// Every cell air.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyFill;

impl FillPolicy for EmptyFill {
    fn populate(&self, grid: &mut VoxelGrid) {
        grid.fill(BlockId::AIR);
    }
}

/// Fold a chunk coordinate into a base seed.
fn chunk_seed(base: u64, coord: ChunkCoord) -> u64 {
    let mut state = base;
    for (axis, prime) in [
        (coord.x, 0x9E37_79B9_7F4A_7C15u64),
        (coord.y, 0x517C_C1B7_2722_0A95),
        (coord.z, 0x6C62_272E_07BB_0142),
    ] {
        state ^= (axis as u32 as u64).wrapping_mul(prime);
        state = mix64(state);
    }
    state
}

fn mix64(mut state: u64) -> u64 {
    state ^= state >> 30;
    state = state.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    state ^= state >> 27;
    state = state.wrapping_mul(0x94D0_49BB_1331_11EB);
    state ^= state >> 31;
    state
}
