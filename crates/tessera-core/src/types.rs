use glam::IVec3;

/// Newtype for block identifiers. 0 = air/empty, anything else is an opaque solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BlockId(pub u16);

impl BlockId {
    /// Empty cell.
    pub const AIR: Self = Self(0);
    /// Generic solid block produced by population policies.
    pub const SOLID: Self = Self(1);

    pub const fn is_air(self) -> bool {
        self.0 == 0
    }

    pub const fn is_solid(self) -> bool {
        self.0 != 0
    }
}

/// Voxel coordinate local to a chunk origin, each axis in `[0, size)`.
pub type LocalCoord = IVec3;

/// Chunk coordinate in chunk-space (each unit = one chunk edge).
pub type ChunkCoord = IVec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_and_solid() {
        assert!(BlockId::AIR.is_air());
        assert!(!BlockId::AIR.is_solid());
        assert!(BlockId::SOLID.is_solid());
        assert!(BlockId(42).is_solid());
        assert_eq!(BlockId::default(), BlockId::AIR);
    }
}
