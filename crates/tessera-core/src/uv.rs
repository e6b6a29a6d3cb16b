use glam::Vec2;

use crate::face::Face;
use crate::types::BlockId;

/// Texture-space rectangle sampled by one face quad.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UvRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl UvRect {
    /// Zero-sized rectangle at the origin. Every UV collapses to (0, 0).
    pub const EMPTY: Self = Self {
        min: Vec2::ZERO,
        max: Vec2::ZERO,
    };

    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// UVs for quad corners 0..3, matching `Face::corners` order.
    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.min.x, self.max.y),
            Vec2::new(self.max.x, self.max.y),
            Vec2::new(self.max.x, self.min.y),
            Vec2::new(self.min.x, self.min.y),
        ]
    }
}

/// Chooses the texture rectangle for a block face.
///
/// Atlas layouts plug in here without touching the mesher.
pub trait UvMapper: Send + Sync {
    fn uv_rect(&self, block: BlockId, face: Face) -> UvRect;
}

/// Maps every block face to `UvRect::EMPTY`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyUvMapper;

impl UvMapper for EmptyUvMapper {
    fn uv_rect(&self, _block: BlockId, _face: Face) -> UvRect {
        UvRect::EMPTY
    }
}

impl<F> UvMapper for F
where
    F: Fn(BlockId, Face) -> UvRect + Send + Sync,
{
    fn uv_rect(&self, block: BlockId, face: Face) -> UvRect {
        self(block, face)
    }
}
