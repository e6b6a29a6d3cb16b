//! Single source of truth for chunk layout and meshing constants.

/// Default edge length of a chunk in voxels.
pub const DEFAULT_CHUNK_SIZE: usize = 16;

/// Probability that a cell is solid under the default random population.
pub const DEFAULT_FILL_PROBABILITY: f64 = 0.5;

/// Largest chunk edge whose fully solid mesh still fits `u32` indices
/// (`24 * 563^3 <= u32::MAX < 24 * 564^3`).
pub const MAX_CHUNK_SIZE: usize = 563;

/// Default number of chunks rebuilt per scheduler tick.
pub const DEFAULT_REBUILD_BUDGET: usize = 4;

/// Faces emitted for every solid voxel (no neighbor culling).
pub const FACES_PER_VOXEL: usize = 6;

/// Vertices appended per face quad.
pub const VERTICES_PER_FACE: usize = 4;

/// Indices appended per face quad (two triangles).
pub const INDICES_PER_FACE: usize = 6;

/// Vertices emitted per solid voxel (6 faces x 4).
pub const VERTICES_PER_VOXEL: usize = FACES_PER_VOXEL * VERTICES_PER_FACE;

/// Indices emitted per solid voxel (6 faces x 6).
pub const INDICES_PER_VOXEL: usize = FACES_PER_VOXEL * INDICES_PER_FACE;

/// Half the edge length of a voxel cube. Cubes are centered on their integer coordinate.
pub const HALF_VOXEL: f32 = 0.5;

/// Triangle list for one quad, relative to the quad's first vertex.
pub const QUAD_INDICES: [u32; INDICES_PER_FACE] = [0, 1, 2, 0, 2, 3];

/// Handedness stored in the tangent `w` component. Every face satisfies
/// `normal x u = -v`, so the bitangent is recovered as `cross(n, t) * w`.
pub const TANGENT_HANDEDNESS: f32 = -1.0;
