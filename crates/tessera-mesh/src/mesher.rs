//! Naive per-face chunk mesher.
//!
//! Every solid voxel emits all six faces, whether or not a neighbor covers
//! them. Enclosed faces end up in both render and collision geometry.

use glam::Vec3;
use tessera_core::constants::{FACES_PER_VOXEL, TANGENT_HANDEDNESS, VERTICES_PER_VOXEL};
use tessera_core::face::{Face, FACE_EMISSION_ORDER};
use tessera_core::grid::VoxelGrid;
use tessera_core::types::BlockId;
use tessera_core::uv::{EmptyUvMapper, UvMapper};

use crate::buffers::MeshBuffers;

/// Turns a voxel grid into mesh buffers.
///
/// Stateless apart from the UV mapping, so one mesher can serve many chunks
/// in parallel.
pub struct ChunkMesher {
    uv_mapper: Box<dyn UvMapper>,
}

impl std::fmt::Debug for ChunkMesher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkMesher").finish_non_exhaustive()
    }
}

impl Default for ChunkMesher {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkMesher {
    /// Mesher that maps every face to the empty UV rect.
    pub fn new() -> Self {
        Self::with_uv_mapper(Box::new(EmptyUvMapper))
    }

    pub fn with_uv_mapper(uv_mapper: Box<dyn UvMapper>) -> Self {
        Self { uv_mapper }
    }

    /// Build fresh buffers for the whole grid.
    ///
    /// Cells are scanned X outer, Y middle, Z inner (ascending); each solid
    /// cell emits Top, Right, Left, Forward, Back, Bottom in that order. The
    /// output is a pure function of the grid contents and the UV mapping.
    pub fn mesh(&self, grid: &VoxelGrid) -> MeshBuffers {
        assert!(grid.size() > 0, "cannot mesh a zero-sized grid");

        let solid = grid.solid_count();
        assert!(
            solid * VERTICES_PER_VOXEL <= u32::MAX as usize,
            "chunk with {solid} solid voxels overflows u32 indices"
        );

        let mut mesh = MeshBuffers::with_face_capacity(solid * FACES_PER_VOXEL);
        for (pos, block) in grid.iter_solid() {
            let offset = pos.as_vec3();
            for face in FACE_EMISSION_ORDER {
                self.emit_face(&mut mesh, face, offset, block);
            }
        }

        debug_assert_eq!(mesh.validate(), Ok(()), "mesher broke buffer invariants");
        mesh
    }

    /// Append one unit quad for `face` of the voxel centered at `offset`.
    fn emit_face(&self, mesh: &mut MeshBuffers, face: Face, offset: Vec3, block: BlockId) {
        let uv = self.uv_mapper.uv_rect(block, face);
        let (u, _) = face.tangents();
        mesh.push_quad(
            face.corners().map(|corner| corner + offset),
            face.normal_f32(),
            uv.corners(),
            u.as_vec3().extend(TANGENT_HANDEDNESS),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec4};
    use tessera_core::constants::INDICES_PER_VOXEL;
    use tessera_core::types::LocalCoord;
    use tessera_core::uv::UvRect;

    fn grid_with(size: usize, solids: &[(i32, i32, i32)]) -> VoxelGrid {
        let mut grid = VoxelGrid::new(size).expect("valid size");
        for &(x, y, z) in solids {
            grid.set(x, y, z, BlockId::SOLID).expect("in range");
        }
        grid
    }

    fn assert_consistent(mesh: &MeshBuffers) {
        assert_eq!(mesh.vertices.len(), mesh.normals.len());
        assert_eq!(mesh.vertices.len(), mesh.uvs.len());
        assert_eq!(mesh.vertices.len(), mesh.tangents.len());
        assert_eq!(mesh.indices.len() % 3, 0);
        let count = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < count), "dangling index");
    }

    #[test]
    fn test_empty_grid_produces_empty_mesh() {
        let mesh = ChunkMesher::new().mesh(&grid_with(16, &[]));
        assert!(mesh.vertices.is_empty());
        assert!(mesh.normals.is_empty());
        assert!(mesh.uvs.is_empty());
        assert!(mesh.indices.is_empty());
    }

    #[test]
    fn test_single_voxel_counts_independent_of_position() {
        let mesher = ChunkMesher::new();
        for pos in [(0, 0, 0), (15, 15, 15), (3, 9, 0), (0, 15, 7)] {
            let mesh = mesher.mesh(&grid_with(16, &[pos]));
            assert_eq!(mesh.vertex_count(), 24, "at {pos:?}");
            assert_eq!(mesh.index_count(), 36, "at {pos:?}");
            assert_consistent(&mesh);
        }
    }

    #[test]
    fn test_face_normals_per_voxel() {
        let mesh = ChunkMesher::new().mesh(&grid_with(4, &[(1, 2, 3)]));
        let mut seen = Vec::new();
        for (i, face) in FACE_EMISSION_ORDER.iter().enumerate() {
            let normals = &mesh.normals[i * 4..i * 4 + 4];
            assert!(normals.iter().all(|&n| n == face.normal_f32()), "{face:?}");
            assert!(!seen.contains(&normals[0]), "{face:?} normal repeated");
            seen.push(normals[0]);
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_vertices_offset_by_voxel_coordinate() {
        let mesh = ChunkMesher::new().mesh(&grid_with(8, &[(3, 1, 2)]));
        // Top face first
        assert_eq!(
            &mesh.vertices[0..4],
            &[
                Vec3::new(2.5, 1.5, 2.5),
                Vec3::new(3.5, 1.5, 2.5),
                Vec3::new(3.5, 1.5, 1.5),
                Vec3::new(2.5, 1.5, 1.5),
            ]
        );
        // Bottom face last
        assert_eq!(
            &mesh.vertices[20..24],
            &[
                Vec3::new(2.5, 0.5, 1.5),
                Vec3::new(3.5, 0.5, 1.5),
                Vec3::new(3.5, 0.5, 2.5),
                Vec3::new(2.5, 0.5, 2.5),
            ]
        );
    }

    #[test]
    fn test_index_pattern_per_face() {
        let mesh = ChunkMesher::new().mesh(&grid_with(2, &[(0, 0, 0)]));
        for face in 0..6u32 {
            let base = face * 4;
            let start = face as usize * 6;
            assert_eq!(
                &mesh.indices[start..start + 6],
                &[base, base + 1, base + 2, base, base + 2, base + 3]
            );
        }
    }

    #[test]
    fn test_winding_faces_outward() {
        let mesh = ChunkMesher::new().mesh(&grid_with(3, &[(1, 1, 1), (0, 2, 1)]));
        for (t, tri) in mesh.triangles().enumerate() {
            let normal = mesh.normals[mesh.indices[t * 3] as usize];
            let winding = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
            assert!(
                winding.normalize().abs_diff_eq(normal, 1e-6),
                "triangle {t} winds {winding}, expected {normal}"
            );
        }
    }

    #[test]
    fn test_faces_sit_on_voxel_boundary() {
        let mesh = ChunkMesher::new().mesh(&grid_with(4, &[(2, 0, 1)]));
        let center = Vec3::new(2.0, 0.0, 1.0);
        for (v, n) in mesh.vertices.iter().zip(&mesh.normals) {
            assert_eq!((*v - center).dot(*n), 0.5);
        }
    }

    #[test]
    fn test_default_uvs_are_zero() {
        let mesh = ChunkMesher::new().mesh(&grid_with(2, &[(1, 0, 1)]));
        assert!(mesh.uvs.iter().all(|&uv| uv == Vec2::ZERO));
    }

    #[test]
    fn test_custom_uv_mapper() {
        let mapper = |block: BlockId, face: Face| {
            if face == Face::Top {
                UvRect::new(Vec2::new(0.0, 0.5), Vec2::new(0.5, 1.0))
            } else {
                UvRect::new(Vec2::ZERO, Vec2::splat(block.0 as f32 / 10.0))
            }
        };
        let mesher = ChunkMesher::with_uv_mapper(Box::new(mapper));
        let mut grid = VoxelGrid::new(2).expect("valid size");
        grid.set(0, 0, 0, BlockId(5)).expect("in range");
        let mesh = mesher.mesh(&grid);

        assert_eq!(
            &mesh.uvs[0..4],
            &[
                Vec2::new(0.0, 1.0),
                Vec2::new(0.5, 1.0),
                Vec2::new(0.5, 0.5),
                Vec2::new(0.0, 0.5),
            ]
        );
        assert_eq!(mesh.uvs[5], Vec2::new(0.5, 0.5));
        assert_eq!(mesh.uvs[7], Vec2::ZERO);
    }

    #[test]
    fn test_tangents_follow_face_u_axis() {
        let mesh = ChunkMesher::new().mesh(&grid_with(2, &[(0, 1, 0)]));
        for (i, face) in FACE_EMISSION_ORDER.iter().enumerate() {
            let (u, v) = face.tangents();
            for k in 0..4 {
                let tangent = mesh.tangents[i * 4 + k];
                assert_eq!(tangent, u.as_vec3().extend(-1.0));
                assert_eq!(tangent.truncate().dot(mesh.normals[i * 4 + k]), 0.0);
                let bitangent = mesh.normals[i * 4 + k].cross(tangent.truncate()) * tangent.w;
                assert_eq!(bitangent, v.as_vec3(), "{face:?}");
            }
        }
        assert_ne!(mesh.tangents[0], Vec4::ZERO);
    }

    #[test]
    fn test_scan_order_is_x_then_y_then_z() {
        let mesh = ChunkMesher::new().mesh(&grid_with(2, &[(1, 0, 0), (0, 1, 0), (0, 0, 1)]));
        let first_voxel = |face_block: usize| {
            let top_corner = mesh.vertices[face_block * 24];
            top_corner - Face::Top.corners()[0]
        };
        assert_eq!(first_voxel(0), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(first_voxel(1), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(first_voxel(2), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_meshing_is_deterministic() {
        let mut grid = VoxelGrid::new(6).expect("valid size");
        grid.populate(|p: LocalCoord| {
            if (p.x * 7 + p.y * 3 + p.z) % 4 == 0 {
                BlockId::SOLID
            } else {
                BlockId::AIR
            }
        });
        let mesher = ChunkMesher::new();
        let a = mesher.mesh(&grid);
        let b = mesher.mesh(&grid);
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn test_edit_changes_vertex_count_by_one_voxel() {
        let mesher = ChunkMesher::new();
        let mut grid = grid_with(4, &[(0, 0, 0), (1, 0, 0), (3, 3, 3)]);
        let before = mesher.mesh(&grid).vertex_count();

        grid.set(2, 2, 2, BlockId::SOLID).expect("in range");
        let added = mesher.mesh(&grid).vertex_count();
        assert_eq!(added, before + VERTICES_PER_VOXEL);

        grid.set(0, 0, 0, BlockId::AIR).expect("in range");
        grid.set(2, 2, 2, BlockId::AIR).expect("in range");
        let removed = mesher.mesh(&grid).vertex_count();
        assert_eq!(removed, before - VERTICES_PER_VOXEL);
    }

    #[test]
    fn test_enclosed_faces_are_not_culled() {
        // 2x2x2 fully solid except (1,1,1)
        let mut grid = VoxelGrid::new(2).expect("valid size");
        grid.fill(BlockId::SOLID);
        grid.set(1, 1, 1, BlockId::AIR).expect("in range");

        let mesh = ChunkMesher::new().mesh(&grid);
        assert_eq!(mesh.vertex_count(), 7 * 24);
        assert_eq!(mesh.vertex_count(), 168);
        assert_eq!(mesh.index_count(), 7 * INDICES_PER_VOXEL);
        assert_eq!(mesh.index_count(), 252);
        assert_consistent(&mesh);
    }

    #[test]
    fn test_full_chunk_buffers_consistent() {
        let mut grid = VoxelGrid::new(16).expect("valid size");
        grid.fill(BlockId(3));
        let mesh = ChunkMesher::new().mesh(&grid);
        assert_eq!(mesh.vertex_count(), 16 * 16 * 16 * 24);
        assert_eq!(mesh.validate(), Ok(()));
        assert_eq!(
            mesh.bounds(),
            Some((Vec3::splat(-0.5), Vec3::splat(15.5)))
        );
    }
}
