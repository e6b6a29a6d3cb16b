use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4};
use tessera_core::constants::{INDICES_PER_FACE, QUAD_INDICES, VERTICES_PER_FACE};

use crate::error::MeshError;

/// Interleaved vertex layout for GPU upload (48 bytes).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
    pub tangent: [f32; 4],
}

/// Output of one meshing run: parallel vertex attribute arrays plus a triangle list.
///
/// `vertices`, `normals`, `uvs` and `tangents` are kept in lock-step; every
/// triple in `indices` names one triangle. Built fresh on each rebuild and
/// treated as an immutable snapshot by renderer and collider.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    /// Positions local to the chunk origin.
    pub vertices: Vec<Vec3>,
    /// Unit normals, one per vertex.
    pub normals: Vec<Vec3>,
    /// Texture coordinates, one per vertex.
    pub uvs: Vec<Vec2>,
    /// Tangent (xyz) and bitangent handedness (w), one per vertex.
    pub tangents: Vec<Vec4>,
    /// Triangle list into the vertex arrays.
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Empty buffers with room for `faces` quads.
    pub fn with_face_capacity(faces: usize) -> Self {
        let verts = faces * VERTICES_PER_FACE;
        Self {
            vertices: Vec::with_capacity(verts),
            normals: Vec::with_capacity(verts),
            uvs: Vec::with_capacity(verts),
            tangents: Vec::with_capacity(verts),
            indices: Vec::with_capacity(faces * INDICES_PER_FACE),
        }
    }

    /// Append one quad as two triangles. Indices are offset by the current
    /// vertex count so references never collide across quads.
    pub fn push_quad(&mut self, positions: [Vec3; 4], normal: Vec3, uvs: [Vec2; 4], tangent: Vec4) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&positions);
        self.normals.extend_from_slice(&[normal; VERTICES_PER_FACE]);
        self.uvs.extend_from_slice(&uvs);
        self.tangents.extend_from_slice(&[tangent; VERTICES_PER_FACE]);
        self.indices.extend(QUAD_INDICES.iter().map(|i| base + i));
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of quads (each face owns exactly 4 vertices).
    pub fn face_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_FACE
    }

    /// Check the buffer invariants: equal attribute lengths, whole triangles,
    /// no index past the last vertex.
    pub fn validate(&self) -> Result<(), MeshError> {
        let vertices = self.vertices.len();
        if self.normals.len() != vertices
            || self.uvs.len() != vertices
            || self.tangents.len() != vertices
        {
            return Err(MeshError::LengthMismatch {
                vertices,
                normals: self.normals.len(),
                uvs: self.uvs.len(),
                tangents: self.tangents.len(),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotTriangles(self.indices.len()));
        }
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertices) {
            return Err(MeshError::DanglingIndex {
                index,
                vertex_count: vertices,
            });
        }
        Ok(())
    }

    /// Triangle soup for collision geometry.
    ///
    /// Requires buffers that pass `validate`; a dangling index panics.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        debug_assert_eq!(self.validate(), Ok(()), "triangles() on invalid buffers");
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Axis-aligned bounds (min, max) of all vertices. None when empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }

    /// Interleave the attribute arrays into the GPU vertex layout.
    ///
    /// Requires buffers that pass `validate`; mismatched attribute lengths
    /// would otherwise truncate to the shortest array.
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        debug_assert_eq!(self.validate(), Ok(()), "interleaved() on invalid buffers");
        self.vertices
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .zip(&self.tangents)
            .map(|(((p, n), uv), t)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: uv.to_array(),
                tangent: t.to_array(),
            })
            .collect()
    }

    /// Index buffer as raw bytes (little-endian u32 on every supported target).
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
