/// Internal-consistency failures detected by `MeshBuffers::validate`.
///
/// A mesh produced by `ChunkMesher` never triggers these; seeing one means a bug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    #[error(
        "attribute length mismatch: {vertices} vertices, {normals} normals, {uvs} uvs, {tangents} tangents"
    )]
    LengthMismatch {
        vertices: usize,
        normals: usize,
        uvs: usize,
        tangents: usize,
    },

    #[error("index count {0} is not a multiple of 3")]
    IndexCountNotTriangles(usize),

    #[error("index {index} references past the end of {vertex_count} vertices")]
    DanglingIndex { index: u32, vertex_count: usize },
}
