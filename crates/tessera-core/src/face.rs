use glam::{IVec3, Vec3};

use crate::constants::HALF_VOXEL;

/// One of the six axis-aligned faces of a voxel cube. Y-up convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Face {
    /// +Y
    Top = 0,
    /// +X
    Right = 1,
    /// -X
    Left = 2,
    /// +Z
    Forward = 3,
    /// -Z
    Back = 4,
    /// -Y
    Bottom = 5,
}

/// Faces in the fixed order they are emitted for each solid voxel.
pub const FACE_EMISSION_ORDER: [Face; 6] = [
    Face::Top,
    Face::Right,
    Face::Left,
    Face::Forward,
    Face::Back,
    Face::Bottom,
];

/// Signs along the (u, v) tangent axes for quad corners 0..3.
/// Lines up with `UvRect::corners`: (min.x, max.y), (max.x, max.y), (max.x, min.y), (min.x, min.y).
const CORNER_SIGNS: [(i32, i32); 4] = [(-1, 1), (1, 1), (1, -1), (-1, -1)];

/// Normal and tangent axes of a face, all signed unit vectors.
///
/// Every face satisfies `normal = v x u`, which makes triangle (0, 1, 2)
/// counter-clockwise around the outward normal in a right-handed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceAxes {
    pub normal: IVec3,
    pub u: IVec3,
    pub v: IVec3,
}

impl Face {
    /// Normal and tangent axes for this face.
    pub const fn axes(self) -> FaceAxes {
        match self {
            Face::Top => FaceAxes {
                normal: IVec3::Y,
                u: IVec3::X,
                v: IVec3::Z,
            },
            Face::Right => FaceAxes {
                normal: IVec3::X,
                u: IVec3::Z,
                v: IVec3::Y,
            },
            Face::Left => FaceAxes {
                normal: IVec3::NEG_X,
                u: IVec3::NEG_Z,
                v: IVec3::Y,
            },
            Face::Forward => FaceAxes {
                normal: IVec3::Z,
                u: IVec3::NEG_X,
                v: IVec3::Y,
            },
            Face::Back => FaceAxes {
                normal: IVec3::NEG_Z,
                u: IVec3::X,
                v: IVec3::Y,
            },
            Face::Bottom => FaceAxes {
                normal: IVec3::NEG_Y,
                u: IVec3::X,
                v: IVec3::NEG_Z,
            },
        }
    }

    /// Outward unit normal.
    pub const fn normal(self) -> IVec3 {
        self.axes().normal
    }

    /// Outward unit normal as floats, as stored in mesh buffers.
    pub fn normal_f32(self) -> Vec3 {
        self.normal().as_vec3()
    }

    /// The (u, v) tangent axes spanning the face.
    pub const fn tangents(self) -> (IVec3, IVec3) {
        let axes = self.axes();
        (axes.u, axes.v)
    }

    /// Quad corners of a unit cube centered at the origin, in vertex order.
    pub fn corners(self) -> [Vec3; 4] {
        let FaceAxes { normal, u, v } = self.axes();
        CORNER_SIGNS.map(|(su, sv)| (normal + u * su + v * sv).as_vec3() * HALF_VOXEL)
    }

    /// The face pointing the other way along the same axis.
    pub const fn opposite(self) -> Face {
        match self {
            Face::Top => Face::Bottom,
            Face::Bottom => Face::Top,
            Face::Right => Face::Left,
            Face::Left => Face::Right,
            Face::Forward => Face::Back,
            Face::Back => Face::Forward,
        }
    }
}
