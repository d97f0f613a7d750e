//! Fixed scene content: the cube geometry and the camera/grid math.
//!
//! Everything here is pure data or pure functions of (tick, grid cell,
//! viewport size), so a frame's transforms are reproducible bit-for-bit.

use glam::{Mat4, Vec3};
use glow::HasContext;

use crate::abs::Vertex;

/// One cube corner: position plus a packed 0xAABBGGRR color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub abgr: u32,
}

impl Vertex for CubeVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<CubeVertex>() as i32;

            // Position attribute
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);

            // Color attribute, normalized bytes
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(
                1,
                4,
                glow::UNSIGNED_BYTE,
                true,
                stride,
                std::mem::size_of::<[f32; 3]>() as i32,
            );
        }
    }
}

/// The eight corners of a unit cube, one color per corner.
pub const CUBE_VERTICES: [CubeVertex; 8] = [
    CubeVertex { position: [-1.0, 1.0, 1.0], abgr: 0xff00_0000 },
    CubeVertex { position: [1.0, 1.0, 1.0], abgr: 0xff00_00ff },
    CubeVertex { position: [-1.0, -1.0, 1.0], abgr: 0xff00_ff00 },
    CubeVertex { position: [1.0, -1.0, 1.0], abgr: 0xff00_ffff },
    CubeVertex { position: [-1.0, 1.0, -1.0], abgr: 0xffff_0000 },
    CubeVertex { position: [1.0, 1.0, -1.0], abgr: 0xffff_00ff },
    CubeVertex { position: [-1.0, -1.0, -1.0], abgr: 0xffff_ff00 },
    CubeVertex { position: [1.0, -1.0, -1.0], abgr: 0xffff_ffff },
];

/// The 12 triangles of the cube as a 16-bit index list.
pub const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, //
    1, 3, 2, //
    4, 6, 5, //
    5, 6, 7, //
    0, 2, 4, //
    4, 2, 6, //
    1, 5, 3, //
    5, 7, 3, //
    0, 4, 1, //
    4, 5, 1, //
    2, 3, 6, //
    6, 3, 7, //
];

/// Cubes per grid side.
pub const GRID_DIM: u32 = 11;
/// World-space distance between neighboring cubes.
pub const GRID_SPACING: f32 = 3.0;
/// How far the tick counter advances each frame.
pub const TICK_INCREMENT: f32 = 0.001;

const EYE: Vec3 = Vec3::new(0.0, 0.0, -30.0);
const FOV_Y_DEGREES: f32 = 60.0;
const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

/// Camera looking at the origin from a fixed offset along -Z.
pub fn view_matrix() -> Mat4 {
    Mat4::look_at_rh(EYE, Vec3::ZERO, Vec3::Y)
}

/// Perspective projection for the given viewport size.
pub fn projection_matrix(width: u32, height: u32) -> Mat4 {
    Mat4::perspective_rh_gl(
        FOV_Y_DEGREES.to_radians(),
        width as f32 / height as f32,
        Z_NEAR,
        Z_FAR,
    )
}

/// Model transform for the cube at (`col`, `row`): rotate about X and Y with
/// per-cell phase offsets, then translate onto the grid centered on the
/// origin.
pub fn model_matrix(tick: f32, col: u32, row: u32) -> Mat4 {
    let half_extent = (GRID_DIM - 1) as f32 * GRID_SPACING / 2.0;
    let translation = Vec3::new(
        -half_extent + col as f32 * GRID_SPACING,
        -half_extent + row as f32 * GRID_SPACING,
        0.0,
    );
    Mat4::from_translation(translation)
        * Mat4::from_rotation_y(tick + row as f32 * 0.37)
        * Mat4::from_rotation_x(tick + col as f32 * 0.21)
}
