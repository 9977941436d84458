use bytemuck::{Pod, Zeroable};
use nalgebra_glm as glm;
use serde::Serialize;

/// Per-frame matrices in the layout a std140 uniform block expects.
///
/// Matrices are column-major. The normal matrix is a mat3 padded to vec4
/// columns; `eye.w` is always 1.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize)]
pub struct FrameUniforms {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 3],
    pub eye: [f32; 4],
}

impl FrameUniforms {
    pub fn new(
        view: &glm::Mat4,
        projection: &glm::Mat4,
        model: &glm::Mat4,
        normal: &glm::Mat3,
        eye: &glm::Vec3,
    ) -> Self {
        Self {
            view: mat4_columns(view),
            projection: mat4_columns(projection),
            model: mat4_columns(model),
            normal: mat3_padded_columns(normal),
            eye: [eye.x, eye.y, eye.z, 1.0],
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

fn mat4_columns(m: &glm::Mat4) -> [[f32; 4]; 4] {
    std::array::from_fn(|c| std::array::from_fn(|r| m[(r, c)]))
}

fn mat3_padded_columns(m: &glm::Mat3) -> [[f32; 4]; 3] {
    std::array::from_fn(|c| [m[(0, c)], m[(1, c)], m[(2, c)], 0.0])
}
