use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Camera state handed to the JS renderer every frame as a `Float32Array`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PoseExport {
    pub eye: [f32; 3],
    pub fovy_radians: f32,
    pub target: [f32; 3],
    pub aspect: f32,
    pub up: [f32; 3],
    /// 1.0 while a painting is under the pointer.
    pub hovered: f32,
}

impl PoseExport {
    pub fn new(eye: Vec3, target: Vec3, up: Vec3, fovy_radians: f32, aspect: f32, hovered: bool) -> Self {
        Self {
            eye: eye.to_array(),
            fovy_radians,
            target: target.to_array(),
            aspect,
            up: up.to_array(),
            hovered: if hovered { 1.0 } else { 0.0 },
        }
    }

    #[inline]
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }
}
