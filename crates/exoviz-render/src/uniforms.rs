//! GPU-side uniform layouts shared by every pipeline.

use bytemuck::{Pod, Zeroable};
use exoviz_scene::{AmbientLight, DirectionalLight, Material};
use glam::Mat4;

/// `@group(0) @binding(0)`, 80 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// xyz = world position, w = 1.
    pub position: [f32; 4],
}

/// `@group(1) @binding(0)`, 48 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    /// xyz = travel direction (normalized), w = intensity.
    pub direction_intensity: [f32; 4],
    /// xyz = linear color, w unused.
    pub color: [f32; 4],
    /// xyz = linear ambient color premultiplied by its intensity.
    pub ambient: [f32; 4],
}

impl LightUniform {
    pub fn new(key: &DirectionalLight, ambient: &AmbientLight) -> Self {
        let d = key.direction();
        let [r, g, b] = key.color.to_linear();
        let [ar, ag, ab] = ambient.color.to_linear();
        Self {
            direction_intensity: [d.x, d.y, d.z, key.intensity],
            color: [r, g, b, 0.0],
            ambient: [
                ar * ambient.intensity,
                ag * ambient.intensity,
                ab * ambient.intensity,
                0.0,
            ],
        }
    }
}

/// `@group(2) @binding(0)`, 96 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MaterialUniform {
    pub model: [[f32; 4]; 4],
    /// rgb = linear base color, a = opacity.
    pub base_color: [f32; 4],
    /// x = shininess, y = lit (0 or 1), z = bump scale.
    pub shading: [f32; 4],
}

impl MaterialUniform {
    pub fn new(material: &Material, model: Mat4) -> Self {
        let [r, g, b] = material.base_color.to_linear();
        Self {
            model: model.to_cols_array_2d(),
            base_color: [r, g, b, material.opacity],
            shading: [
                material.shininess,
                if material.lit { 1.0 } else { 0.0 },
                // No bump map bound means a flat height field.
                if material.bump_map.is_some() {
                    material.bump_scale
                } else {
                    0.0
                },
                0.0,
            ],
        }
    }

    #[must_use]
    pub fn with_model(mut self, model: Mat4) -> Self {
        self.model = model.to_cols_array_2d();
        self
    }
}
