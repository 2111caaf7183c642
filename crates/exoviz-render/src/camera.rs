//! Perspective camera with reverse-Z projection.

use exoviz_scene::CameraSetup;
use glam::{Mat4, Vec3};

use crate::uniforms::CameraUniform;

/// Camera looking at a fixed target.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera from a scene's setup at the given surface size.
    pub fn from_setup(setup: &CameraSetup, width: u32, height: u32) -> Self {
        let mut camera = Self {
            position: setup.position,
            target: setup.target,
            fov_y: setup.fov_y_degrees.to_radians(),
            aspect_ratio: 1.0,
            near: setup.near,
            far: setup.far,
        };
        camera.set_aspect_ratio(width, height);
        camera
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    /// Near and far are swapped so the near plane maps to depth 1.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio. A zero dimension leaves it unchanged.
    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection_matrix().to_cols_array_2d(),
            position: self.position.extend(1.0).to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn setup(distance: f32) -> CameraSetup {
        CameraSetup {
            position: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }

    #[test]
    fn test_aspect_from_size() {
        let camera = Camera::from_setup(&setup(3.0), 1920, 1080);
        assert!((camera.aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
        assert!((camera.fov_y - 75f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_zero_size_keeps_aspect() {
        let mut camera = Camera::from_setup(&setup(3.0), 800, 400);
        camera.set_aspect_ratio(0, 600);
        assert_eq!(camera.aspect_ratio, 2.0);
    }

    #[test]
    fn test_origin_projects_to_centre() {
        let camera = Camera::from_setup(&setup(3.0), 800, 600);
        let clip = camera.view_projection_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_reverse_z_nearer_is_larger() {
        let camera = Camera::from_setup(&setup(10.0), 800, 600);
        let vp = camera.view_projection_matrix();
        let depth = |z: f32| {
            let clip = vp * Vec4::new(0.0, 0.0, z, 1.0);
            clip.z / clip.w
        };
        assert!(depth(5.0) > depth(0.0));
        assert!(depth(0.0) > depth(-100.0));
    }

    #[test]
    fn test_near_plane_maps_to_one() {
        let camera = Camera::from_setup(&setup(10.0), 800, 600);
        let clip = camera.view_projection_matrix() * Vec4::new(0.0, 0.0, 10.0 - 0.1, 1.0);
        assert!((clip.z / clip.w - 1.0).abs() < 1e-4);
    }
}
