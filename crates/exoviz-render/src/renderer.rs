//! One window's renderer: GPU context, depth buffer, camera and scene.

use std::sync::Arc;

use exoviz_scene::Scene;
use glam::Quat;
use winit::window::Window;

use crate::camera::Camera;
use crate::depth::DepthBuffer;
use crate::gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
use crate::gpu_scene::{GpuScene, ReleasedResources};
use crate::pass::{FrameEncoder, RenderPassBuilder};

/// Renders a [`Scene`] into a window surface with a transparent clear.
pub struct CelestialRenderer {
    context: RenderContext,
    depth: DepthBuffer,
    camera: Camera,
    scene: GpuScene,
}

impl CelestialRenderer {
    /// Initialize the GPU for `window` and upload `scene`.
    pub fn new(window: Arc<Window>, vsync: bool, scene: &Scene) -> Result<Self, RenderContextError> {
        let context = init_render_context_blocking(window, vsync)?;
        let (width, height) = context.size();
        let depth = DepthBuffer::new(&context.device, width, height);
        let camera = Camera::from_setup(&scene.camera, width, height);
        let gpu_scene = GpuScene::upload(
            &context.device,
            &context.queue,
            context.surface_format,
            scene,
        );

        Ok(Self {
            context,
            depth,
            camera,
            scene: gpu_scene,
        })
    }

    /// Match a new surface size. Zero dimensions pause rendering.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
        self.camera.set_aspect_ratio(width, height);
        self.depth.resize(&self.context.device, width, height);
        log::debug!(
            "Renderer resized to {width}x{height} (aspect {:.3})",
            self.camera.aspect_ratio
        );
    }

    /// Draw one frame with the body at `orientation`.
    ///
    /// Returns `Ok(false)` without drawing while the surface is unconfigured.
    pub fn render(&mut self, orientation: Quat) -> Result<bool, SurfaceError> {
        if !self.context.is_configured() {
            return Ok(false);
        }
        let surface_texture = self.context.get_current_texture()?;

        self.scene
            .update(&self.context.queue, &self.camera, orientation);

        let mut frame = FrameEncoder::new(&self.context.device, surface_texture);
        let builder = RenderPassBuilder::new()
            .depth(self.depth.view.clone(), DepthBuffer::CLEAR_VALUE)
            .label("celestial-pass");
        {
            let mut pass = frame.begin_render_pass(&builder);
            self.scene.draw(&mut pass);
        }
        frame.submit(&self.context.queue);
        Ok(true)
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.context.is_configured()
    }

    /// Destroy the scene's GPU resources and the depth buffer.
    pub fn release(self) -> ReleasedResources {
        let released = self.scene.release();
        self.depth.destroy();
        released
    }
}
