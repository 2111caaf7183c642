//! wgpu rendering for one celestial body per window: surface setup, the
//! lit/unlit surface pipelines, the starfield, and scene upload and release.

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod gpu;
pub mod gpu_scene;
pub mod pass;
pub mod pipeline;
pub mod renderer;
pub mod uniforms;

#[cfg(test)]
mod test_util;

pub use buffer::{BodyVertex, MeshBuffer, PointBuffer, StarVertex};
pub use camera::Camera;
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use gpu_scene::{GpuScene, ReleasedResources};
pub use pass::{FrameEncoder, RenderPassBuilder, TRANSPARENT};
pub use pipeline::{CELESTIAL_SHADER_SOURCE, CelestialPipelines};
pub use renderer::CelestialRenderer;
pub use uniforms::{CameraUniform, LightUniform, MaterialUniform};
