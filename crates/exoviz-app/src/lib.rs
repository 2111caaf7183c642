//! The exoviz application: render loop, viewport lifecycle and the winit
//! event handler that ties one viewport to each window.

pub mod app;
pub mod launch;
pub mod platform;
pub mod render_loop;
pub mod viewport;

pub use app::{AppError, VisualizerApp, WindowTarget, run, window_attributes_from_config};
pub use launch::{params_from_args, variants_for};
pub use render_loop::{FrameTarget, RenderLoop};
pub use viewport::{ViewportAction, ViewportHandle, mount, unmount};
