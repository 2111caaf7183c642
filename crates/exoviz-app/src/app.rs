//! winit application: one window per mounted variant.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use exoviz_config::Config;
use exoviz_input::{CursorStyle, Orientation};
use exoviz_params::{CelestialBodyParameters, InfoOverlay, VisualAttributes, map_to_visual_attributes};
use exoviz_render::{CelestialRenderer, ReleasedResources, RenderContextError, SurfaceError};
use exoviz_scene::{Scene, SceneAssets, Variant};
use tracing::{error, info, instrument};
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::render_loop::FrameTarget;
use crate::viewport::{self, ViewportAction, ViewportHandle};

/// Errors that end the application before or during the event loop.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] EventLoopError),
}

/// A window and the renderer drawing into it.
pub struct WindowTarget {
    window: Arc<Window>,
    renderer: CelestialRenderer,
}

impl WindowTarget {
    pub fn new(window: Arc<Window>, vsync: bool, scene: &Scene) -> Result<Self, RenderContextError> {
        let renderer = CelestialRenderer::new(window.clone(), vsync, scene)?;
        Ok(Self { window, renderer })
    }
}

impl FrameTarget for WindowTarget {
    fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }

    fn render(&mut self, orientation: Orientation) -> Result<bool, SurfaceError> {
        self.window.pre_present_notify();
        self.renderer.render(orientation.to_quat())
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        self.window.set_cursor(cursor.to_winit());
    }

    fn request_redraw(&mut self) {
        self.window.request_redraw();
    }

    fn release(self) -> ReleasedResources {
        let released = self.renderer.release();
        // Dropping the last window reference removes the surface.
        drop(self.window);
        released
    }
}

/// Build [`WindowAttributes`] from the window config.
pub fn window_attributes_from_config(config: &Config, title: &str) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(title)
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width,
            config.window.height,
        ))
        .with_transparent(config.window.transparent)
}

/// Application state: the shared record and one viewport per window.
pub struct VisualizerApp {
    config: Config,
    params: CelestialBodyParameters,
    attrs: VisualAttributes,
    variants: Vec<Variant>,
    viewports: HashMap<WindowId, ViewportHandle<WindowTarget>>,
    mounted: bool,
}

impl VisualizerApp {
    pub fn new(config: Config, params: CelestialBodyParameters, variants: Vec<Variant>) -> Self {
        let attrs = map_to_visual_attributes(&params);
        Self {
            config,
            params,
            attrs,
            variants,
            viewports: HashMap::new(),
            mounted: false,
        }
    }

    fn scene_assets(&self) -> SceneAssets {
        SceneAssets {
            surface_map: self.config.assets.surface_map.clone(),
            bump_map: self.config.assets.bump_map.clone(),
            sphere_segments: self.config.render.sphere_segments,
            star_count: self.config.render.star_count,
            star_seed: self.config.render.star_seed,
        }
    }

    fn mount_variant(&mut self, event_loop: &ActiveEventLoop, variant: Variant, assets: &SceneAssets) {
        let descriptor = variant
            .descriptor()
            .with_resume_delay(self.config.resume_delay());
        let scene = Scene::build(&self.attrs, &descriptor, assets);

        let overlay = InfoOverlay::new(&self.params, &self.attrs);
        let title = window_title(&self.config.window.title, variant, &overlay.title());
        let window = match event_loop.create_window(window_attributes_from_config(&self.config, &title)) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create {} window: {e}", variant.label());
                return;
            }
        };
        let size = window.inner_size();
        info!(
            "Window created for {}: {}x{} (scale: {:.2})",
            variant.label(),
            size.width,
            size.height,
            window.scale_factor()
        );

        match WindowTarget::new(window.clone(), self.config.window.vsync, &scene) {
            Ok(target) => {
                let handle = viewport::mount(target, &descriptor);
                self.viewports.insert(window.id(), handle);
            }
            Err(e) => error!("GPU initialization failed for {}: {e}", variant.label()),
        }
    }

    fn close(&mut self, id: WindowId) {
        if let Some(handle) = self.viewports.remove(&id) {
            viewport::unmount(handle);
        }
    }

    #[must_use]
    pub fn viewport_count(&self) -> usize {
        self.viewports.len()
    }
}

impl ApplicationHandler for VisualizerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        let assets = self.scene_assets();
        for variant in self.variants.clone() {
            self.mount_variant(event_loop, variant, &assets);
        }
        if self.viewports.is_empty() {
            error!("No viewport could be mounted, exiting");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(handle) = self.viewports.get_mut(&window_id) else {
            return;
        };
        if handle.handle_window_event(&event, Instant::now()) == ViewportAction::Close {
            info!("Close requested for window {window_id:?}");
            self.close(window_id);
            if self.viewports.is_empty() {
                event_loop.exit();
            }
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        let ids: Vec<WindowId> = self.viewports.keys().copied().collect();
        for id in ids {
            self.close(id);
        }
        info!("Shutting down");
    }
}

/// `"<prefix> - <variant> | <overlay>"`, or without the prefix when it is blank.
pub fn window_title(prefix: &str, variant: Variant, overlay: &str) -> String {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        format!("{} | {overlay}", variant.label())
    } else {
        format!("{prefix} - {} | {overlay}", variant.label())
    }
}

/// Open one window per variant and block until every window is closed.
#[instrument(skip(config, params))]
pub fn run(
    config: Config,
    params: CelestialBodyParameters,
    variants: Vec<Variant>,
) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = VisualizerApp::new(config, params, variants);
    event_loop.run_app(&mut app)?;
    Ok(())
}
