//! Mount and unmount of one visualizer in a window.
//!
//! A [`ViewportHandle`] owns everything a mounted visualizer needs: the frame
//! target, the interaction controller, the render loop and the pointer and
//! touch translators. [`unmount`] consumes the handle, so a viewport can only
//! be torn down once.

use std::time::Instant;

use exoviz_input::{InteractionController, PointerEvent, PointerState, TouchTracker};
use exoviz_render::ReleasedResources;
use exoviz_scene::VariantDescriptor;
use tracing::{debug, info};
use winit::event::WindowEvent;

use crate::render_loop::{FrameTarget, RenderLoop};

/// What the caller should do after a window event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportAction {
    Continue,
    /// The window asked to close; unmount the viewport.
    Close,
}

/// A mounted visualizer.
pub struct ViewportHandle<T: FrameTarget> {
    target: T,
    controller: InteractionController,
    render_loop: RenderLoop,
    pointer: PointerState,
    touch: TouchTracker,
}

/// Mount a visualizer on `target` and start its render loop.
///
/// `target` must already hold the uploaded scene, sized to the container.
pub fn mount<T: FrameTarget>(mut target: T, descriptor: &VariantDescriptor) -> ViewportHandle<T> {
    let mut render_loop = RenderLoop::new();
    render_loop.start(&mut target);
    info!("Mounted {} viewport", descriptor.variant.label());
    ViewportHandle {
        target,
        controller: InteractionController::new(descriptor.interaction),
        render_loop,
        pointer: PointerState::new(),
        touch: TouchTracker::new(),
    }
}

/// Stop the render loop, detach input and release every GPU resource.
pub fn unmount<T: FrameTarget>(handle: ViewportHandle<T>) -> ReleasedResources {
    // Pointer and touch translators are dropped here with the rest of the handle.
    let ViewportHandle {
        target,
        mut render_loop,
        ..
    } = handle;
    render_loop.stop();
    let released = target.release();
    info!(
        "Unmounted viewport after {} frames ({} buffers, {} textures released)",
        render_loop.frame_count(),
        released.buffers,
        released.textures
    );
    released
}

impl<T: FrameTarget> ViewportHandle<T> {
    /// Route one window event.
    pub fn handle_window_event(&mut self, event: &WindowEvent, now: Instant) -> ViewportAction {
        match event {
            WindowEvent::CloseRequested => return ViewportAction::Close,
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            // winit follows this with a Resized carrying the new physical size.
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                debug!("Scale factor changed to {scale_factor:.2}");
            }
            WindowEvent::RedrawRequested => {
                self.redraw(now);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let event = self.pointer.on_cursor_moved(position.x, position.y);
                self.dispatch(event, now);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.pointer.on_button(*button, *state);
                self.dispatch(event, now);
            }
            WindowEvent::CursorLeft { .. } => {
                let event = self.pointer.on_cursor_left();
                self.dispatch(event, now);
            }
            WindowEvent::Touch(touch) => {
                let event =
                    self.touch
                        .on_touch(touch.id, touch.phase, touch.location.x, touch.location.y);
                self.dispatch(event, now);
            }
            _ => {}
        }
        ViewportAction::Continue
    }

    /// Feed a translated pointer event to the controller.
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) {
        self.controller.handle(event, now);
    }

    fn dispatch(&mut self, event: Option<PointerEvent>, now: Instant) {
        if let Some(event) = event {
            self.handle_pointer(event, now);
        }
    }

    /// Resize the surface and camera. Handled synchronously on every event.
    pub fn resize(&mut self, width: u32, height: u32) {
        debug!("Viewport resized to {width}x{height}");
        self.target.resize(width, height);
        // Ticks stop while the surface has no area.
        if width > 0 && height > 0 && self.render_loop.is_running() {
            self.target.request_redraw();
        }
    }

    /// Run one render loop tick. Returns whether a frame was drawn.
    pub fn redraw(&mut self, now: Instant) -> bool {
        self.render_loop
            .tick(&mut self.controller, &mut self.target, now)
    }

    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    #[must_use]
    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }

    #[must_use]
    pub fn target(&self) -> &T {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_loop::tests::MockTarget;
    use exoviz_input::{CursorStyle, InteractionMode};
    use exoviz_scene::Variant;
    use glam::Vec2;
    use std::time::Duration;
    use winit::dpi::PhysicalSize;
    use winit::event::{ElementState, MouseButton, TouchPhase};

    fn mounted(variant: Variant) -> ViewportHandle<MockTarget> {
        mount(MockTarget::sized(800, 600), &variant.descriptor())
    }

    #[test]
    fn test_mount_starts_auto_rotating() {
        let handle = mounted(Variant::Exoplanet);
        assert_eq!(handle.controller().mode(), InteractionMode::AutoRotating);
        assert!(handle.render_loop().is_running());
        assert_eq!(handle.target().redraw_requests, 1);
    }

    #[test]
    fn test_redraw_event_renders() {
        let mut handle = mounted(Variant::Exoplanet);
        let action = handle.handle_window_event(&WindowEvent::RedrawRequested, Instant::now());
        assert_eq!(action, ViewportAction::Continue);
        assert_eq!(handle.target().rendered.len(), 1);
        assert_eq!(handle.target().cursors, vec![CursorStyle::Grab]);
    }

    #[test]
    fn test_resize_event_reaches_target() {
        let mut handle = mounted(Variant::Exoplanet);
        handle.handle_window_event(
            &WindowEvent::Resized(PhysicalSize::new(1024, 768)),
            Instant::now(),
        );
        assert_eq!(handle.target().resizes, vec![(1024, 768)]);
        assert_eq!(handle.target().redraw_requests, 2);
    }

    #[test]
    fn test_zero_then_nonzero_resize_resumes_frames() {
        let mut handle = mounted(Variant::Exoplanet);
        let now = Instant::now();
        handle.resize(0, 0);
        assert!(!handle.redraw(now));
        let requests = handle.target().redraw_requests;

        handle.resize(640, 480);
        assert_eq!(handle.target().redraw_requests, requests + 1);
        assert!(handle.redraw(now));
    }

    #[test]
    fn test_close_requested() {
        let mut handle = mounted(Variant::DwarfPlanet);
        let action = handle.handle_window_event(&WindowEvent::CloseRequested, Instant::now());
        assert_eq!(action, ViewportAction::Close);
    }

    #[test]
    fn test_mouse_drag_uses_variant_sensitivity() {
        let mut handle = mounted(Variant::DwarfPlanet);
        let now = Instant::now();
        // Drive the pointer translator directly; winit device ids cannot be
        // built safely in tests.
        let hover = handle.pointer.on_cursor_moved(10.0, 10.0);
        handle.dispatch(hover, now);
        assert_eq!(handle.controller().orientation().yaw, 0.0);
        let press = handle.pointer.on_button(MouseButton::Left, ElementState::Pressed);
        handle.dispatch(press, now);
        let moved = handle.pointer.on_cursor_moved(30.0, 0.0);
        handle.dispatch(moved, now);

        let o = handle.controller().orientation();
        assert!((o.yaw - 20.0 * 0.005).abs() < 1e-6);
        assert!((o.pitch + 10.0 * 0.005).abs() < 1e-6);
        assert_eq!(handle.controller().mode(), InteractionMode::Dragging);
    }

    #[test]
    fn test_release_resumes_after_delay() {
        let mut handle = mounted(Variant::Exoplanet);
        let start = Instant::now();
        handle.handle_pointer(PointerEvent::Down(Vec2::ZERO), start);
        handle.handle_pointer(PointerEvent::Up, start);

        handle.redraw(start + Duration::from_millis(1000));
        assert_eq!(handle.controller().mode(), InteractionMode::Idle);
        handle.redraw(start + Duration::from_millis(2000));
        assert_eq!(handle.controller().mode(), InteractionMode::AutoRotating);
    }

    #[test]
    fn test_touch_routes_single_finger() {
        let mut handle = mounted(Variant::Exoplanet);
        let now = Instant::now();
        let start = handle.touch.on_touch(1, TouchPhase::Started, 0.0, 0.0);
        handle.dispatch(start, now);
        let second = handle.touch.on_touch(2, TouchPhase::Started, 5.0, 5.0);
        handle.dispatch(second, now);
        let moved = handle.touch.on_touch(1, TouchPhase::Moved, 50.0, 0.0);
        handle.dispatch(moved, now);

        assert_eq!(handle.controller().mode(), InteractionMode::Dragging);
        assert_eq!(handle.controller().orientation().yaw, 0.0);
    }

    #[test]
    fn test_unmount_stops_and_releases() {
        let mut handle = mounted(Variant::Exoplanet);
        handle.redraw(Instant::now());
        let released = unmount(handle);
        assert_eq!(
            released,
            ReleasedResources {
                buffers: 4,
                textures: 1
            }
        );
    }
}
