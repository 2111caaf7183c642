//! Per-frame scheduling: advance the interaction state, render, update the
//! cursor, then ask for the next display refresh.

use std::time::Instant;

use exoviz_input::{CursorStyle, InteractionController, Orientation};
use exoviz_render::{ReleasedResources, SurfaceError};
use tracing::{debug, warn};

/// Whatever the loop draws into. Implemented by a window plus its renderer,
/// and by recording mocks in tests.
pub trait FrameTarget {
    /// Match a new surface size. Zero dimensions pause drawing.
    fn resize(&mut self, width: u32, height: u32);

    /// Draw one frame with the body at `orientation`.
    ///
    /// `Ok(false)` means nothing was drawn because the surface has no area.
    fn render(&mut self, orientation: Orientation) -> Result<bool, SurfaceError>;

    fn set_cursor(&mut self, cursor: CursorStyle);

    /// Schedule another tick on the next display refresh.
    fn request_redraw(&mut self);

    /// Destroy every GPU resource and the output surface.
    fn release(self) -> ReleasedResources
    where
        Self: Sized;
}

/// Self-rescheduling render loop for one viewport.
#[derive(Debug, Default)]
pub struct RenderLoop {
    running: bool,
    frames: u64,
    cursor: Option<CursorStyle>,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin ticking on the next display refresh.
    pub fn start<T: FrameTarget>(&mut self, target: &mut T) {
        if self.running {
            return;
        }
        self.running = true;
        target.request_redraw();
        debug!("Render loop started");
    }

    /// Stop scheduling frames. Stopping a stopped loop does nothing.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            debug!("Render loop stopped after {} frames", self.frames);
        }
    }

    /// Run one frame. Returns whether anything was drawn.
    ///
    /// A stopped loop neither draws nor reschedules.
    pub fn tick<T: FrameTarget>(
        &mut self,
        controller: &mut InteractionController,
        target: &mut T,
        now: Instant,
    ) -> bool {
        if !self.running {
            return false;
        }

        controller.advance_frame(now);

        let (drawn, reschedule) = match target.render(controller.orientation()) {
            Ok(true) => (true, true),
            // No surface area; the next non-zero resize restarts the ticks.
            Ok(false) => (false, false),
            Err(e) => {
                warn!("Frame skipped: {e}");
                (false, true)
            }
        };
        if drawn {
            self.frames += 1;
        }

        let cursor = controller.cursor();
        if self.cursor != Some(cursor) {
            target.set_cursor(cursor);
            self.cursor = Some(cursor);
        }

        if reschedule {
            target.request_redraw();
        }
        drawn
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames drawn since the loop was created.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
