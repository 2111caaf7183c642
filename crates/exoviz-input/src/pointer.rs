//! Mouse-to-pointer translation.
//!
//! winit reports button presses without a position, so [`PointerState`]
//! remembers the last cursor position and attaches it to presses.

use glam::Vec2;
use winit::event::{ElementState, MouseButton};

use crate::state::PointerEvent;

/// Last known cursor position.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    position: Vec2,
}

impl PointerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Event handlers ──────────────────────────────────────────────

    /// Process a `CursorMoved` event.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) -> Option<PointerEvent> {
        self.position = Vec2::new(x as f32, y as f32);
        Some(PointerEvent::Move(self.position))
    }

    /// Process a `MouseInput` event. Only the left button drags.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) -> Option<PointerEvent> {
        if button != MouseButton::Left {
            return None;
        }
        match state {
            ElementState::Pressed => Some(PointerEvent::Down(self.position)),
            ElementState::Released => Some(PointerEvent::Up),
        }
    }

    /// Process a `CursorLeft` event.
    pub fn on_cursor_left(&mut self) -> Option<PointerEvent> {
        Some(PointerEvent::Leave)
    }
}
