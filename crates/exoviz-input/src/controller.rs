//! Owner of one viewport's interaction state.

use std::time::Instant;

use tracing::debug;
use winit::window::CursorIcon;

use crate::state::{InteractionMode, InteractionProfile, InteractionState, Orientation, PointerEvent};

/// Cursor shown over the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorStyle {
    Grab,
    Grabbing,
}

impl CursorStyle {
    #[must_use]
    pub fn to_winit(self) -> CursorIcon {
        match self {
            Self::Grab => CursorIcon::Grab,
            Self::Grabbing => CursorIcon::Grabbing,
        }
    }
}

/// Drives an [`InteractionState`] with a fixed [`InteractionProfile`].
#[derive(Debug, Clone)]
pub struct InteractionController {
    profile: InteractionProfile,
    state: InteractionState,
}

impl InteractionController {
    #[must_use]
    pub fn new(profile: InteractionProfile) -> Self {
        Self {
            profile,
            state: InteractionState::default(),
        }
    }

    /// Feed one pointer event.
    pub fn handle(&mut self, event: PointerEvent, now: Instant) {
        let next = self.state.on_event(event, &self.profile, now);
        if next.mode != self.state.mode {
            debug!(from = ?self.state.mode, to = ?next.mode, ?event, "Interaction transition");
        }
        self.state = next;
    }

    /// Advance one frame. Returns `true` if an auto-rotation increment was
    /// applied.
    pub fn advance_frame(&mut self, now: Instant) -> bool {
        let next = self.state.on_frame(&self.profile, now);
        if next.mode != self.state.mode {
            debug!(from = ?self.state.mode, to = ?next.mode, "Resume timer fired");
        }
        self.state = next;
        next.mode == InteractionMode::AutoRotating
    }

    #[must_use]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.state.mode
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.state.orientation
    }

    #[must_use]
    pub fn profile(&self) -> &InteractionProfile {
        &self.profile
    }

    /// `Grabbing` while dragging, `Grab` otherwise.
    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        if self.state.mode == InteractionMode::Dragging {
            CursorStyle::Grabbing
        } else {
            CursorStyle::Grab
        }
    }
}
