//! The interaction state machine as a plain value.
//!
//! [`InteractionState`] is `Copy`. Transitions take the state by value and
//! return the next one, so every transition can be checked without a window
//! or a clock.

use std::f64::consts::TAU;
use std::time::{Duration, Instant};

use glam::{EulerRot, Quat, Vec2};

/// Delay between the end of a drag and the resumption of auto-rotation.
pub const DEFAULT_RESUME_DELAY: Duration = Duration::from_millis(2000);

/// Body orientation in radians.
///
/// Applied as XYZ Euler angles: pitch about X, yaw about Y, roll about Z.
/// Angles accumulate without bound for as long as the body spins, so they are
/// kept in `f64` and only narrowed once wrapped into one turn.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl Orientation {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Rotation quaternion for the body transform.
    #[must_use]
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            wrap_turn(self.pitch),
            wrap_turn(self.yaw),
            wrap_turn(self.roll),
        )
    }

    /// Component-wise sum.
    #[must_use]
    pub fn offset(self, by: Orientation) -> Self {
        Self::new(self.yaw + by.yaw, self.pitch + by.pitch, self.roll + by.roll)
    }
}

/// Reduce to `[0, TAU)` before narrowing.
fn wrap_turn(angle: f64) -> f32 {
    angle.rem_euclid(TAU) as f32
}

/// Which phase of interaction the body is in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    /// Pointer released; waiting out the resume delay.
    Idle,
    /// Pointer held; orientation follows the pointer.
    Dragging,
    /// Spinning on its own. The initial mode.
    #[default]
    AutoRotating,
}

/// Pointer input after translation from mouse or single-finger touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Press at a position in physical pixels.
    Down(Vec2),
    /// Motion to a position in physical pixels.
    Move(Vec2),
    /// Release.
    Up,
    /// The pointer left the window.
    Leave,
}

/// Per-variant tuning of the state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionProfile {
    /// Radians of rotation per pixel of drag.
    pub drag_sensitivity: f32,
    /// Orientation increment applied every frame while auto-rotating.
    pub auto_rotate: Orientation,
    /// Delay after release before auto-rotation resumes.
    pub resume_delay: Duration,
}

impl Default for InteractionProfile {
    fn default() -> Self {
        Self {
            drag_sensitivity: 0.01,
            auto_rotate: Orientation::new(0.003, 0.0, 0.0),
            resume_delay: DEFAULT_RESUME_DELAY,
        }
    }
}

/// Snapshot of the drag bookkeeping for one viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InteractionState {
    pub mode: InteractionMode,
    /// Last pointer position seen while dragging.
    pub pointer_origin: Option<Vec2>,
    pub orientation: Orientation,
    /// When a pending resume fires. Only set in [`InteractionMode::Idle`].
    pub resume_deadline: Option<Instant>,
}

impl InteractionState {
    /// Apply one pointer event. Events with no listed transition return
    /// `self` unchanged.
    #[must_use]
    pub fn on_event(self, event: PointerEvent, profile: &InteractionProfile, now: Instant) -> Self {
        match (self.mode, event) {
            (_, PointerEvent::Down(position)) => Self {
                mode: InteractionMode::Dragging,
                pointer_origin: Some(position),
                resume_deadline: None,
                ..self
            },
            (InteractionMode::Dragging, PointerEvent::Move(position)) => {
                let previous = self.pointer_origin.unwrap_or(position);
                let delta = (position - previous) * profile.drag_sensitivity;
                Self {
                    pointer_origin: Some(position),
                    orientation: self.orientation.offset(Orientation::new(
                        f64::from(delta.x),
                        f64::from(delta.y),
                        0.0,
                    )),
                    ..self
                }
            }
            (InteractionMode::Dragging, PointerEvent::Up | PointerEvent::Leave) => Self {
                mode: InteractionMode::Idle,
                pointer_origin: None,
                resume_deadline: Some(now + profile.resume_delay),
                ..self
            },
            _ => self,
        }
    }

    /// Fire the resume timer if it is due.
    #[must_use]
    pub fn on_timer(self, now: Instant) -> Self {
        match (self.mode, self.resume_deadline) {
            (InteractionMode::Idle, Some(deadline)) if now >= deadline => Self {
                mode: InteractionMode::AutoRotating,
                resume_deadline: None,
                ..self
            },
            _ => self,
        }
    }

    /// One display refresh: timer check, then the auto-rotation increment.
    #[must_use]
    pub fn on_frame(self, profile: &InteractionProfile, now: Instant) -> Self {
        let next = self.on_timer(now);
        if next.mode == InteractionMode::AutoRotating {
            Self {
                orientation: next.orientation.offset(profile.auto_rotate),
                ..next
            }
        } else {
            next
        }
    }
}
