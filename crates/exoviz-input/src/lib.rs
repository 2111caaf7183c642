//! Pointer and touch interaction for the celestial-body viewer.
//!
//! Raw winit events are translated into [`PointerEvent`]s by [`PointerState`]
//! and [`TouchTracker`], then fed to an [`InteractionController`] that owns
//! the drag / idle / auto-rotate state machine.

pub mod controller;
pub mod pointer;
pub mod state;
pub mod touch;

pub use controller::{CursorStyle, InteractionController};
pub use pointer::PointerState;
pub use state::{
    DEFAULT_RESUME_DELAY, InteractionMode, InteractionProfile, InteractionState, Orientation,
    PointerEvent,
};
pub use touch::TouchTracker;
