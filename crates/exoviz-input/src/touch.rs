//! Single-finger touch filtering.

use std::collections::HashSet;

use glam::Vec2;
use winit::event::TouchPhase;

use crate::state::PointerEvent;

/// Collapses winit's per-finger touch events into single-finger pointer
/// events. While more than one finger is down nothing is emitted.
#[derive(Debug, Clone, Default)]
pub struct TouchTracker {
    active: HashSet<u64>,
    primary: Option<u64>,
}

impl TouchTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one `WindowEvent::Touch`.
    pub fn on_touch(&mut self, id: u64, phase: TouchPhase, x: f64, y: f64) -> Option<PointerEvent> {
        let position = Vec2::new(x as f32, y as f32);
        match phase {
            TouchPhase::Started => {
                self.active.insert(id);
                if self.active.len() == 1 {
                    self.primary = Some(id);
                    Some(PointerEvent::Down(position))
                } else {
                    None
                }
            }
            TouchPhase::Moved => {
                (self.active.len() == 1 && self.primary == Some(id))
                    .then_some(PointerEvent::Move(position))
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.active.remove(&id);
                if self.primary == Some(id) {
                    self.primary = None;
                    Some(PointerEvent::Up)
                } else {
                    None
                }
            }
        }
    }

    #[must_use]
    pub fn active_touches(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_finger_drag() {
        let mut tt = TouchTracker::new();
        assert_eq!(
            tt.on_touch(1, TouchPhase::Started, 10.0, 20.0),
            Some(PointerEvent::Down(Vec2::new(10.0, 20.0)))
        );
        assert_eq!(
            tt.on_touch(1, TouchPhase::Moved, 15.0, 20.0),
            Some(PointerEvent::Move(Vec2::new(15.0, 20.0)))
        );
        assert_eq!(tt.on_touch(1, TouchPhase::Ended, 15.0, 20.0), Some(PointerEvent::Up));
        assert_eq!(tt.active_touches(), 0);
    }

    #[test]
    fn test_second_finger_suppresses_moves() {
        let mut tt = TouchTracker::new();
        tt.on_touch(1, TouchPhase::Started, 0.0, 0.0);
        assert_eq!(tt.on_touch(2, TouchPhase::Started, 50.0, 50.0), None);
        assert_eq!(tt.on_touch(1, TouchPhase::Moved, 5.0, 5.0), None);
        assert_eq!(tt.on_touch(2, TouchPhase::Moved, 55.0, 55.0), None);
        assert_eq!(tt.on_touch(2, TouchPhase::Ended, 55.0, 55.0), None);
        assert_eq!(
            tt.on_touch(1, TouchPhase::Moved, 6.0, 6.0),
            Some(PointerEvent::Move(Vec2::new(6.0, 6.0)))
        );
    }

    #[test]
    fn test_multi_touch_start_emits_nothing() {
        let mut tt = TouchTracker::new();
        tt.on_touch(1, TouchPhase::Started, 0.0, 0.0);
        tt.on_touch(2, TouchPhase::Started, 0.0, 0.0);
        tt.on_touch(1, TouchPhase::Ended, 0.0, 0.0);
        // Remaining finger never became primary.
        assert_eq!(tt.on_touch(2, TouchPhase::Moved, 1.0, 1.0), None);
        assert_eq!(tt.on_touch(2, TouchPhase::Ended, 1.0, 1.0), None);
    }

    #[test]
    fn test_cancel_releases() {
        let mut tt = TouchTracker::new();
        tt.on_touch(7, TouchPhase::Started, 0.0, 0.0);
        assert_eq!(tt.on_touch(7, TouchPhase::Cancelled, 0.0, 0.0), Some(PointerEvent::Up));
    }
}
