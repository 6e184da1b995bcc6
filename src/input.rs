//! Device input mapping
//!
//! Keyboard codes and touch swipes become `ControlState` writes here, so the
//! simulation never sees raw events.

use glam::Vec2;

use crate::controls::{ControlState, Direction};

/// Minimum swipe displacement (pixels) before a direction is pressed
pub const SWIPE_THRESHOLD: f32 = 10.0;

/// Map a `KeyboardEvent.code` to a direction (arrows and WASD)
pub fn direction_for_key(code: &str) -> Option<Direction> {
    match code {
        "ArrowUp" | "KeyW" => Some(Direction::Up),
        "ArrowDown" | "KeyS" => Some(Direction::Down),
        "ArrowLeft" | "KeyA" => Some(Direction::Left),
        "ArrowRight" | "KeyD" => Some(Direction::Right),
        _ => None,
    }
}

/// Tracks one touch and steers along its dominant axis
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    origin: Option<Vec2>,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, x: f32, y: f32) {
        self.origin = Some(Vec2::new(x, y));
    }

    /// Update steering from the current touch point. Returns the pressed direction.
    pub fn moved(&mut self, x: f32, y: f32, controls: &mut ControlState) -> Option<Direction> {
        let origin = self.origin?;
        let delta = Vec2::new(x, y) - origin;

        controls.release_all();

        let direction = if delta.x.abs() > delta.y.abs() {
            if delta.x.abs() <= SWIPE_THRESHOLD {
                None
            } else if delta.x > 0.0 {
                Some(Direction::Right)
            } else {
                Some(Direction::Left)
            }
        } else if delta.y.abs() <= SWIPE_THRESHOLD {
            None
        } else if delta.y > 0.0 {
            Some(Direction::Down)
        } else {
            Some(Direction::Up)
        };

        if let Some(dir) = direction {
            controls.set(dir, true);
        }
        direction
    }

    /// Touch lifted or cancelled
    pub fn end(&mut self, controls: &mut ControlState) {
        self.origin = None;
        controls.release_all();
    }

    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_arrows_and_wasd() {
        assert_eq!(direction_for_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(direction_for_key("KeyW"), Some(Direction::Up));
        assert_eq!(direction_for_key("KeyA"), Some(Direction::Left));
        assert_eq!(direction_for_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(direction_for_key("KeyS"), Some(Direction::Down));
        assert_eq!(direction_for_key("Space"), None);
    }

    #[test]
    fn swipe_presses_dominant_axis() {
        let mut controls = ControlState::new();
        let mut swipe = SwipeTracker::new();
        swipe.start(100.0, 100.0);

        assert_eq!(swipe.moved(130.0, 110.0, &mut controls), Some(Direction::Right));
        assert!(controls.right && !controls.down);

        // Switching to a vertical swipe drops the horizontal press
        assert_eq!(swipe.moved(105.0, 60.0, &mut controls), Some(Direction::Up));
        assert!(controls.up && !controls.right);
    }

    #[test]
    fn small_swipe_presses_nothing() {
        let mut controls = ControlState::new();
        controls.set(Direction::Left, true);
        let mut swipe = SwipeTracker::new();
        swipe.start(0.0, 0.0);
        assert_eq!(swipe.moved(-8.0, 3.0, &mut controls), None);
        assert!(!controls.any_active());
    }

    #[test]
    fn move_without_start_is_ignored() {
        let mut controls = ControlState::new();
        controls.set(Direction::Down, true);
        let mut swipe = SwipeTracker::new();
        assert_eq!(swipe.moved(50.0, 50.0, &mut controls), None);
        assert!(controls.down);
    }

    #[test]
    fn end_releases_everything() {
        let mut controls = ControlState::new();
        let mut swipe = SwipeTracker::new();
        swipe.start(0.0, 0.0);
        swipe.moved(0.0, 40.0, &mut controls);
        swipe.end(&mut controls);
        assert!(!swipe.is_tracking());
        assert!(!controls.any_active());
    }
}
