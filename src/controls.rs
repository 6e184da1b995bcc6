//! Four-direction control state
//!
//! The only thing input devices may write. Keyboard and touch are mapped onto
//! it by `crate::input`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A steering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// Pressed state of each direction. Several may be held at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press or release a direction. Returns true if the state changed.
    pub fn set(&mut self, direction: Direction, active: bool) -> bool {
        let slot = match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        };
        let changed = *slot != active;
        *slot = active;
        changed
    }

    pub fn is_active(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    /// Force every direction off (device detached, focus lost)
    pub fn release_all(&mut self) {
        *self = Self::default();
    }

    pub fn any_active(&self) -> bool {
        self.left || self.right || self.up || self.down
    }

    /// Per-axis steering in {-1, 0, 1}; diagonals are not normalized
    pub fn axis(&self) -> Vec2 {
        let x = self.right as i8 - self.left as i8;
        let y = self.down as i8 - self.up as i8;
        Vec2::new(x as f32, y as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_is_idempotent() {
        let mut controls = ControlState::new();
        assert!(controls.set(Direction::Left, true));
        assert!(!controls.set(Direction::Left, true));
        assert!(controls.left);
        assert!(controls.set(Direction::Left, false));
        assert!(!controls.any_active());
    }

    #[test]
    fn release_all_clears_every_direction() {
        let mut controls = ControlState::new();
        for dir in Direction::ALL {
            controls.set(dir, true);
        }
        controls.release_all();
        for dir in Direction::ALL {
            assert!(!controls.is_active(dir), "{} still held", dir.as_str());
        }
    }

    #[test]
    fn axis_is_additive() {
        let mut controls = ControlState::new();
        controls.set(Direction::Up, true);
        controls.set(Direction::Right, true);
        assert_eq!(controls.axis(), Vec2::new(1.0, -1.0));

        // Opposing keys cancel on their axis
        controls.set(Direction::Left, true);
        assert_eq!(controls.axis(), Vec2::new(0.0, -1.0));
    }
}
