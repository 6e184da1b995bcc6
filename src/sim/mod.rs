//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Delta time comes from the caller, never from a wall clock
//! - Stable iteration order (canonical competitor order)
//! - No rendering or platform dependencies

pub mod entity;
pub mod state;
pub mod tick;

pub use entity::{Entity, EntityKind};
pub use state::{GameEvent, GamePhase, GameState, Outcome};
pub use tick::tick;
