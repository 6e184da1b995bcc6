//! Game session state
//!
//! A session owns every entity and the race clock. Only `sim::tick` moves
//! entities or advances `distance`/`elapsed_time`; everything else reads.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use crate::settings::Settings;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Fresh entities, waiting for start
    Idle,
    /// Clock running
    Active,
    /// Race finished; further ticks are no-ops
    Over,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Idle => "idle",
            GamePhase::Active => "active",
            GamePhase::Over => "over",
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Session budget ran out first
    TimedOut,
    /// Reached the store before the budget ran out
    Arrived,
}

/// Things the presentation layer may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CompetitorPassed { id: String },
    /// Player overlapped a competitor it has not passed yet (no penalty)
    Collision { id: String },
    Finished(Outcome),
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) settings: Settings,
    pub(crate) phase: GamePhase,
    pub(crate) outcome: Option<Outcome>,
    pub(crate) player: Entity,
    pub(crate) competitors: Vec<Entity>,
    pub(crate) destination: Entity,
    /// Race progress in [0, settings.total_distance]
    pub(crate) distance: f32,
    /// Simulated seconds in [0, settings.total_time]
    pub(crate) elapsed_time: f32,
    /// Overlap with an unpassed competitor on the latest tick
    pub(crate) collision: bool,
    /// Ticks applied while Active
    pub(crate) time_ticks: u64,
}

impl GameState {
    /// Create an Idle session with canonical entities
    pub fn new(settings: Settings) -> Self {
        let mut player = Entity::player();
        player.speed = settings.player_speed;
        Self {
            settings,
            phase: GamePhase::Idle,
            outcome: None,
            player,
            competitors: Entity::competitors(),
            destination: Entity::destination(),
            distance: 0.0,
            elapsed_time: 0.0,
            collision: false,
            time_ticks: 0,
        }
    }

    /// Idle -> Active. Returns false from any other phase.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.phase = GamePhase::Active;
        log::info!("Race started");
        true
    }

    /// Back to Idle with freshly created entities and zeroed progress
    pub fn reset(&mut self) {
        let settings = self.settings.clone();
        *self = Self::new(settings);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    pub fn player(&self) -> &Entity {
        &self.player
    }

    pub fn competitors(&self) -> &[Entity] {
        &self.competitors
    }

    pub fn destination(&self) -> &Entity {
        &self.destination
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    pub fn collision(&self) -> bool {
        self.collision
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn field(&self) -> Vec2 {
        Vec2::new(self.settings.field_width, self.settings.field_height)
    }

    /// Number of competitors latched as passed, counted fresh every call
    pub fn competitors_passed(&self) -> usize {
        self.competitors.iter().filter(|c| c.passed).count()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
