//! HUD snapshot for the presentation layer
//!
//! Captured once per render. The page draws from this and writes nothing back
//! except through the control state.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Entity, EntityKind, GamePhase, GameState, Outcome};

/// Render-side view of one entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub id: String,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub passed: bool,
}

impl From<&Entity> for EntityView {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id.clone(),
            kind: entity.kind,
            pos: entity.pos,
            size: entity.size,
            passed: entity.passed,
        }
    }
}

/// Everything the HUD and entity layer draw in one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    pub outcome: Option<Outcome>,
    pub player: EntityView,
    pub competitors: Vec<EntityView>,
    pub destination: EntityView,
    pub collision: bool,
    pub elapsed_time: f32,
    pub total_time: f32,
    pub remaining_time: f32,
    pub remaining_time_percent: f32,
    pub distance: f32,
    pub total_distance: f32,
    pub progress_percent: f32,
    pub competitors_passed: usize,
    pub competitor_count: usize,
    pub discount: u8,
    pub score: u32,
}

impl HudSnapshot {
    pub fn capture(state: &GameState, discount: u8) -> Self {
        let settings = state.settings();
        let remaining_time = (settings.total_time - state.elapsed_time()).max(0.0);
        let competitors_passed = state.competitors_passed();
        Self {
            phase: state.phase(),
            outcome: state.outcome(),
            player: state.player().into(),
            competitors: state.competitors().iter().map(EntityView::from).collect(),
            destination: state.destination().into(),
            collision: state.collision(),
            elapsed_time: state.elapsed_time(),
            total_time: settings.total_time,
            remaining_time,
            remaining_time_percent: remaining_time / settings.total_time * 100.0,
            distance: state.distance(),
            total_distance: settings.total_distance,
            progress_percent: (state.distance() / settings.total_distance * 100.0).min(100.0),
            competitors_passed,
            competitor_count: state.competitors().len(),
            discount,
            score: score(state.distance(), competitors_passed),
        }
    }

    /// Remaining time as shown on the timer
    pub fn timer_label(&self) -> String {
        format_time(self.remaining_time)
    }

    /// Headline for the game-over card
    pub fn result_title(&self) -> Option<&'static str> {
        match self.outcome? {
            Outcome::Arrived => Some("You Made It!"),
            Outcome::TimedOut => Some("Time's Up!"),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }
}

/// Points: one per ten units driven plus a hundred per competitor passed
pub fn score(distance: f32, competitors_passed: usize) -> u32 {
    (distance / 10.0).floor() as u32 + competitors_passed as u32 * 100
}

/// Seconds as MM:SS
pub fn format_time(seconds: f32) -> String {
    let total = seconds.max(0.0).floor() as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}
