//! Race entities: the player car, competitor storefronts and our store
//!
//! Every entity is an axis-aligned rectangle anchored at its top-left corner
//! in game-space units (y grows down the screen).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Player,
    Competitor,
    Destination,
}

/// A positioned, sized simulation object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Locomotion speed (units/s), player only
    pub speed: f32,
    pub kind: EntityKind,
    /// One-way latch, meaningful for competitors and the destination
    pub passed: bool,
}

impl Entity {
    /// The player car at its starting spot
    pub fn player() -> Self {
        Self {
            id: "player".to_string(),
            pos: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
            kind: EntityKind::Player,
            passed: false,
        }
    }

    /// Competitor `index` at its staggered start offset
    pub fn competitor(index: usize) -> Self {
        let x = COMPETITOR_BASE_X + (index % 2) as f32 * COMPETITOR_KERB_OFFSET;
        let y = COMPETITOR_BASE_Y - index as f32 * COMPETITOR_SPACING;
        Self {
            id: format!("competitor-{index}"),
            pos: Vec2::new(x, y),
            size: Vec2::new(COMPETITOR_WIDTH, COMPETITOR_HEIGHT),
            speed: 0.0,
            kind: EntityKind::Competitor,
            passed: false,
        }
    }

    /// All competitors in canonical order
    pub fn competitors() -> Vec<Self> {
        (0..COMPETITOR_COUNT).map(Self::competitor).collect()
    }

    /// Our store at the end of the street
    pub fn destination() -> Self {
        Self {
            id: "store".to_string(),
            pos: Vec2::new(DESTINATION_X, DESTINATION_Y),
            size: Vec2::new(DESTINATION_WIDTH, DESTINATION_HEIGHT),
            speed: 0.0,
            kind: EntityKind::Destination,
            passed: false,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Vertical midpoint the player's top edge must rise above to pass us
    pub fn pass_line(&self) -> f32 {
        self.pos.y + self.size.y * 0.5
    }

    /// Strict axis-aligned overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    /// Distance between the two centers
    pub fn center_distance(&self, other: &Entity) -> f32 {
        self.center().distance(other.center())
    }

    /// Whether any part of the entity lies inside a `field`-sized viewport
    pub fn is_visible_in(&self, field: Vec2) -> bool {
        self.pos.x + self.size.x > 0.0
            && self.pos.x < field.x
            && self.pos.y + self.size.y > 0.0
            && self.pos.y < field.y
    }

    /// Pull the entity back inside a `field`-sized viewport
    pub fn clamp_to(&mut self, field: Vec2) {
        let max = (field - self.size).max(Vec2::ZERO);
        self.pos = self.pos.clamp(Vec2::ZERO, max);
    }
}
