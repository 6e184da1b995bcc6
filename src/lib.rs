//! Diamond Street - a promotional street-racing minigame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, passing, termination)
//! - `clock`: Frame timestamps to clamped deltas, frame scheduling seam
//! - `game`: Loop driver tying the clock, controls, session and discount together
//! - `discount`: Competitors-passed to checkout discount rule
//! - `controls` / `input`: Four-direction control state and device mapping
//! - `hud`: Read-only snapshot for the presentation layer
//! - `platform`: Browser glue (requestAnimationFrame)
//! - `persistence`: LocalStorage JSON helpers

pub mod clock;
pub mod controls;
pub mod discount;
pub mod game;
pub mod hud;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use clock::{FrameClock, FrameId, FrameScheduler, ManualScheduler};
pub use controls::{ControlState, Direction};
pub use discount::{DiscountLedger, discount_for, discounted_total};
pub use game::GameLoop;
pub use hud::HudSnapshot;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Step used by the headless demo (60 Hz)
    pub const DEMO_DT: f32 = 1.0 / 60.0;
    /// Largest delta a single frame may feed the simulation (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Play-field viewport
    pub const FIELD_WIDTH: f32 = 400.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Session budget (simulated seconds)
    pub const TOTAL_TIME: f32 = 90.0;
    /// Race length and constant progress accrual (units/s)
    pub const TOTAL_DISTANCE: f32 = 5000.0;
    pub const PROGRESS_RATE: f32 = 100.0;

    /// Player car
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 80.0;
    pub const PLAYER_SPEED: f32 = 200.0;
    pub const PLAYER_START_X: f32 = 200.0;
    pub const PLAYER_START_Y: f32 = 500.0;

    /// Competitor storefronts, alternating kerbs and staggered up the street
    pub const COMPETITOR_COUNT: usize = 5;
    pub const COMPETITOR_WIDTH: f32 = 120.0;
    pub const COMPETITOR_HEIGHT: f32 = 100.0;
    pub const COMPETITOR_BASE_X: f32 = 20.0;
    pub const COMPETITOR_KERB_OFFSET: f32 = 240.0;
    pub const COMPETITOR_BASE_Y: f32 = 380.0;
    pub const COMPETITOR_SPACING: f32 = 95.0;

    /// Our store, waiting just past the top of the field
    pub const DESTINATION_WIDTH: f32 = 150.0;
    pub const DESTINATION_HEIGHT: f32 = 100.0;
    pub const DESTINATION_X: f32 = 125.0;
    pub const DESTINATION_Y: f32 = -100.0;

    /// Discount policy (percent)
    pub const DISCOUNT_PER_COMPETITOR: u8 = 10;
    pub const MAX_DISCOUNT: u8 = 50;
}
