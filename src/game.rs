//! Game loop driver
//!
//! Owns the session, the control state, the frame clock and the discount
//! ledger, and keeps exactly one frame request outstanding while the race is
//! Active. Tearing the loop down cancels that request, and a frame callback
//! that still arrives afterwards is ignored.

use crate::clock::{FrameClock, FrameId, FrameScheduler, ManualScheduler};
use crate::controls::{ControlState, Direction};
use crate::discount::DiscountLedger;
use crate::hud::HudSnapshot;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, tick};

pub struct GameLoop<S: FrameScheduler> {
    state: GameState,
    controls: ControlState,
    clock: FrameClock,
    scheduler: S,
    pending: Option<FrameId>,
    discount: DiscountLedger,
}

impl<S: FrameScheduler> GameLoop<S> {
    pub fn new(settings: Settings, scheduler: S, discount: DiscountLedger) -> Self {
        let clock = FrameClock::new(settings.max_frame_delta);
        Self {
            state: GameState::new(settings),
            controls: ControlState::new(),
            clock,
            scheduler,
            pending: None,
            discount,
        }
    }

    /// Idle -> Active and ask for the first frame
    pub fn start(&mut self) -> bool {
        if !self.state.start() {
            return false;
        }
        self.clock.reset();
        self.schedule();
        true
    }

    /// Frame callback from the scheduler
    pub fn on_frame(&mut self, timestamp_ms: f64) -> Vec<GameEvent> {
        if self.pending.take().is_none() {
            log::debug!("Ignoring frame with no request outstanding");
            return Vec::new();
        }

        let mut events = Vec::new();
        if let Some(dt) = self.clock.delta(timestamp_ms) {
            events = tick(&mut self.state, &self.controls, dt);
            let passed_changed = events
                .iter()
                .any(|e| matches!(e, GameEvent::CompetitorPassed { .. }));
            if passed_changed && self.discount.publish(self.state.competitors_passed()) {
                self.discount.save();
            }
        }

        if self.state.is_active() {
            self.schedule();
        } else {
            self.clock.reset();
        }
        events
    }

    pub fn set_control(&mut self, direction: Direction, active: bool) -> bool {
        self.controls.set(direction, active)
    }

    /// Window blurred or the input device went away
    pub fn focus_lost(&mut self) {
        self.controls.release_all();
    }

    /// Discard the session and return to Idle. The discount is kept.
    pub fn reset(&mut self) {
        self.stop();
        self.state.reset();
    }

    /// Reset and immediately start a new race
    pub fn restart(&mut self) -> bool {
        self.reset();
        self.start()
    }

    /// The view is going away: no more frames, no held keys. A view that
    /// comes back finds a fresh Idle session.
    pub fn teardown(&mut self) {
        self.stop();
        self.state.reset();
        log::info!("Game loop torn down");
    }

    /// The cart finished checkout with the earned discount
    pub fn checkout_completed(&mut self) {
        self.discount.reset();
        self.discount.save();
    }

    pub fn snapshot(&self) -> HudSnapshot {
        HudSnapshot::capture(&self.state, self.discount.discount())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn controls(&self) -> &ControlState {
        &self.controls
    }

    /// Direct access for input mappers such as `input::SwipeTracker`
    pub fn controls_mut(&mut self) -> &mut ControlState {
        &mut self.controls
    }

    pub fn discount(&self) -> &DiscountLedger {
        &self.discount
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    fn schedule(&mut self) {
        self.pending = Some(self.scheduler.request_frame());
    }

    fn stop(&mut self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }
        self.clock.reset();
        self.controls.release_all();
    }
}

impl GameLoop<ManualScheduler> {
    /// Deliver the outstanding frame the way a host would
    pub fn pump(&mut self, timestamp_ms: f64) -> Vec<GameEvent> {
        if self.scheduler.fire().is_none() {
            return Vec::new();
        }
        self.on_frame(timestamp_ms)
    }
}
