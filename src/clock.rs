//! Frame timing
//!
//! The host paints at whatever rate the display runs. `FrameClock` turns its
//! frame timestamps into clamped simulation deltas, and `FrameScheduler` is the
//! seam between the loop and whoever delivers frames (requestAnimationFrame in
//! the browser, `ManualScheduler` in tests and the headless demo).

use crate::consts::MAX_FRAME_DELTA;

/// Handle for a requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub i32);

/// Delivers frame callbacks to the game loop
pub trait FrameScheduler {
    /// Ask for one more frame callback
    fn request_frame(&mut self) -> FrameId;
    /// Drop a requested frame that has not fired yet
    fn cancel_frame(&mut self, id: FrameId);
}

/// Host timestamps (ms) to clamped deltas (s)
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_timestamp: Option<f64>,
    max_delta: f32,
}

impl FrameClock {
    pub fn new(max_delta: f32) -> Self {
        Self {
            last_timestamp: None,
            max_delta,
        }
    }

    /// Delta since the previous frame. The first frame after construction or
    /// `reset` only records its timestamp and yields `None`.
    pub fn delta(&mut self, timestamp_ms: f64) -> Option<f32> {
        let last = self.last_timestamp.replace(timestamp_ms)?;
        let secs = ((timestamp_ms - last) / 1000.0) as f32;
        if !secs.is_finite() {
            return Some(0.0);
        }
        Some(secs.clamp(0.0, self.max_delta))
    }

    /// Forget the previous timestamp (loop stopped)
    pub fn reset(&mut self) {
        self.last_timestamp = None;
    }

    pub fn is_primed(&self) -> bool {
        self.last_timestamp.is_some()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DELTA)
    }
}

/// Scheduler driven by hand: frames fire only when the owner says so
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Option<FrameId>,
    /// Every frame id ever cancelled, oldest first
    pub cancelled: Vec<FrameId>,
    /// Total requests made
    pub requested: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The outstanding request, if any
    pub fn pending(&self) -> Option<FrameId> {
        self.pending
    }

    /// Consume the outstanding request as the host would when firing it
    pub fn fire(&mut self) -> Option<FrameId> {
        self.pending.take()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameId {
        self.next_id += 1;
        let id = FrameId(self.next_id);
        self.pending = Some(id);
        self.requested += 1;
        id
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if self.pending == Some(id) {
            self.pending = None;
        }
        self.cancelled.push(id);
    }
}
