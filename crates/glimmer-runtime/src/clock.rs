//! Game clock with accumulated animation time

use std::time::Instant;

/// Longest frame delta the clock will report, in seconds
pub const MAX_FRAME_DELTA: f64 = 0.25;

/// Tracks frame deltas and an animation timeline built by summing them.
///
/// Animation time only advances by reported deltas, so it stands still while
/// paused instead of jumping ahead on resume the way wall-clock time would.
pub struct GameClock {
    /// Accumulated animation time in seconds (excludes paused frames)
    pub animation_time: f64,
    /// Time since last frame in seconds, zero while paused
    pub delta_time: f64,
    /// Frames ticked so far, paused frames included
    pub frame_count: u64,
    paused: bool,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            animation_time: 0.0,
            delta_time: 0.0,
            frame_count: 0,
            paused: false,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance from the wall clock. Call once per frame.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            self.frame_count += 1;
            return;
        }

        let elapsed = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.advance(elapsed);
    }

    /// Advance by an explicit delta (headless loops, tests).
    ///
    /// Negative or non-finite deltas count as zero; large ones are clamped.
    pub fn advance(&mut self, dt: f64) {
        self.frame_count += 1;
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DELTA) } else { 0.0 };
        self.delta_time = if self.paused { 0.0 } else { dt };
        self.animation_time += self.delta_time;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume after a pause. The next wall-clock tick measures from now.
    pub fn resume(&mut self) {
        self.paused = false;
        self.last_instant = Instant::now();
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Frame delta as the `f32` seconds systems consume
    pub fn delta_seconds(&self) -> f32 {
        self.delta_time as f32
    }
}
