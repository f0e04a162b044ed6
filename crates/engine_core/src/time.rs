//! Time management for the game loop.

use std::time::Duration;

/// Length of one simulation tick in milliseconds (60 Hz).
pub const FIXED_DT_MS: f32 = 1000.0 / 60.0;

/// Frames longer than this are clamped so a stalled host cannot queue a burst of ticks.
const MAX_FRAME: Duration = Duration::from_millis(100);

/// Manages frame timing and the fixed-step accumulator.
///
/// The host advances it by each frame's length; the simulation drains it in
/// fixed steps.
#[derive(Debug)]
pub struct Time {
    /// Total elapsed time since start.
    elapsed: Duration,
    /// Frame count since start.
    frame_count: u64,
    /// Number of fixed steps consumed since start.
    tick_count: u64,
    /// Fixed timestep for simulation (default 60 Hz).
    fixed_timestep: Duration,
    /// Accumulated time for fixed updates.
    accumulator: Duration,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager.
    pub fn new() -> Self {
        Self {
            elapsed: Duration::ZERO,
            frame_count: 0,
            tick_count: 0,
            fixed_timestep: Duration::from_secs_f64(1.0 / 60.0),
            accumulator: Duration::ZERO,
        }
    }

    /// Advance the clock by one host frame.
    pub fn advance(&mut self, delta: Duration) {
        let delta = delta.min(MAX_FRAME);
        self.elapsed += delta;
        self.frame_count += 1;
        self.accumulator += delta;
    }

    /// Get total elapsed time as Duration.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Number of fixed steps taken so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Get the fixed timestep in milliseconds.
    pub fn fixed_timestep_ms(&self) -> f32 {
        self.fixed_timestep.as_secs_f32() * 1000.0
    }

    /// Check if a fixed update should run and consume the time.
    pub fn should_fixed_update(&mut self) -> bool {
        if self.accumulator >= self.fixed_timestep {
            self.accumulator -= self.fixed_timestep;
            self.tick_count += 1;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_drains_whole_ticks_only() {
        let mut time = Time::new();
        time.advance(Duration::from_millis(55));
        let mut ticks = 0;
        while time.should_fixed_update() {
            ticks += 1;
        }
        assert_eq!(ticks, 3);
        assert_eq!(time.tick_count(), 3);
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut time = Time::new();
        time.advance(Duration::from_secs(5));
        assert_eq!(time.elapsed(), MAX_FRAME);
        assert_eq!(time.frame_count(), 1);
    }

    #[test]
    fn fixed_timestep_matches_tick_constant() {
        let time = Time::new();
        assert!((time.fixed_timestep_ms() - FIXED_DT_MS).abs() < 1e-3);
    }
}
