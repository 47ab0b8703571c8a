use std::fmt;
use std::time::Duration;

use bevy::prelude::{Real, Res, ResMut, Resource, Time};

// ---------------------------------------------------------------------------
// SimTime
// ---------------------------------------------------------------------------

/// Integer-nanosecond simulation clock.
///
/// Advanced by exactly one physics `dt` per step, so it counts simulated
/// time independently of how fast the host loop runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Resource)]
pub struct SimTime {
    nanos: u64,
}

impl SimTime {
    #[must_use]
    pub const fn new() -> Self {
        Self { nanos: 0 }
    }

    /// Raw nanosecond count.
    #[must_use]
    pub const fn nanos(&self) -> u64 {
        self.nanos
    }

    /// Advance the clock by `delta_secs` seconds.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn advance_secs(&mut self, delta_secs: f64) {
        let delta_nanos = (delta_secs * 1_000_000_000.0).round() as u64;
        self.nanos = self.nanos.saturating_add(delta_nanos);
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.nanos / 1_000_000_000;
        let millis = (self.nanos % 1_000_000_000) / 1_000_000;
        write!(f, "{total_secs}.{millis:03}s")
    }
}

// ---------------------------------------------------------------------------
// StepTimer
// ---------------------------------------------------------------------------

/// Fixed-rate step timer.
///
/// Accumulates real-world frame deltas and fires at most once per
/// [`tick`](Self::tick). Periods missed while the host loop was busy are
/// dropped rather than replayed, so a slow frame never turns into a burst
/// of physics steps.
#[derive(Debug, Clone, Resource)]
pub struct StepTimer {
    accumulated: u64,
    period_nanos: u64,
    pending: bool,
    dropped: u64,
}

impl StepTimer {
    /// Timer firing every `period_secs` seconds of real time.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(period_secs: f64) -> Self {
        Self {
            accumulated: 0,
            period_nanos: (period_secs * 1_000_000_000.0).round() as u64,
            pending: false,
            dropped: 0,
        }
    }

    /// Timer that fires on every tick regardless of elapsed time.
    /// Used for headless runs, which step as fast as the loop spins.
    pub const fn every_tick() -> Self {
        Self {
            accumulated: 0,
            period_nanos: 0,
            pending: false,
            dropped: 0,
        }
    }

    /// Feed one frame's real-world delta.
    #[allow(clippy::cast_possible_truncation)]
    pub fn tick(&mut self, delta: Duration) {
        if self.period_nanos == 0 {
            self.pending = true;
            return;
        }
        self.accumulated = self
            .accumulated
            .saturating_add(delta.as_nanos() as u64);
        if self.accumulated >= self.period_nanos {
            let periods = self.accumulated / self.period_nanos;
            self.dropped += periods - 1;
            self.accumulated %= self.period_nanos;
            self.pending = true;
        }
    }

    /// Returns `true` once if the last tick crossed a period boundary.
    pub fn should_step(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Total number of periods skipped because a frame overran them.
    #[must_use]
    pub const fn dropped_periods(&self) -> u64 {
        self.dropped
    }
}

// ---------------------------------------------------------------------------
// FrameClock
// ---------------------------------------------------------------------------

/// Last observed wall-clock timestamp and the delta it produced.
///
/// Ticked once per frame by [`tick_frame_clock`]. Interaction code scales
/// its step sizes by [`delta_secs`](Self::delta_secs) so camera motion does
/// not depend on the frame rate.
#[derive(Debug, Clone, Copy, Default, Resource)]
pub struct FrameClock {
    last: Option<Duration>,
    delta: Duration,
}

impl FrameClock {
    /// Record a new timestamp (time since startup) and return the delta
    /// from the previous one. The first observation yields zero.
    pub fn tick(&mut self, now: Duration) -> Duration {
        self.delta = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_sub(last));
        self.last = Some(now);
        self.delta
    }

    #[must_use]
    pub fn delta_secs(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

/// Feed the real elapsed time into [`FrameClock`], once per frame.
#[allow(clippy::needless_pass_by_value)]
pub fn tick_frame_clock(time: Res<Time<Real>>, mut clock: ResMut<FrameClock>) {
    clock.tick(time.elapsed());
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- SimTime ----

    #[test]
    fn simtime_advance_by_fixed_dt() {
        let mut t = SimTime::new();
        for _ in 0..100 {
            t.advance_secs(0.01);
        }
        assert_eq!(t.nanos(), 1_000_000_000);
    }

    #[test]
    fn simtime_display() {
        let mut t = SimTime::new();
        t.advance_secs(12.345);
        assert_eq!(t.to_string(), "12.345s");
    }

    // ---- StepTimer ----

    #[test]
    fn timer_waits_for_a_full_period() {
        let mut timer = StepTimer::new(0.01);
        timer.tick(Duration::from_millis(4));
        assert!(!timer.should_step());
        timer.tick(Duration::from_millis(4));
        assert!(!timer.should_step());
        timer.tick(Duration::from_millis(4));
        assert!(timer.should_step());
    }

    #[test]
    fn timer_fires_once_per_tick() {
        let mut timer = StepTimer::new(0.01);
        timer.tick(Duration::from_millis(10));
        assert!(timer.should_step());
        assert!(!timer.should_step());
    }

    #[test]
    fn timer_drops_missed_periods() {
        let mut timer = StepTimer::new(0.01);
        timer.tick(Duration::from_millis(45));
        assert!(timer.should_step());
        assert!(!timer.should_step());
        assert_eq!(timer.dropped_periods(), 3);

        // The 5 ms remainder carries over; no backlog is replayed.
        timer.tick(Duration::from_millis(4));
        assert!(!timer.should_step());
        timer.tick(Duration::from_millis(1));
        assert!(timer.should_step());
    }

    #[test]
    fn unpaced_timer_fires_every_tick() {
        let mut timer = StepTimer::every_tick();
        assert!(!timer.should_step());
        for _ in 0..3 {
            timer.tick(Duration::ZERO);
            assert!(timer.should_step());
            assert!(!timer.should_step());
        }
    }

    // ---- FrameClock ----

    #[test]
    fn frame_clock_first_tick_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.tick(Duration::from_secs(3)), Duration::ZERO);
        assert!(clock.delta_secs().abs() < f32::EPSILON);
    }

    #[test]
    fn frame_clock_measures_delta() {
        let mut clock = FrameClock::default();
        clock.tick(Duration::from_millis(100));
        let delta = clock.tick(Duration::from_millis(116));
        assert_eq!(delta, Duration::from_millis(16));
        assert!((clock.delta_secs() - 0.016).abs() < 1e-6);
    }

    #[test]
    fn frame_clock_saturates_on_backwards_time() {
        let mut clock = FrameClock::default();
        clock.tick(Duration::from_millis(100));
        assert_eq!(clock.tick(Duration::from_millis(50)), Duration::ZERO);
    }
}
