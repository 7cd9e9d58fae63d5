//! Fixed-tick clock and inline cooldown timers.
//!
//! The simulation advances in fixed ticks; every timer in the game (jump and
//! fire rate limits, teleporter cooldowns, invulnerability windows, enemy
//! damage cooldowns) compares against a single millisecond value sampled once
//! per tick from [`TickClock::now_ms`]. Systems within one tick must all use
//! that same sample, never re-read the clock mid-tick.

/// Milliseconds of simulated time per fixed tick (60 Hz).
pub const TICK_MS: u64 = 16;

#[derive(Debug, Clone, Copy, Default)]
pub struct TickClock {
    tick: u64,
}

impl TickClock {
    pub fn new() -> Self {
        Self { tick: 0 }
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn now_ms(&self) -> u64 {
        self.tick * TICK_MS
    }
}

/// Minimum-interval rate limiter: `{last_fired, min_interval}` checked inline
/// before the guarded action. A call during the cooldown window is a no-op,
/// never queued.
#[derive(Debug, Clone, Copy)]
pub struct Cooldown {
    pub interval_ms: u64,
    last_fired_ms: Option<u64>,
}

impl Cooldown {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_fired_ms: None,
        }
    }

    pub fn ready(&self, now_ms: u64) -> bool {
        match self.last_fired_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.interval_ms,
        }
    }

    /// Fires the timer if ready. Returns whether the guarded action may run.
    pub fn try_fire(&mut self, now_ms: u64) -> bool {
        if self.ready(now_ms) {
            self.last_fired_ms = Some(now_ms);
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
    fn test_clock_advances_in_fixed_steps() {
        let mut clock = TickClock::new();
        assert_eq!(clock.now_ms(), 0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.tick(), 2);
        assert_eq!(clock.now_ms(), 2 * TICK_MS);
    }

    #[test]
    fn test_cooldown_fires_immediately_when_fresh() {
        let mut cd = Cooldown::new(300);
        assert!(cd.try_fire(0));
    }

    #[test]
    fn test_cooldown_blocks_within_interval() {
        let mut cd = Cooldown::new(300);
        assert!(cd.try_fire(100));
        assert!(!cd.try_fire(101));
        assert!(!cd.try_fire(399));
        assert!(cd.try_fire(400));
    }

    #[test]
    fn test_cooldown_blocked_call_does_not_reset_window() {
        let mut cd = Cooldown::new(300);
        assert!(cd.try_fire(0));
        // A blocked call must not extend the window.
        assert!(!cd.try_fire(299));
        assert!(cd.try_fire(300));
    }
}
