use std::time::Duration;

use crate::config::GameConfig;
use crate::game::lifecycle::Phase;
use crate::game::world::{TickReport, World};

// Longest burst of catch-up steps after a stall before pending time is dropped
const MAX_CATCH_UP_STEPS: u32 = 8;

/// Fires once per elapsed period, carrying any remainder into the next one.
#[derive(Clone, Debug)]
pub struct Clock {
    period_ms: u32,
    elapsed_ms: u32,
}

impl Clock {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            elapsed_ms: 0,
        }
    }

    pub fn set_period(&mut self, period_ms: u32) {
        self.period_ms = period_ms;
    }

    pub fn advance(&mut self, dt_ms: u32) -> bool {
        if self.period_ms == 0 {
            return false;
        }
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms < self.period_ms {
            return false;
        }
        // A shortened period must not leave a backlog of extra fires
        self.elapsed_ms = (self.elapsed_ms - self.period_ms).min(self.period_ms - 1);
        true
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0;
    }
}

/// Owns the three logical clocks (main tick, alien march, bonus launch) and
/// drives them all through one `&mut World`, so no two updates interleave.
#[derive(Clone, Debug)]
pub struct Scheduler {
    step_ms: u32,
    pending_ms: u64,
    alien: Clock,
    bonus: Clock,
}

impl Scheduler {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            step_ms: config.tick_interval_ms,
            pending_ms: 0,
            alien: Clock::new(config.alien_interval_base_ms),
            bonus: Clock::new(config.bonus_interval_ms),
        }
    }

    /// Runs as many fixed steps as `elapsed` covers. Returns the merged
    /// lifecycle report of the steps that ran.
    pub fn advance(&mut self, elapsed: Duration, world: &mut World) -> TickReport {
        let mut merged = TickReport::default();
        if world.is_paused() || world.is_game_over() {
            self.pending_ms = 0;
            return merged;
        }

        self.pending_ms += elapsed.as_millis() as u64;
        let mut steps = 0;
        while self.pending_ms >= u64::from(self.step_ms) {
            if steps == MAX_CATCH_UP_STEPS {
                tracing::debug!("scheduler fell behind, dropping {} ms", self.pending_ms);
                self.pending_ms = 0;
                break;
            }
            self.pending_ms -= u64::from(self.step_ms);
            let report = self.step(world);
            merged.wave_cleared |= report.wave_cleared;
            merged.game_over |= report.game_over;
            merged.wave_started |= report.wave_started;
            steps += 1;
        }
        merged
    }

    /// One quantum: the alien and bonus clocks first, then the main tick.
    pub fn step(&mut self, world: &mut World) -> TickReport {
        if world.phase() == Phase::Playing && !world.is_paused() {
            self.alien.set_period(world.alien_interval_ms());
            if self.alien.advance(self.step_ms) {
                world.march_aliens();
            }
            if self.bonus.advance(self.step_ms) {
                world.launch_bonus();
            }
        }

        let report = world.tick();
        if report.wave_cleared || report.wave_started {
            self.alien.reset();
            self.bonus.reset();
        }
        report
    }

    pub fn reset(&mut self) {
        self.pending_ms = 0;
        self.alien.reset();
        self.bonus.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_fires_each_period() {
        let mut clock = Clock::new(50);
        let fires = (0..10).filter(|_| clock.advance(16)).count();
        // 160 ms over a 50 ms period
        assert_eq!(fires, 3);
    }

    #[test]
    fn clock_does_not_burst_after_period_shrinks() {
        let mut clock = Clock::new(500);
        for _ in 0..30 {
            clock.advance(16);
        }
        clock.set_period(30);
        assert!(clock.advance(16));
        assert!(!clock.advance(0));
    }

    #[test]
    fn zero_period_never_fires() {
        let mut clock = Clock::new(0);
        assert!(!clock.advance(1_000));
    }
}
