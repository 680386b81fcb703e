//! Lives, score, waves and the Playing / WaveCleared / GameOver machine.

use crate::config::{ALIEN_INTERVAL_FLOOR_MS, ALIEN_INTERVAL_WAVE_FLOOR_MS, ALIEN_INTERVAL_WAVE_STEP_MS};
use crate::game::collision::Outcome;
use crate::game::entities::{BonusTarget, Direction, Formation, Shelter};
use crate::game::spawning::AlienGunnery;
use crate::game::world::{TickReport, World};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Playing,
    /// Fresh wave already spawned; play resumes when the countdown ends.
    WaveCleared { ticks_left: u32 },
    GameOver,
}

#[derive(Clone, Debug)]
pub struct Session {
    pub lives: u32,
    pub score: u32,
    pub high_score: u32,
    pub waves_cleared: u32,
    pub phase: Phase,
    pub paused: bool,
    starting_lives: u32,
}

impl Session {
    pub fn new(starting_lives: u32, high_score: u32) -> Self {
        Self {
            lives: starting_lives,
            score: 0,
            high_score,
            waves_cleared: 0,
            phase: Phase::Playing,
            paused: false,
            starting_lives,
        }
    }

    /// 1-based number of the wave on screen.
    pub fn wave(&self) -> u32 {
        self.waves_cleared + 1
    }
}

/// Alien march period in milliseconds.
///
/// Each cleared wave takes a fixed step off `base_ms` down to a per-wave
/// floor, and a thinning formation scales that further, never below the
/// absolute floor.
pub fn next_alien_interval(base_ms: u32, waves_cleared: u32, remaining_fraction: f32) -> u32 {
    let per_wave = base_ms
        .saturating_sub(ALIEN_INTERVAL_WAVE_STEP_MS.saturating_mul(waves_cleared))
        .max(ALIEN_INTERVAL_WAVE_FLOOR_MS.min(base_ms));
    let percent: u32 = if remaining_fraction <= 1.0 / 32.0 {
        15
    } else if remaining_fraction <= 1.0 / 8.0 {
        25
    } else if remaining_fraction <= 1.0 / 4.0 {
        40
    } else if remaining_fraction <= 1.0 / 2.0 {
        65
    } else {
        100
    };
    let thinned = u64::from(per_wave) * u64::from(percent) / 100;
    u32::try_from(thinned).unwrap_or(u32::MAX).max(ALIEN_INTERVAL_FLOOR_MS)
}

/// Turns collision signals into lifecycle transitions. Game over wins over a
/// wave clear reported in the same tick.
pub(super) fn apply(world: &mut World, outcome: &Outcome, report: &mut TickReport) {
    if world.session.phase != Phase::Playing {
        return;
    }
    if outcome.breach || world.session.lives == 0 {
        world.session.lives = 0;
        enter_game_over(world);
        report.game_over = true;
    } else if outcome.wave_cleared {
        enter_wave_cleared(world);
        report.wave_cleared = true;
    }
}

fn enter_game_over(world: &mut World) {
    world.session.phase = Phase::GameOver;
    world.bonus.active = false;
    world.ship.set_direction(Direction::None);
    world.ship.firing = false;
    tracing::info!(
        "game over: score={} high_score={} waves_cleared={}",
        world.session.score,
        world.session.high_score,
        world.session.waves_cleared
    );
}

fn enter_wave_cleared(world: &mut World) {
    world.session.waves_cleared += 1;
    respawn_wave(world);

    let ticks = world.config.wave_intermission_ticks;
    world.session.phase = if ticks == 0 {
        Phase::Playing
    } else {
        Phase::WaveCleared { ticks_left: ticks }
    };
    tracing::info!(
        "wave cleared: waves_cleared={} score={} alien_interval_ms={}",
        world.session.waves_cleared,
        world.session.score,
        world.alien_interval_ms()
    );
}

/// Back to wave one with a full set of lives.
pub(super) fn restart(world: &mut World) {
    world.session.lives = world.session.starting_lives;
    world.session.score = 0;
    world.session.waves_cleared = 0;
    world.session.paused = false;
    world.explosions.clear();
    respawn_wave(world);
    world.session.phase = Phase::Playing;
    tracing::info!("session restarted");
}

fn respawn_wave(world: &mut World) {
    world.ship_shots.clear();
    world.alien_shots.clear();
    world.ship.x = world.config.ship_start_x();
    world.ship.set_direction(Direction::None);
    world.formation = Formation::new(&world.config);
    world.shelters = Shelter::row(&world.config);
    world.bonus = BonusTarget::new(&world.config);
    world.gunnery = AlienGunnery::new(&mut world.rng, &world.config);
}
