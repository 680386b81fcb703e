use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::game::collision;
use crate::game::entities::{BonusTarget, Direction, Explosion, Formation, Projectile, Shelter, Ship};
use crate::game::lifecycle::{self, Phase, Session};
use crate::game::movement;
use crate::game::snapshot::{AlienView, ExplosionView, Hud, ShelterView, Snapshot};
use crate::game::spawning::{self, AlienGunnery};
use crate::scores::{self, HighScoreStore};

/// What one orchestrator pass changed at the lifecycle level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub wave_cleared: bool,
    pub game_over: bool,
    /// The intermission after a cleared wave just ended.
    pub wave_started: bool,
}

/// The whole simulation. Every subsystem receives it (or the parts it needs)
/// explicitly; nothing lives in globals.
pub struct World {
    pub(super) config: GameConfig,
    pub(super) ship: Ship,
    pub(super) formation: Formation,
    pub(super) ship_shots: Vec<Projectile>,
    pub(super) alien_shots: Vec<Projectile>,
    pub(super) bonus: BonusTarget,
    pub(super) shelters: Vec<Shelter>,
    pub(super) explosions: Vec<Explosion>,
    pub(super) gunnery: AlienGunnery,
    pub(super) session: Session,
    pub(super) rng: StdRng,
    pub(super) store: Box<dyn HighScoreStore + Send>,
    tick: u64,
}

impl World {
    pub fn new(config: GameConfig, store: Box<dyn HighScoreStore + Send>) -> Self {
        Self::from_rng(config, store, StdRng::from_entropy())
    }

    pub fn with_seed(config: GameConfig, store: Box<dyn HighScoreStore + Send>, seed: u64) -> Self {
        Self::from_rng(config, store, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: GameConfig, mut store: Box<dyn HighScoreStore + Send>, mut rng: StdRng) -> Self {
        let high_score = scores::read_or_zero(store.as_mut());
        let gunnery = AlienGunnery::new(&mut rng, &config);
        Self {
            ship: Ship::new(&config),
            formation: Formation::new(&config),
            ship_shots: Vec::new(),
            alien_shots: Vec::new(),
            bonus: BonusTarget::new(&config),
            shelters: Shelter::row(&config),
            explosions: Vec::new(),
            gunnery,
            session: Session::new(config.starting_lives, high_score),
            rng,
            store,
            config,
            tick: 0,
        }
    }

    /// One main-clock pass: age explosions, move, spawn, collide, then run
    /// the lifecycle checks. Frozen while paused or after game over.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        if self.session.paused || self.session.phase == Phase::GameOver {
            return report;
        }
        self.tick += 1;
        self.age_explosions();

        if let Phase::WaveCleared { ticks_left } = self.session.phase {
            if ticks_left <= 1 {
                self.session.phase = Phase::Playing;
                report.wave_started = true;
                tracing::info!("wave {} begins", self.session.wave());
            } else {
                self.session.phase = Phase::WaveCleared {
                    ticks_left: ticks_left - 1,
                };
            }
            return report;
        }

        movement::move_ship(&mut self.ship, &self.config);
        movement::move_projectiles(&mut self.ship_shots, &mut self.alien_shots, &self.config);
        movement::move_bonus(&mut self.bonus, &self.config);

        spawning::fire_ship(&self.ship, &mut self.ship_shots, &self.config);
        self.gunnery.fire(
            &self.formation,
            &mut self.alien_shots,
            &mut self.rng,
            &self.config,
            self.config.tick_interval_ms,
        );

        let outcome = collision::resolve(self);
        lifecycle::apply(self, &outcome, &mut report);
        report
    }

    /// Alien clock callback.
    pub fn march_aliens(&mut self) {
        if self.session.phase != Phase::Playing || self.session.paused {
            return;
        }
        if movement::march_aliens(&mut self.formation, &self.config) {
            tracing::trace!("formation reversed to {:?}", self.formation.heading());
        }
    }

    /// Bonus clock callback.
    pub fn launch_bonus(&mut self) {
        if self.session.phase != Phase::Playing || self.session.paused {
            return;
        }
        spawning::launch_bonus(&mut self.bonus, &self.config);
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.ship.set_direction(direction);
    }

    pub fn set_firing(&mut self, firing: bool) {
        self.ship.firing = firing;
    }

    /// Restarts after a game over. Ignored while a game is in progress.
    pub fn replay(&mut self) -> bool {
        if self.session.phase != Phase::GameOver {
            return false;
        }
        lifecycle::restart(self);
        true
    }

    pub fn toggle_pause(&mut self) {
        if self.session.phase == Phase::GameOver {
            return;
        }
        self.session.paused = !self.session.paused;
    }

    /// Current alien march period for the scheduler.
    pub fn alien_interval_ms(&self) -> u32 {
        lifecycle::next_alien_interval(
            self.config.alien_interval_base_ms,
            self.session.waves_cleared,
            self.formation.remaining_fraction(),
        )
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn is_paused(&self) -> bool {
        self.session.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.session.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn high_score(&self) -> u32 {
        self.session.high_score
    }

    pub fn lives(&self) -> u32 {
        self.session.lives
    }

    pub fn waves_cleared(&self) -> u32 {
        self.session.waves_cleared
    }

    pub fn ship_x(&self) -> i32 {
        self.ship.x
    }

    pub fn aliens_left(&self) -> usize {
        self.formation.len()
    }

    pub fn ship_shot_count(&self) -> usize {
        self.ship_shots.len()
    }

    pub fn alien_shot_count(&self) -> usize {
        self.alien_shots.len()
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Adds points and reports a new best to the store as soon as it is set.
    pub(super) fn award(&mut self, points: u32) {
        if points == 0 {
            return;
        }
        self.session.score = self.session.score.saturating_add(points);
        if self.session.score > self.session.high_score {
            self.session.high_score = self.session.score;
            scores::report_new_best(self.store.as_mut(), self.session.high_score);
        }
    }

    pub(super) fn explode(&mut self, x: i32, y: i32) {
        self.explosions.push(Explosion {
            x,
            y,
            ticks_left: self.config.explosion_ticks,
        });
    }

    fn age_explosions(&mut self) {
        for explosion in &mut self.explosions {
            explosion.ticks_left = explosion.ticks_left.saturating_sub(1);
        }
        self.explosions.retain(|e| e.ticks_left > 0);
    }

    /// Owned copy of everything the presentation layer draws.
    pub fn snapshot(&self) -> Snapshot {
        let unit = self.config.unit;
        Snapshot {
            arena_width: self.config.arena_width,
            arena_height: self.config.arena_height,
            unit,
            tick: self.tick,
            ship: self.ship.rect(&self.config),
            aliens: self
                .formation
                .aliens()
                .iter()
                .map(|a| AlienView {
                    x: a.x,
                    y: a.y,
                    tier: a.tier,
                })
                .collect(),
            bonus: self.bonus.active.then(|| self.bonus.rect(unit)),
            ship_shots: self.ship_shots.iter().map(|s| s.rect()).collect(),
            alien_shots: self.alien_shots.iter().map(|s| s.rect()).collect(),
            explosions: self
                .explosions
                .iter()
                .map(|e| ExplosionView {
                    x: e.x,
                    y: e.y,
                    ticks_left: e.ticks_left,
                    lifetime: self.config.explosion_ticks,
                })
                .collect(),
            shelters: self
                .shelters
                .iter()
                .filter(|s| !s.is_destroyed())
                .map(|s| ShelterView {
                    rect: s.rect,
                    hit_points: s.hit_points,
                })
                .collect(),
            hud: Hud {
                lives: self.session.lives,
                score: self.session.score,
                high_score: self.session.high_score,
                wave: self.session.wave(),
                aliens_left: self.formation.len(),
                game_over: self.session.phase == Phase::GameOver,
                won: matches!(self.session.phase, Phase::WaveCleared { .. }),
                paused: self.session.paused,
                replay_enabled: self.session.phase == Phase::GameOver,
            },
        }
    }
}
