use rand::Rng;

use crate::config::GameConfig;
use crate::game::entities::{
    BonusTarget, Formation, Projectile, Ship, MAX_ALIEN_PROJECTILES, MAX_SHIP_PROJECTILES, PROJECTILE_HEIGHT,
    PROJECTILE_WIDTH,
};

/// Single-shot weapon: fires only while the trigger is held and the previous
/// shot is gone. The shot starts centred just above the ship.
pub fn fire_ship(ship: &Ship, shots: &mut Vec<Projectile>, config: &GameConfig) -> bool {
    if !ship.firing || shots.len() >= MAX_SHIP_PROJECTILES {
        return false;
    }
    shots.push(Projectile {
        x: ship.x + config.ship_width() / 2 - PROJECTILE_WIDTH / 2,
        y: ship.y - PROJECTILE_HEIGHT,
    });
    true
}

/// Stagger between alien shots, counted down in simulated milliseconds.
#[derive(Clone, Debug, Default)]
pub struct AlienGunnery {
    pub(super) cooldown_ms: u32,
}

impl AlienGunnery {
    pub fn new<R: Rng>(rng: &mut R, config: &GameConfig) -> Self {
        Self {
            cooldown_ms: stagger(rng, config),
        }
    }

    pub fn cooldown_ms(&self) -> u32 {
        self.cooldown_ms
    }

    /// Runs down the stagger and, once it has elapsed, fires from a random
    /// front-line alien if the pool has room.
    pub fn fire<R: Rng>(
        &mut self,
        formation: &Formation,
        shots: &mut Vec<Projectile>,
        rng: &mut R,
        config: &GameConfig,
        elapsed_ms: u32,
    ) -> bool {
        self.cooldown_ms = self.cooldown_ms.saturating_sub(elapsed_ms);
        if self.cooldown_ms > 0 || shots.len() >= MAX_ALIEN_PROJECTILES {
            return false;
        }
        let candidates = formation.front_line();
        if candidates.is_empty() {
            return false;
        }
        let shooter = &formation.aliens()[candidates[rng.gen_range(0..candidates.len())]];
        shots.push(Projectile {
            x: shooter.x + config.unit / 2 - PROJECTILE_WIDTH / 2,
            y: shooter.y + config.unit,
        });
        self.cooldown_ms = stagger(rng, config);
        true
    }
}

fn stagger<R: Rng>(rng: &mut R, config: &GameConfig) -> u32 {
    rng.gen_range(config.alien_fire_min_ms..=config.alien_fire_max_ms)
}

/// Bonus target always enters from the left edge of its lane.
pub fn launch_bonus(bonus: &mut BonusTarget, config: &GameConfig) {
    bonus.x = 0;
    bonus.y = config.bonus_lane_y;
    bonus.speed = config.bonus_speed;
    bonus.active = true;
    tracing::debug!("bonus target launched");
}
