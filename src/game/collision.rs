//! Pairwise hit tests and their effects.
//!
//! Each pass marks what it destroys and compacts the collections only after
//! the loop, so no index moves while it is still being iterated.

use rand::Rng;

use crate::game::entities::{sweep, BONUS_SCORES};
use crate::game::world::World;

/// Lifecycle signals raised by one collision pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub aliens_destroyed: usize,
    pub ship_hit: bool,
    pub wave_cleared: bool,
    pub breach: bool,
}

pub(super) fn resolve(world: &mut World) -> Outcome {
    let mut outcome = Outcome::default();
    ship_shots_vs_aliens(world, &mut outcome);
    ship_shots_vs_bonus(world);
    ship_shots_vs_alien_shots(world);
    alien_shots_vs_ship(world, &mut outcome);
    formation_breach(world, &mut outcome);
    shots_vs_shelters(world);
    outcome
}

fn ship_shots_vs_aliens(world: &mut World, outcome: &mut Outcome) {
    let unit = world.config.unit;
    let mut spent = vec![false; world.ship_shots.len()];
    let mut dead = vec![false; world.formation.len()];
    let mut points = 0;
    let mut blasts = Vec::new();

    for (si, shot) in world.ship_shots.iter().enumerate() {
        let hitbox = shot.rect();
        for (ai, alien) in world.formation.aliens().iter().enumerate() {
            if dead[ai] || !hitbox.intersects(&alien.rect(unit)) {
                continue;
            }
            dead[ai] = true;
            spent[si] = true;
            points += alien.tier.points();
            blasts.push((alien.x, alien.y));
            tracing::debug!("{:?} alien destroyed at ({}, {})", alien.tier, alien.x, alien.y);
            break;
        }
    }
    if blasts.is_empty() {
        return;
    }

    sweep(&mut world.ship_shots, &spent);
    world.formation.remove_marked(&dead);
    for (x, y) in blasts.iter().copied() {
        world.explode(x, y);
    }
    world.award(points);
    outcome.aliens_destroyed = blasts.len();
    if world.formation.is_empty() {
        outcome.wave_cleared = true;
    }
}

fn ship_shots_vs_bonus(world: &mut World) {
    if !world.bonus.active {
        return;
    }
    let target = world.bonus.rect(world.config.unit);
    let Some(hit) = world.ship_shots.iter().position(|s| s.rect().intersects(&target)) else {
        return;
    };
    world.ship_shots.remove(hit);
    world.bonus.active = false;
    let points = BONUS_SCORES[world.rng.gen_range(0..BONUS_SCORES.len())];
    world.explode(world.bonus.x + world.config.unit / 2, world.bonus.y);
    world.award(points);
    tracing::debug!("bonus target destroyed for {points}");
}

/// Opposing shots that meet destroy each other.
fn ship_shots_vs_alien_shots(world: &mut World) {
    let mut ship_spent = vec![false; world.ship_shots.len()];
    let mut alien_spent = vec![false; world.alien_shots.len()];
    let mut blasts = Vec::new();

    for (si, shot) in world.ship_shots.iter().enumerate() {
        let hitbox = shot.rect();
        let hit = world
            .alien_shots
            .iter()
            .enumerate()
            .find(|(ai, other)| !alien_spent[*ai] && hitbox.intersects(&other.rect()));
        if let Some((ai, _)) = hit {
            ship_spent[si] = true;
            alien_spent[ai] = true;
            blasts.push((shot.x, shot.y));
        }
    }
    if blasts.is_empty() {
        return;
    }

    sweep(&mut world.ship_shots, &ship_spent);
    sweep(&mut world.alien_shots, &alien_spent);
    for (x, y) in blasts {
        world.explode(x, y);
    }
}

/// At most one hit on the ship per tick.
fn alien_shots_vs_ship(world: &mut World, outcome: &mut Outcome) {
    let ship = world.ship.rect(&world.config);
    let Some(hit) = world.alien_shots.iter().position(|s| s.rect().intersects(&ship)) else {
        return;
    };
    world.alien_shots.remove(hit);
    world.session.lives = world.session.lives.saturating_sub(1);
    world.explode(ship.x, ship.y);
    outcome.ship_hit = true;
    tracing::info!("ship hit, {} lives left", world.session.lives);
}

/// Aliens touching the ship or reaching the floor end the game outright.
fn formation_breach(world: &mut World, outcome: &mut Outcome) {
    let unit = world.config.unit;
    let ship = world.ship.rect(&world.config);
    let floor = world.config.arena_height - unit;

    let breach = world.formation.aliens().iter().find_map(|alien| {
        let touching = alien.rect(unit).intersects(&ship);
        (touching || alien.y >= floor).then_some((alien.x, alien.y, touching))
    });
    if let Some((x, y, touching)) = breach {
        if touching {
            world.explode(x, y);
        }
        world.session.lives = 0;
        outcome.breach = true;
        tracing::info!("formation breached at ({x}, {y})");
    }
}

/// Any shot touching a standing shelter is absorbed and chips one hit-point.
fn shots_vs_shelters(world: &mut World) {
    let mut blasts = Vec::new();
    for shots in [&mut world.ship_shots, &mut world.alien_shots] {
        let mut spent = vec![false; shots.len()];
        for (i, shot) in shots.iter().enumerate() {
            let hitbox = shot.rect();
            let shelter = world
                .shelters
                .iter_mut()
                .find(|s| !s.is_destroyed() && s.rect.intersects(&hitbox));
            if let Some(shelter) = shelter {
                shelter.take_damage();
                spent[i] = true;
                blasts.push((shot.x, shot.y));
                if shelter.is_destroyed() {
                    tracing::debug!("shelter at x={} destroyed", shelter.rect.x);
                }
            }
        }
        sweep(shots, &spent);
    }
    for (x, y) in blasts {
        world.explode(x, y);
    }
}
