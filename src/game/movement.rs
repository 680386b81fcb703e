use crate::config::GameConfig;
use crate::game::entities::{BonusTarget, Direction, Formation, Heading, Projectile, Ship};

/// One step toward the held direction, clamped to `[0, width - ship_width]`.
pub fn move_ship(ship: &mut Ship, config: &GameConfig) {
    if !ship.moving {
        return;
    }
    match ship.direction {
        Direction::Left => ship.x -= config.ship_step,
        Direction::Right => ship.x += config.ship_step,
        Direction::None => {}
    }
    ship.x = ship.x.clamp(0, config.arena_width - config.ship_width());
}

/// Marches the whole formation one step along its heading. If any alien ends
/// up past an edge, the heading flips for the next step and the formation
/// drops this step. Returns true when the formation reversed.
pub fn march_aliens(formation: &mut Formation, config: &GameConfig) -> bool {
    let unit = config.unit;
    let step = match formation.heading {
        Heading::Right => unit / 2,
        Heading::Left => -(unit / 2),
    };

    let mut reverse = false;
    for alien in &mut formation.aliens {
        alien.x += step;
        let crossed = match formation.heading {
            Heading::Right => alien.x > config.arena_width - 2 * unit,
            Heading::Left => alien.x < unit,
        };
        reverse |= crossed;
    }

    if reverse {
        formation.heading = formation.heading.reversed();
        for alien in &mut formation.aliens {
            alien.y += unit / 2;
        }
    }
    reverse
}

/// Ship shots climb and vanish above the arena; alien shots fall and vanish
/// below it.
pub fn move_projectiles(ship_shots: &mut Vec<Projectile>, alien_shots: &mut Vec<Projectile>, config: &GameConfig) {
    for shot in ship_shots.iter_mut() {
        shot.y -= config.ship_projectile_step;
    }
    ship_shots.retain(|s| s.y >= 0);

    for shot in alien_shots.iter_mut() {
        shot.y += config.alien_projectile_step;
    }
    alien_shots.retain(|s| s.y <= config.arena_height);
}

pub fn move_bonus(bonus: &mut BonusTarget, config: &GameConfig) {
    if !bonus.active {
        return;
    }
    bonus.x += bonus.speed;
    if bonus.x > config.arena_width {
        bonus.active = false;
        tracing::debug!("bonus target left the arena");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn ship_does_not_move_without_moving_flag() {
        let config = config();
        let mut ship = Ship::new(&config);
        let start = ship.x;
        ship.direction = Direction::Left;
        move_ship(&mut ship, &config);
        assert_eq!(ship.x, start);
    }

    #[test]
    fn ship_clamps_at_both_walls() {
        let config = config();
        let mut ship = Ship::new(&config);
        ship.set_direction(Direction::Left);
        for _ in 0..500 {
            move_ship(&mut ship, &config);
            assert!(ship.x >= 0);
        }
        assert_eq!(ship.x, 0);

        ship.set_direction(Direction::Right);
        for _ in 0..500 {
            move_ship(&mut ship, &config);
            assert!(ship.x <= config.arena_width - config.ship_width());
        }
        assert_eq!(ship.x, config.arena_width - config.ship_width());
    }

    #[test]
    fn formation_shifts_without_dropping_mid_arena() {
        let config = config();
        let mut formation = Formation::new(&config);
        let before: Vec<(i32, i32)> = formation.aliens().iter().map(|a| (a.x, a.y)).collect();
        assert!(!march_aliens(&mut formation, &config));
        for (alien, (x, y)) in formation.aliens().iter().zip(before) {
            assert_eq!(alien.x, x + config.unit / 2);
            assert_eq!(alien.y, y);
        }
        assert_eq!(formation.heading(), Heading::Right);
    }

    #[test]
    fn one_alien_at_right_edge_reverses_and_drops_everyone() {
        let config = config();
        let mut formation = Formation::new(&config);
        let edge = config.arena_width - 2 * config.unit;
        formation.aliens[10].x = edge;
        let ys: Vec<i32> = formation.aliens().iter().map(|a| a.y).collect();

        assert!(march_aliens(&mut formation, &config));
        assert_eq!(formation.heading(), Heading::Left);
        assert_eq!(formation.aliens()[10].x, edge + config.unit / 2);
        for (alien, y) in formation.aliens().iter().zip(ys) {
            assert_eq!(alien.y, y + config.unit / 2);
        }

        // Next step goes left with no further drop
        let y_after = formation.aliens()[0].y;
        assert!(!march_aliens(&mut formation, &config));
        assert_eq!(formation.aliens()[10].x, edge);
        assert_eq!(formation.aliens()[0].y, y_after);
    }

    #[test]
    fn left_edge_reverses_to_the_right() {
        let config = config();
        let mut formation = Formation::new(&config);
        formation.heading = Heading::Left;
        formation.aliens[0].x = config.unit;
        assert!(march_aliens(&mut formation, &config));
        assert_eq!(formation.heading(), Heading::Right);
    }

    #[test]
    fn projectiles_leave_the_arena() {
        let config = config();
        let mut ship_shots = vec![Projectile { x: 10, y: 5 }, Projectile { x: 10, y: 400 }];
        let mut alien_shots = vec![Projectile { x: 10, y: config.arena_height - 2 }];
        move_projectiles(&mut ship_shots, &mut alien_shots, &config);
        assert_eq!(ship_shots, vec![Projectile { x: 10, y: 400 - config.ship_projectile_step }]);
        assert!(alien_shots.is_empty());
    }

    #[test]
    fn bonus_deactivates_past_right_edge() {
        let config = config();
        let mut bonus = BonusTarget::new(&config);
        move_bonus(&mut bonus, &config);
        assert_eq!(bonus.x, 0);

        bonus.active = true;
        bonus.x = config.arena_width - 1;
        move_bonus(&mut bonus, &config);
        assert!(!bonus.active);
    }
}
