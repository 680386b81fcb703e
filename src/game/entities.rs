use crate::config::GameConfig;
use crate::game::geometry::Rect;

pub const FORMATION_ROWS: usize = 5;
pub const FORMATION_COLS: usize = 11;
pub const FORMATION_SIZE: usize = FORMATION_ROWS * FORMATION_COLS;

// One nominal hit-box for every projectile, whichever side fired it
pub const PROJECTILE_WIDTH: i32 = 5;
pub const PROJECTILE_HEIGHT: i32 = 10;

pub const MAX_SHIP_PROJECTILES: usize = 1;
pub const MAX_ALIEN_PROJECTILES: usize = 2;

pub const SHELTER_COUNT: usize = 4;
pub const SHELTER_HIT_POINTS: i32 = 10;

pub const BONUS_SCORES: [u32; 5] = [50, 100, 150, 200, 300];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    None,
    Left,
    Right,
}

#[derive(Clone, Debug)]
pub struct Ship {
    pub x: i32,
    pub y: i32,
    pub direction: Direction,
    pub moving: bool,
    pub firing: bool,
}

impl Ship {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.ship_start_x(),
            y: config.ship_y(),
            direction: Direction::None,
            moving: false,
            firing: false,
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.moving = direction != Direction::None;
    }

    pub fn rect(&self, config: &GameConfig) -> Rect {
        Rect::new(self.x, self.y, config.ship_width(), config.ship_height())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    Small,  // 30 pts
    Medium, // 20 pts
    Large,  // 10 pts
}

impl Tier {
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => Tier::Small,
            1 | 2 => Tier::Medium,
            _ => Tier::Large,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            Tier::Small => 30,
            Tier::Medium => 20,
            Tier::Large => 10,
        }
    }

    pub fn sprite_key(&self) -> &'static str {
        match self {
            Tier::Small => "alien.small",
            Tier::Medium => "alien.medium",
            Tier::Large => "alien.large",
        }
    }
}

/// Tier and column are fixed when the formation is built and survive the
/// removal of any other alien.
#[derive(Clone, Debug)]
pub struct Alien {
    pub x: i32,
    pub y: i32,
    pub column: usize,
    pub tier: Tier,
}

impl Alien {
    pub fn rect(&self, unit: i32) -> Rect {
        Rect::new(self.x, self.y, unit, unit)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    pub fn reversed(self) -> Self {
        match self {
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Formation {
    pub(super) aliens: Vec<Alien>,
    pub(super) heading: Heading,
    spawned: usize,
}

impl Formation {
    pub fn new(config: &GameConfig) -> Self {
        let unit = config.unit;
        let spacing = unit * 2 / 3;
        let pitch = unit + spacing;
        let width = FORMATION_COLS as i32 * unit + (FORMATION_COLS as i32 - 1) * spacing;
        let start_x = (config.arena_width - width) / 2;
        let start_y = 4 * unit;

        let mut aliens = Vec::with_capacity(FORMATION_SIZE);
        for row in 0..FORMATION_ROWS {
            let tier = Tier::for_row(row);
            for col in 0..FORMATION_COLS {
                aliens.push(Alien {
                    x: start_x + col as i32 * pitch,
                    y: start_y + row as i32 * pitch,
                    column: col,
                    tier,
                });
            }
        }
        Self {
            aliens,
            heading: Heading::Right,
            spawned: FORMATION_SIZE,
        }
    }

    pub fn aliens(&self) -> &[Alien] {
        &self.aliens
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn len(&self) -> usize {
        self.aliens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliens.is_empty()
    }

    pub fn remaining_fraction(&self) -> f32 {
        if self.spawned == 0 {
            return 0.0;
        }
        self.aliens.len() as f32 / self.spawned as f32
    }

    /// Index of the lowest living alien in each column, columns left to right.
    /// Empty columns contribute nothing.
    pub fn front_line(&self) -> Vec<usize> {
        let mut lowest: [Option<usize>; FORMATION_COLS] = [None; FORMATION_COLS];
        for (i, alien) in self.aliens.iter().enumerate() {
            let Some(slot) = lowest.get_mut(alien.column) else { continue };
            match *slot {
                Some(j) if self.aliens[j].y >= alien.y => {}
                _ => *slot = Some(i),
            }
        }
        lowest.into_iter().flatten().collect()
    }

    /// Drops every alien whose mark is set. Indices of the survivors shift,
    /// but nothing else refers to them after the sweep.
    pub fn remove_marked(&mut self, marks: &[bool]) {
        sweep(&mut self.aliens, marks);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
}

impl Projectile {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }
}

#[derive(Clone, Debug)]
pub struct BonusTarget {
    pub x: i32,
    pub y: i32,
    pub active: bool,
    pub speed: i32,
}

impl BonusTarget {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: 0,
            y: config.bonus_lane_y,
            active: false,
            speed: config.bonus_speed,
        }
    }

    pub fn rect(&self, unit: i32) -> Rect {
        Rect::new(self.x, self.y, unit * 2, unit)
    }
}

#[derive(Clone, Debug)]
pub struct Shelter {
    pub rect: Rect,
    pub hit_points: i32,
}

impl Shelter {
    pub fn new(x: i32, y: i32, unit: i32) -> Self {
        Self {
            rect: Rect::new(x, y, unit * 2, unit),
            hit_points: SHELTER_HIT_POINTS,
        }
    }

    /// Four shelters, evenly spaced and centred three units above the floor.
    pub fn row(config: &GameConfig) -> Vec<Shelter> {
        let unit = config.unit;
        let (width, padding) = (unit * 2, unit * 2);
        let count = SHELTER_COUNT as i32;
        let first_x = (config.arena_width - (count * width + (count - 1) * padding)) / 2;
        let y = config.arena_height - 3 * unit;
        (0..count)
            .map(|i| Shelter::new(first_x + i * (width + padding), y, unit))
            .collect()
    }

    pub fn take_damage(&mut self) {
        self.hit_points -= 1;
    }

    pub fn is_destroyed(&self) -> bool {
        self.hit_points <= 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Explosion {
    pub x: i32,
    pub y: i32,
    pub ticks_left: u32,
}

/// Mark-and-sweep compaction: keeps the items whose mark is unset, in order.
/// Items past the end of `marks` are kept.
pub fn sweep<T>(items: &mut Vec<T>, marks: &[bool]) {
    let mut marks = marks.iter();
    items.retain(|_| !marks.next().copied().unwrap_or(false));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formation_tiers_follow_rows() {
        let formation = Formation::new(&GameConfig::default());
        assert_eq!(formation.len(), FORMATION_SIZE);
        let tiers: Vec<Tier> = formation.aliens().iter().map(|a| a.tier).collect();
        assert!(tiers[..11].iter().all(|t| *t == Tier::Small));
        assert!(tiers[11..33].iter().all(|t| *t == Tier::Medium));
        assert!(tiers[33..].iter().all(|t| *t == Tier::Large));
    }

    #[test]
    fn tier_survives_removal_of_earlier_aliens() {
        let mut formation = Formation::new(&GameConfig::default());
        // Kill the whole top row; the old index 11 becomes index 0
        let mut marks = vec![false; formation.len()];
        marks[..11].iter_mut().for_each(|m| *m = true);
        formation.remove_marked(&marks);
        assert_eq!(formation.len(), 44);
        assert_eq!(formation.aliens()[0].tier, Tier::Medium);
        assert_eq!(formation.aliens()[0].column, 0);
    }

    #[test]
    fn front_line_picks_lowest_alien_per_column() {
        let mut formation = Formation::new(&GameConfig::default());
        let front = formation.front_line();
        assert_eq!(front.len(), FORMATION_COLS);
        assert!(front.iter().all(|&i| formation.aliens()[i].tier == Tier::Large));

        // Empty column 4 entirely
        let marks: Vec<bool> = formation.aliens().iter().map(|a| a.column == 4).collect();
        formation.remove_marked(&marks);
        let front = formation.front_line();
        assert_eq!(front.len(), FORMATION_COLS - 1);
        assert!(front.iter().all(|&i| formation.aliens()[i].column != 4));
    }

    #[test]
    fn front_line_of_empty_formation_is_empty() {
        let mut formation = Formation::new(&GameConfig::default());
        formation.remove_marked(&vec![true; FORMATION_SIZE]);
        assert!(formation.front_line().is_empty());
        assert_eq!(formation.remaining_fraction(), 0.0);
    }

    #[test]
    fn shelters_are_evenly_spaced_and_centred() {
        let config = GameConfig::default();
        let shelters = Shelter::row(&config);
        assert_eq!(shelters.len(), SHELTER_COUNT);
        let gaps: Vec<i32> = shelters.windows(2).map(|w| w[1].rect.x - w[0].rect.x).collect();
        assert!(gaps.iter().all(|g| *g == gaps[0]));
        let left = shelters[0].rect.x;
        let right = config.arena_width - shelters[3].rect.right();
        assert!((left - right).abs() <= 1);
    }

    #[test]
    fn shelter_destroyed_at_zero_hit_points() {
        let mut shelter = Shelter::new(0, 0, 26);
        for _ in 0..SHELTER_HIT_POINTS - 1 {
            shelter.take_damage();
        }
        assert!(!shelter.is_destroyed());
        shelter.take_damage();
        assert!(shelter.is_destroyed());
    }

    #[test]
    fn sweep_keeps_unmarked_in_order() {
        let mut items = vec![1, 2, 3, 4, 5];
        sweep(&mut items, &[false, true, false, true]);
        assert_eq!(items, vec![1, 3, 5]);
    }
}
