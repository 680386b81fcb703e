use crate::game::entities::Tier;
use crate::game::geometry::Rect;

/// Read-only copy of the world taken once per frame. The renderer only ever
/// sees this, never the live collections.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub arena_width: i32,
    pub arena_height: i32,
    pub unit: i32,
    pub tick: u64,
    pub ship: Rect,
    pub aliens: Vec<AlienView>,
    pub bonus: Option<Rect>,
    pub ship_shots: Vec<Rect>,
    pub alien_shots: Vec<Rect>,
    pub explosions: Vec<ExplosionView>,
    /// Standing shelters only.
    pub shelters: Vec<ShelterView>,
    pub hud: Hud,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlienView {
    pub x: i32,
    pub y: i32,
    pub tier: Tier,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExplosionView {
    pub x: i32,
    pub y: i32,
    pub ticks_left: u32,
    pub lifetime: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShelterView {
    pub rect: Rect,
    pub hit_points: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Hud {
    pub lives: u32,
    pub score: u32,
    pub high_score: u32,
    pub wave: u32,
    pub aliens_left: usize,
    pub game_over: bool,
    pub won: bool,
    pub paused: bool,
    pub replay_enabled: bool,
}
