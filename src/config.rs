//! Runtime tuning loaded from `invaders.toml`.
//!
//! Every field defaults to the compile-time constant below, so a partial file
//! overrides only the values it names. A missing file is normal; an unreadable
//! or malformed one is logged and the defaults are used.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Error;

pub const ARENA_WIDTH: i32 = 672;
pub const ARENA_HEIGHT: i32 = 768;
pub const UNIT: i32 = 26;

pub const TICK_INTERVAL_MS: u32 = 16;
pub const SHIP_STEP: i32 = 6;
pub const SHIP_PROJECTILE_STEP: i32 = 12;
pub const ALIEN_PROJECTILE_STEP: i32 = 6;

pub const ALIEN_INTERVAL_BASE_MS: u32 = 500;
pub const ALIEN_INTERVAL_WAVE_STEP_MS: u32 = 50;
pub const ALIEN_INTERVAL_WAVE_FLOOR_MS: u32 = 100;
pub const ALIEN_INTERVAL_FLOOR_MS: u32 = 30;

pub const ALIEN_FIRE_MIN_MS: u32 = 600;
pub const ALIEN_FIRE_MAX_MS: u32 = 1500;

pub const BONUS_INTERVAL_MS: u32 = 20_000;
pub const BONUS_SPEED: i32 = 2;
pub const BONUS_LANE_Y: i32 = 50;

pub const EXPLOSION_TICKS: u32 = 10;
pub const WAVE_INTERMISSION_TICKS: u32 = 60;
pub const STARTING_LIVES: u32 = 3;

// Upper bounds accepted from a config file
pub const MAX_ALIEN_INTERVAL_MS: u32 = 60_000;
pub const MAX_BONUS_INTERVAL_MS: u32 = 600_000;

const CONFIG_FILE: &str = "invaders.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Arena ────────────────────────────────────────────────────────────
    pub arena_width: i32,
    pub arena_height: i32,
    pub unit: i32,

    // ── Clocks ───────────────────────────────────────────────────────────
    pub tick_interval_ms: u32,
    pub alien_interval_base_ms: u32,
    pub bonus_interval_ms: u32,

    // ── Speeds ───────────────────────────────────────────────────────────
    pub ship_step: i32,
    pub ship_projectile_step: i32,
    pub alien_projectile_step: i32,
    pub bonus_speed: i32,
    pub bonus_lane_y: i32,

    // ── Alien fire stagger window ────────────────────────────────────────
    pub alien_fire_min_ms: u32,
    pub alien_fire_max_ms: u32,

    // ── Session ──────────────────────────────────────────────────────────
    pub starting_lives: u32,
    pub explosion_ticks: u32,
    pub wave_intermission_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            unit: UNIT,
            tick_interval_ms: TICK_INTERVAL_MS,
            alien_interval_base_ms: ALIEN_INTERVAL_BASE_MS,
            bonus_interval_ms: BONUS_INTERVAL_MS,
            ship_step: SHIP_STEP,
            ship_projectile_step: SHIP_PROJECTILE_STEP,
            alien_projectile_step: ALIEN_PROJECTILE_STEP,
            bonus_speed: BONUS_SPEED,
            bonus_lane_y: BONUS_LANE_Y,
            alien_fire_min_ms: ALIEN_FIRE_MIN_MS,
            alien_fire_max_ms: ALIEN_FIRE_MAX_MS,
            starting_lives: STARTING_LIVES,
            explosion_ticks: EXPLOSION_TICKS,
            wave_intermission_ticks: WAVE_INTERMISSION_TICKS,
        }
    }
}

impl GameConfig {
    /// Loads `invaders.toml` from beside the executable, falling back to the
    /// defaults on any problem.
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(config) => {
                tracing::info!("loaded config from {}", path.display());
                config
            }
            Err(err) => {
                tracing::warn!("{err}; using default config");
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, String> {
        let config: GameConfig = toml::from_str(text).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if self.unit < 2 {
            return Err(format!("unit {} must be at least 2", self.unit));
        }
        let min_side = self.unit.saturating_mul(20);
        if self.arena_width < min_side || self.arena_height < min_side {
            return Err(format!(
                "arena {}x{} is too small for unit {}",
                self.arena_width, self.arena_height, self.unit
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be positive".to_string());
        }
        if !(1..=MAX_ALIEN_INTERVAL_MS).contains(&self.alien_interval_base_ms) {
            return Err(format!(
                "alien_interval_base_ms must be between 1 and {MAX_ALIEN_INTERVAL_MS}"
            ));
        }
        if !(1..=MAX_BONUS_INTERVAL_MS).contains(&self.bonus_interval_ms) {
            return Err(format!("bonus_interval_ms must be between 1 and {MAX_BONUS_INTERVAL_MS}"));
        }
        for (name, step) in [
            ("ship_step", self.ship_step),
            ("ship_projectile_step", self.ship_projectile_step),
            ("alien_projectile_step", self.alien_projectile_step),
            ("bonus_speed", self.bonus_speed),
        ] {
            if step <= 0 {
                return Err(format!("{name} must be positive"));
            }
        }
        if self.alien_fire_min_ms > self.alien_fire_max_ms {
            return Err(format!(
                "alien_fire_min_ms ({}) exceeds alien_fire_max_ms ({})",
                self.alien_fire_min_ms, self.alien_fire_max_ms
            ));
        }
        if self.starting_lives == 0 {
            return Err("starting_lives must be at least 1".to_string());
        }
        Ok(())
    }

    fn config_path() -> PathBuf {
        // Store next to the executable
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join(CONFIG_FILE);
            }
        }
        PathBuf::from(CONFIG_FILE)
    }

    pub fn ship_width(&self) -> i32 {
        self.unit
    }

    pub fn ship_height(&self) -> i32 {
        self.unit
    }

    pub fn ship_y(&self) -> i32 {
        self.arena_height - self.ship_height()
    }

    pub fn ship_start_x(&self) -> i32 {
        self.arena_width / 2 - self.unit / 2
    }
}
