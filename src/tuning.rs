//! Data-driven game balance
//!
//! The values a session is built from. Defaults mirror `consts`; a settings
//! file may override any subset of them.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Balance knobs for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Play area width (pixels)
    pub arena_width: f32,
    /// Play area height (pixels)
    pub arena_height: f32,
    /// Ticks between enemy spawn waves
    pub enemy_spawn_interval: u32,
    /// Enemies spawned per wave at the start of a session
    pub enemies_per_spawn: u32,
    /// Ticks between power-up spawns
    pub power_up_spawn_interval: u32,
    /// A boss spawns on every level that is a multiple of this
    pub boss_level_interval: u32,
    /// Enemy kinds drawn uniformly on each spawn (asset keys)
    pub enemy_roster: Vec<String>,
    /// Kind used for bosses
    pub boss_kind: String,
    /// Boss starting health
    pub boss_health: u32,
    /// Starting health of a regular enemy
    pub enemy_health: u32,
    /// Pursuit speed of a regular enemy (pixels/tick)
    pub enemy_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            enemy_spawn_interval: ENEMY_SPAWN_INTERVAL_TICKS,
            enemies_per_spawn: 1,
            power_up_spawn_interval: POWER_UP_SPAWN_INTERVAL_TICKS,
            boss_level_interval: BOSS_LEVEL_INTERVAL,
            enemy_roster: vec![
                "goblin".to_string(),
                "skeleton".to_string(),
                "slime".to_string(),
                "demon".to_string(),
            ],
            boss_kind: "demon".to_string(),
            boss_health: BOSS_HEALTH,
            enemy_health: ENEMY_HEALTH,
            enemy_speed: ENEMY_SPEED,
        }
    }
}

impl Tuning {
    /// Clamp values that would stall or break the tick pipeline
    pub fn sanitized(mut self) -> Self {
        if !(self.arena_width.is_finite() && self.arena_width > 0.0) {
            log::warn!("Invalid arena width {}, using default", self.arena_width);
            self.arena_width = ARENA_WIDTH;
        }
        if !(self.arena_height.is_finite() && self.arena_height > 0.0) {
            log::warn!("Invalid arena height {}, using default", self.arena_height);
            self.arena_height = ARENA_HEIGHT;
        }
        self.enemy_spawn_interval = self.enemy_spawn_interval.max(1);
        self.power_up_spawn_interval = self.power_up_spawn_interval.max(1);
        self.boss_level_interval = self.boss_level_interval.max(1);
        self.enemy_health = self.enemy_health.max(1);
        self.boss_health = self.boss_health.max(1);
        if !(self.enemy_speed.is_finite() && self.enemy_speed >= 0.0) {
            self.enemy_speed = ENEMY_SPEED;
        }
        self
    }
}
