//! Horde Survivor - A top-down survival shooter simulation core
//!
//! Core modules:
//! - `sim`: Fixed-tick simulation (entities, collisions, progression)
//! - `renderer`: Ordered draw commands for an external render sink
//! - `assets`: Logical asset keys and frame metrics
//! - `platform`: Input snapshots and the frame driver
//! - `settings` / `tuning`: Runtime configuration and game balance

pub mod assets;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{Settings, SettingsError};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default simulation rate (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_MAX_HEALTH: u8 = 5;
    /// Speed power-ups stop stacking at this multiple of the starting speed
    pub const PLAYER_MAX_SPEED_MULT: f32 = 3.0;
    pub const DASH_SPEED_MULT: f32 = 3.0;
    pub const DASH_DURATION_TICKS: u32 = 10;
    pub const DASH_COOLDOWN_TICKS: u32 = 45;
    pub const PLAYER_ANIMATION_TICKS: u32 = 8;

    /// Bullet defaults and caps
    pub const BULLET_SPEED: f32 = 10.0;
    pub const BULLET_SIZE: f32 = 10.0;
    pub const BULLET_COUNT: u32 = 1;
    pub const SHOOT_COOLDOWN_TICKS: u32 = 20;
    pub const MAX_BULLET_SPEED: f32 = 20.0;
    pub const MAX_BULLET_SIZE: f32 = 50.0;
    pub const MAX_BULLET_COUNT: u32 = 5;
    pub const MIN_SHOOT_COOLDOWN_TICKS: u32 = 5;
    /// Angle between neighbouring bullets of a fan (degrees)
    pub const FAN_SPREAD_DEGREES: f32 = 10.0;

    /// Enemy defaults
    pub const ENEMY_SPEED: f32 = 1.5;
    pub const ENEMY_HEALTH: u32 = 3;
    pub const ENEMY_KNOCKBACK_SPEED: f32 = 5.0;
    pub const ENEMY_ANIMATION_TICKS: u32 = 8;
    /// Minimum distance used when normalizing a pursuit vector
    pub const MIN_PURSUIT_DISTANCE: f32 = 0.1;
    pub const PUSHBACK_DISTANCE: f32 = 60.0;
    pub const SPAWN_MARGIN: f32 = 40.0;

    /// Evolution
    pub const EVOLVE_INTERVAL_TICKS: u32 = TICK_RATE * 10;
    pub const EVOLVE_HEALTH_STEP: u32 = 2;
    pub const EVOLVE_SIZE_STEP: f32 = 0.2;
    pub const MAX_SIZE_MULT: f32 = 2.5;
    pub const EVOLVE_SPEED_STEP: f32 = 0.15;
    pub const MAX_SPEED_MULT: f32 = 3.0;
    /// Smallest sprite edge after evolution scaling (pixels)
    pub const MIN_SCALED_EDGE: f32 = 10.0;

    /// Boss
    pub const BOSS_SIZE_MULT: f32 = 2.0;
    pub const BOSS_SPEED_MULT: f32 = 0.75;
    pub const BOSS_CHARGE_CHANCE: f64 = 0.02;
    pub const BOSS_CHARGE_MULT: f32 = 3.0;
    pub const BOSS_HEALTH: u32 = 10;
    pub const BOSS_SPAWN_Y: f32 = -50.0;

    /// Pickups
    pub const COIN_SIZE: f32 = 16.0;
    pub const COIN_XP: u32 = 1;
    pub const POWER_UP_SIZE: f32 = 20.0;
    pub const POWER_UP_INSET: f32 = 50.0;

    /// Abilities (ticks)
    pub const TIME_FREEZE_DURATION_TICKS: u32 = TICK_RATE * 5;
    pub const TIME_FREEZE_COOLDOWN_TICKS: u32 = TICK_RATE * 30;
    pub const SHIELD_DURATION_TICKS: u32 = TICK_RATE * 5;
    pub const SHIELD_COOLDOWN_TICKS: u32 = TICK_RATE * 20;

    /// Combo window after a kill
    pub const COMBO_WINDOW_TICKS: u32 = TICK_RATE * 3;
    pub const MAX_COMBO_BONUS_XP: u32 = 3;

    /// Progression
    pub const ENEMY_SPAWN_INTERVAL_TICKS: u32 = 60;
    pub const POWER_UP_SPAWN_INTERVAL_TICKS: u32 = TICK_RATE * 15;
    pub const BOSS_LEVEL_INTERVAL: u32 = 5;
    pub const LEVEL_XP_FACTOR: u32 = 15;
    pub const UPGRADE_CHOICES: usize = 3;
}

/// Unit vector from `from` toward `to`, with the distance clamped to `min_dist`
///
/// Returns the direction and the unclamped distance. A zero-length offset
/// yields `Vec2::ZERO` rather than NaN.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2, min_dist: f32) -> (Vec2, f32) {
    let delta = to - from;
    let dist = delta.length();
    (delta / dist.max(min_dist), dist)
}

/// Angular offsets (radians) of an `n`-bullet fan centered on 0
///
/// Offsets are `(i - (n-1)/2) * spread` for `i` in `0..n`.
pub fn fan_offsets(n: u32, spread_degrees: f32) -> impl Iterator<Item = f32> {
    let mid = (n as f32 - 1.0) / 2.0;
    (0..n).map(move |i| ((i as f32 - mid) * spread_degrees).to_radians())
}

/// Convert an angle to a unit vector
#[inline]
pub fn angle_to_unit(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_to_guards_zero_distance() {
        let (dir, dist) = direction_to(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0), 0.1);
        assert_eq!(dir, Vec2::ZERO);
        assert_eq!(dist, 0.0);
    }

    #[test]
    fn test_direction_to_is_unit() {
        let (dir, dist) = direction_to(Vec2::ZERO, Vec2::new(3.0, 4.0), 0.1);
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!((dist - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_fan_offsets_symmetric() {
        let offsets: Vec<f32> = fan_offsets(3, 10.0).collect();
        assert_eq!(offsets.len(), 3);
        assert!((offsets[0] + 10f32.to_radians()).abs() < 1e-6);
        assert!(offsets[1].abs() < 1e-6);
        assert!((offsets[2] - 10f32.to_radians()).abs() < 1e-6);

        let even: Vec<f32> = fan_offsets(2, 10.0).collect();
        assert!((even[0] + 5f32.to_radians()).abs() < 1e-6);
        assert!((even[1] - 5f32.to_radians()).abs() < 1e-6);
    }
}
