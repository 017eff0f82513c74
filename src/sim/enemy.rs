//! Enemy actor: pursuit, knockback, evolution, damage
//!
//! An enemy chases the player every tick unless a knockback is pushing it
//! away. Every `EVOLVE_INTERVAL_TICKS` it survives it evolves: more health,
//! a bigger sprite and a faster pursuit, all capped.

use glam::Vec2;

use super::boss::ChargePolicy;
use super::collision::Aabb;
use crate::assets::SpriteSheet;
use crate::consts::*;
use crate::direction_to;

/// Faults raised by a single entity's update
///
/// The world logs these and removes the entity; the session keeps running.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EntityFault {
    #[error("enemy {id} moved to a non-finite position {pos}")]
    NonFinitePosition { id: u32, pos: Vec2 },

    #[error("enemy {id} ({kind}) has no animation frames")]
    EmptyAnimation { id: u32, kind: String },

    #[error("enemy {id} evolution produced an invalid sprite size {size}")]
    InvalidScale { id: u32, size: Vec2 },
}

/// Evolution tint, chosen by level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    Red,
    Purple,
    Gold,
}

impl Tint {
    /// Tint for an evolution level; levels past 3 keep the gold tint
    pub fn for_level(level: u32) -> Option<Tint> {
        match level {
            0 => None,
            1 => Some(Tint::Red),
            2 => Some(Tint::Purple),
            _ => Some(Tint::Gold),
        }
    }

    /// RGBA multiply color
    pub fn rgba(&self) -> [u8; 4] {
        match self {
            Tint::Red => [255, 0, 0, 100],
            Tint::Purple => [128, 0, 128, 100],
            Tint::Gold => [255, 215, 0, 100],
        }
    }
}

/// Forced displacement away from a collision
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Knockback {
    /// Unit direction of travel
    pub direction: Vec2,
    /// Distance still to travel
    pub remaining: f32,
}

impl Knockback {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }
}

/// An enemy (or, with a charge policy, a boss)
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    /// Asset key of this enemy kind
    pub kind: String,
    pub pos: Vec2,
    /// Pursuit speed (pixels/tick)
    pub speed: f32,
    original_speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub evolution_level: u32,
    /// Ticks since spawn or since the last evolution
    pub time_alive: u32,
    pub size_multiplier: f32,
    /// Drawn and collided size
    pub visual_size: Vec2,
    pub knockback: Knockback,
    pub frame_index: usize,
    animation_timer: u32,
    pub facing_left: bool,
    pub sheet: SpriteSheet,
    /// Present only on bosses
    pub charge: Option<ChargePolicy>,
}

impl Enemy {
    pub fn new(id: u32, kind: impl Into<String>, pos: Vec2, sheet: SpriteSheet, health: u32, speed: f32) -> Self {
        Self {
            id,
            kind: kind.into(),
            pos,
            speed,
            original_speed: speed,
            health,
            max_health: health,
            evolution_level: 0,
            time_alive: 0,
            size_multiplier: 1.0,
            visual_size: safe_frame_size(sheet.frame_size),
            knockback: Knockback::default(),
            frame_index: 0,
            animation_timer: 0,
            facing_left: false,
            sheet,
            charge: None,
        }
    }

    /// Speed at spawn; evolution scales from this
    pub fn original_speed(&self) -> f32 {
        self.original_speed
    }

    pub(crate) fn set_base_stats(&mut self, size_multiplier: f32, speed: f32) {
        self.size_multiplier = size_multiplier;
        self.speed = speed;
        self.original_speed = speed;
        self.visual_size = safe_frame_size(self.sheet.frame_size * size_multiplier);
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.visual_size)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn tint(&self) -> Option<Tint> {
        Tint::for_level(self.evolution_level)
    }

    /// Advance one tick toward `player_pos`
    pub fn advance(&mut self, player_pos: Vec2) -> Result<(), EntityFault> {
        if self.sheet.frame_count == 0 {
            return Err(EntityFault::EmptyAnimation {
                id: self.id,
                kind: self.kind.clone(),
            });
        }

        self.time_alive += 1;
        if self.time_alive >= EVOLVE_INTERVAL_TICKS {
            if let Err(fault) = self.evolve() {
                log::warn!("{fault}; falling back to unscaled sprite");
            }
        }

        if self.knockback.is_active() {
            self.step_knockback();
        } else {
            self.pursue(player_pos);
        }

        self.animate();

        if !self.pos.is_finite() {
            return Err(EntityFault::NonFinitePosition {
                id: self.id,
                pos: self.pos,
            });
        }
        Ok(())
    }

    fn pursue(&mut self, target: Vec2) {
        let (dir, _) = direction_to(self.pos, target, MIN_PURSUIT_DISTANCE);
        self.facing_left = target.x < self.pos.x;
        self.pos += dir * self.speed;
    }

    fn step_knockback(&mut self) {
        let step = ENEMY_KNOCKBACK_SPEED.min(self.knockback.remaining);
        self.pos += self.knockback.direction * step;
        self.knockback.remaining = (self.knockback.remaining - step).max(0.0);
    }

    fn animate(&mut self) {
        self.animation_timer += 1;
        if self.animation_timer >= ENEMY_ANIMATION_TICKS {
            self.animation_timer = 0;
            self.frame_index = (self.frame_index + 1) % self.sheet.frame_count.max(1);
        }
    }

    /// Strengthen in place
    ///
    /// Logical stats always update. Only the sprite size can fail, in which
    /// case the unscaled frame size is used and the fault is returned.
    pub fn evolve(&mut self) -> Result<(), EntityFault> {
        self.evolution_level += 1;
        self.time_alive = 0;

        self.max_health += EVOLVE_HEALTH_STEP;
        self.health = self.max_health;

        self.size_multiplier = (self.size_multiplier + EVOLVE_SIZE_STEP).min(MAX_SIZE_MULT);

        let max_speed = self.original_speed * MAX_SPEED_MULT;
        self.speed = (self.original_speed * (1.0 + self.evolution_level as f32 * EVOLVE_SPEED_STEP)).min(max_speed);

        let scaled = self.sheet.frame_size * self.size_multiplier;
        if !scaled.is_finite() || scaled.min_element() <= 0.0 {
            self.visual_size = safe_frame_size(self.sheet.frame_size);
            return Err(EntityFault::InvalidScale {
                id: self.id,
                size: scaled,
            });
        }
        self.visual_size = scaled.max(Vec2::splat(MIN_SCALED_EDGE));
        Ok(())
    }

    /// Start a knockback away from `origin`; no-op when standing on it
    pub fn apply_knockback(&mut self, origin: Vec2, distance: f32) {
        let delta = self.pos - origin;
        let length = delta.length();
        if length > 0.0 {
            self.knockback = Knockback {
                direction: delta / length,
                remaining: distance,
            };
        }
    }

    /// Returns true exactly once: on the hit that takes health to 0
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        if self.health == 0 {
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        self.health == 0
    }
}

/// Frame size usable for bounds: finite and non-negative, else the minimum edge
fn safe_frame_size(size: Vec2) -> Vec2 {
    if size.is_finite() && size.min_element() >= 0.0 {
        size
    } else {
        Vec2::splat(MIN_SCALED_EDGE)
    }
}
