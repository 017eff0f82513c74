//! The controlled actor
//!
//! Movement is a small state machine (idle / running / dashing) driven by
//! the tick input. The player owns its bullets and moves them in `advance`.

use glam::Vec2;

use super::collision::{Aabb, Arena};
use super::entities::{Bullet, PowerUpKind};
use super::tick::TickInput;
use super::upgrade::Upgrade;
use crate::assets::SpriteSheet;
use crate::consts::*;
use crate::{angle_to_unit, fan_offsets};

/// Alpha of a fresh dash afterimage
const AFTERIMAGE_ALPHA: u8 = 100;
/// Alpha lost per tick
const AFTERIMAGE_FADE: u8 = 20;

/// Movement state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MovementState {
    Idle,
    Running,
    /// Fixed-direction burst; `direction` holds -1/0/1 per axis
    Dashing { direction: Vec2, ticks_left: u32 },
}

/// Fading copy of the player left behind while dashing (cosmetic)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Afterimage {
    pub pos: Vec2,
    pub alpha: u8,
    pub frame_index: usize,
    pub facing_left: bool,
}

/// Animation metrics for each movement state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSprites {
    pub idle: SpriteSheet,
    pub running: SpriteSheet,
}

impl Default for PlayerSprites {
    fn default() -> Self {
        Self {
            idle: SpriteSheet::new(4, 32.0, 48.0),
            running: SpriteSheet::new(6, 32.0, 48.0),
        }
    }
}

/// The player
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    /// Movement speed (pixels/tick)
    pub speed: f32,
    base_speed: f32,
    pub health: u8,
    pub xp: u32,
    pub level: u32,
    pub bullet_speed: f32,
    pub bullet_size: f32,
    pub bullet_count: u32,
    /// Ticks between shots
    pub shoot_cooldown: u32,
    /// Ticks until the next shot is allowed
    pub shoot_timer: u32,
    pub movement: MovementState,
    pub dash_cooldown: u32,
    pub afterimages: Vec<Afterimage>,
    pub facing_left: bool,
    pub frame_index: usize,
    animation_timer: u32,
    pub sprites: PlayerSprites,
    pub bullets: Vec<Bullet>,
}

impl Player {
    pub fn new(pos: Vec2, sprites: PlayerSprites) -> Self {
        Self {
            pos,
            speed: PLAYER_SPEED,
            base_speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            xp: 0,
            level: 1,
            bullet_speed: BULLET_SPEED,
            bullet_size: BULLET_SIZE,
            bullet_count: BULLET_COUNT,
            shoot_cooldown: SHOOT_COOLDOWN_TICKS,
            shoot_timer: 0,
            movement: MovementState::Idle,
            dash_cooldown: 0,
            afterimages: Vec::new(),
            facing_left: false,
            frame_index: 0,
            animation_timer: 0,
            sprites,
            bullets: Vec::new(),
        }
    }

    #[inline]
    pub fn is_dashing(&self) -> bool {
        matches!(self.movement, MovementState::Dashing { .. })
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Animation for the current movement state
    pub fn sheet(&self) -> &SpriteSheet {
        match self.movement {
            MovementState::Idle => &self.sprites.idle,
            MovementState::Running | MovementState::Dashing { .. } => &self.sprites.running,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.sheet().frame_size)
    }

    /// XP needed to leave the current level
    pub fn xp_for_next_level(&self) -> u32 {
        self.level * self.level * LEVEL_XP_FACTOR
    }

    pub fn level_up_ready(&self) -> bool {
        self.xp >= self.xp_for_next_level()
    }

    /// Apply this tick's movement input: dash trigger, translation, clamp
    pub fn read_input(&mut self, input: &TickInput, arena: &Arena) {
        let axis = input.move_axis();

        if input.dash && axis != Vec2::ZERO && self.dash_cooldown == 0 && !self.is_dashing() {
            self.movement = MovementState::Dashing {
                direction: axis,
                ticks_left: DASH_DURATION_TICKS,
            };
        }

        let moved = match self.movement {
            MovementState::Dashing { direction, ticks_left } => {
                self.pos += direction * self.base_speed * DASH_SPEED_MULT;
                self.afterimages.push(Afterimage {
                    pos: self.pos,
                    alpha: AFTERIMAGE_ALPHA,
                    frame_index: self.frame_index,
                    facing_left: self.facing_left,
                });
                let ticks_left = ticks_left.saturating_sub(1);
                if ticks_left == 0 {
                    self.end_dash(axis);
                } else {
                    self.movement = MovementState::Dashing { direction, ticks_left };
                }
                direction
            }
            MovementState::Idle | MovementState::Running => {
                self.pos += axis * self.speed;
                self.movement = if axis == Vec2::ZERO {
                    MovementState::Idle
                } else {
                    MovementState::Running
                };
                axis
            }
        };

        self.pos = arena.clamp(self.pos);

        if moved.x < 0.0 {
            self.facing_left = true;
        } else if moved.x > 0.0 {
            self.facing_left = false;
        }
    }

    fn end_dash(&mut self, axis: Vec2) {
        self.movement = if axis == Vec2::ZERO {
            MovementState::Idle
        } else {
            MovementState::Running
        };
        self.dash_cooldown = DASH_COOLDOWN_TICKS;
    }

    /// Timers, owned bullets, afterimages, animation
    pub fn advance(&mut self, arena: &Arena) {
        self.dash_cooldown = self.dash_cooldown.saturating_sub(1);
        self.shoot_timer = self.shoot_timer.saturating_sub(1);

        for bullet in &mut self.bullets {
            bullet.advance();
        }
        self.bullets.retain(|b| b.in_bounds(arena));

        for image in &mut self.afterimages {
            image.alpha = image.alpha.saturating_sub(AFTERIMAGE_FADE);
        }
        self.afterimages.retain(|i| i.alpha > 0);

        self.animation_timer += 1;
        if self.animation_timer >= PLAYER_ANIMATION_TICKS {
            self.animation_timer = 0;
            let frames = self.sheet().frame_count.max(1);
            self.frame_index = (self.frame_index + 1) % frames;
        }
    }

    /// Fire a fan of `bullet_count` bullets toward `target`
    ///
    /// Returns the number of bullets fired (0 while cooling down or when the
    /// target is the player's own position).
    pub fn fire_toward(&mut self, target: Vec2) -> usize {
        if self.shoot_timer > 0 {
            return 0;
        }
        let delta = target - self.pos;
        let dist = delta.length();
        if dist == 0.0 || !dist.is_finite() {
            return 0;
        }

        let base_angle = delta.y.atan2(delta.x);
        let before = self.bullets.len();
        for offset in fan_offsets(self.bullet_count, FAN_SPREAD_DEGREES) {
            let vel = angle_to_unit(base_angle + offset) * self.bullet_speed;
            self.bullets.push(Bullet::new(self.pos, vel, self.bullet_size));
        }
        self.shoot_timer = self.shoot_cooldown;
        self.bullets.len() - before
    }

    pub fn apply_damage(&mut self, amount: u8) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn gain_xp(&mut self, amount: u32) {
        self.xp = self.xp.saturating_add(amount);
    }

    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Health => {
                self.health = (self.health + 1).min(PLAYER_MAX_HEALTH);
            }
            PowerUpKind::Speed => {
                self.speed = (self.speed * 1.5).min(self.base_speed * PLAYER_MAX_SPEED_MULT);
            }
            PowerUpKind::Damage => {
                self.bullet_size = (self.bullet_size * 1.2).min(MAX_BULLET_SIZE);
            }
        }
    }

    pub fn apply_upgrade(&mut self, upgrade: Upgrade) {
        match upgrade {
            Upgrade::BiggerBullet => {
                self.bullet_size = (self.bullet_size + 5.0).min(MAX_BULLET_SIZE);
            }
            Upgrade::FasterBullet => {
                self.bullet_speed = (self.bullet_speed + 2.0).min(MAX_BULLET_SPEED);
            }
            Upgrade::ExtraBullet => {
                self.bullet_count = (self.bullet_count + 1).min(MAX_BULLET_COUNT);
            }
            Upgrade::ShorterCooldown => {
                let shorter = (self.shoot_cooldown as f32 * 0.8) as u32;
                self.shoot_cooldown = shorter.max(MIN_SHOOT_COOLDOWN_TICKS);
            }
        }
    }
}
