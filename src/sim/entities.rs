//! Passive short-lived entities: bullets, coins, power-ups

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, Arena};
use crate::consts::{COIN_SIZE, POWER_UP_SIZE};

/// A player bullet
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Edge length of the square bullet
    pub size: f32,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2, size: f32) -> Self {
        Self { pos, vel, size }
    }

    /// Move by one tick of velocity
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.size))
    }

    /// Bullets are pruned once their center leaves the arena
    #[inline]
    pub fn in_bounds(&self, arena: &Arena) -> bool {
        arena.contains(self.pos)
    }
}

/// Currency dropped by a dead enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
}

impl Coin {
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(COIN_SIZE))
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// +1 health (max 5)
    Health,
    /// Movement speed x1.5
    Speed,
    /// Bullet size x1.2
    Damage,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Health, PowerUpKind::Speed, PowerUpKind::Damage];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Health => "health",
            PowerUpKind::Speed => "speed",
            PowerUpKind::Damage => "damage",
        }
    }
}

/// A pickup that modifies player stats once
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
}

impl PowerUp {
    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(POWER_UP_SIZE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_advance_and_prune() {
        let arena = Arena::new(100.0, 100.0);
        let mut bullet = Bullet::new(Vec2::new(95.0, 50.0), Vec2::new(4.0, 0.0), 10.0);
        bullet.advance();
        assert_eq!(bullet.pos, Vec2::new(99.0, 50.0));
        assert!(bullet.in_bounds(&arena));
        bullet.advance();
        assert!(!bullet.in_bounds(&arena));
    }

    #[test]
    fn test_bounds_follow_position() {
        let mut bullet = Bullet::new(Vec2::ZERO, Vec2::new(1.0, 2.0), 10.0);
        bullet.advance();
        assert_eq!(bullet.bounds().center(), Vec2::new(1.0, 2.0));
        assert_eq!(bullet.bounds().size(), Vec2::splat(10.0));
    }
}
