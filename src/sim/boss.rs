//! Bosses: enemies with a composed charge attack
//!
//! A boss is an `Enemy` carrying a `ChargePolicy`. The world rolls the
//! policy once per tick, after the boss's normal advance.

use glam::Vec2;
use rand::Rng;

use super::enemy::Enemy;
use crate::assets::SpriteSheet;
use crate::consts::*;
use crate::direction_to;

/// Probabilistic instant lunge toward the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargePolicy {
    /// Chance per tick
    pub chance: f64,
    /// Jump length as a multiple of the boss's speed
    pub multiplier: f32,
}

impl Default for ChargePolicy {
    fn default() -> Self {
        Self {
            chance: BOSS_CHARGE_CHANCE,
            multiplier: BOSS_CHARGE_MULT,
        }
    }
}

impl Enemy {
    /// Build a boss: 2x sprite, 0.75x the given base speed
    pub fn boss(id: u32, kind: impl Into<String>, pos: Vec2, sheet: SpriteSheet, health: u32, base_speed: f32) -> Self {
        let mut boss = Enemy::new(id, kind, pos, sheet, health, base_speed);
        boss.set_base_stats(BOSS_SIZE_MULT, base_speed * BOSS_SPEED_MULT);
        boss.charge = Some(ChargePolicy::default());
        boss
    }

    #[inline]
    pub fn is_boss(&self) -> bool {
        self.charge.is_some()
    }

    /// Roll the charge policy; returns true if the boss lunged
    pub fn maybe_charge<R: Rng + ?Sized>(&mut self, player_pos: Vec2, rng: &mut R) -> bool {
        let Some(policy) = self.charge else {
            return false;
        };
        if rng.random::<f64>() >= policy.chance {
            return false;
        }
        let (dir, _) = direction_to(self.pos, player_pos, MIN_PURSUIT_DISTANCE);
        self.pos += dir * self.speed * policy.multiplier;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn sheet() -> SpriteSheet {
        SpriteSheet::new(4, 32.0, 32.0)
    }

    #[test]
    fn test_boss_scaling() {
        let boss = Enemy::boss(1, "demon", Vec2::ZERO, sheet(), BOSS_HEALTH, 2.0);
        let minion = Enemy::new(2, "demon", Vec2::ZERO, sheet(), BOSS_HEALTH, 2.0);
        assert!(boss.is_boss());
        assert!(!minion.is_boss());
        assert_eq!(boss.size_multiplier, 2.0);
        assert_eq!(boss.bounds().size(), minion.bounds().size() * 2.0);
        assert!((boss.speed - 1.5).abs() < 1e-6);
        assert_eq!(boss.health, BOSS_HEALTH);
        assert_eq!(boss.max_health, BOSS_HEALTH);
    }

    #[test]
    fn test_boss_evolution_caps_from_own_speed() {
        let mut boss = Enemy::boss(1, "demon", Vec2::ZERO, sheet(), BOSS_HEALTH, 2.0);
        for _ in 0..40 {
            boss.evolve().unwrap();
        }
        assert!(boss.size_multiplier <= MAX_SIZE_MULT);
        assert!((boss.speed - 1.5 * MAX_SPEED_MULT).abs() < 1e-5);
    }

    #[test]
    fn test_charge_fires_sometimes_and_jumps_toward_player() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut boss = Enemy::boss(1, "demon", Vec2::ZERO, sheet(), BOSS_HEALTH, 2.0);
        let target = Vec2::new(10_000.0, 0.0);

        let mut charges = 0;
        for _ in 0..2000 {
            let before = boss.pos;
            if boss.maybe_charge(target, &mut rng) {
                charges += 1;
                let jump = boss.pos.x - before.x;
                assert!((jump - boss.speed * BOSS_CHARGE_MULT).abs() < 1e-3);
            } else {
                assert_eq!(boss.pos, before);
            }
        }
        assert!(charges > 0);
        assert!(charges < 200);
    }

    #[test]
    fn test_regular_enemy_never_charges() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut enemy = Enemy::new(1, "slime", Vec2::ZERO, sheet(), 3, 2.0);
        for _ in 0..500 {
            assert!(!enemy.maybe_charge(Vec2::new(50.0, 50.0), &mut rng));
        }
        assert_eq!(enemy.pos, Vec2::ZERO);
    }

    #[test]
    fn test_charge_on_top_of_player_stays_put() {
        let mut boss = Enemy::boss(1, "demon", Vec2::new(5.0, 5.0), sheet(), BOSS_HEALTH, 2.0);
        boss.charge = Some(ChargePolicy {
            chance: 1.0,
            multiplier: BOSS_CHARGE_MULT,
        });
        let mut rng = Pcg32::seed_from_u64(9);
        assert!(boss.maybe_charge(Vec2::new(5.0, 5.0), &mut rng));
        assert_eq!(boss.pos, Vec2::new(5.0, 5.0));
    }
}
