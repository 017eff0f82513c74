//! Level-up upgrade roster

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Stat upgrades offered on level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Upgrade {
    /// Bullet size +5 (max 50)
    BiggerBullet,
    /// Bullet speed +2 (max 20)
    FasterBullet,
    /// One more bullet per shot (max 5)
    ExtraBullet,
    /// Shoot cooldown x0.8 (min 5 ticks)
    ShorterCooldown,
}

impl Upgrade {
    pub const ALL: [Upgrade; 4] = [
        Upgrade::BiggerBullet,
        Upgrade::FasterBullet,
        Upgrade::ExtraBullet,
        Upgrade::ShorterCooldown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Upgrade::BiggerBullet => "Bigger Bullet",
            Upgrade::FasterBullet => "Faster Bullet",
            Upgrade::ExtraBullet => "Extra Bullet",
            Upgrade::ShorterCooldown => "Shorter Cooldown",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Upgrade::BiggerBullet => "Bullet size +5",
            Upgrade::FasterBullet => "Bullet speed +2",
            Upgrade::ExtraBullet => "Fire additional bullet",
            Upgrade::ShorterCooldown => "Shoot more frequently",
        }
    }

    /// Draw `count` distinct upgrades in random order
    pub fn pick<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Upgrade> {
        Self::ALL.choose_multiple(rng, count).copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    #[test]
    fn test_pick_distinct() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..50 {
            let options = Upgrade::pick(&mut rng, 3);
            assert_eq!(options.len(), 3);
            let unique: HashSet<_> = options.iter().collect();
            assert_eq!(unique.len(), 3);
        }
    }

    #[test]
    fn test_pick_more_than_roster() {
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(Upgrade::pick(&mut rng, 10).len(), Upgrade::ALL.len());
    }
}
