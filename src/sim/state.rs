//! Game state and core simulation types
//!
//! `GameState` is the single owner of every entity collection and timer in a
//! session. All mutation happens inside `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ability::{AbilityWindow, Combo};
use super::collision::Arena;
use super::enemy::Enemy;
use super::entities::{Coin, PowerUp, PowerUpKind};
use super::player::{Player, PlayerSprites};
use super::upgrade::Upgrade;
use crate::assets::{AssetKey, AssetProvider, SpriteSheet};
use crate::consts::TICK_RATE;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Waiting for an upgrade choice; simulation suspended
    LevelUp,
    /// Player died; waiting for restart
    GameOver,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnemySpawned { id: u32, kind: String },
    BossSpawned { id: u32, level: u32 },
    EnemyKilled { id: u32, pos: Vec2, combo: u32, bonus_xp: u32 },
    /// Removed after its update failed
    EntityFaulted { id: u32, reason: String },
    BossCharged { id: u32 },
    PlayerHit { health: u8 },
    CoinCollected { xp: u32 },
    PowerUpSpawned { kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind },
    TimeFreezeStarted,
    TimeFreezeEnded,
    ShieldStarted,
    ShieldEnded,
    LevelUp { level: u32 },
    UpgradeChosen { upgrade: Upgrade },
    GameOver { level: u32, xp: u32 },
    SessionReset,
}

/// An enemy kind available to the spawner
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyArchetype {
    pub kind: String,
    pub sheet: SpriteSheet,
}

/// Enemy kinds resolved against the asset provider
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    pub enemies: Vec<EnemyArchetype>,
    pub boss: Option<EnemyArchetype>,
    pub player: PlayerSprites,
}

impl Roster {
    /// Resolve tuning's kind names to sprite metrics; unknown kinds are skipped
    pub fn resolve(tuning: &Tuning, assets: &dyn AssetProvider) -> Self {
        let lookup = |kind: &str| {
            let sheet = assets.sprite_sheet(&AssetKey::Enemy(kind.to_string()));
            if sheet.is_none() {
                log::warn!("No animation for enemy kind '{kind}', leaving it out of the roster");
            }
            sheet.map(|sheet| EnemyArchetype {
                kind: kind.to_string(),
                sheet,
            })
        };

        let enemies: Vec<EnemyArchetype> = tuning.enemy_roster.iter().filter_map(|k| lookup(k)).collect();
        if enemies.is_empty() {
            log::warn!("Enemy roster is empty; no enemies will spawn");
        }
        let boss = lookup(&tuning.boss_kind).or_else(|| enemies.first().cloned());

        let defaults = PlayerSprites::default();
        let player = PlayerSprites {
            idle: assets.sprite_sheet(&AssetKey::PlayerIdle).unwrap_or(defaults.idle),
            running: assets.sprite_sheet(&AssetKey::PlayerRunning).unwrap_or(defaults.running),
        };

        Self { enemies, boss, player }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub arena: Arena,
    pub roster: Roster,
    pub phase: GamePhase,
    /// Ticks simulated this session
    pub time_ticks: u64,
    pub player: Player,
    /// Enemies and bosses (collection order decides first-hit)
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
    pub time_freeze: AbilityWindow,
    pub shield: AbilityWindow,
    pub combo: Combo,
    pub enemy_spawn_timer: u32,
    pub enemies_per_spawn: u32,
    pub power_up_spawn_timer: u32,
    /// Options shown while in `GamePhase::LevelUp`
    pub upgrade_options: Vec<Upgrade>,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Set by a quit input; the frame driver stops on it
    pub quit_requested: bool,
    /// Sessions started, including the current one
    pub session: u32,
    /// Ticks per wall-clock second, for converting countdowns to seconds
    pub tick_rate: u32,
    next_id: u32,
}

impl GameState {
    /// Create a new session
    pub fn new(seed: u64, tuning: Tuning, assets: &dyn AssetProvider) -> Self {
        let tuning = tuning.sanitized();
        let roster = Roster::resolve(&tuning, assets);
        Self::with_roster(seed, tuning, roster)
    }

    /// Create a session from an already-resolved roster
    pub fn with_roster(seed: u64, tuning: Tuning, roster: Roster) -> Self {
        let arena = Arena::new(tuning.arena_width, tuning.arena_height);
        log::info!("New session: seed {seed}, arena {}x{}", arena.width, arena.height);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena,
            phase: GamePhase::Running,
            time_ticks: 0,
            player: Player::new(arena.center(), roster.player),
            enemies: Vec::new(),
            coins: Vec::new(),
            power_ups: Vec::new(),
            time_freeze: AbilityWindow::time_freeze(),
            shield: AbilityWindow::shield(),
            combo: Combo::default(),
            enemy_spawn_timer: 0,
            enemies_per_spawn: tuning.enemies_per_spawn,
            power_up_spawn_timer: 0,
            upgrade_options: Vec::new(),
            events: Vec::new(),
            quit_requested: false,
            session: 1,
            tick_rate: TICK_RATE,
            next_id: 1,
            roster,
            tuning,
        }
    }

    /// Use the frame driver's rate for tick/second conversions (at least 1)
    pub fn with_tick_rate(mut self, tick_rate: u32) -> Self {
        self.tick_rate = tick_rate.max(1);
        self
    }

    /// Start over: every field returns to its construction value
    ///
    /// The RNG stream continues so the next session plays out differently.
    pub fn reset(&mut self) {
        let rng = self.rng.clone();
        let session = self.session + 1;
        let tick_rate = self.tick_rate;
        *self = Self::with_roster(self.seed, self.tuning.clone(), self.roster.clone());
        self.rng = rng;
        self.session = session;
        self.tick_rate = tick_rate;
        self.events.push(GameEvent::SessionReset);
        log::info!("Session {session} started");
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawnable archetype for a regular enemy `kind`
    pub fn archetype(&self, kind: &str) -> Option<&EnemyArchetype> {
        self.roster.enemies.iter().find(|a| a.kind == kind)
    }

    pub fn is_time_frozen(&self) -> bool {
        self.time_freeze.is_active()
    }

    pub fn is_shielded(&self) -> bool {
        self.shield.is_active()
    }

    pub fn boss_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_boss()).count()
    }
}
