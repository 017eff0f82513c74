//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (every timer counts ticks)
//! - Seeded RNG only
//! - Stable iteration order (collection order decides first-hit)
//! - No rendering or platform dependencies

pub mod ability;
pub mod boss;
pub mod collision;
pub mod enemy;
pub mod entities;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod upgrade;

pub use ability::{AbilityWindow, Combo};
pub use boss::ChargePolicy;
pub use collision::{Aabb, Arena};
pub use enemy::{Enemy, EntityFault, Knockback, Tint};
pub use entities::{Bullet, Coin, PowerUp, PowerUpKind};
pub use player::{Afterimage, MovementState, Player, PlayerSprites};
pub use state::{EnemyArchetype, GameEvent, GamePhase, GameState, Roster};
pub use tick::{TickInput, tick};
pub use upgrade::Upgrade;
