//! Spawning: edge enemies, power-ups, bosses
//!
//! Every random draw goes through the session RNG so a seed replays the same
//! run.

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::collision::Arena;
use super::enemy::Enemy;
use super::entities::{PowerUp, PowerUpKind};
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Arena edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

/// Random point `margin` pixels outside a random edge
pub fn edge_spawn_point<R: Rng + ?Sized>(rng: &mut R, arena: &Arena, margin: f32) -> (Edge, Vec2) {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let pos = match edge {
        Edge::Top => Vec2::new(rng.random_range(0.0..=arena.width), -margin),
        Edge::Bottom => Vec2::new(rng.random_range(0.0..=arena.width), arena.height + margin),
        Edge::Left => Vec2::new(-margin, rng.random_range(0.0..=arena.height)),
        Edge::Right => Vec2::new(arena.width + margin, rng.random_range(0.0..=arena.height)),
    };
    (edge, pos)
}

/// Random power-up position, inset from every edge
///
/// Arenas too small for the inset place it at the center.
pub fn power_up_point<R: Rng + ?Sized>(rng: &mut R, arena: &Arena, inset: f32) -> Vec2 {
    let axis = |rng: &mut R, extent: f32| {
        if extent - inset > inset {
            rng.random_range(inset..=extent - inset)
        } else {
            extent / 2.0
        }
    };
    let x = axis(rng, arena.width);
    let y = axis(rng, arena.height);
    Vec2::new(x, y)
}

/// Where bosses enter: top center, above the screen
pub fn boss_spawn_point(arena: &Arena) -> Vec2 {
    Vec2::new(arena.width / 2.0, BOSS_SPAWN_Y)
}

/// Spawn one wave of `enemies_per_spawn` regular enemies
pub fn spawn_enemy_wave(state: &mut GameState) -> usize {
    let mut spawned = 0;
    for _ in 0..state.enemies_per_spawn {
        let Some(archetype) = state.roster.enemies.choose(&mut state.rng).cloned() else {
            break;
        };
        let (edge, pos) = edge_spawn_point(&mut state.rng, &state.arena, SPAWN_MARGIN);
        let id = state.next_entity_id();
        let enemy = Enemy::new(
            id,
            archetype.kind.clone(),
            pos,
            archetype.sheet,
            state.tuning.enemy_health,
            state.tuning.enemy_speed,
        );
        log::debug!("Spawned {} #{id} at {pos} ({edge:?} edge)", archetype.kind);
        state.events.push(GameEvent::EnemySpawned {
            id,
            kind: archetype.kind,
        });
        state.enemies.push(enemy);
        spawned += 1;
    }
    spawned
}

/// Spawn a random power-up inside the arena
pub fn spawn_power_up(state: &mut GameState) -> PowerUpKind {
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let pos = power_up_point(&mut state.rng, &state.arena, POWER_UP_INSET);
    let id = state.next_entity_id();
    log::debug!("Spawned {} power-up at {pos}", kind.as_str());
    state.power_ups.push(PowerUp { id, kind, pos });
    state.events.push(GameEvent::PowerUpSpawned { kind });
    kind
}

/// Spawn the boss for the player's current level
///
/// Returns `None` when no boss kind could be resolved.
pub fn spawn_boss(state: &mut GameState) -> Option<u32> {
    let archetype = state.roster.boss.clone()?;
    let id = state.next_entity_id();
    let level = state.player.level;
    let boss = Enemy::boss(
        id,
        archetype.kind.clone(),
        boss_spawn_point(&state.arena),
        archetype.sheet,
        state.tuning.boss_health,
        state.tuning.enemy_speed,
    );
    log::info!("Boss {} #{id} spawned for level {level}", archetype.kind);
    state.enemies.push(boss);
    state.events.push(GameEvent::BossSpawned { id, level });
    Some(id)
}
