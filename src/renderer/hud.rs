//! Heads-up display text
//!
//! Status lines are computed from the state alone so they can be tested
//! without a sink.

use glam::Vec2;

use super::Color;
use crate::consts::PLAYER_MAX_HEALTH;
use crate::sim::{AbilityWindow, GameState};

/// Where the health bar image is drawn
pub const HEALTH_BAR_POS: Vec2 = Vec2::new(10.0, 10.0);

/// One line of HUD text (top-left anchored)
#[derive(Debug, Clone, PartialEq)]
pub struct HudLine {
    pub text: String,
    pub pos: Vec2,
    pub color: Color,
}

impl HudLine {
    fn new(text: impl Into<String>, pos: Vec2, color: Color) -> Self {
        Self {
            text: text.into(),
            pos,
            color,
        }
    }
}

/// Health bar tier to show (0..=5)
pub fn health_tier(state: &GameState) -> u8 {
    state.player.health.min(PLAYER_MAX_HEALTH)
}

/// Whole seconds left on a tick countdown, rounded up
fn seconds(ticks: u32, tick_rate: u32) -> u32 {
    ticks.div_ceil(tick_rate.max(1))
}

fn ability_line(name: &str, window: &AbilityWindow, tick_rate: u32, pos: Vec2) -> HudLine {
    if window.is_active() {
        HudLine::new(format!("{name} Active!"), pos, Color::CYAN)
    } else if window.cooldown_left() > 0 {
        HudLine::new(
            format!("{name} Cooldown: {}s", seconds(window.cooldown_left(), tick_rate)),
            pos,
            Color::RED,
        )
    } else {
        HudLine::new(format!("{name} Ready!"), pos, Color::GREEN)
    }
}

/// XP, level progress, ability and dash status, combo
pub fn hud_lines(state: &GameState) -> Vec<HudLine> {
    let player = &state.player;
    let status_x = state.arena.width / 2.0 - 80.0;

    let mut lines = vec![
        HudLine::new(format!("XP: {}", player.xp), Vec2::new(10.0, 70.0), Color::WHITE),
        HudLine::new(
            format!(
                "Next Lvl XP: {}",
                player.xp_for_next_level().saturating_sub(player.xp)
            ),
            Vec2::new(10.0, 100.0),
            Color::WHITE,
        ),
        ability_line("Time Freeze", &state.time_freeze, state.tick_rate, Vec2::new(status_x, 10.0)),
        ability_line("Shield", &state.shield, state.tick_rate, Vec2::new(status_x, 30.0)),
    ];

    let dash_pos = Vec2::new(status_x, 70.0);
    if player.dash_cooldown > 0 {
        lines.push(HudLine::new(
            format!("Dash Cooldown: {}s", seconds(player.dash_cooldown, state.tick_rate)),
            dash_pos,
            Color::RED,
        ));
    } else {
        lines.push(HudLine::new("Dash Ready!", dash_pos, Color::GREEN));
    }

    if state.combo.count > 1 {
        lines.push(HudLine::new(
            format!("Combo x{}", state.combo.count),
            Vec2::new(10.0, 130.0),
            Color::YELLOW,
        ));
    }

    lines
}
