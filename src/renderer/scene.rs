//! Scene composition in painter's order
//!
//! Background, time-freeze tint, pickups, player (with bullets, afterimages
//! and shield), enemies (with evolution markers and health bars), HUD, then
//! the upgrade menu or game-over overlay.

use glam::Vec2;

use super::hud::{HEALTH_BAR_POS, health_tier, hud_lines};
use super::{Anchor, Color, DrawCommand, Layer, RenderSink, TextSize};
use crate::assets::{AssetKey, AssetProvider};
use crate::consts::{COIN_SIZE, POWER_UP_SIZE};
use crate::sim::{Enemy, GamePhase, GameState, MovementState, PowerUpKind};

const TIME_FREEZE_TINT: Color = Color::rgba(100, 200, 255, 60);
const SHIELD_COLOR: Color = Color::rgba(0, 0, 255, 100);
const COIN_COLOR: Color = Color::rgb(255, 200, 0);
const BULLET_COLOR: Color = Color::rgb(255, 240, 120);
const MENU_DIM: Color = Color::rgba(0, 0, 0, 180);
const GAME_OVER_DIM: Color = Color::rgba(0, 0, 0, 100);
const EVOLUTION_MARKER_RADIUS: f32 = 3.0;
const HEALTH_BAR_HEIGHT: f32 = 4.0;

/// Emit the whole frame for `state` into `sink`
pub fn render_scene(state: &GameState, assets: &dyn AssetProvider, sink: &mut dyn RenderSink) {
    draw_background(state, assets, sink);

    if state.is_time_frozen() {
        sink.begin_layer(Layer::TimeFreeze);
        sink.draw(DrawCommand::Overlay {
            color: TIME_FREEZE_TINT,
        });
    }

    draw_pickups(state, sink);

    if state.phase == GamePhase::Running {
        draw_player(state, assets, sink);
    }

    sink.begin_layer(Layer::Enemies);
    for enemy in &state.enemies {
        draw_enemy(enemy, assets, sink);
    }

    draw_hud(state, assets, sink);

    match state.phase {
        GamePhase::LevelUp => draw_upgrade_menu(state, sink),
        GamePhase::GameOver => draw_game_over(state, sink),
        GamePhase::Running => {}
    }
}

/// Frame `index` of `key`, drawn with its center at `center`
fn image(
    assets: &dyn AssetProvider,
    key: &AssetKey,
    index: usize,
    center: Vec2,
    size: Vec2,
) -> Option<DrawCommand> {
    let frame = assets.animation(key)?.frame(index)?;
    Some(DrawCommand::Image {
        handle: frame.handle,
        pos: center - size * 0.5,
        size,
        flip_x: false,
        alpha: 255,
        tint: None,
    })
}

fn draw_background(state: &GameState, assets: &dyn AssetProvider, sink: &mut dyn RenderSink) {
    sink.begin_layer(Layer::Background);
    let size = Vec2::new(state.arena.width, state.arena.height);
    match image(assets, &AssetKey::Background, 0, size * 0.5, size) {
        Some(command) => sink.draw(command),
        None => sink.draw(DrawCommand::Overlay { color: Color::BLACK }),
    }
}

fn draw_pickups(state: &GameState, sink: &mut dyn RenderSink) {
    sink.begin_layer(Layer::Pickups);
    for coin in &state.coins {
        sink.draw(DrawCommand::Circle {
            center: coin.pos,
            radius: COIN_SIZE / 2.0,
            color: COIN_COLOR,
        });
    }
    for power_up in &state.power_ups {
        let color = match power_up.kind {
            PowerUpKind::Health => Color::GREEN,
            PowerUpKind::Speed => Color::CYAN,
            PowerUpKind::Damage => Color::RED,
        };
        sink.draw(DrawCommand::Rect {
            pos: power_up.pos - Vec2::splat(POWER_UP_SIZE / 2.0),
            size: Vec2::splat(POWER_UP_SIZE),
            color,
        });
    }
}

fn draw_player(state: &GameState, assets: &dyn AssetProvider, sink: &mut dyn RenderSink) {
    sink.begin_layer(Layer::Player);
    let player = &state.player;
    let key = match player.movement {
        MovementState::Idle => AssetKey::PlayerIdle,
        MovementState::Running | MovementState::Dashing { .. } => AssetKey::PlayerRunning,
    };
    let size = player.sheet().frame_size;

    if state.is_shielded() {
        sink.draw(DrawCommand::Circle {
            center: player.pos,
            radius: size.x,
            color: SHIELD_COLOR,
        });
    }

    for afterimage in &player.afterimages {
        if let Some(DrawCommand::Image { handle, pos, size, .. }) =
            image(assets, &key, afterimage.frame_index, afterimage.pos, size)
        {
            sink.draw(DrawCommand::Image {
                handle,
                pos,
                size,
                flip_x: afterimage.facing_left,
                alpha: afterimage.alpha,
                tint: None,
            });
        }
    }

    if let Some(DrawCommand::Image { handle, pos, size, .. }) =
        image(assets, &key, player.frame_index, player.pos, size)
    {
        sink.draw(DrawCommand::Image {
            handle,
            pos,
            size,
            flip_x: player.facing_left,
            alpha: 255,
            tint: None,
        });
    }

    for bullet in &player.bullets {
        sink.draw(DrawCommand::Rect {
            pos: bullet.pos - Vec2::splat(bullet.size / 2.0),
            size: Vec2::splat(bullet.size),
            color: BULLET_COLOR,
        });
    }
}

fn draw_enemy(enemy: &Enemy, assets: &dyn AssetProvider, sink: &mut dyn RenderSink) {
    let bounds = enemy.bounds();
    let key = AssetKey::Enemy(enemy.kind.clone());

    if let Some(DrawCommand::Image { handle, pos, size, .. }) =
        image(assets, &key, enemy.frame_index, enemy.pos, enemy.visual_size)
    {
        sink.draw(DrawCommand::Image {
            handle,
            pos,
            size,
            flip_x: enemy.facing_left,
            alpha: 255,
            tint: enemy.tint().map(|t| Color::from_array(t.rgba())),
        });
    }

    // One marker per evolution level, right to left above the sprite
    for i in 0..enemy.evolution_level {
        sink.draw(DrawCommand::Circle {
            center: Vec2::new(bounds.max.x - 5.0 - i as f32 * 8.0, bounds.min.y - 5.0),
            radius: EVOLUTION_MARKER_RADIUS,
            color: Color::YELLOW,
        });
    }

    let width = bounds.size().x;
    let bar_pos = Vec2::new(bounds.min.x, bounds.min.y - 8.0);
    let ratio = if enemy.max_health > 0 {
        enemy.health as f32 / enemy.max_health as f32
    } else {
        0.0
    };
    sink.draw(DrawCommand::Rect {
        pos: bar_pos,
        size: Vec2::new(width, HEALTH_BAR_HEIGHT),
        color: Color::RED,
    });
    sink.draw(DrawCommand::Rect {
        pos: bar_pos,
        size: Vec2::new(width * ratio, HEALTH_BAR_HEIGHT),
        color: Color::GREEN,
    });
}

fn draw_hud(state: &GameState, assets: &dyn AssetProvider, sink: &mut dyn RenderSink) {
    sink.begin_layer(Layer::Hud);

    let tier = AssetKey::HealthBar(health_tier(state));
    if let Some(frame) = assets.animation(&tier).and_then(|a| a.frame(0)) {
        sink.draw(DrawCommand::Image {
            handle: frame.handle,
            pos: HEALTH_BAR_POS,
            size: Vec2::new(frame.width, frame.height),
            flip_x: false,
            alpha: 255,
            tint: None,
        });
    }

    for line in hud_lines(state) {
        sink.draw(DrawCommand::Text {
            text: line.text,
            pos: line.pos,
            size: TextSize::Small,
            anchor: Anchor::TopLeft,
            color: line.color,
        });
    }
}

fn draw_upgrade_menu(state: &GameState, sink: &mut dyn RenderSink) {
    sink.begin_layer(Layer::UpgradeMenu);
    sink.draw(DrawCommand::Overlay { color: MENU_DIM });

    let center_x = state.arena.width / 2.0;
    let top = state.arena.height / 3.0;
    sink.draw(DrawCommand::Text {
        text: "Choose an Upgrade!".to_string(),
        pos: Vec2::new(center_x, top - 50.0),
        size: TextSize::Large,
        anchor: Anchor::Center,
        color: Color::YELLOW,
    });
    for (i, upgrade) in state.upgrade_options.iter().enumerate() {
        sink.draw(DrawCommand::Text {
            text: format!("{}. {} - {}", i + 1, upgrade.name(), upgrade.description()),
            pos: Vec2::new(center_x, top + i as f32 * 40.0),
            size: TextSize::Small,
            anchor: Anchor::Center,
            color: Color::WHITE,
        });
    }
}

fn draw_game_over(state: &GameState, sink: &mut dyn RenderSink) {
    sink.begin_layer(Layer::GameOver);
    sink.draw(DrawCommand::Overlay { color: GAME_OVER_DIM });

    let center = state.arena.center();
    sink.draw(DrawCommand::Text {
        text: "GAME OVER!".to_string(),
        pos: center - Vec2::new(0.0, 50.0),
        size: TextSize::Large,
        anchor: Anchor::Center,
        color: Color::RED,
    });
    sink.draw(DrawCommand::Text {
        text: "Press R to Play Again or ESC to Quit".to_string(),
        pos: center + Vec2::new(0.0, 20.0),
        size: TextSize::Small,
        anchor: Anchor::Center,
        color: Color::WHITE,
    });
}
