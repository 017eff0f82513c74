//! Horde Survivor entry point
//!
//! Runs a headless demo session: the autopilot plays against placeholder
//! assets while draw commands are counted instead of rasterized.
//!
//! Usage: `horde-survivor [settings.json]`

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use horde_survivor::Settings;
use horde_survivor::assets::AssetCatalog;
use horde_survivor::platform::{FrameDriver, RawInput};
use horde_survivor::renderer::{DrawCommand, Layer, RenderSink};
use horde_survivor::sim::{GameEvent, GamePhase, GameState};

/// Render sink that only counts what it is given
#[derive(Debug, Default)]
struct CountingSink {
    commands: u64,
    per_layer: BTreeMap<String, u64>,
    current: Option<Layer>,
}

impl RenderSink for CountingSink {
    fn begin_layer(&mut self, layer: Layer) {
        self.current = Some(layer);
    }

    fn draw(&mut self, _command: DrawCommand) {
        self.commands += 1;
        if let Some(layer) = self.current {
            *self.per_layer.entry(format!("{layer:?}")).or_default() += 1;
        }
    }
}

/// Session statistics logged on exit
#[derive(Debug, Default, Serialize)]
struct Summary {
    seed: u64,
    frames: u64,
    sessions: u32,
    phase: String,
    level: u32,
    xp: u32,
    health: u8,
    enemies_alive: usize,
    kills: u64,
    bosses: u64,
    game_overs: u64,
    faults: u64,
    draw_commands: u64,
    draw_commands_per_layer: BTreeMap<String, u64>,
}

impl Summary {
    fn record(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::EnemyKilled { .. } => self.kills += 1,
                GameEvent::BossSpawned { .. } => self.bosses += 1,
                GameEvent::GameOver { .. } => self.game_overs += 1,
                GameEvent::EntityFaulted { .. } => self.faults += 1,
                _ => {}
            }
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Horde Survivor (headless) starting...");

    let settings_path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(settings_path.as_deref());

    let seed = settings.resolve_seed();
    let mut kinds = settings.tuning.enemy_roster.clone();
    kinds.push(settings.tuning.boss_kind.clone());
    let assets = AssetCatalog::placeholder(&kinds);
    let mut state = GameState::new(seed, settings.tuning.clone(), &assets).with_tick_rate(settings.tick_rate);

    let mut raw = RawInput {
        autopilot: true,
        ..Default::default()
    };
    let mut driver = FrameDriver::from_settings(&settings);
    let mut sink = CountingSink::default();
    let mut summary = Summary {
        seed,
        ..Default::default()
    };

    while driver.frames() < settings.headless_ticks && !state.quit_requested {
        let input = raw.to_tick_input();
        driver.run_frame(&mut state, &input, &assets, &mut sink);
        raw.end_frame();
        summary.record(&state.events);
    }

    summary.frames = driver.frames();
    summary.sessions = state.session;
    summary.phase = match state.phase {
        GamePhase::Running => "running",
        GamePhase::LevelUp => "level_up",
        GamePhase::GameOver => "game_over",
    }
    .to_string();
    summary.level = state.player.level;
    summary.xp = state.player.xp;
    summary.health = state.player.health;
    summary.enemies_alive = state.enemies.len();
    summary.draw_commands = sink.commands;
    summary.draw_commands_per_layer = sink.per_layer;

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => log::info!("Session summary:\n{json}"),
        Err(e) => log::error!("Failed to serialize session summary: {e}"),
    }
}
