//! Runtime settings
//!
//! Loaded from an optional JSON file. Missing fields fall back to defaults,
//! so a settings file only needs the values it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_RATE;
use crate::platform::input::KeyMap;
use crate::tuning::Tuning;

/// Errors raised while reading or writing a settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Tick rate must be nonzero")]
    ZeroTickRate,
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target frames (= ticks) per second
    pub tick_rate: u32,
    /// Fixed RNG seed; a clock-derived seed is used when absent
    pub seed: Option<u64>,
    /// Sleep between frames to hold the target rate
    pub pace_frames: bool,
    /// Ticks the headless binary runs before exiting
    pub headless_ticks: u64,
    /// Key name to action bindings
    pub key_map: KeyMap,
    /// Balance values for new sessions
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
            seed: None,
            pace_frames: false,
            headless_ticks: u64::from(TICK_RATE) * 120,
            key_map: KeyMap::default(),
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        if settings.tick_rate == 0 {
            return Err(SettingsError::ZeroTickRate);
        }
        settings.tuning = settings.tuning.sanitized();
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Seed for the next session
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0x5eed)
        })
    }
}
