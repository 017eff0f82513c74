//! Visual assets addressed by logical keys
//!
//! Decoding happens outside the core. The simulation only needs frame counts
//! (animation cycling) and frame sizes (collision bounds); the renderer passes
//! the opaque handles straight through to the sink.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque handle to a decoded image owned by the embedding application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub u32);

/// Logical asset key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKey {
    /// Animation for an enemy kind
    Enemy(String),
    PlayerIdle,
    PlayerRunning,
    /// Health bar tier (0..=5)
    HealthBar(u8),
    Background,
}

/// One decoded animation frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub handle: ImageHandle,
    pub width: f32,
    pub height: f32,
}

/// Ordered frame sequence
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub frames: Vec<Frame>,
}

impl Animation {
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        if self.frames.is_empty() {
            return None;
        }
        self.frames.get(index % self.frames.len())
    }

    /// Metrics the simulation needs (size taken from the first frame)
    pub fn sheet(&self) -> SpriteSheet {
        let size = self
            .frames
            .first()
            .map(|f| Vec2::new(f.width, f.height))
            .unwrap_or(Vec2::ZERO);
        SpriteSheet {
            frame_count: self.frames.len(),
            frame_size: size,
        }
    }
}

/// Frame count and frame size of an animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSheet {
    pub frame_count: usize,
    pub frame_size: Vec2,
}

impl SpriteSheet {
    pub fn new(frame_count: usize, width: f32, height: f32) -> Self {
        Self {
            frame_count,
            frame_size: Vec2::new(width, height),
        }
    }
}

/// Source of decoded assets
pub trait AssetProvider {
    fn animation(&self, key: &AssetKey) -> Option<&Animation>;

    fn sprite_sheet(&self, key: &AssetKey) -> Option<SpriteSheet> {
        self.animation(key).map(Animation::sheet)
    }
}

/// Errors raised while building an asset catalog
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Invalid asset manifest: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Animation {0:?} has no frames")]
    EmptyAnimation(AssetKey),
}

/// Manifest entry: one key and its frames
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ManifestEntry {
    key: AssetKey,
    frames: Vec<Frame>,
}

/// In-memory asset provider
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    animations: HashMap<AssetKey, Animation>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: AssetKey, animation: Animation) {
        self.animations.insert(key, animation);
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Parse a JSON manifest (`[{ "key": ..., "frames": [...] }, ...]`)
    pub fn from_manifest_json(json: &str) -> Result<Self, AssetError> {
        let entries: Vec<ManifestEntry> = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for entry in entries {
            if entry.frames.is_empty() {
                return Err(AssetError::EmptyAnimation(entry.key));
            }
            catalog.insert(entry.key, Animation { frames: entry.frames });
        }
        log::info!("Loaded asset manifest with {} animations", catalog.len());
        Ok(catalog)
    }

    /// Placeholder metrics for headless runs and tests
    ///
    /// Enemies get 4 frames of 32x32, the player 4 idle and 6 running frames
    /// of 32x48, plus six health bar tiers and a background.
    pub fn placeholder<S: AsRef<str>>(enemy_kinds: &[S]) -> Self {
        let mut next = 0u32;
        let mut frames = |count: usize, width: f32, height: f32| {
            let frames = (0..count)
                .map(|_| {
                    next += 1;
                    Frame {
                        handle: ImageHandle(next),
                        width,
                        height,
                    }
                })
                .collect();
            Animation { frames }
        };

        let mut catalog = Self::new();
        for kind in enemy_kinds {
            catalog.insert(AssetKey::Enemy(kind.as_ref().to_string()), frames(4, 32.0, 32.0));
        }
        catalog.insert(AssetKey::PlayerIdle, frames(4, 32.0, 48.0));
        catalog.insert(AssetKey::PlayerRunning, frames(6, 32.0, 48.0));
        for tier in 0..=5 {
            catalog.insert(AssetKey::HealthBar(tier), frames(1, 120.0, 24.0));
        }
        catalog.insert(AssetKey::Background, frames(1, 1280.0, 720.0));
        catalog
    }
}

impl AssetProvider for AssetCatalog {
    fn animation(&self, key: &AssetKey) -> Option<&Animation> {
        self.animations.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_has_all_keys() {
        let catalog = AssetCatalog::placeholder(&["slime", "bat"]);
        assert!(catalog.animation(&AssetKey::Enemy("slime".into())).is_some());
        assert!(catalog.animation(&AssetKey::Enemy("bat".into())).is_some());
        assert!(catalog.animation(&AssetKey::Enemy("golem".into())).is_none());
        for tier in 0..=5 {
            assert!(catalog.animation(&AssetKey::HealthBar(tier)).is_some());
        }
        let sheet = catalog.sprite_sheet(&AssetKey::PlayerRunning).unwrap();
        assert_eq!(sheet.frame_count, 6);
        assert_eq!(sheet.frame_size, Vec2::new(32.0, 48.0));
    }

    #[test]
    fn test_frame_wraps_index() {
        let catalog = AssetCatalog::placeholder(&["slime"]);
        let anim = catalog.animation(&AssetKey::Enemy("slime".into())).unwrap();
        assert_eq!(anim.frame(5), anim.frame(1));
        assert!(Animation::default().frame(0).is_none());
    }

    #[test]
    fn test_manifest_roundtrip_and_empty_rejected() {
        let json = r#"[
            { "key": { "Enemy": "slime" },
              "frames": [ { "handle": 9, "width": 20.0, "height": 18.0 } ] },
            { "key": "PlayerIdle",
              "frames": [ { "handle": 1, "width": 32.0, "height": 48.0 } ] }
        ]"#;
        let catalog = AssetCatalog::from_manifest_json(json).unwrap();
        let sheet = catalog.sprite_sheet(&AssetKey::Enemy("slime".into())).unwrap();
        assert_eq!(sheet.frame_size, Vec2::new(20.0, 18.0));

        let empty = r#"[ { "key": "Background", "frames": [] } ]"#;
        assert!(matches!(
            AssetCatalog::from_manifest_json(empty),
            Err(AssetError::EmptyAnimation(AssetKey::Background))
        ));
    }
}
