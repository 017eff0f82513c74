//! Draw command generation
//!
//! The core never talks to a graphics API. `render_scene` walks a read-only
//! `GameState` in painter's order and hands `DrawCommand`s to a `RenderSink`;
//! the embedding application turns them into pixels.

pub mod hud;
pub mod scene;

use glam::Vec2;
use serde::Serialize;

use crate::assets::ImageHandle;

pub use hud::{HudLine, hud_lines};
pub use scene::render_scene;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_array(c: [u8; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }
}

/// Font size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextSize {
    Small,
    Large,
}

/// Which point of the text box `pos` refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Anchor {
    TopLeft,
    Center,
}

/// Scene layers in the order they are painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Layer {
    Background,
    TimeFreeze,
    Pickups,
    Player,
    Enemies,
    Hud,
    UpgradeMenu,
    GameOver,
}

/// A single primitive for the render sink (screen space, y down)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    /// Animation frame with its top-left corner at `pos`
    Image {
        handle: ImageHandle,
        pos: Vec2,
        size: Vec2,
        flip_x: bool,
        alpha: u8,
        tint: Option<Color>,
    },
    Rect {
        pos: Vec2,
        size: Vec2,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Text {
        text: String,
        pos: Vec2,
        size: TextSize,
        anchor: Anchor,
        color: Color,
    },
    /// Full-screen translucent fill
    Overlay { color: Color },
}

/// Consumer of draw commands
pub trait RenderSink {
    /// Called before the first command of each layer
    fn begin_layer(&mut self, _layer: Layer) {}

    fn draw(&mut self, command: DrawCommand);
}

impl RenderSink for Vec<DrawCommand> {
    fn draw(&mut self, command: DrawCommand) {
        self.push(command);
    }
}
