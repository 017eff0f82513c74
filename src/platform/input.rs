//! Input snapshots and key bindings
//!
//! The host feeds key and pointer events into a `RawInput`; once per frame it
//! is converted into the simulation's `TickInput` and its one-shot events are
//! cleared.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::TickInput;

/// Something a key can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Dash,
    ShootNearest,
    TimeFreeze,
    Shield,
    /// Upgrade menu digit (1..=3)
    Menu(u8),
    Restart,
    Quit,
    /// Demo mode on/off
    ToggleAutopilot,
}

/// One-shot events delivered between two frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointEvent {
    /// Pointer click in arena coordinates
    Click(Vec2),
    MenuDigit(u8),
    Restart,
    Quit,
}

/// Key name (as reported by the host, e.g. `"ArrowUp"`) to action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyMap {
    bindings: BTreeMap<String, Action>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let bindings = [
            ("ArrowUp", Action::MoveUp),
            ("ArrowDown", Action::MoveDown),
            ("ArrowLeft", Action::MoveLeft),
            ("ArrowRight", Action::MoveRight),
            ("Shift", Action::Dash),
            (" ", Action::ShootNearest),
            ("t", Action::TimeFreeze),
            ("s", Action::Shield),
            ("1", Action::Menu(1)),
            ("2", Action::Menu(2)),
            ("3", Action::Menu(3)),
            ("r", Action::Restart),
            ("Escape", Action::Quit),
            ("i", Action::ToggleAutopilot),
        ]
        .into_iter()
        .map(|(key, action)| (key.to_string(), action))
        .collect();
        Self { bindings }
    }
}

impl KeyMap {
    pub fn action(&self, key: &str) -> Option<Action> {
        self.bindings.get(key).copied()
    }

    /// Bind `key`, replacing any previous binding for it
    pub fn bind(&mut self, key: impl Into<String>, action: Action) {
        self.bindings.insert(key.into(), action);
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Held action flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Held {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub dash: bool,
    pub shoot_nearest: bool,
    pub time_freeze: bool,
    pub shield: bool,
}

impl Held {
    fn flag(&mut self, action: Action) -> Option<&mut bool> {
        match action {
            Action::MoveUp => Some(&mut self.up),
            Action::MoveDown => Some(&mut self.down),
            Action::MoveLeft => Some(&mut self.left),
            Action::MoveRight => Some(&mut self.right),
            Action::Dash => Some(&mut self.dash),
            Action::ShootNearest => Some(&mut self.shoot_nearest),
            Action::TimeFreeze => Some(&mut self.time_freeze),
            Action::Shield => Some(&mut self.shield),
            Action::Menu(_) | Action::Restart | Action::Quit | Action::ToggleAutopilot => None,
        }
    }
}

/// Input state accumulated between frames
#[derive(Debug, Clone, Default)]
pub struct RawInput {
    pub held: Held,
    pub events: Vec<PointEvent>,
    /// Demo mode - AI plays the game
    pub autopilot: bool,
}

impl RawInput {
    /// Handle a key press
    pub fn key_down(&mut self, key_map: &KeyMap, key: &str) {
        let Some(action) = key_map.action(key) else {
            return;
        };
        if let Some(flag) = self.held.flag(action) {
            *flag = true;
            return;
        }
        match action {
            Action::Menu(digit) => self.events.push(PointEvent::MenuDigit(digit)),
            Action::Restart => self.events.push(PointEvent::Restart),
            Action::Quit => self.events.push(PointEvent::Quit),
            Action::ToggleAutopilot => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot: {}", self.autopilot);
            }
            _ => {}
        }
    }

    /// Handle a key release
    pub fn key_up(&mut self, key_map: &KeyMap, key: &str) {
        let Some(action) = key_map.action(key) else {
            return;
        };
        if let Some(flag) = self.held.flag(action) {
            *flag = false;
        }
    }

    pub fn click(&mut self, pos: Vec2) {
        self.events.push(PointEvent::Click(pos));
    }

    /// Snapshot for one tick
    ///
    /// The latest click wins; menu digits outside 1..=3 are dropped.
    pub fn to_tick_input(&self) -> TickInput {
        let axis = |neg: bool, pos: bool| i8::from(pos) - i8::from(neg);
        let mut input = TickInput {
            move_x: axis(self.held.left, self.held.right),
            move_y: axis(self.held.up, self.held.down),
            dash: self.held.dash,
            shoot_nearest: self.held.shoot_nearest,
            time_freeze: self.held.time_freeze,
            shield: self.held.shield,
            autopilot: self.autopilot,
            ..Default::default()
        };

        for event in &self.events {
            match *event {
                PointEvent::Click(pos) => input.shoot_at = Some(pos),
                PointEvent::MenuDigit(digit @ 1..=3) => input.menu_choice = Some(usize::from(digit) - 1),
                PointEvent::MenuDigit(_) => {}
                PointEvent::Restart => input.restart = true,
                PointEvent::Quit => input.quit = true,
            }
        }
        input
    }

    /// Drop one-shot events after they were processed
    pub fn end_frame(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_map_to_axes() {
        let keys = KeyMap::default();
        let mut raw = RawInput::default();
        raw.key_down(&keys, "ArrowLeft");
        raw.key_down(&keys, "ArrowDown");
        raw.key_down(&keys, " ");
        let input = raw.to_tick_input();
        assert_eq!((input.move_x, input.move_y), (-1, 1));
        assert!(input.shoot_nearest);

        // Opposite keys cancel
        raw.key_down(&keys, "ArrowRight");
        assert_eq!(raw.to_tick_input().move_x, 0);

        raw.key_up(&keys, "ArrowLeft");
        assert_eq!(raw.to_tick_input().move_x, 1);
    }

    #[test]
    fn test_one_shot_events_cleared() {
        let keys = KeyMap::default();
        let mut raw = RawInput::default();
        raw.click(Vec2::new(1.0, 2.0));
        raw.click(Vec2::new(3.0, 4.0));
        raw.key_down(&keys, "2");
        raw.key_down(&keys, "r");
        raw.key_down(&keys, "Escape");

        let input = raw.to_tick_input();
        assert_eq!(input.shoot_at, Some(Vec2::new(3.0, 4.0)));
        assert_eq!(input.menu_choice, Some(1));
        assert!(input.restart);
        assert!(input.quit);

        raw.end_frame();
        let input = raw.to_tick_input();
        assert_eq!(input.shoot_at, None);
        assert_eq!(input.menu_choice, None);
        assert!(!input.restart);
    }

    #[test]
    fn test_out_of_range_digit_ignored() {
        let mut keys = KeyMap::default();
        keys.bind("9", Action::Menu(9));
        let mut raw = RawInput::default();
        raw.key_down(&keys, "9");
        assert_eq!(raw.to_tick_input().menu_choice, None);
    }

    #[test]
    fn test_unbound_key_ignored() {
        let keys = KeyMap::default();
        let mut raw = RawInput::default();
        raw.key_down(&keys, "F13");
        raw.key_up(&keys, "F13");
        assert_eq!(raw.held, Held::default());
        assert!(raw.events.is_empty());
    }

    #[test]
    fn test_autopilot_toggle() {
        let keys = KeyMap::default();
        let mut raw = RawInput::default();
        raw.key_down(&keys, "i");
        assert!(raw.to_tick_input().autopilot);
        raw.key_down(&keys, "i");
        assert!(!raw.to_tick_input().autopilot);
    }

    #[test]
    fn test_key_map_json() {
        let keys: KeyMap = serde_json::from_str(r#"{ "w": "MoveUp", "5": { "Menu": 1 } }"#).unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys.action("w"), Some(Action::MoveUp));
        assert_eq!(keys.action("5"), Some(Action::Menu(1)));
        assert_eq!(keys.action("ArrowUp"), None);
    }
}
