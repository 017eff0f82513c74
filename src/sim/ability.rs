//! Timed abilities and the kill combo

use crate::consts::*;

/// An ability with an active window and an independent cooldown
///
/// The cooldown starts counting at activation, so it overlaps the active
/// window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityWindow {
    pub duration: u32,
    pub cooldown: u32,
    active_left: u32,
    cooldown_left: u32,
}

impl AbilityWindow {
    pub const fn new(duration: u32, cooldown: u32) -> Self {
        Self {
            duration,
            cooldown,
            active_left: 0,
            cooldown_left: 0,
        }
    }

    pub const fn time_freeze() -> Self {
        Self::new(TIME_FREEZE_DURATION_TICKS, TIME_FREEZE_COOLDOWN_TICKS)
    }

    pub const fn shield() -> Self {
        Self::new(SHIELD_DURATION_TICKS, SHIELD_COOLDOWN_TICKS)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active_left > 0
    }

    /// Whether `activate` would succeed
    #[inline]
    pub fn is_ready(&self) -> bool {
        !self.is_active() && self.cooldown_left == 0
    }

    pub fn active_left(&self) -> u32 {
        self.active_left
    }

    pub fn cooldown_left(&self) -> u32 {
        self.cooldown_left
    }

    /// Start the active window; returns false while active or cooling down
    pub fn activate(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.active_left = self.duration;
        self.cooldown_left = self.cooldown;
        true
    }

    /// Count both timers down by one tick
    ///
    /// Returns true on the tick the active window expires.
    pub fn tick(&mut self) -> bool {
        let was_active = self.is_active();
        self.active_left = self.active_left.saturating_sub(1);
        self.cooldown_left = self.cooldown_left.saturating_sub(1);
        was_active && !self.is_active()
    }
}

/// Kills chained inside a rolling window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Combo {
    pub count: u32,
    pub timer: u32,
}

impl Combo {
    /// Register a kill and restart the window
    pub fn record_kill(&mut self) {
        self.count += 1;
        self.timer = COMBO_WINDOW_TICKS;
    }

    /// Count the window down; the combo drops to 0 when it runs out
    pub fn tick(&mut self) {
        if self.timer > 0 {
            self.timer -= 1;
            if self.timer == 0 {
                self.count = 0;
            }
        }
    }

    /// Bonus XP the current combo would be worth
    ///
    /// Reported with each kill but never granted.
    pub fn bonus_xp(&self) -> u32 {
        self.count.saturating_sub(1).min(MAX_COMBO_BONUS_XP)
    }
}
