//! Frame driver
//!
//! One simulation tick and one render per frame. With pacing enabled the
//! driver sleeps to hold the target rate; a late frame is never caught up.

use std::time::{Duration, Instant};

use crate::assets::AssetProvider;
use crate::renderer::{RenderSink, render_scene};
use crate::settings::Settings;
use crate::sim::{GameState, TickInput, tick};

/// Drives the tick/render cycle
#[derive(Debug, Clone)]
pub struct FrameDriver {
    frame_duration: Duration,
    pace: bool,
    frames: u64,
    last_frame: Option<Instant>,
}

impl FrameDriver {
    /// Driver for `tick_rate` frames per second (a zero rate is treated as 1)
    pub fn new(tick_rate: u32, pace: bool) -> Self {
        Self {
            frame_duration: Duration::from_secs(1) / tick_rate.max(1),
            pace,
            frames: 0,
            last_frame: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tick_rate, settings.pace_frames)
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Tick once, render once, then wait out the rest of the frame
    pub fn run_frame(
        &mut self,
        state: &mut GameState,
        input: &TickInput,
        assets: &dyn AssetProvider,
        sink: &mut dyn RenderSink,
    ) {
        tick(state, input);
        render_scene(state, assets, sink);
        self.frames += 1;
        if self.pace {
            self.wait();
        }
    }

    /// Run up to `max_frames` frames, stopping early once quit is requested
    ///
    /// `next_input` is asked for the input of every frame. Returns the number
    /// of frames run.
    pub fn run<F>(
        &mut self,
        state: &mut GameState,
        mut next_input: F,
        assets: &dyn AssetProvider,
        sink: &mut dyn RenderSink,
        max_frames: u64,
    ) -> u64
    where
        F: FnMut(&GameState) -> TickInput,
    {
        let start = self.frames;
        while self.frames - start < max_frames && !state.quit_requested {
            let input = next_input(state);
            self.run_frame(state, &input, assets, sink);
        }
        self.frames - start
    }

    fn wait(&mut self) {
        if let Some(last) = self.last_frame {
            let deadline = last + self.frame_duration;
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
        }
        self.last_frame = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCatalog;
    use crate::renderer::DrawCommand;
    use crate::tuning::Tuning;

    fn state() -> (GameState, AssetCatalog) {
        let assets = AssetCatalog::placeholder(&["slime"]);
        let tuning = Tuning {
            enemy_roster: vec!["slime".into()],
            ..Default::default()
        };
        (GameState::new(3, tuning, &assets), assets)
    }

    #[test]
    fn test_one_tick_per_frame() {
        let (mut state, assets) = state();
        let mut driver = FrameDriver::new(60, false);
        let mut sink: Vec<DrawCommand> = Vec::new();
        let frames = driver.run(&mut state, |_| TickInput::default(), &assets, &mut sink, 25);
        assert_eq!(frames, 25);
        assert_eq!(driver.frames(), 25);
        assert_eq!(state.time_ticks, 25);
        assert!(!sink.is_empty());
    }

    #[test]
    fn test_stops_on_quit() {
        let (mut state, assets) = state();
        let mut driver = FrameDriver::new(60, false);
        let mut sink: Vec<DrawCommand> = Vec::new();
        let frames = driver.run(
            &mut state,
            |s| TickInput {
                quit: s.time_ticks >= 9,
                ..Default::default()
            },
            &assets,
            &mut sink,
            1_000,
        );
        assert_eq!(frames, 10);
        assert!(state.quit_requested);
    }

    #[test]
    fn test_pacing_holds_rate() {
        let (mut state, assets) = state();
        let mut driver = FrameDriver::new(200, true);
        let mut sink: Vec<DrawCommand> = Vec::new();
        let started = Instant::now();
        driver.run(&mut state, |_| TickInput::default(), &assets, &mut sink, 3);
        assert!(started.elapsed() >= driver.frame_duration() * 2);
    }

    #[test]
    fn test_zero_rate_clamped() {
        assert_eq!(FrameDriver::new(0, false).frame_duration(), Duration::from_secs(1));
    }
}
