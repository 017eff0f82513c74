//! Platform abstraction layer
//!
//! Everything between the host and the simulation:
//! - Input: key bindings and per-frame input snapshots
//! - Time: the frame driver (one tick and one render per frame)

pub mod input;
pub mod time;

pub use input::{Action, KeyMap, PointEvent, RawInput};
pub use time::FrameDriver;
