//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (delta clamp, FPS meter)
//! - Input events (raw key names to game commands)

pub mod clock;
pub mod input;

pub use clock::{FpsMeter, FrameClock};
pub use input::command_for_key;
