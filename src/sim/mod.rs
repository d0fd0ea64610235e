//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_rect_overlap, first_hit, obstacle_segments};
pub use difficulty::{DifficultyLevel, pipe_gap, pipe_speed, spawn_interval};
pub use state::{Avatar, CrashCause, GameEvent, GamePhase, GameState, ObstaclePair};
pub use tick::tick;
