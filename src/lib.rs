//! Flap Rush - a one-button obstacle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, scoring)
//! - `game`: Phase/command controller wiring the simulation to audio and storage
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Frame clock and input mapping
//! - `persistence`: Best-score storage
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::{Command, Game, Snapshot};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta the simulation will integrate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.05;
    /// Nominal frame delta used for the very first frame
    pub const NOMINAL_FRAME_DT: f32 = 1.0 / 60.0;

    /// Visible area (world units, y grows downward)
    pub const VIEW_WIDTH: f32 = 360.0;
    pub const VIEW_HEIGHT: f32 = 640.0;
    /// Ground band drawn below the floor line
    pub const GROUND_HEIGHT: f32 = 90.0;
    /// Floor line the avatar dies on
    pub const FLOOR_Y: f32 = VIEW_HEIGHT - GROUND_HEIGHT;

    /// Avatar horizontal position (fixed)
    pub const AVATAR_X: f32 = 90.0;
    /// Avatar vertical start position on every run start
    pub const AVATAR_START_Y: f32 = VIEW_HEIGHT * 0.4;

    /// Obstacle column width
    pub const OBSTACLE_WIDTH: f32 = 70.0;
    /// Minimum distance between a gap edge and the ceiling/floor
    pub const GAP_MARGIN: f32 = 40.0;
}
