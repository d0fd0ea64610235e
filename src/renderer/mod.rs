//! WebGPU rendering module
//!
//! The scene is rebuilt as a flat-colored triangle list every frame from a
//! read-only game snapshot.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState};
pub use vertex::Vertex;
