//! Best-score persistence
//!
//! One non-negative integer under a fixed, versioned key. Storage is
//! best-effort: failures are logged and read back as 0, never surfaced to
//! the player.

pub mod store;

pub use store::{MemoryStore, ScoreStore, StorageError, parse_best_score};

#[cfg(target_arch = "wasm32")]
pub use store::LocalStorageStore;

/// LocalStorage key for the best score
pub const BEST_SCORE_KEY: &str = "flap_rush.best_score.v1";
