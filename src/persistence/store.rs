//! Score store implementations

use thiserror::Error;

/// Why a stored best score could not be read or written
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("stored value is not a non-negative integer: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("storage rejected the write: {0}")]
    WriteRejected(String),
}

/// Where the best score lives between sessions.
///
/// Both calls are infallible at this boundary; implementations degrade to
/// 0 on load and to a no-op on save.
pub trait ScoreStore {
    fn load_best(&self) -> u64;
    fn save_best(&mut self, value: u64);
}

/// Decode a stored best score
pub fn parse_best_score(raw: &str) -> Result<u64, StorageError> {
    Ok(serde_json::from_str::<u64>(raw.trim())?)
}

/// In-process store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u64>,
    /// Number of writes, for tests
    pub writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u64) -> Self {
        Self {
            value: Some(value),
            writes: 0,
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load_best(&self) -> u64 {
        self.value.unwrap_or(0)
    }

    fn save_best(&mut self, value: u64) {
        self.value = Some(value);
        self.writes += 1;
    }
}

/// Browser LocalStorage store
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }

    fn try_load() -> Result<u64, StorageError> {
        let storage = Self::storage()?;
        match storage.get_item(super::BEST_SCORE_KEY) {
            Ok(Some(raw)) => parse_best_score(&raw),
            Ok(None) => Ok(0),
            Err(_) => Err(StorageError::Unavailable),
        }
    }

    fn try_save(value: u64) -> Result<(), StorageError> {
        let storage = Self::storage()?;
        let raw = serde_json::to_string(&value)?;
        storage
            .set_item(super::BEST_SCORE_KEY, &raw)
            .map_err(|e| StorageError::WriteRejected(format!("{:?}", e)))
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalStorageStore {
    fn load_best(&self) -> u64 {
        match Self::try_load() {
            Ok(value) => {
                log::info!("Loaded best score {}", value);
                value
            }
            Err(e) => {
                log::warn!("Could not load best score, using 0: {}", e);
                0
            }
        }
    }

    fn save_best(&mut self, value: u64) {
        match Self::try_save(value) {
            Ok(()) => log::info!("Best score saved ({})", value),
            Err(e) => log::warn!("Could not save best score: {}", e),
        }
    }
}
