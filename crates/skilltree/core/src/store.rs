//! Persistence contract for skill levels.
//!
//! The engine never touches durable storage itself. It calls
//! [`ProgressionStore::load_all`] once while constructing the service and
//! [`ProgressionStore::save_all`] with the full level map after every
//! successful upgrade or reset.

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, ProgressionFault};

/// Skill id → level.
///
/// Stored values are signed and may fall outside `[0, max_level]`; the service
/// clamps them when hydrating.
pub type LevelMap = BTreeMap<String, i32>;

/// Errors surfaced by store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("progression store lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ProgressionFault for StoreError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::LockPoisoned => "store.lock_poisoned",
            Self::Io(_) => "store.io",
            Self::Serialization(_) => "store.serialization",
        }
    }
}

/// Storage for per-skill levels.
///
/// Calls are synchronous; a slow or failing store blocks or fails the engine
/// operation that invoked it. Implementations handle their own interior
/// mutability so a single store can be shared behind an `Arc`.
pub trait ProgressionStore: Send + Sync {
    /// Level stored for one skill, 0 when absent.
    fn level(&self, skill_id: &str) -> Result<i32, StoreError>;

    /// Levels for the requested ids. Every requested id is present in the
    /// result; missing ids map to 0.
    fn load_all(&self, skill_ids: &[&str]) -> Result<LevelMap, StoreError>;

    /// Persist the given levels, overwriting existing entries.
    fn save_all(&self, levels: &LevelMap) -> Result<(), StoreError>;

    /// Forget the given ids.
    fn clear(&self, skill_ids: &[&str]) -> Result<(), StoreError>;
}
