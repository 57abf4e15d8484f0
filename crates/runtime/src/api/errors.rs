//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the engine, the catalog, save restoration and
//! repositories so clients can bubble them up with consistent context.
use thiserror::Error;

use loadout_core::{
    CatalogError, CharacterId, ErrorSeverity, GameError, ItemHandle, LoadoutError, RestoreError,
};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Loadout(#[from] LoadoutError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("cannot restore equipment for {character}")]
    Restore {
        character: CharacterId,
        #[source]
        source: RestoreError,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to load content: {0}")]
    Content(String),

    #[error("no character {0} in the roster")]
    UnknownCharacter(CharacterId),

    #[error("{0} is not a companion")]
    NotACompanion(CharacterId),

    #[error("{0} has no catalog definition")]
    UnknownItem(ItemHandle),

    #[error("no save found for session '{0}'")]
    SaveNotFound(String),

    #[error("save format version {found} is not supported (expected {expected})")]
    UnsupportedSaveVersion { found: u32, expected: u32 },

    #[error("save defines {handle} as '{saved}' but the catalog already holds '{existing}'")]
    DynamicItemConflict {
        handle: ItemHandle,
        saved: String,
        existing: String,
    },

    #[error("runtime requires a player character before building")]
    MissingPlayer,

    #[error("item catalog lock was poisoned")]
    LockPoisoned,
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Loadout(e) => e.severity(),
            RuntimeError::Catalog(e) => e.severity(),
            RuntimeError::Restore { source, .. } => source.severity(),
            RuntimeError::UnknownCharacter(_)
            | RuntimeError::NotACompanion(_)
            | RuntimeError::UnknownItem(_) => ErrorSeverity::Validation,
            RuntimeError::SaveNotFound(_) => ErrorSeverity::Recoverable,
            RuntimeError::Repository(_)
            | RuntimeError::Content(_)
            | RuntimeError::UnsupportedSaveVersion { .. }
            | RuntimeError::DynamicItemConflict { .. }
            | RuntimeError::MissingPlayer => ErrorSeverity::Internal,
            RuntimeError::LockPoisoned => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::Loadout(e) => e.error_code(),
            RuntimeError::Catalog(e) => e.error_code(),
            RuntimeError::Restore { source, .. } => source.error_code(),
            RuntimeError::Repository(_) => "RUNTIME_REPOSITORY",
            RuntimeError::Content(_) => "RUNTIME_CONTENT",
            RuntimeError::UnknownCharacter(_) => "RUNTIME_UNKNOWN_CHARACTER",
            RuntimeError::NotACompanion(_) => "RUNTIME_NOT_A_COMPANION",
            RuntimeError::UnknownItem(_) => "RUNTIME_UNKNOWN_ITEM",
            RuntimeError::SaveNotFound(_) => "RUNTIME_SAVE_NOT_FOUND",
            RuntimeError::UnsupportedSaveVersion { .. } => "RUNTIME_UNSUPPORTED_SAVE_VERSION",
            RuntimeError::DynamicItemConflict { .. } => "RUNTIME_DYNAMIC_ITEM_CONFLICT",
            RuntimeError::MissingPlayer => "RUNTIME_MISSING_PLAYER",
            RuntimeError::LockPoisoned => "RUNTIME_LOCK_POISONED",
        }
    }
}
