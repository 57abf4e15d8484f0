//! Repository layer for persisted equipment.
//!
//! Repositories handle data that CHANGES during play: per-character equipment
//! records and the items registered at runtime. Static content (the base
//! catalog, character templates) is loaded by `loadout-content`, not stored here.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::SaveRepository;
pub use types::SaveFile;
