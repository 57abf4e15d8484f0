//! Content loaders for reading equipment data from files.
//!
//! Each loader exposes `load(path)` for files and `parse(text)` for inline data.

pub mod characters;
pub mod config;
pub mod factory;
pub mod item;

pub use characters::CharacterLoader;
pub use config::ConfigLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use item::ItemLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

#[cfg(test)]
pub(crate) fn sample_data_dir() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}
