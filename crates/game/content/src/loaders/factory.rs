//! Content factory for building the catalog and roster from data files.

use std::path::{Path, PathBuf};

use loadout_core::{CharacterTemplate, ItemCatalog, LoadoutConfig};

use crate::loaders::{CharacterLoader, ConfigLoader, ItemLoader, LoadResult};

/// Everything a session needs from the data directory, cross-validated.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub config: LoadoutConfig,
    pub catalog: ItemCatalog,
    pub characters: Vec<CharacterTemplate>,
}

/// Content factory that loads all equipment content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// └── characters.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load loadout configuration from `config.toml`.
    ///
    /// A missing file yields the built-in defaults.
    pub fn load_config(&self) -> LoadResult<LoadoutConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(LoadoutConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the validated item catalog from `items.ron`.
    pub fn load_catalog(&self) -> LoadResult<ItemCatalog> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load_catalog(&path)
    }

    /// Load character templates from `characters.ron`.
    pub fn load_characters(&self) -> LoadResult<Vec<CharacterTemplate>> {
        let path = self.data_dir.join("characters.ron");
        CharacterLoader::load(&path)
    }

    /// Loads every file and checks that starting items exist in the catalog.
    pub fn load_bundle(&self) -> LoadResult<ContentBundle> {
        let config = self.load_config()?;
        let catalog = self.load_catalog()?;
        let characters = self.load_characters()?;
        CharacterLoader::check_starting_items(&characters, &catalog)?;

        Ok(ContentBundle {
            config,
            catalog,
            characters,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::sample_data_dir;

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn sample_bundle_is_consistent() {
        let bundle = ContentFactory::new(sample_data_dir()).load_bundle().unwrap();

        for template in &bundle.characters {
            let character = template.instantiate().unwrap();
            assert_eq!(character.inventory().len(), template.starting_items.len());
        }
        assert!(!bundle.catalog.is_empty());
    }

    #[test]
    fn missing_directory_fails_on_items() {
        let err = ContentFactory::new("/nonexistent/content")
            .load_bundle()
            .unwrap_err();
        assert!(err.to_string().contains("items.ron"));
    }
}
