//! Item catalog loader.

use std::path::Path;

use loadout_core::{EquipmentDefinition, ItemCatalog};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemManifest {
    pub items: Vec<EquipmentDefinition>,
}

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item definitions from a RON file.
    ///
    /// Definitions are returned as written; use [`ItemLoader::load_catalog`]
    /// to validate them.
    pub fn load(path: &Path) -> LoadResult<Vec<EquipmentDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<EquipmentDefinition>> {
        let manifest: ItemManifest = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        Ok(manifest.items)
    }

    /// Load and validate a catalog.
    ///
    /// Fails on the first duplicate handle, duplicate name, reserved handle or
    /// incoherent definition.
    pub fn load_catalog(path: &Path) -> LoadResult<ItemCatalog> {
        let definitions = Self::load(path)?;
        ItemCatalog::from_definitions(definitions)
            .map_err(|e| anyhow::anyhow!("Invalid item catalog {}: {}", path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::sample_data_dir;
    use loadout_core::{
        EquipmentSlot, ItemCategory, ItemHandle, ItemOracle, Rarity, RestrictionFlags,
        WeaponHandedness,
    };

    #[test]
    fn sample_catalog_loads_and_validates() {
        let catalog = ItemLoader::load_catalog(&sample_data_dir().join("items.ron")).unwrap();
        assert!(catalog.len() >= 15);
        assert_eq!(catalog.dynamic_count(), 0);

        let avenger = catalog.find_by_name("holy avenger").unwrap();
        assert_eq!(
            avenger.category,
            ItemCategory::Weapon {
                handedness: WeaponHandedness::OneHanded
            }
        );
        assert!(avenger.requirements.flags.contains(RestrictionFlags::GOOD_ONLY));
        assert_eq!(avenger.rarity, Rarity::Legendary);

        let band = catalog.find_by_name("Band of Binding").unwrap();
        assert!(band.cursed);
        assert_eq!(band.eligible_slots().as_slice(), &EquipmentSlot::FINGERS);

        assert!(catalog.definition(ItemHandle(9999)).is_none());
    }

    #[test]
    fn omitted_fields_take_defaults() {
        let items = ItemLoader::parse(
            r#"(
                items: [
                    (handle: 7, name: "Cloth Cap", category: Armor(slot: Head)),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].handle, ItemHandle(7));
        assert_eq!(items[0].value, 0);
        assert!(!items[0].cursed);
        assert_eq!(items[0].rarity, Rarity::Common);
        assert_eq!(items[0].bonuses.armor_class, 0);
    }

    #[test]
    fn malformed_ron_reports_parse_error() {
        let err = ItemLoader::parse("(items: [ (handle: 1, ").unwrap_err();
        assert!(err.to_string().contains("Failed to parse item catalog RON"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ItemLoader::load(Path::new("/nonexistent/items.ron")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/items.ron"));
    }
}
