//! Loadout configuration loader.

use std::path::Path;

use loadout_core::LoadoutConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for loadout configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to the built-in combat tuning.
    pub fn load(path: &Path) -> LoadResult<LoadoutConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<LoadoutConfig> {
        let config: LoadoutConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        let tuning = &config.tuning;
        for (key, percent) in [
            ("two_handed_damage_bonus", tuning.two_handed_damage_bonus),
            ("two_handed_defense_penalty", tuning.two_handed_defense_penalty),
            ("dual_wield_offhand_weight", tuning.dual_wield_offhand_weight),
            ("dual_wield_defense_penalty", tuning.dual_wield_defense_penalty),
        ] {
            anyhow::ensure!(
                (0..=100).contains(&percent),
                "tuning.{} must be a percentage in 0..=100, got {}",
                key,
                percent
            );
        }

        Ok(config)
    }
}
