//! Character roster loader.
//!
//! Loads the player and companion templates from a RON list.

use std::collections::BTreeSet;
use std::path::Path;

use loadout_core::{CharacterKind, CharacterTemplate, ItemOracle};

use crate::loaders::{LoadResult, read_file};

/// Loader for character templates from RON files.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load character templates from a RON file.
    ///
    /// RON format: `Vec<CharacterTemplate>`. Exactly one template must be the
    /// player and ids must be unique.
    pub fn load(path: &Path) -> LoadResult<Vec<CharacterTemplate>> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<CharacterTemplate>> {
        let templates: Vec<CharacterTemplate> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character RON: {}", e))?;

        let players = templates
            .iter()
            .filter(|t| t.kind == CharacterKind::Player)
            .count();
        anyhow::ensure!(
            players == 1,
            "expected exactly one player template, found {}",
            players
        );

        let mut seen = BTreeSet::new();
        for template in &templates {
            anyhow::ensure!(
                seen.insert(template.id),
                "duplicate character id {} ({})",
                template.id,
                template.name
            );
            anyhow::ensure!(
                template.id.is_player() == (template.kind == CharacterKind::Player),
                "character {} ({}) must use id {} if and only if it is the player",
                template.id,
                template.name,
                loadout_core::CharacterId::PLAYER
            );
        }

        Ok(templates)
    }

    /// Checks that every starting item resolves against `catalog`.
    pub fn check_starting_items(
        templates: &[CharacterTemplate],
        catalog: &dyn ItemOracle,
    ) -> LoadResult<()> {
        for template in templates {
            for handle in &template.starting_items {
                anyhow::ensure!(
                    catalog.definition(*handle).is_some(),
                    "character {} starts with unknown {}",
                    template.name,
                    handle
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::sample_data_dir;
    use loadout_core::{CharacterId, ItemCatalog, PermanentUpgrades};

    #[test]
    fn sample_roster_loads() {
        let templates = CharacterLoader::load(&sample_data_dir().join("characters.ron")).unwrap();
        let player = templates
            .iter()
            .find(|t| t.kind == CharacterKind::Player)
            .unwrap();

        assert_eq!(player.id, CharacterId::PLAYER);
        assert!(player.upgrades.contains(PermanentUpgrades::LEGENDARY_ARMORY));
        assert!(templates.len() >= 2);

        let companion = templates
            .iter()
            .find(|t| t.kind == CharacterKind::Companion)
            .unwrap()
            .instantiate()
            .unwrap();
        assert_eq!(companion.stats_revision(), 0);
        assert!(companion.loadout().is_empty());
    }

    #[test]
    fn roster_requires_single_player() {
        let err = CharacterLoader::parse(
            r#"[
                (id: 1, name: "Lyra", kind: Companion),
            ]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("exactly one player"));

        let err = CharacterLoader::parse(
            r#"[
                (id: 0, name: "Hero", kind: Player),
                (id: 0, name: "Twin", kind: Companion),
            ]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate character id"));
    }

    #[test]
    fn defaults_fill_omitted_fields() {
        let templates = CharacterLoader::parse(r#"[(id: 0, name: "Hero", kind: Player)]"#).unwrap();
        let hero = templates[0].instantiate().unwrap();
        assert_eq!(hero.level, 1);
        assert_eq!(hero.alignment, 0);
        assert_eq!(
            hero.inventory().capacity(),
            CharacterKind::Player.default_capacity()
        );
    }

    #[test]
    fn unknown_starting_item_is_reported() {
        let templates = CharacterLoader::parse(
            r#"[(id: 0, name: "Hero", kind: Player, starting_items: [42])]"#,
        )
        .unwrap();
        let err = CharacterLoader::check_starting_items(&templates, &ItemCatalog::new()).unwrap_err();
        assert!(err.to_string().contains("item:42"));
    }
}
