//! Validate a content directory
//!
//! Loads items, characters and tuning, builds a session from them, and reports
//! anything a designer should look at.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use loadout_content::ContentFactory;
use loadout_core::{
    Character, EquipmentDefinition, ItemCategory, ItemOracle, check_restrictions,
};
use loadout_runtime::{Armory, RuntimeConfig};

use crate::dirs;

/// Load and cross-check a content directory
#[derive(Parser)]
pub struct ValidateContent {
    /// Content directory (defaults to LOADOUT_DATA_DIR, then ./data)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Print every item definition
    #[arg(long)]
    items: bool,
}

impl ValidateContent {
    pub fn execute(self) -> Result<()> {
        let data_dir = dirs::data_dir(self.data_dir);
        println!(
            "{} {}",
            style("Content Directory:").bold().cyan(),
            data_dir.display()
        );
        println!();

        let bundle = ContentFactory::new(&data_dir)
            .load_bundle()
            .with_context(|| format!("Content in {} is invalid", data_dir.display()))?;
        tracing::info!(
            items = bundle.catalog.len(),
            characters = bundle.characters.len(),
            "content loaded"
        );

        let definitions = bundle.catalog.all_definitions();
        print_catalog_summary(&definitions);
        if self.items {
            print_items(&definitions);
        }

        println!("{}", style("Combat Tuning:").bold().yellow());
        let tuning = &bundle.config.tuning;
        println!("  Two-handed damage bonus:    +{}%", tuning.two_handed_damage_bonus);
        println!("  Two-handed defense penalty: -{}%", tuning.two_handed_defense_penalty);
        println!("  Dual-wield off-hand weight: {}%", tuning.dual_wield_offhand_weight);
        println!("  Dual-wield attack bonus:    +{}", tuning.dual_wield_attack_bonus);
        println!("  Dual-wield defense penalty: -{}%", tuning.dual_wield_defense_penalty);
        println!();

        let config = RuntimeConfig {
            data_dir: data_dir.clone(),
            ..RuntimeConfig::default()
        };
        let armory = Armory::from_content(bundle, &config)
            .context("Content loads but cannot build a session")?;

        println!("{}", style("Roster:").bold().yellow());
        let mut warnings = 0;
        for character in armory.roster() {
            print_character(character);
            warnings += report_unusable_items(&armory, character);
        }
        println!();

        if warnings > 0 {
            println!(
                "{} {} starting item(s) cannot be equipped yet",
                style("Note:").bold().yellow(),
                warnings
            );
        }
        println!("{}", style("Content is valid.").bold().green());
        Ok(())
    }
}

fn print_catalog_summary(definitions: &[std::sync::Arc<EquipmentDefinition>]) {
    let mut by_category: BTreeMap<&'static str, usize> = BTreeMap::new();
    for definition in definitions {
        *by_category.entry(category_label(&definition.category)).or_default() += 1;
    }
    let cursed = definitions.iter().filter(|d| d.cursed).count();
    let gated = definitions
        .iter()
        .filter(|d| d.requirements != Default::default())
        .count();

    println!("{}", style("Catalog:").bold().yellow());
    println!("  Total Items: {}", definitions.len());
    for (category, count) in &by_category {
        println!("    {:<12} {}", category, count);
    }
    println!("  Cursed: {}", cursed);
    println!("  With Requirements: {}", gated);
    println!();
}

fn print_items(definitions: &[std::sync::Arc<EquipmentDefinition>]) {
    println!("{}", style("Items:").bold().yellow());
    for definition in definitions {
        let slots: Vec<_> = definition
            .eligible_slots()
            .iter()
            .map(|slot| slot.to_string())
            .collect();
        let mut notes = Vec::new();
        if definition.cursed {
            notes.push("cursed".to_string());
        }
        let requirements = &definition.requirements;
        if requirements.min_level > 0 {
            notes.push(format!("level {}+", requirements.min_level));
        }
        if requirements.min_strength > 0 {
            notes.push(format!("STR {}+", requirements.min_strength));
        }
        if !requirements.flags.is_empty() {
            notes.push(format!("{:?}", requirements.flags));
        }
        println!(
            "  {:>6}  {:<26} {:<10} {:<22} {:>6}g  {}",
            definition.handle.0,
            definition.name,
            definition.rarity.to_string(),
            slots.join("/"),
            definition.value,
            notes.join(", ")
        );
    }
    println!();
}

fn print_character(character: &Character) {
    let derived = &character.stats().derived;
    println!(
        "  {} {} ({}, level {}) - WP {}, DEF {}, AC {}, HP {}, MP {}, carrying {}/{}",
        style(character.id).dim(),
        style(&character.name).bold(),
        character.kind,
        character.level,
        derived.weapon_power,
        derived.defense,
        derived.armor_class,
        derived.max_hp,
        derived.max_mana,
        character.inventory().len(),
        character.inventory().capacity()
    );
}

fn report_unusable_items(armory: &Armory, character: &Character) -> usize {
    let mut warnings = 0;
    for handle in character.inventory().iter() {
        if let Some(definition) = armory.catalog().definition(handle)
            && let Err(failure) = check_restrictions(&definition, character)
        {
            println!(
                "    {} {}: {}",
                style("!").yellow(),
                definition.name,
                failure
            );
            warnings += 1;
        }
    }
    warnings
}

fn category_label(category: &ItemCategory) -> &'static str {
    match category {
        ItemCategory::Weapon { .. } => "Weapon",
        ItemCategory::Shield => "Shield",
        ItemCategory::Armor { .. } => "Armor",
        ItemCategory::Ring => "Ring",
        ItemCategory::Belt => "Belt",
        ItemCategory::Amulet => "Amulet",
    }
}
