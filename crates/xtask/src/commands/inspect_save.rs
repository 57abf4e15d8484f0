//! Read and inspect save files
//!
//! Deserializes save_{session}.bin files and displays each character's
//! equipment. When content is available the save is restored onto a session
//! so item names and derived stats can be shown.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use loadout_core::{ItemHandle, ItemOracle};
use loadout_runtime::{Armory, FileSaveRepository, RuntimeConfig, SaveFile, SaveRepository};

use crate::dirs;

/// Read a save file and show every character's equipment
#[derive(Parser)]
pub struct InspectSave {
    /// Session to read (defaults to LOADOUT_SESSION_ID, or the only save present)
    #[arg(value_name = "SESSION")]
    session: Option<String>,

    /// Save directory (defaults to LOADOUT_SAVE_DIR, then the platform data dir)
    #[arg(short, long, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Content directory used to resolve item names and stats
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Per-character loadouts with names and derived stats
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl InspectSave {
    pub fn execute(self) -> Result<()> {
        let save_dir = dirs::save_dir(self.save_dir);
        let repo = FileSaveRepository::new(&save_dir)
            .with_context(|| format!("Failed to open save directory {}", save_dir.display()))?;

        let session = match self.session {
            Some(session) => session,
            None => pick_session(&repo)?,
        };

        let save = repo
            .load(&session)
            .with_context(|| format!("Failed to read save for session '{}'", session))?
            .with_context(|| {
                format!(
                    "No save for session '{}' in {}",
                    session,
                    save_dir.display()
                )
            })?;

        let path = repo.save_path(&session);
        let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
        println!("{} {}", style("Save File:").bold().cyan(), path.display());
        println!("{} {} bytes", style("File Size:").bold().cyan(), size);
        println!("{} {}", style("Session:").bold().cyan(), save.session_id);
        println!("{} {}", style("Version:").bold().cyan(), save.version);
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(&save, dirs::data_dir(self.data_dir)),
            OutputFormat::Json => print_json(&save)?,
            OutputFormat::Debug => println!("{:#?}", save),
        }

        Ok(())
    }
}

fn pick_session(repo: &FileSaveRepository) -> Result<String> {
    let sessions = repo.list_sessions()?;
    let configured = RuntimeConfig::from_env().session_id;

    if sessions.contains(&configured) {
        return Ok(configured);
    }
    match sessions.as_slice() {
        [] => anyhow::bail!("No saves found in {}", repo.base_dir().display()),
        [only] => Ok(only.clone()),
        many => anyhow::bail!(
            "Several saves found, pass one of: {}",
            many.join(", ")
        ),
    }
}

fn print_summary(save: &SaveFile, data_dir: PathBuf) {
    if !save.dynamic_items.is_empty() {
        println!("{}", style("Registered Items:").bold().yellow());
        for definition in &save.dynamic_items {
            println!("  {:>8}  {}", definition.handle.0, definition.name);
        }
        println!();
    }

    let config = RuntimeConfig {
        data_dir,
        session_id: save.session_id.clone(),
        ..RuntimeConfig::default()
    };
    let restored = Armory::from_config(&config).and_then(|mut armory| {
        armory.restore(save.clone())?;
        Ok(armory)
    });

    match restored {
        Ok(armory) => print_restored(&armory),
        Err(e) => {
            tracing::warn!(error = %e, "cannot restore onto content; showing raw records");
            print_raw(save);
        }
    }
}

fn print_restored(armory: &Armory) {
    let name = |handle: ItemHandle| {
        armory
            .catalog()
            .definition(handle)
            .map(|def| def.name.clone())
            .unwrap_or_else(|| handle.to_string())
    };

    for character in armory.roster() {
        let stats = character.stats();
        let derived = &stats.derived;
        println!(
            "{} {} ({})",
            style(&character.name).bold().green(),
            style(character.id).dim(),
            character.kind
        );
        println!(
            "  Stance: {} (defense x{}%)",
            stats.stance, stats.defense_modifier
        );
        println!(
            "  WP {}  DEF {}  AC {}  Block {}%  MR {}%  HP {}  MP {}  Crit {}%",
            derived.weapon_power,
            derived.defense,
            derived.armor_class,
            derived.block_chance,
            derived.magic_resistance,
            derived.max_hp,
            derived.max_mana,
            derived.critical_chance
        );

        println!("  {}", style("Equipped:").bold().yellow());
        if character.loadout().is_empty() {
            println!("    (nothing)");
        }
        for (slot, handle) in character.loadout().iter() {
            let lifted = if character.loadout().is_curse_lifted(slot) {
                " [curse lifted]"
            } else {
                ""
            };
            println!("    {:<14} {}{}", slot.to_string(), name(handle), lifted);
        }

        let inventory = character.inventory();
        println!(
            "  {} {}/{}",
            style("Inventory:").bold().yellow(),
            inventory.len(),
            inventory.capacity()
        );
        for handle in inventory.iter() {
            println!("    {}", name(handle));
        }
        println!();
    }
}

fn print_raw(save: &SaveFile) {
    for (id, record) in &save.equipment {
        println!("{}", style(format!("Character {}", id)).bold().green());
        for (slot, handle) in &record.equipped {
            println!("    {:<14} {}", slot.to_string(), handle);
        }
        println!(
            "  Inventory {}/{}: {:?}",
            record.inventory.len(),
            record.capacity,
            record.inventory.iter().map(|h| h.0).collect::<Vec<_>>()
        );
        if !record.lifted_curses.is_empty() {
            println!("  Lifted curses: {:?}", record.lifted_curses);
        }
        println!();
    }
}

fn print_json(save: &SaveFile) -> Result<()> {
    let json = serde_json::to_string_pretty(save).context("Failed to serialize save to JSON")?;
    println!("{}", json);
    Ok(())
}
