//! Directory resolution shared by commands
//!
//! Explicit flags win, then `LOADOUT_*` environment variables (also read from
//! `.env`), then platform defaults.

use std::path::PathBuf;

use loadout_runtime::RuntimeConfig;

/// Content directory: `--data-dir`, `LOADOUT_DATA_DIR`, or `./data`.
pub fn data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| RuntimeConfig::from_env().data_dir)
}

/// Save directory: `--save-dir`, `LOADOUT_SAVE_DIR`, or the platform data dir.
///
/// - macOS: `~/Library/Application Support/loadout/saves`
/// - Linux: `~/.local/share/loadout/saves` (or `$XDG_DATA_HOME/loadout/saves`)
/// - Windows: `%APPDATA%\loadout\saves`
pub fn save_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| RuntimeConfig::from_env().save_dir)
}
