//! Runtime configuration loaded from the environment.
use std::env;
use std::path::PathBuf;

/// Settings for an [`Armory`](crate::Armory) session.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Directory holding `items.ron`, `characters.ron` and `config.toml`.
    pub data_dir: PathBuf,
    /// Directory where save files are written.
    pub save_dir: PathBuf,
    pub session_id: String,
    /// Per-topic event buffer.
    pub event_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            save_dir: default_save_dir(),
            session_id: "default".to_string(),
            event_capacity: 64,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `LOADOUT_DATA_DIR`
    /// - `LOADOUT_SAVE_DIR`
    /// - `LOADOUT_SESSION_ID`
    /// - `LOADOUT_EVENT_CAPACITY`
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_var::<PathBuf>(&lookup, "LOADOUT_DATA_DIR") {
            config.data_dir = dir;
        }

        if let Some(dir) = read_var::<PathBuf>(&lookup, "LOADOUT_SAVE_DIR") {
            config.save_dir = dir;
        }

        if let Some(session) = read_var::<String>(&lookup, "LOADOUT_SESSION_ID")
            && !session.trim().is_empty()
        {
            config.session_id = session.trim().to_string();
        }

        if let Some(capacity) = read_var::<usize>(&lookup, "LOADOUT_EVENT_CAPACITY") {
            config.event_capacity = capacity.max(1);
        }

        config
    }
}

/// Platform data directory for saves.
///
/// - macOS: `~/Library/Application Support/loadout/saves`
/// - Linux: `~/.local/share/loadout/saves` (or `$XDG_DATA_HOME/loadout/saves`)
/// - Windows: `%APPDATA%\loadout\saves`
/// - Fallback: `./save_data`
pub fn default_save_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "loadout")
        .map(|dirs| dirs.data_dir().join("saves"))
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.parse().ok()
}
