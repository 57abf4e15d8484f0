//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::validate_session_id;
use super::{RepositoryError, Result, SaveFile, SaveRepository};

/// File-based implementation of SaveRepository.
///
/// # File Format
///
/// Saves are stored as `save_{session_id}.bin` in bincode format. Writes go to
/// a temporary file first and are moved into place with an atomic rename, so a
/// crash never leaves a truncated save behind.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a new file-based save repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a save file.
    pub fn save_path(&self, session_id: &str) -> PathBuf {
        self.base_dir.join(format!("save_{}.bin", session_id))
    }

    /// Decode a save file's bytes.
    pub fn decode(bytes: &[u8]) -> Result<SaveFile> {
        bincode::deserialize(bytes).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, save: &SaveFile) -> Result<()> {
        validate_session_id(&save.session_id)?;
        let path = self.save_path(&save.session_id);
        let temp_path = path.with_extension("bin.tmp");

        let bytes =
            bincode::serialize(save).map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved session[{}] to {}", save.session_id, path.display());

        Ok(())
    }

    fn load(&self, session_id: &str) -> Result<Option<SaveFile>> {
        validate_session_id(session_id)?;
        let path = self.save_path(session_id);

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let save = Self::decode(&bytes)?;

        if save.session_id != session_id {
            return Err(RepositoryError::CorruptedData(format!(
                "{} holds session '{}'",
                path.display(),
                save.session_id
            )));
        }

        tracing::debug!("Loaded session[{}] from {}", session_id, path.display());

        Ok(Some(save))
    }

    fn exists(&self, session_id: &str) -> bool {
        validate_session_id(session_id).is_ok() && self.save_path(session_id).exists()
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        validate_session_id(session_id)?;
        let path = self.save_path(session_id);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted session[{}]", session_id);
        }

        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<String>> {
        let mut sessions = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(session_id) = filename
                    .strip_prefix("save_")
                    .and_then(|s| s.strip_suffix(".bin"))
                && validate_session_id(session_id).is_ok()
            {
                sessions.push(session_id.to_string());
            }
        }

        sessions.sort_unstable();
        Ok(sessions)
    }
}
