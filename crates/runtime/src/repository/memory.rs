//! In-memory SaveRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{RepositoryError, Result, SaveFile, SaveRepository};

/// In-memory implementation of SaveRepository.
#[derive(Default)]
pub struct InMemorySaveRepository {
    saves: RwLock<BTreeMap<String, SaveFile>>,
}

impl InMemorySaveRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, save: &SaveFile) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.insert(save.session_id.clone(), save.clone());
        Ok(())
    }

    fn load(&self, session_id: &str) -> Result<Option<SaveFile>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.get(session_id).cloned())
    }

    fn exists(&self, session_id: &str) -> bool {
        self.saves
            .read()
            .map(|saves| saves.contains_key(session_id))
            .unwrap_or(false)
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.remove(session_id);
        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<String>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(saves.keys().cloned().collect())
    }
}
