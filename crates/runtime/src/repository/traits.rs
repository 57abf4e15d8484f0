//! Repository contracts for saving and loading equipment.

use super::{Result, SaveFile};

/// Repository for session saves
///
/// One save per session id; saving again overwrites it.
pub trait SaveRepository: Send + Sync {
    /// Save (or overwrite) the save for `save.session_id`
    fn save(&self, save: &SaveFile) -> Result<()>;

    /// Load the save for a session
    fn load(&self, session_id: &str) -> Result<Option<SaveFile>>;

    /// Check if a save exists
    fn exists(&self, session_id: &str) -> bool;

    /// Delete a save
    fn delete(&self, session_id: &str) -> Result<()>;

    /// List all sessions with a save
    fn list_sessions(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
