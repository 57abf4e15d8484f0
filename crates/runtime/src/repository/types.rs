//! Persisted save layout.

use std::collections::BTreeMap;

use loadout_core::{CharacterId, EquipmentDefinition, EquipmentRecord};
use serde::{Deserialize, Serialize};

/// Everything needed to restore a session's equipment.
///
/// Base ability scores, levels and upgrades come from content and other
/// collaborators; only equipment state and runtime-registered items are saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub session_id: String,
    /// Items registered at runtime, with their original handles.
    pub dynamic_items: Vec<EquipmentDefinition>,
    pub equipment: BTreeMap<CharacterId, EquipmentRecord>,
}

impl SaveFile {
    pub const VERSION: u32 = 1;

    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            version: Self::VERSION,
            session_id: session_id.into(),
            dynamic_items: Vec::new(),
            equipment: BTreeMap::new(),
        }
    }
}
