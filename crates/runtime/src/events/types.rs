//! Event payloads.

use loadout_core::{CharacterId, EquipmentSlot, ItemHandle, StatsSnapshot};
use serde::{Deserialize, Serialize};

use super::Topic;

/// Observable outcome of a roster operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoadoutEvent {
    Equipped {
        character: CharacterId,
        item: ItemHandle,
        slot: EquipmentSlot,
        displaced: Vec<ItemHandle>,
    },

    Unequipped {
        character: CharacterId,
        item: ItemHandle,
        slot: EquipmentSlot,
    },

    /// An item moved from one character onto another's loadout. `returned`
    /// lists items the target's equip displaced, now carried by `from`.
    Transferred {
        from: CharacterId,
        to: CharacterId,
        item: ItemHandle,
        slot: EquipmentSlot,
        returned: Vec<ItemHandle>,
    },

    Reclaimed {
        from: CharacterId,
        to: CharacterId,
        items: Vec<ItemHandle>,
        skipped_cursed: Vec<ItemHandle>,
    },

    CurseLifted {
        character: CharacterId,
        slot: EquipmentSlot,
        item: ItemHandle,
    },

    /// Derived stats were recomputed after a loadout mutation.
    StatsRecomputed {
        character: CharacterId,
        revision: u64,
        stats: StatsSnapshot,
    },

    /// An operation was refused; nothing changed.
    Rejected {
        character: CharacterId,
        operation: String,
        code: String,
        message: String,
    },

    ItemRegistered {
        item: ItemHandle,
        name: String,
    },

    SessionSaved {
        session_id: String,
    },

    SessionLoaded {
        session_id: String,
        characters: usize,
    },
}

impl LoadoutEvent {
    pub fn topic(&self) -> Topic {
        match self {
            LoadoutEvent::Equipped { .. }
            | LoadoutEvent::Unequipped { .. }
            | LoadoutEvent::Transferred { .. }
            | LoadoutEvent::Reclaimed { .. }
            | LoadoutEvent::CurseLifted { .. }
            | LoadoutEvent::StatsRecomputed { .. }
            | LoadoutEvent::Rejected { .. } => Topic::Loadout,
            LoadoutEvent::ItemRegistered { .. } => Topic::Catalog,
            LoadoutEvent::SessionSaved { .. } | LoadoutEvent::SessionLoaded { .. } => {
                Topic::Session
            }
        }
    }
}
