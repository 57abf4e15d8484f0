//! Authoritative equipment state representation.
//!
//! This module owns the data structures that describe characters, their
//! loadouts and inventories, and the persisted equipment record. Runtime layers
//! clone or query this state but mutate loadouts exclusively through the engine.
pub mod types;

pub use types::{
    AbilityScores, Character, CharacterId, CharacterKind, CharacterTemplate, EquipmentRecord,
    EquipmentSlot, Inventory, ItemHandle, Loadout, RestoreError, WeaponHandedness,
};
