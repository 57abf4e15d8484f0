//! Deterministic equipment rules shared by the runtime and offline tools.
//!
//! `loadout-core` defines the canonical loadout rules (slot resolution,
//! equip/unequip transactions, cross-character transfer, stat aggregation) and
//! exposes pure APIs with no I/O. All loadout mutation flows through
//! [`engine::LoadoutEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;

pub use config::{CombatTuning, LoadoutConfig};
pub use engine::{
    EquipOutcome, LoadoutEngine, LoadoutError, ReclaimOutcome, RestrictionFailure,
    SlotResolution, TransferOutcome, UnequipOutcome, check_restrictions, resolve_slots,
};
pub use env::{
    CatalogError, EquipmentBuilder, EquipmentDefinition, ItemBonuses, ItemCatalog, ItemCategory,
    ItemOracle, Rarity, Requirements, RestrictionFlags,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    AbilityScores, Character, CharacterId, CharacterKind, CharacterTemplate, EquipmentRecord,
    EquipmentSlot, Inventory, ItemHandle, Loadout, RestoreError, WeaponHandedness,
};
pub use stats::{CombatStance, DerivedStats, PermanentUpgrades, StatsSnapshot};
