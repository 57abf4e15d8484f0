pub mod character;
pub mod common;
pub mod inventory;
pub mod item;
pub mod loadout;
pub mod record;
pub mod slot;

// Re-export character types
pub use character::{AbilityScores, Character, CharacterKind, CharacterTemplate};

// Re-export common types
pub use common::CharacterId;

// Re-export storage types
pub use inventory::Inventory;
pub use loadout::Loadout;

// Re-export item and slot types
pub use item::ItemHandle;
pub use slot::{EquipmentSlot, WeaponHandedness};

// Re-export persistence types
pub use record::{EquipmentRecord, RestoreError};
