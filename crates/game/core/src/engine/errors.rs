//! Error types for loadout transactions.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EquipmentSlot, ItemHandle};

/// Which equip-time gate rejected an item.
///
/// Gates are checked in declaration order; the first failure is reported.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestrictionFailure {
    #[error("requires level {required} (current {actual})")]
    LevelTooLow { required: u16, actual: u16 },

    #[error("requires {required} strength (current {actual})")]
    StrengthTooLow { required: i32, actual: i32 },

    #[error("requires a good alignment (current {alignment})")]
    RequiresGoodAlignment { alignment: i32 },

    #[error("requires an evil alignment (current {alignment})")]
    RequiresEvilAlignment { alignment: i32 },
}

/// Errors returned by equip, unequip, transfer and reclaim.
///
/// Every variant is reported before any mutation: a failed call leaves the
/// loadout and inventory of every involved character untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadoutError {
    /// The item fits more than one slot and no slot was chosen.
    #[error("choose a slot: {candidates:?}")]
    AmbiguousSlotSelection { candidates: Vec<EquipmentSlot> },

    #[error("{item} cannot be equipped in {slot}")]
    InvalidSlotForItem { item: ItemHandle, slot: EquipmentSlot },

    #[error("restriction not met: {0}")]
    RestrictionFailed(#[from] RestrictionFailure),

    /// A cursed item occupies a slot that would have to be vacated.
    #[error("cursed {item} in {slot} cannot be displaced")]
    CursedItemBlocksSlot { slot: EquipmentSlot, item: ItemHandle },

    #[error("{item} in {slot} is cursed")]
    ItemIsCursed { slot: EquipmentSlot, item: ItemHandle },

    #[error("{0} is already empty")]
    SlotAlreadyEmpty(EquipmentSlot),

    #[error("inventory is full (capacity {capacity})")]
    InventoryFull { capacity: u16 },

    /// The item is neither carried nor worn by the acting character.
    #[error("{0} is not carried")]
    ItemNotCarried(ItemHandle),

    /// An item handle has no catalog definition: the content data is corrupt.
    #[error("{0} has no catalog definition")]
    InternalConsistency(ItemHandle),
}

impl LoadoutError {
    /// Candidate slots when the caller must choose one and retry.
    pub fn candidates(&self) -> Option<&[EquipmentSlot]> {
        match self {
            LoadoutError::AmbiguousSlotSelection { candidates } => Some(candidates),
            _ => None,
        }
    }
}

impl GameError for LoadoutError {
    fn severity(&self) -> ErrorSeverity {
        use LoadoutError::*;
        match self {
            AmbiguousSlotSelection { .. } | InventoryFull { .. } => ErrorSeverity::Recoverable,
            InvalidSlotForItem { .. }
            | RestrictionFailed(_)
            | CursedItemBlocksSlot { .. }
            | ItemIsCursed { .. }
            | SlotAlreadyEmpty(_)
            | ItemNotCarried(_) => ErrorSeverity::Validation,
            InternalConsistency(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use LoadoutError::*;
        match self {
            AmbiguousSlotSelection { .. } => "LOADOUT_AMBIGUOUS_SLOT_SELECTION",
            InvalidSlotForItem { .. } => "LOADOUT_INVALID_SLOT_FOR_ITEM",
            RestrictionFailed(_) => "LOADOUT_RESTRICTION_FAILED",
            CursedItemBlocksSlot { .. } => "LOADOUT_CURSED_ITEM_BLOCKS_SLOT",
            ItemIsCursed { .. } => "LOADOUT_ITEM_IS_CURSED",
            SlotAlreadyEmpty(_) => "LOADOUT_SLOT_ALREADY_EMPTY",
            InventoryFull { .. } => "LOADOUT_INVENTORY_FULL",
            ItemNotCarried(_) => "LOADOUT_ITEM_NOT_CARRIED",
            InternalConsistency(_) => "LOADOUT_INTERNAL_CONSISTENCY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguity_is_the_only_request_for_input() {
        let ambiguous = LoadoutError::AmbiguousSlotSelection {
            candidates: EquipmentSlot::FINGERS.to_vec(),
        };
        assert!(ambiguous.severity().is_recoverable());
        assert_eq!(ambiguous.candidates(), Some(&EquipmentSlot::FINGERS[..]));

        let corrupt = LoadoutError::InternalConsistency(ItemHandle(9));
        assert!(corrupt.severity().is_internal());
        assert_eq!(corrupt.candidates(), None);
        assert_eq!(corrupt.error_code(), "LOADOUT_INTERNAL_CONSISTENCY");
    }
}
