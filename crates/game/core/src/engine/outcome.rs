//! Results returned to callers after a committed transaction.

use crate::state::{EquipmentSlot, ItemHandle};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipOutcome {
    pub item: ItemHandle,
    pub slot: EquipmentSlot,
    /// Previous occupants moved to the wearer's inventory, main hand first.
    pub displaced: Vec<ItemHandle>,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnequipOutcome {
    pub item: ItemHandle,
    pub slot: EquipmentSlot,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferOutcome {
    pub item: ItemHandle,
    /// Slot the item now occupies on the target.
    pub slot: EquipmentSlot,
    /// Slot the item was worn in on the source, if it was worn.
    pub taken_from: Option<EquipmentSlot>,
    /// Target's displaced items, now in the source's inventory.
    pub returned: Vec<ItemHandle>,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReclaimOutcome {
    pub reclaimed: Vec<(EquipmentSlot, ItemHandle)>,
    /// Cursed items left on the target.
    pub skipped_cursed: Vec<(EquipmentSlot, ItemHandle)>,
}

impl ReclaimOutcome {
    pub fn reclaimed_items(&self) -> impl Iterator<Item = ItemHandle> + '_ {
        self.reclaimed.iter().map(|(_, handle)| *handle)
    }
}
