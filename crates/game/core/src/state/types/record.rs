//! Persisted equipment state.
//!
//! The only equipment state that must survive save/load is, per character,
//! the slot→item mapping plus the inventory list. Everything else (derived
//! stats, stance) is recomputed on restore.

use std::collections::{BTreeMap, BTreeSet};

use super::{Character, EquipmentSlot, Inventory, ItemHandle, Loadout};
use crate::config::{CombatTuning, LoadoutConfig};
use crate::env::ItemOracle;
use crate::error::{ErrorSeverity, GameError};
use crate::stats::AggregateInputs;

/// Serializable snapshot of one character's equipment.
///
/// Empty slots are omitted from `equipped`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentRecord {
    pub equipped: BTreeMap<EquipmentSlot, ItemHandle>,
    pub inventory: Vec<ItemHandle>,
    pub capacity: u16,
    #[cfg_attr(feature = "serde", serde(default))]
    pub lifted_curses: BTreeSet<EquipmentSlot>,
}

/// Reasons a persisted record cannot be restored onto a character.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RestoreError {
    #[error("{0} has no catalog definition")]
    UnknownItem(ItemHandle),

    #[error("{item} cannot be worn in {slot}")]
    IllegalSlot { slot: EquipmentSlot, item: ItemHandle },

    #[error("off hand holds {item} while a two-handed weapon is in the main hand")]
    OffHandBlocked { item: ItemHandle },

    #[error("inventory holds {len} items but capacity is {capacity}")]
    CapacityExceeded { len: usize, capacity: u16 },

    #[error("curse lifted on empty slot {0}")]
    LiftedCurseOnEmptySlot(EquipmentSlot),
}

impl GameError for RestoreError {
    fn severity(&self) -> ErrorSeverity {
        use RestoreError::*;
        match self {
            UnknownItem(_) => ErrorSeverity::Fatal,
            IllegalSlot { .. }
            | OffHandBlocked { .. }
            | CapacityExceeded { .. }
            | LiftedCurseOnEmptySlot(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use RestoreError::*;
        match self {
            UnknownItem(_) => "RESTORE_UNKNOWN_ITEM",
            IllegalSlot { .. } => "RESTORE_ILLEGAL_SLOT",
            OffHandBlocked { .. } => "RESTORE_OFF_HAND_BLOCKED",
            CapacityExceeded { .. } => "RESTORE_CAPACITY_EXCEEDED",
            LiftedCurseOnEmptySlot(_) => "RESTORE_LIFTED_CURSE_ON_EMPTY_SLOT",
        }
    }
}

impl Character {
    /// Captures this character's equipment for persistence.
    pub fn equipment_record(&self) -> EquipmentRecord {
        EquipmentRecord {
            equipped: self.loadout.slots().clone(),
            inventory: self.inventory.iter().collect(),
            capacity: self.inventory.capacity(),
            lifted_curses: self.loadout.lifted_curses().collect(),
        }
    }

    /// Replaces this character's equipment with a persisted record.
    ///
    /// The record is validated against every loadout invariant before anything
    /// is written; on error the character is unchanged. Derived stats are
    /// recomputed on success.
    ///
    /// # Errors
    ///
    /// Returns a `RestoreError` naming the first violated invariant.
    pub fn restore_equipment(
        &mut self,
        record: &EquipmentRecord,
        catalog: &dyn ItemOracle,
        tuning: &CombatTuning,
    ) -> Result<(), RestoreError> {
        let exceeded = || RestoreError::CapacityExceeded {
            len: record.inventory.len(),
            capacity: record.capacity,
        };
        if usize::from(record.capacity) > LoadoutConfig::MAX_INVENTORY_SLOTS
            || record.inventory.len() > usize::from(record.capacity)
        {
            return Err(exceeded());
        }

        for handle in &record.inventory {
            if catalog.definition(*handle).is_none() {
                return Err(RestoreError::UnknownItem(*handle));
            }
        }

        for (slot, handle) in &record.equipped {
            let definition = catalog
                .definition(*handle)
                .ok_or(RestoreError::UnknownItem(*handle))?;
            if !definition.eligible_slots().contains(slot) {
                return Err(RestoreError::IllegalSlot {
                    slot: *slot,
                    item: *handle,
                });
            }
            if *slot == EquipmentSlot::MainHand
                && definition.is_two_handed()
                && let Some(off) = record.equipped.get(&EquipmentSlot::OffHand)
            {
                return Err(RestoreError::OffHandBlocked { item: *off });
            }
        }

        if let Some(slot) = record
            .lifted_curses
            .iter()
            .find(|slot| !record.equipped.contains_key(slot))
        {
            return Err(RestoreError::LiftedCurseOnEmptySlot(*slot));
        }

        let loadout = Loadout::from_parts(record.equipped.clone(), record.lifted_curses.clone());
        let mut inventory = Inventory::with_capacity(record.capacity);
        for handle in &record.inventory {
            inventory.push(*handle).map_err(|_| exceeded())?;
        }

        let inputs = AggregateInputs::resolve(self, &loadout, catalog, tuning)
            .map_err(RestoreError::UnknownItem)?;
        let stats = inputs.aggregate();

        self.loadout = loadout;
        self.inventory = inventory;
        self.apply_stats(stats);
        Ok(())
    }
}
