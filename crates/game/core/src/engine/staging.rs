//! Two-phase staging for loadout mutations.
//!
//! A [`StagedActor`] holds working copies of one character's loadout and
//! inventory. Operations mutate the copies, `prepare` recomputes stats against
//! them, and `commit` writes everything back. Dropping a stage without
//! committing is the rollback.

use super::errors::LoadoutError;
use crate::config::CombatTuning;
use crate::env::ItemOracle;
use crate::state::{Character, EquipmentSlot, Inventory, ItemHandle, Loadout};
use crate::stats::{AggregateInputs, StatsSnapshot};

#[derive(Clone, Debug)]
pub(crate) struct StagedActor {
    pub(crate) loadout: Loadout,
    pub(crate) inventory: Inventory,
    stats: Option<StatsSnapshot>,
}

impl StagedActor {
    pub(crate) fn of(character: &Character) -> Self {
        Self {
            loadout: character.loadout.clone(),
            inventory: character.inventory.clone(),
            stats: None,
        }
    }

    /// Removes a carried item.
    pub(crate) fn take_carried(&mut self, handle: ItemHandle) -> Result<(), LoadoutError> {
        self.inventory
            .remove(handle)
            .map(|_| ())
            .ok_or(LoadoutError::ItemNotCarried(handle))
    }

    /// Appends an item to the staged inventory.
    pub(crate) fn stow(&mut self, handle: ItemHandle) -> Result<(), LoadoutError> {
        let capacity = self.inventory.capacity();
        self.inventory
            .push(handle)
            .map_err(|_| LoadoutError::InventoryFull { capacity })
    }

    pub(crate) fn vacate(&mut self, slot: EquipmentSlot) -> Option<ItemHandle> {
        self.loadout.take(slot)
    }

    /// Recomputes stats for the staged loadout.
    ///
    /// # Errors
    ///
    /// `InternalConsistency` if a worn handle has no definition.
    pub(crate) fn prepare(
        &mut self,
        character: &Character,
        catalog: &dyn ItemOracle,
        tuning: &CombatTuning,
    ) -> Result<(), LoadoutError> {
        let inputs = AggregateInputs::resolve(character, &self.loadout, catalog, tuning)
            .map_err(LoadoutError::InternalConsistency)?;
        self.stats = Some(inputs.aggregate());
        Ok(())
    }

    /// Writes the staged state back. Stats are applied only if prepared.
    pub(crate) fn commit(self, character: &mut Character) {
        character.loadout = self.loadout;
        character.inventory = self.inventory;
        if let Some(stats) = self.stats {
            character.apply_stats(stats);
        }
    }
}
