//! Equip/unequip transaction engine.
//!
//! [`LoadoutEngine`] is the only writer of loadouts. Every operation follows the
//! same pipeline:
//!
//! ```text
//! stage (copy) → validate + mutate copy → prepare (recompute stats) → commit
//! ```
//!
//! Any error before commit drops the staged copy, so a failed call leaves every
//! involved character exactly as it was.

mod errors;
mod outcome;
mod resolver;
mod restrictions;
mod staging;
mod transfer;

#[cfg(test)]
pub(crate) mod fixtures;

pub use errors::{LoadoutError, RestrictionFailure};
pub use outcome::{EquipOutcome, ReclaimOutcome, TransferOutcome, UnequipOutcome};
pub use resolver::{SlotResolution, resolve_slots};
pub use restrictions::check_restrictions;

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::config::CombatTuning;
use crate::env::{EquipmentDefinition, ItemOracle};
use crate::state::{Character, EquipmentSlot, ItemHandle};
use staging::StagedActor;

/// Slot written and items displaced by a staged placement.
struct Placement {
    slot: EquipmentSlot,
    displaced: Vec<ItemHandle>,
}

/// Loadout engine bound to a catalog and combat tuning.
///
/// The engine holds no character state; callers pass the acting character(s)
/// to each operation.
#[derive(Clone, Copy)]
pub struct LoadoutEngine<'a> {
    catalog: &'a dyn ItemOracle,
    tuning: &'a CombatTuning,
}

impl<'a> LoadoutEngine<'a> {
    pub fn new(catalog: &'a dyn ItemOracle, tuning: &'a CombatTuning) -> Self {
        Self { catalog, tuning }
    }

    pub fn catalog(&self) -> &'a dyn ItemOracle {
        self.catalog
    }

    /// Lists candidate slots for `handle` on `character` without mutating.
    pub fn resolve(
        &self,
        character: &Character,
        handle: ItemHandle,
    ) -> Result<SlotResolution, LoadoutError> {
        let definition = self.definition(handle)?;
        Ok(resolve_slots(&definition, character.loadout()))
    }

    /// Equips a carried item.
    ///
    /// Displaced items are appended to the actor's inventory and stats are
    /// recomputed.
    ///
    /// # Errors
    ///
    /// `ItemNotCarried`, `AmbiguousSlotSelection`, `InvalidSlotForItem`,
    /// `RestrictionFailed`, `CursedItemBlocksSlot`, `InventoryFull`, or
    /// `InternalConsistency`. The actor is unchanged on error.
    pub fn equip(
        &self,
        actor: &mut Character,
        handle: ItemHandle,
        choice: Option<EquipmentSlot>,
    ) -> Result<EquipOutcome, LoadoutError> {
        let mut stage = StagedActor::of(actor);
        stage.take_carried(handle)?;
        let definition = self.definition(handle)?;
        let placement = self.place(&mut stage, actor, &definition, choice)?;
        stage.prepare(actor, self.catalog, self.tuning)?;
        stage.commit(actor);

        tracing::trace!(
            actor = %actor.id,
            item = %handle,
            slot = %placement.slot,
            displaced = placement.displaced.len(),
            "equipped"
        );

        let message = self.equip_message(&definition, placement.slot, &placement.displaced);
        Ok(EquipOutcome {
            item: handle,
            slot: placement.slot,
            displaced: placement.displaced,
            message,
        })
    }

    /// Moves the occupant of `slot` to the actor's inventory.
    ///
    /// # Errors
    ///
    /// `SlotAlreadyEmpty`, `ItemIsCursed` (unless the curse was lifted),
    /// `InventoryFull`, or `InternalConsistency`. The actor is unchanged on error.
    pub fn unequip(
        &self,
        actor: &mut Character,
        slot: EquipmentSlot,
    ) -> Result<UnequipOutcome, LoadoutError> {
        let mut stage = StagedActor::of(actor);
        let item = stage
            .loadout
            .get(slot)
            .ok_or(LoadoutError::SlotAlreadyEmpty(slot))?;
        let definition = self.definition(item)?;
        if definition.cursed && !stage.loadout.is_curse_lifted(slot) {
            return Err(LoadoutError::ItemIsCursed { slot, item });
        }

        stage.vacate(slot);
        stage.stow(item)?;
        stage.prepare(actor, self.catalog, self.tuning)?;
        stage.commit(actor);

        tracing::trace!(actor = %actor.id, item = %item, %slot, "unequipped");

        Ok(UnequipOutcome {
            item,
            slot,
            message: format!("Unequipped {} ({slot}).", definition.name),
        })
    }

    /// Recomputes derived stats from the current loadout.
    ///
    /// Call after base scores, level or upgrades change.
    pub fn recompute(&self, actor: &mut Character) -> Result<(), LoadoutError> {
        let mut stage = StagedActor::of(actor);
        stage.prepare(actor, self.catalog, self.tuning)?;
        stage.commit(actor);
        Ok(())
    }

    fn definition(&self, handle: ItemHandle) -> Result<Arc<EquipmentDefinition>, LoadoutError> {
        self.catalog
            .definition(handle)
            .ok_or(LoadoutError::InternalConsistency(handle))
    }

    /// Writes `definition` into the staged loadout of `wearer`.
    ///
    /// The item itself must already be out of every inventory. Displaced
    /// occupants are stowed in the staged inventory.
    fn place(
        &self,
        stage: &mut StagedActor,
        wearer: &Character,
        definition: &EquipmentDefinition,
        choice: Option<EquipmentSlot>,
    ) -> Result<Placement, LoadoutError> {
        let slot = resolve_slots(definition, &stage.loadout).select(choice)?;
        check_restrictions(definition, wearer)?;

        let mut vacate: ArrayVec<EquipmentSlot, 2> = ArrayVec::new();
        vacate.push(slot);
        if slot == EquipmentSlot::MainHand && definition.is_two_handed() {
            vacate.push(EquipmentSlot::OffHand);
        } else if slot == EquipmentSlot::OffHand
            && let Some(main) = stage.loadout.get(EquipmentSlot::MainHand)
            && self.definition(main)?.is_two_handed()
        {
            vacate.push(EquipmentSlot::MainHand);
        }

        for &blocked in &vacate {
            if let Some(item) = stage.loadout.get(blocked)
                && self.definition(item)?.cursed
                && !stage.loadout.is_curse_lifted(blocked)
            {
                return Err(LoadoutError::CursedItemBlocksSlot {
                    slot: blocked,
                    item,
                });
            }
        }

        let mut displaced = Vec::with_capacity(vacate.len());
        for vacated in vacate {
            if let Some(occupant) = stage.vacate(vacated) {
                stage.stow(occupant)?;
                displaced.push(occupant);
            }
        }
        stage.loadout.put(slot, definition.handle);

        Ok(Placement { slot, displaced })
    }

    fn name_of(&self, handle: ItemHandle) -> String {
        self.catalog
            .definition(handle)
            .map(|def| def.name.clone())
            .unwrap_or_else(|| handle.to_string())
    }

    fn equip_message(
        &self,
        definition: &EquipmentDefinition,
        slot: EquipmentSlot,
        displaced: &[ItemHandle],
    ) -> String {
        let mut message = format!("Equipped {} ({slot}).", definition.name);
        if !displaced.is_empty() {
            let names: Vec<_> = displaced.iter().map(|h| self.name_of(*h)).collect();
            message.push_str(&format!(" Moved to inventory: {}.", names.join(", ")));
        }
        message
    }
}
