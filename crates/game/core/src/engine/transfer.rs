//! Cross-actor transfer.
//!
//! Both characters are staged, both stages are prepared, and only then are both
//! committed. A failure on either side drops both stages.

use super::LoadoutEngine;
use super::errors::LoadoutError;
use super::outcome::{ReclaimOutcome, TransferOutcome};
use super::staging::StagedActor;
use crate::state::{Character, EquipmentSlot, ItemHandle};

impl LoadoutEngine<'_> {
    /// Moves `handle` from `source` onto `target`'s loadout.
    ///
    /// The item is taken from the source's inventory, or from the source's
    /// loadout when worn. Items the target's equip displaces pass through the
    /// target's inventory (capacity applies there) and are then redirected to
    /// the source's inventory.
    ///
    /// # Errors
    ///
    /// Any equip error on the target, `ItemIsCursed` if the source wears the item
    /// cursed, `ItemNotCarried` if the source does not hold it, or `InventoryFull`
    /// on either side. Both characters are unchanged on error.
    pub fn transfer(
        &self,
        source: &mut Character,
        target: &mut Character,
        handle: ItemHandle,
        choice: Option<EquipmentSlot>,
    ) -> Result<TransferOutcome, LoadoutError> {
        let mut from = StagedActor::of(source);
        let mut to = StagedActor::of(target);
        let definition = self.definition(handle)?;

        let taken_from = if from.inventory.contains(handle) {
            from.take_carried(handle)?;
            None
        } else if let Some(slot) = from.loadout.slot_of(handle) {
            if definition.cursed && !from.loadout.is_curse_lifted(slot) {
                return Err(LoadoutError::ItemIsCursed { slot, item: handle });
            }
            from.vacate(slot);
            Some(slot)
        } else {
            return Err(LoadoutError::ItemNotCarried(handle));
        };

        let placement = self.place(&mut to, target, &definition, choice)?;
        for displaced in &placement.displaced {
            to.inventory.remove_last(*displaced);
            from.stow(*displaced)?;
        }

        from.prepare(source, self.catalog, self.tuning)?;
        to.prepare(target, self.catalog, self.tuning)?;
        from.commit(source);
        to.commit(target);

        tracing::trace!(
            source = %source.id,
            target = %target.id,
            item = %handle,
            slot = %placement.slot,
            returned = placement.displaced.len(),
            "transferred"
        );

        let mut message = format!(
            "{} now wears {} ({}).",
            target.name, definition.name, placement.slot
        );
        if !placement.displaced.is_empty() {
            let names: Vec<_> = placement
                .displaced
                .iter()
                .map(|h| self.name_of(*h))
                .collect();
            message.push_str(&format!(" Returned to {}: {}.", source.name, names.join(", ")));
        }

        Ok(TransferOutcome {
            item: handle,
            slot: placement.slot,
            taken_from,
            returned: placement.displaced,
            message,
        })
    }

    /// Moves every non-cursed item `target` wears into `source`'s inventory.
    ///
    /// Cursed items stay on the target and are reported. The target's stats are
    /// recomputed once; the source's loadout is untouched, so its stats are not.
    ///
    /// # Errors
    ///
    /// `InventoryFull` if the source cannot hold every reclaimable item (nothing
    /// moves), or `InternalConsistency`.
    pub fn reclaim_all(
        &self,
        source: &mut Character,
        target: &mut Character,
    ) -> Result<ReclaimOutcome, LoadoutError> {
        let mut from = StagedActor::of(source);
        let mut to = StagedActor::of(target);
        let mut outcome = ReclaimOutcome::default();

        for (slot, handle) in target.loadout().iter() {
            let definition = self.definition(handle)?;
            if definition.cursed && !target.loadout().is_curse_lifted(slot) {
                outcome.skipped_cursed.push((slot, handle));
            } else {
                outcome.reclaimed.push((slot, handle));
            }
        }

        if from.inventory.free_slots() < outcome.reclaimed.len() {
            return Err(LoadoutError::InventoryFull {
                capacity: from.inventory.capacity(),
            });
        }
        for (slot, handle) in &outcome.reclaimed {
            to.vacate(*slot);
            from.stow(*handle)?;
        }

        to.prepare(target, self.catalog, self.tuning)?;
        from.commit(source);
        to.commit(target);

        tracing::trace!(
            source = %source.id,
            target = %target.id,
            reclaimed = outcome.reclaimed.len(),
            skipped = outcome.skipped_cursed.len(),
            "reclaimed"
        );

        Ok(outcome)
    }
}
