//! Equipped items per slot.
//!
//! The loadout maps each [`EquipmentSlot`] to at most one [`ItemHandle`].
//! Mutation is crate-private: only the transaction engine (and validated
//! restores) write slots, which keeps the slot/handedness invariants in one
//! place.

use std::collections::{BTreeMap, BTreeSet};

use super::{EquipmentSlot, ItemHandle};

/// Equipment state for a character.
///
/// # Invariants
///
/// - A slot maps to an item only if that item's category allows the slot
/// - If `MainHand` holds a two-handed weapon, `OffHand` is empty
/// - `lifted_curses` only names occupied slots
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loadout {
    slots: BTreeMap<EquipmentSlot, ItemHandle>,

    /// Slots whose cursed occupant was cleared by a curse-removal service.
    lifted_curses: BTreeSet<EquipmentSlot>,
}

impl Loadout {
    /// Creates an empty loadout.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the item in `slot`, if any.
    pub fn get(&self, slot: EquipmentSlot) -> Option<ItemHandle> {
        self.slots.get(&slot).copied()
    }

    pub fn is_occupied(&self, slot: EquipmentSlot) -> bool {
        self.slots.contains_key(&slot)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, ItemHandle)> + '_ {
        self.slots.iter().map(|(slot, handle)| (*slot, *handle))
    }

    /// Returns the first slot holding `handle`.
    pub fn slot_of(&self, handle: ItemHandle) -> Option<EquipmentSlot> {
        self.iter().find(|(_, h)| *h == handle).map(|(slot, _)| slot)
    }

    /// Returns true if the curse on the occupant of `slot` has been lifted.
    pub fn is_curse_lifted(&self, slot: EquipmentSlot) -> bool {
        self.lifted_curses.contains(&slot)
    }

    pub fn lifted_curses(&self) -> impl Iterator<Item = EquipmentSlot> + '_ {
        self.lifted_curses.iter().copied()
    }

    /// Writes `handle` into `slot`, returning the previous occupant.
    pub(crate) fn put(&mut self, slot: EquipmentSlot, handle: ItemHandle) -> Option<ItemHandle> {
        self.lifted_curses.remove(&slot);
        self.slots.insert(slot, handle)
    }

    /// Clears `slot`, returning its occupant.
    pub(crate) fn take(&mut self, slot: EquipmentSlot) -> Option<ItemHandle> {
        self.lifted_curses.remove(&slot);
        self.slots.remove(&slot)
    }

    /// Marks the occupant of `slot` as no longer cursed for this character.
    ///
    /// Returns false when the slot is empty.
    pub(crate) fn lift_curse(&mut self, slot: EquipmentSlot) -> bool {
        if !self.is_occupied(slot) {
            return false;
        }
        self.lifted_curses.insert(slot);
        true
    }

    pub(crate) fn from_parts(
        slots: BTreeMap<EquipmentSlot, ItemHandle>,
        lifted_curses: BTreeSet<EquipmentSlot>,
    ) -> Self {
        Self {
            slots,
            lifted_curses,
        }
    }

    pub(crate) fn slots(&self) -> &BTreeMap<EquipmentSlot, ItemHandle> {
        &self.slots
    }
}
