//! Slot resolution.
//!
//! Given a definition and the current loadout, lists the legal target slots
//! and whether the caller must pick one. Never mutates state.

use arrayvec::ArrayVec;

use super::errors::LoadoutError;
use crate::env::{EquipmentDefinition, ItemCategory};
use crate::state::{EquipmentSlot, ItemHandle, Loadout, WeaponHandedness};

/// Candidate slots for one item, in resolution order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotResolution {
    pub item: ItemHandle,
    pub candidates: ArrayVec<EquipmentSlot, 2>,
    /// True when a slot choice is required.
    pub ambiguous: bool,
}

impl SlotResolution {
    /// Picks the target slot.
    ///
    /// # Errors
    ///
    /// - `AmbiguousSlotSelection` if a choice is required and none was given
    /// - `InvalidSlotForItem` if the choice is not a candidate
    pub fn select(&self, choice: Option<EquipmentSlot>) -> Result<EquipmentSlot, LoadoutError> {
        match choice {
            Some(slot) if self.candidates.contains(&slot) => Ok(slot),
            Some(slot) => Err(LoadoutError::InvalidSlotForItem {
                item: self.item,
                slot,
            }),
            None if self.ambiguous => Err(LoadoutError::AmbiguousSlotSelection {
                candidates: self.candidates.to_vec(),
            }),
            None => self
                .candidates
                .first()
                .copied()
                .ok_or(LoadoutError::InternalConsistency(self.item)),
        }
    }
}

/// Lists candidate slots for `definition`.
///
/// Rings and one-handed weapons always offer two slots and are always
/// ambiguous, even when one side is free: the caller may want to replace either.
/// The loadout is accepted so callers can present occupancy alongside the
/// candidates; it does not narrow them.
pub fn resolve_slots(definition: &EquipmentDefinition, _loadout: &Loadout) -> SlotResolution {
    let candidates = definition.eligible_slots();
    let ambiguous = match definition.category {
        ItemCategory::Ring => true,
        ItemCategory::Weapon { handedness } => handedness == WeaponHandedness::OneHanded,
        ItemCategory::Shield
        | ItemCategory::Armor { .. }
        | ItemCategory::Belt
        | ItemCategory::Amulet => false,
    };

    SlotResolution {
        item: definition.handle,
        candidates,
        ambiguous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(category: ItemCategory) -> EquipmentDefinition {
        EquipmentDefinition::builder("Test Item", category)
            .handle(ItemHandle(5))
            .build()
    }

    #[test]
    fn ring_is_always_ambiguous() {
        let mut loadout = Loadout::empty();
        loadout.put(EquipmentSlot::LeftFinger, ItemHandle(1));

        let resolution = resolve_slots(&def(ItemCategory::Ring), &loadout);
        assert!(resolution.ambiguous);
        assert_eq!(
            resolution.select(None),
            Err(LoadoutError::AmbiguousSlotSelection {
                candidates: vec![EquipmentSlot::LeftFinger, EquipmentSlot::RightFinger],
            })
        );
        assert_eq!(
            resolution.select(Some(EquipmentSlot::RightFinger)),
            Ok(EquipmentSlot::RightFinger)
        );
    }

    #[test]
    fn single_slot_items_need_no_choice() {
        let loadout = Loadout::empty();
        let cases = [
            (
                ItemCategory::Weapon {
                    handedness: WeaponHandedness::TwoHanded,
                },
                EquipmentSlot::MainHand,
            ),
            (ItemCategory::Shield, EquipmentSlot::OffHand),
            (ItemCategory::Belt, EquipmentSlot::Waist),
            (ItemCategory::Amulet, EquipmentSlot::Neck),
            (
                ItemCategory::Armor {
                    slot: EquipmentSlot::Cloak,
                },
                EquipmentSlot::Cloak,
            ),
        ];

        for (category, slot) in cases {
            let resolution = resolve_slots(&def(category), &loadout);
            assert!(!resolution.ambiguous);
            assert_eq!(resolution.select(None), Ok(slot));
        }
    }

    #[test]
    fn choice_outside_candidates_is_rejected() {
        let one_handed = def(ItemCategory::Weapon {
            handedness: WeaponHandedness::OneHanded,
        });
        let resolution = resolve_slots(&one_handed, &Loadout::empty());

        assert_eq!(resolution.candidates.as_slice(), &EquipmentSlot::HANDS);
        assert_eq!(
            resolution.select(Some(EquipmentSlot::Head)),
            Err(LoadoutError::InvalidSlotForItem {
                item: ItemHandle(5),
                slot: EquipmentSlot::Head,
            })
        );
    }
}
