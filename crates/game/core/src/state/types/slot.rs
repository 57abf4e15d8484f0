//! Body and hand slots.

use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

/// Attachment point on a character that holds at most one item.
///
/// The "no slot" sentinel is expressed as `Option<EquipmentSlot>::None`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumCount, EnumIter, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentSlot {
    MainHand,
    OffHand,
    Head,
    Body,
    Arms,
    Hands,
    Legs,
    Feet,
    Waist,
    Neck,
    SecondaryNeck,
    LeftFinger,
    RightFinger,
    Cloak,
    Face,
}

impl EquipmentSlot {
    /// Both finger slots, in resolution order.
    pub const FINGERS: [EquipmentSlot; 2] = [EquipmentSlot::LeftFinger, EquipmentSlot::RightFinger];

    /// Both hand slots, in resolution order.
    pub const HANDS: [EquipmentSlot; 2] = [EquipmentSlot::MainHand, EquipmentSlot::OffHand];

    pub fn is_hand(self) -> bool {
        matches!(self, EquipmentSlot::MainHand | EquipmentSlot::OffHand)
    }

    pub fn is_finger(self) -> bool {
        matches!(self, EquipmentSlot::LeftFinger | EquipmentSlot::RightFinger)
    }

    /// Slots an `Armor` item may declare.
    ///
    /// Hands, fingers, waist and neck belong to their own item categories.
    pub fn is_armor_slot(self) -> bool {
        matches!(
            self,
            EquipmentSlot::Head
                | EquipmentSlot::Body
                | EquipmentSlot::Arms
                | EquipmentSlot::Hands
                | EquipmentSlot::Legs
                | EquipmentSlot::Feet
                | EquipmentSlot::SecondaryNeck
                | EquipmentSlot::Cloak
                | EquipmentSlot::Face
        )
    }

    /// Returns the opposite hand for hand slots.
    pub fn other_hand(self) -> Option<EquipmentSlot> {
        match self {
            EquipmentSlot::MainHand => Some(EquipmentSlot::OffHand),
            EquipmentSlot::OffHand => Some(EquipmentSlot::MainHand),
            _ => None,
        }
    }
}

/// A weapon's hand occupancy requirement.
///
/// Defines cross-slot constraints, not a slot itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeaponHandedness {
    /// Not held in a hand (armor, jewelry).
    #[default]
    None,
    /// Fits either hand.
    OneHanded,
    /// Occupies the main hand and requires the off hand to be empty.
    TwoHanded,
    /// Off hand only (shields, parrying daggers).
    OffHandOnly,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn other_hand_is_symmetric() {
        for slot in EquipmentSlot::iter() {
            if let Some(other) = slot.other_hand() {
                assert_eq!(other.other_hand(), Some(slot));
                assert!(slot.is_hand());
            } else {
                assert!(!slot.is_hand());
            }
        }
    }

    #[test]
    fn armor_slots_exclude_category_slots() {
        assert!(!EquipmentSlot::MainHand.is_armor_slot());
        assert!(!EquipmentSlot::LeftFinger.is_armor_slot());
        assert!(!EquipmentSlot::Waist.is_armor_slot());
        assert!(!EquipmentSlot::Neck.is_armor_slot());
        assert!(EquipmentSlot::Body.is_armor_slot());
        assert_eq!(EquipmentSlot::COUNT, 15);
    }
}
