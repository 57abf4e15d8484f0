//! Permanent upgrades bought at the home location.
//!
//! Upgrades are flat additions independent of the loadout; they are folded
//! into the same derived bonus stacks as equipment.

use bitflags::bitflags;

use super::derived::DerivedBonuses;

bitflags! {
    /// Upgrade flags owned by a character.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct PermanentUpgrades: u8 {
        /// +3 weapon power, +2 armor class
        const LEGENDARY_ARMORY  = 1 << 0;
        /// +25 max HP
        const VITALITY_FOUNTAIN = 1 << 1;
        /// +20 max mana
        const ARCANE_WELLSPRING = 1 << 2;
        /// +10 magic resistance
        const WARDING_SHRINE    = 1 << 3;
        /// +2 defense
        const TRAINING_YARD     = 1 << 4;
    }
}

impl PermanentUpgrades {
    /// Adds the flat bonuses for every owned upgrade.
    pub fn contribute(self, bonuses: &mut DerivedBonuses) {
        if self.contains(Self::LEGENDARY_ARMORY) {
            bonuses.weapon_power.add_flat(3);
            bonuses.armor_class.add_flat(2);
        }
        if self.contains(Self::VITALITY_FOUNTAIN) {
            bonuses.max_hp.add_flat(25);
        }
        if self.contains(Self::ARCANE_WELLSPRING) {
            bonuses.max_mana.add_flat(20);
        }
        if self.contains(Self::WARDING_SHRINE) {
            bonuses.magic_resistance.add_flat(10);
        }
        if self.contains(Self::TRAINING_YARD) {
            bonuses.defense.add_flat(2);
        }
    }
}
