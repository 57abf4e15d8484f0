use std::sync::Arc;

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::state::{EquipmentSlot, ItemHandle, WeaponHandedness};

/// Read-only access to equipment definitions.
///
/// Lookups return shared definitions; a definition is never mutated after it
/// enters a catalog.
pub trait ItemOracle: Send + Sync {
    fn definition(&self, handle: ItemHandle) -> Option<Arc<EquipmentDefinition>>;

    /// Case-insensitive lookup by display name.
    fn find_by_name(&self, name: &str) -> Option<Arc<EquipmentDefinition>>;

    /// Returns all definitions, ordered by handle.
    fn all_definitions(&self) -> Vec<Arc<EquipmentDefinition>>;
}

/// Immutable equipment template.
///
/// # Design: Base + Category Pattern
///
/// - Base struct holds fields shared by every item (name, bonuses, value, gates)
/// - `category` is a closed tagged variant carrying per-category data, so slot
///   and handedness rules are exhaustive matches instead of integer casts
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentDefinition {
    pub handle: ItemHandle,
    pub name: String,
    pub category: ItemCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonuses: ItemBonuses,
    /// Currency cost; also the sell basis for shops.
    #[cfg_attr(feature = "serde", serde(default))]
    pub value: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirements: Requirements,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cursed: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
}

impl EquipmentDefinition {
    /// Starts a builder for a definition with zero bonuses and no gates.
    pub fn builder(name: impl Into<String>, category: ItemCategory) -> EquipmentBuilder {
        EquipmentBuilder::new(name, category)
    }

    /// Slots this item may legally occupy, in resolution order.
    pub fn eligible_slots(&self) -> ArrayVec<EquipmentSlot, 2> {
        self.category.eligible_slots()
    }

    pub fn handedness(&self) -> WeaponHandedness {
        self.category.handedness()
    }

    pub fn is_two_handed(&self) -> bool {
        self.handedness() == WeaponHandedness::TwoHanded
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self.category, ItemCategory::Weapon { .. })
    }

    pub fn is_shield(&self) -> bool {
        matches!(self.category, ItemCategory::Shield)
    }

    /// Checks that the category's slot and handedness data is coherent.
    ///
    /// Returns a short reason on failure.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty");
        }
        match self.category {
            ItemCategory::Weapon {
                handedness: WeaponHandedness::None,
            } => return Err("weapons must declare a handedness"),
            ItemCategory::Armor { slot } if !slot.is_armor_slot() => {
                return Err("armor slot must be a body slot");
            }
            _ => {}
        }
        if self
            .requirements
            .flags
            .contains(RestrictionFlags::GOOD_ONLY | RestrictionFlags::EVIL_ONLY)
        {
            return Err("item cannot be both good-only and evil-only");
        }
        if !self.bonuses.within(ItemBonuses::MAX_MAGNITUDE) {
            return Err("bonus magnitude out of range");
        }
        Ok(())
    }
}

/// Closed set of equipment categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemCategory {
    Weapon { handedness: WeaponHandedness },
    Shield,
    Armor { slot: EquipmentSlot },
    Ring,
    Belt,
    Amulet,
}

impl ItemCategory {
    pub fn eligible_slots(self) -> ArrayVec<EquipmentSlot, 2> {
        let mut slots = ArrayVec::new();
        match self {
            ItemCategory::Weapon { handedness } => match handedness {
                WeaponHandedness::OneHanded => slots.extend(EquipmentSlot::HANDS),
                WeaponHandedness::TwoHanded => slots.push(EquipmentSlot::MainHand),
                WeaponHandedness::OffHandOnly => slots.push(EquipmentSlot::OffHand),
                WeaponHandedness::None => {}
            },
            ItemCategory::Shield => slots.push(EquipmentSlot::OffHand),
            ItemCategory::Armor { slot } => slots.push(slot),
            ItemCategory::Ring => slots.extend(EquipmentSlot::FINGERS),
            ItemCategory::Belt => slots.push(EquipmentSlot::Waist),
            ItemCategory::Amulet => slots.push(EquipmentSlot::Neck),
        }
        slots
    }

    /// Shields behave as off-hand-only; non-weapons have no handedness.
    pub fn handedness(self) -> WeaponHandedness {
        match self {
            ItemCategory::Weapon { handedness } => handedness,
            ItemCategory::Shield => WeaponHandedness::OffHandOnly,
            ItemCategory::Armor { .. }
            | ItemCategory::Ring
            | ItemCategory::Belt
            | ItemCategory::Amulet => WeaponHandedness::None,
        }
    }
}

/// Flat numeric bonuses granted while worn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ItemBonuses {
    pub attack_power: i32,
    pub armor_class: i32,
    pub block_chance: i32,
    pub defense: i32,

    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,

    pub hp: i32,
    pub mana: i32,
    pub magic_resistance: i32,
    pub critical_chance: i32,
    pub lifesteal: i32,
    pub poison: i32,
}

impl ItemBonuses {
    /// Largest absolute value any single bonus field may carry.
    pub const MAX_MAGNITUDE: i32 = 10_000;

    fn values(&self) -> [i32; 16] {
        [
            self.attack_power,
            self.armor_class,
            self.block_chance,
            self.defense,
            self.strength,
            self.dexterity,
            self.constitution,
            self.intelligence,
            self.wisdom,
            self.charisma,
            self.hp,
            self.mana,
            self.magic_resistance,
            self.critical_chance,
            self.lifesteal,
            self.poison,
        ]
    }

    /// True when every field lies in `-limit..=limit`.
    pub fn within(&self, limit: i32) -> bool {
        self.values().iter().all(|v| v.unsigned_abs() <= limit.unsigned_abs())
    }
}

impl std::ops::AddAssign for ItemBonuses {
    fn add_assign(&mut self, rhs: Self) {
        self.attack_power = self.attack_power.saturating_add(rhs.attack_power);
        self.armor_class = self.armor_class.saturating_add(rhs.armor_class);
        self.block_chance = self.block_chance.saturating_add(rhs.block_chance);
        self.defense = self.defense.saturating_add(rhs.defense);
        self.strength = self.strength.saturating_add(rhs.strength);
        self.dexterity = self.dexterity.saturating_add(rhs.dexterity);
        self.constitution = self.constitution.saturating_add(rhs.constitution);
        self.intelligence = self.intelligence.saturating_add(rhs.intelligence);
        self.wisdom = self.wisdom.saturating_add(rhs.wisdom);
        self.charisma = self.charisma.saturating_add(rhs.charisma);
        self.hp = self.hp.saturating_add(rhs.hp);
        self.mana = self.mana.saturating_add(rhs.mana);
        self.magic_resistance = self.magic_resistance.saturating_add(rhs.magic_resistance);
        self.critical_chance = self.critical_chance.saturating_add(rhs.critical_chance);
        self.lifesteal = self.lifesteal.saturating_add(rhs.lifesteal);
        self.poison = self.poison.saturating_add(rhs.poison);
    }
}

bitflags! {
    /// Alignment gates on an item.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct RestrictionFlags: u8 {
        const GOOD_ONLY = 1 << 0;
        const EVIL_ONLY = 1 << 1;
    }
}

/// Equip-time gates, checked in field order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Requirements {
    pub min_level: u16,
    pub min_strength: i32,
    pub flags: RestrictionFlags,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Builder for [`EquipmentDefinition`].
///
/// The handle is left unassigned (`ItemHandle(0)`) until the catalog inserts
/// or registers the definition.
#[derive(Clone, Debug)]
pub struct EquipmentBuilder {
    definition: EquipmentDefinition,
}

impl EquipmentBuilder {
    pub fn new(name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            definition: EquipmentDefinition {
                handle: ItemHandle(0),
                name: name.into(),
                category,
                bonuses: ItemBonuses::default(),
                value: 0,
                requirements: Requirements::default(),
                cursed: false,
                rarity: Rarity::Common,
            },
        }
    }

    pub fn handle(mut self, handle: ItemHandle) -> Self {
        self.definition.handle = handle;
        self
    }

    pub fn bonuses(mut self, bonuses: ItemBonuses) -> Self {
        self.definition.bonuses = bonuses;
        self
    }

    pub fn attack_power(mut self, value: i32) -> Self {
        self.definition.bonuses.attack_power = value;
        self
    }

    pub fn armor_class(mut self, value: i32) -> Self {
        self.definition.bonuses.armor_class = value;
        self
    }

    pub fn block_chance(mut self, value: i32) -> Self {
        self.definition.bonuses.block_chance = value;
        self
    }

    pub fn defense(mut self, value: i32) -> Self {
        self.definition.bonuses.defense = value;
        self
    }

    pub fn value(mut self, value: u32) -> Self {
        self.definition.value = value;
        self
    }

    pub fn min_level(mut self, level: u16) -> Self {
        self.definition.requirements.min_level = level;
        self
    }

    pub fn min_strength(mut self, strength: i32) -> Self {
        self.definition.requirements.min_strength = strength;
        self
    }

    pub fn restriction(mut self, flags: RestrictionFlags) -> Self {
        self.definition.requirements.flags |= flags;
        self
    }

    pub fn cursed(mut self) -> Self {
        self.definition.cursed = true;
        self
    }

    pub fn rarity(mut self, rarity: Rarity) -> Self {
        self.definition.rarity = rarity;
        self
    }

    pub fn build(self) -> EquipmentDefinition {
        self.definition
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_slots_follow_handedness() {
        let one = ItemCategory::Weapon {
            handedness: WeaponHandedness::OneHanded,
        };
        assert_eq!(one.eligible_slots().as_slice(), &EquipmentSlot::HANDS);

        let two = ItemCategory::Weapon {
            handedness: WeaponHandedness::TwoHanded,
        };
        assert_eq!(two.eligible_slots().as_slice(), &[EquipmentSlot::MainHand]);

        assert_eq!(
            ItemCategory::Shield.eligible_slots().as_slice(),
            &[EquipmentSlot::OffHand]
        );
        assert_eq!(
            ItemCategory::Shield.handedness(),
            WeaponHandedness::OffHandOnly
        );
        assert_eq!(ItemCategory::Ring.eligible_slots().as_slice(), &EquipmentSlot::FINGERS);
    }

    #[test]
    fn validate_rejects_incoherent_definitions() {
        let unhanded = EquipmentDefinition::builder(
            "Stick",
            ItemCategory::Weapon {
                handedness: WeaponHandedness::None,
            },
        )
        .build();
        assert!(unhanded.validate().is_err());

        let ring_armor = EquipmentDefinition::builder(
            "Finger Plate",
            ItemCategory::Armor {
                slot: EquipmentSlot::LeftFinger,
            },
        )
        .build();
        assert!(ring_armor.validate().is_err());

        let conflicted = EquipmentDefinition::builder("Grey Band", ItemCategory::Ring)
            .restriction(RestrictionFlags::GOOD_ONLY | RestrictionFlags::EVIL_ONLY)
            .build();
        assert!(conflicted.validate().is_err());

        let helm = EquipmentDefinition::builder(
            "Iron Helm",
            ItemCategory::Armor {
                slot: EquipmentSlot::Head,
            },
        )
        .armor_class(2)
        .build();
        assert_eq!(helm.validate(), Ok(()));
    }

    #[test]
    fn bonuses_sum_field_by_field() {
        let mut total = ItemBonuses {
            attack_power: 3,
            hp: 10,
            ..Default::default()
        };
        total += ItemBonuses {
            attack_power: 2,
            strength: 1,
            ..Default::default()
        };
        assert_eq!(total.attack_power, 5);
        assert_eq!(total.hp, 10);
        assert_eq!(total.strength, 1);

        total += ItemBonuses {
            attack_power: i32::MAX,
            ..Default::default()
        };
        assert_eq!(total.attack_power, i32::MAX);
    }

    #[test]
    fn oversized_bonuses_fail_validation() {
        let blade = EquipmentDefinition::builder(
            "Worldsplitter",
            ItemCategory::Weapon {
                handedness: WeaponHandedness::OneHanded,
            },
        )
        .attack_power(ItemBonuses::MAX_MAGNITUDE + 1)
        .build();
        assert_eq!(blade.validate(), Err("bonus magnitude out of range"));

        let curse = EquipmentDefinition::builder("Ring of Ruin", ItemCategory::Ring)
            .armor_class(-ItemBonuses::MAX_MAGNITUDE)
            .build();
        assert_eq!(curse.validate(), Ok(()));
    }
}
