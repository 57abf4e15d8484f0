//! Shared catalog and characters for engine tests.

use crate::env::{EquipmentDefinition, ItemCatalog, ItemCategory, RestrictionFlags};
use crate::state::{
    AbilityScores, Character, CharacterId, CharacterKind, EquipmentSlot, ItemHandle,
    WeaponHandedness,
};

pub const LONGSWORD: ItemHandle = ItemHandle(1);
pub const KITE_SHIELD: ItemHandle = ItemHandle(2);
pub const GREATSWORD: ItemHandle = ItemHandle(3);
pub const PROTECTION_RING: ItemHandle = ItemHandle(4);
pub const BINDING_BAND: ItemHandle = ItemHandle(5);
pub const IRON_HELM: ItemHandle = ItemHandle(6);
pub const LEATHER_BOOTS: ItemHandle = ItemHandle(7);
pub const DAGGER: ItemHandle = ItemHandle(8);
pub const HOLY_AVENGER: ItemHandle = ItemHandle(9);
pub const GRIM_BUCKLER: ItemHandle = ItemHandle(10);
pub const ROPE_BELT: ItemHandle = ItemHandle(11);
pub const STEEL_SALLET: ItemHandle = ItemHandle(12);

fn weapon(handle: ItemHandle, name: &str, handedness: WeaponHandedness) -> EquipmentDefinition {
    EquipmentDefinition::builder(name, ItemCategory::Weapon { handedness })
        .handle(handle)
        .build()
}

fn armor(handle: ItemHandle, name: &str, slot: EquipmentSlot, ac: i32) -> EquipmentDefinition {
    EquipmentDefinition::builder(name, ItemCategory::Armor { slot })
        .handle(handle)
        .armor_class(ac)
        .build()
}

pub fn catalog() -> ItemCatalog {
    let mut longsword = weapon(LONGSWORD, "Longsword", WeaponHandedness::OneHanded);
    longsword.bonuses.attack_power = 6;
    let mut greatsword = weapon(GREATSWORD, "Greatsword", WeaponHandedness::TwoHanded);
    greatsword.bonuses.attack_power = 12;
    greatsword.requirements.min_strength = 12;
    let mut dagger = weapon(DAGGER, "Dagger", WeaponHandedness::OneHanded);
    dagger.bonuses.attack_power = 3;

    let definitions = [
        longsword,
        EquipmentDefinition::builder("Kite Shield", ItemCategory::Shield)
            .handle(KITE_SHIELD)
            .armor_class(3)
            .block_chance(20)
            .defense(2)
            .build(),
        greatsword,
        EquipmentDefinition::builder("Ring of Protection", ItemCategory::Ring)
            .handle(PROTECTION_RING)
            .armor_class(1)
            .build(),
        EquipmentDefinition::builder("Band of Binding", ItemCategory::Ring)
            .handle(BINDING_BAND)
            .cursed()
            .build(),
        armor(IRON_HELM, "Iron Helm", EquipmentSlot::Head, 2),
        armor(LEATHER_BOOTS, "Leather Boots", EquipmentSlot::Feet, 1),
        dagger,
        EquipmentDefinition::builder(
            "Holy Avenger",
            ItemCategory::Weapon {
                handedness: WeaponHandedness::OneHanded,
            },
        )
        .handle(HOLY_AVENGER)
        .attack_power(9)
        .min_level(5)
        .restriction(RestrictionFlags::GOOD_ONLY)
        .build(),
        EquipmentDefinition::builder("Grim Buckler", ItemCategory::Shield)
            .handle(GRIM_BUCKLER)
            .armor_class(1)
            .cursed()
            .build(),
        EquipmentDefinition::builder("Rope Belt", ItemCategory::Belt)
            .handle(ROPE_BELT)
            .build(),
        armor(STEEL_SALLET, "Steel Sallet", EquipmentSlot::Head, 3),
    ];

    ItemCatalog::from_definitions(definitions).expect("fixture catalog is valid")
}

/// Level 4, strength 14, good-aligned player carrying `items`.
pub fn hero(items: &[ItemHandle]) -> Character {
    let mut hero = Character::new(CharacterId::PLAYER, "Hero", CharacterKind::Player)
        .with_level(4)
        .with_abilities(AbilityScores {
            strength: 14,
            ..AbilityScores::default()
        })
        .with_alignment(5);
    for item in items {
        hero.receive_item(*item).expect("fixture inventory fits");
    }
    hero
}

/// Level 3 companion with room for `capacity` items.
pub fn companion(capacity: u16, items: &[ItemHandle]) -> Character {
    let mut companion = Character::new(CharacterId(1), "Lyra", CharacterKind::Companion)
        .with_level(3)
        .with_abilities(AbilityScores {
            strength: 12,
            ..AbilityScores::default()
        })
        .with_inventory_capacity(capacity);
    for item in items {
        companion.receive_item(*item).expect("fixture inventory fits");
    }
    companion
}

/// Every item a character holds, worn or carried, sorted.
pub fn holdings(character: &Character) -> Vec<ItemHandle> {
    let mut all: Vec<_> = character
        .loadout()
        .iter()
        .map(|(_, handle)| handle)
        .chain(character.inventory().iter())
        .collect();
    all.sort();
    all
}
