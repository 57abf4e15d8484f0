//! Stat aggregation over a loadout.
//!
//! `aggregate` is a pure function of (base scores, level, upgrades, equipped
//! definitions, tuning). The combat stance is derived from the hand slots, never
//! supplied independently.

use std::sync::Arc;

use super::bonus::{Bonus, BonusStack, StatLayer};
use super::core::{AbilityBase, AbilityBonuses, EffectiveAbilities};
use super::derived::{DerivedBonuses, DerivedStats};
use super::snapshot::StatsSnapshot;
use super::upgrades::PermanentUpgrades;
use crate::config::CombatTuning;
use crate::env::{EquipmentDefinition, ItemBonuses, ItemOracle};
use crate::state::{AbilityScores, Character, EquipmentSlot, ItemHandle, Loadout, WeaponHandedness};

/// Situational configuration derived from the hand slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatStance {
    /// Bare hands, a single weapon, or any other mix: no modifier.
    #[default]
    Standard,
    /// Main hand holds a two-handed weapon.
    TwoHanded,
    /// A one-handed weapon in the main hand and a weapon in the off hand.
    DualWielding,
    /// Off hand holds a shield.
    SwordAndBoard,
}

impl CombatStance {
    pub fn classify(
        main_hand: Option<&EquipmentDefinition>,
        off_hand: Option<&EquipmentDefinition>,
    ) -> Self {
        if main_hand.is_some_and(EquipmentDefinition::is_two_handed) {
            return CombatStance::TwoHanded;
        }
        match off_hand {
            Some(off) if off.is_shield() => CombatStance::SwordAndBoard,
            Some(off)
                if off.is_weapon()
                    && main_hand
                        .is_some_and(|main| main.handedness() == WeaponHandedness::OneHanded) =>
            {
                CombatStance::DualWielding
            }
            _ => CombatStance::Standard,
        }
    }

    /// Percentage applied to defense: 100 is neutral.
    pub fn defense_modifier(self, tuning: &CombatTuning) -> i32 {
        match self {
            CombatStance::TwoHanded => 100 - tuning.two_handed_defense_penalty,
            CombatStance::DualWielding => 100 - tuning.dual_wield_defense_penalty,
            CombatStance::Standard | CombatStance::SwordAndBoard => 100,
        }
    }
}

/// Everything the aggregator reads.
#[derive(Clone, Debug)]
pub struct AggregateInputs {
    pub abilities: AbilityScores,
    pub level: u16,
    pub upgrades: PermanentUpgrades,
    pub equipped: Vec<(EquipmentSlot, Arc<EquipmentDefinition>)>,
    pub tuning: CombatTuning,
}

impl AggregateInputs {
    /// Inputs for a character with nothing worn.
    pub fn unequipped(abilities: AbilityScores, level: u16, upgrades: PermanentUpgrades) -> Self {
        Self {
            abilities,
            level,
            upgrades,
            equipped: Vec::new(),
            tuning: CombatTuning::default(),
        }
    }

    /// Resolves every worn handle in `loadout` against the catalog.
    ///
    /// `loadout` may be a staged copy rather than the character's own.
    ///
    /// # Errors
    ///
    /// Returns the first handle that has no definition.
    pub fn resolve(
        character: &Character,
        loadout: &Loadout,
        catalog: &dyn ItemOracle,
        tuning: &CombatTuning,
    ) -> Result<Self, ItemHandle> {
        let equipped = loadout
            .iter()
            .map(|(slot, handle)| catalog.definition(handle).map(|def| (slot, def)).ok_or(handle))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            abilities: character.abilities,
            level: character.level,
            upgrades: character.upgrades,
            equipped,
            tuning: *tuning,
        })
    }

    fn in_slot(&self, slot: EquipmentSlot) -> Option<&EquipmentDefinition> {
        self.equipped
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|(_, def)| def.as_ref())
    }

    pub fn stance(&self) -> CombatStance {
        CombatStance::classify(
            self.in_slot(EquipmentSlot::MainHand),
            self.in_slot(EquipmentSlot::OffHand),
        )
    }

    /// Computes the full snapshot.
    pub fn aggregate(&self) -> StatsSnapshot {
        let stance = self.stance();
        let tuning = &self.tuning;

        // Off-hand attack is reweighted while dual-wielding; everything else sums.
        let mut total = ItemBonuses::default();
        let mut off_hand_attack = 0;
        for (slot, def) in &self.equipped {
            let mut bonuses = def.bonuses;
            if stance == CombatStance::DualWielding && *slot == EquipmentSlot::OffHand {
                off_hand_attack = bonuses.attack_power;
                bonuses.attack_power = 0;
            }
            total += bonuses;
        }

        let abilities = EffectiveAbilities::compute(
            &AbilityBase {
                scores: self.abilities,
                level: self.level,
            },
            &AbilityBonuses::from_items(&total),
        );

        // Stance factors scale the equipment contribution only; ability bases
        // and upgrades stay flat.
        let mut attack = BonusStack::new().flat(total.attack_power);
        let mut defense = BonusStack::new().flat(total.defense);
        match stance {
            CombatStance::TwoHanded => {
                attack.add(Bonus::More(tuning.two_handed_damage_bonus));
                defense.add(Bonus::Less(tuning.two_handed_defense_penalty));
            }
            CombatStance::DualWielding => {
                let weighted = off_hand_attack.saturating_mul(tuning.dual_wield_offhand_weight);
                attack.add_flat(weighted / 100);
                attack.add_flat(tuning.dual_wield_attack_bonus);
                defense.add(Bonus::Less(tuning.dual_wield_defense_penalty));
            }
            CombatStance::SwordAndBoard | CombatStance::Standard => {}
        }

        let mut bonuses = DerivedBonuses::default();
        bonuses.weapon_power.add_flat(attack.apply(0, i32::MIN, i32::MAX));
        bonuses.defense.add_flat(defense.apply(0, i32::MIN, i32::MAX));
        bonuses.armor_class.add_flat(total.armor_class);
        bonuses.block_chance.add_flat(total.block_chance);
        bonuses.magic_resistance.add_flat(total.magic_resistance);
        bonuses.max_hp.add_flat(total.hp);
        bonuses.max_mana.add_flat(total.mana);
        bonuses.critical_chance.add_flat(total.critical_chance);
        bonuses.lifesteal.add_flat(total.lifesteal);
        bonuses.poison.add_flat(total.poison);
        self.upgrades.contribute(&mut bonuses);

        let derived = DerivedStats::compute(&abilities, &bonuses);

        StatsSnapshot {
            abilities,
            derived,
            stance,
            defense_modifier: stance.defense_modifier(tuning),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::ItemCategory;

    fn weapon(name: &str, handedness: WeaponHandedness, attack: i32) -> Arc<EquipmentDefinition> {
        Arc::new(
            EquipmentDefinition::builder(name, ItemCategory::Weapon { handedness })
                .attack_power(attack)
                .build(),
        )
    }

    fn inputs(equipped: Vec<(EquipmentSlot, Arc<EquipmentDefinition>)>) -> AggregateInputs {
        AggregateInputs {
            equipped,
            ..AggregateInputs::unequipped(AbilityScores::default(), 4, PermanentUpgrades::empty())
        }
    }

    #[test]
    fn stance_is_derived_from_hand_slots() {
        let sword = weapon("Sword", WeaponHandedness::OneHanded, 6);
        let dagger = weapon("Parrying Dagger", WeaponHandedness::OffHandOnly, 2);
        let greatsword = weapon("Greatsword", WeaponHandedness::TwoHanded, 12);
        let shield = Arc::new(EquipmentDefinition::builder("Buckler", ItemCategory::Shield).build());

        let cases = [
            (vec![], CombatStance::Standard),
            (vec![(EquipmentSlot::MainHand, sword.clone())], CombatStance::Standard),
            (
                vec![(EquipmentSlot::MainHand, greatsword)],
                CombatStance::TwoHanded,
            ),
            (
                vec![
                    (EquipmentSlot::MainHand, sword.clone()),
                    (EquipmentSlot::OffHand, dagger.clone()),
                ],
                CombatStance::DualWielding,
            ),
            (
                vec![
                    (EquipmentSlot::MainHand, sword.clone()),
                    (EquipmentSlot::OffHand, shield.clone()),
                ],
                CombatStance::SwordAndBoard,
            ),
            (
                vec![(EquipmentSlot::OffHand, shield)],
                CombatStance::SwordAndBoard,
            ),
            (vec![(EquipmentSlot::OffHand, dagger)], CombatStance::Standard),
        ];

        for (equipped, expected) in cases {
            assert_eq!(inputs(equipped).stance(), expected);
        }
    }

    #[test]
    fn two_handed_grip_boosts_damage_and_penalizes_defense() {
        let greatsword = weapon("Greatsword", WeaponHandedness::TwoHanded, 11);
        let mut plate = EquipmentDefinition::builder(
            "Plate",
            ItemCategory::Armor {
                slot: EquipmentSlot::Body,
            },
        )
        .build();
        plate.bonuses.defense = 6;
        let plate = Arc::new(plate);

        let snapshot = inputs(vec![
            (EquipmentSlot::MainHand, greatsword),
            (EquipmentSlot::Body, plate),
        ])
        .aggregate();

        // 1 + 11 × 1.5 = 17; 2 + 6 × 0.75 = 6
        assert_eq!(snapshot.derived.weapon_power, 17);
        assert_eq!(snapshot.derived.defense, 6);
        assert_eq!(snapshot.defense_modifier, 75);
    }

    #[test]
    fn dual_wield_weighs_off_hand_at_half() {
        let snapshot = inputs(vec![
            (
                EquipmentSlot::MainHand,
                weapon("Sword", WeaponHandedness::OneHanded, 6),
            ),
            (
                EquipmentSlot::OffHand,
                weapon("Short Sword", WeaponHandedness::OneHanded, 4),
            ),
        ])
        .aggregate();

        // 1 + 6 + 4/2 + 5
        assert_eq!(snapshot.stance, CombatStance::DualWielding);
        assert_eq!(snapshot.derived.weapon_power, 14);
        assert_eq!(snapshot.defense_modifier, 85);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let inputs = inputs(vec![(
            EquipmentSlot::MainHand,
            weapon("Sword", WeaponHandedness::OneHanded, 6),
        )]);
        assert_eq!(inputs.aggregate(), inputs.aggregate());
    }

    #[test]
    fn upgrades_stay_flat_under_stance_factors() {
        let greatsword = weapon("Greatsword", WeaponHandedness::TwoHanded, 10);
        let plain = inputs(vec![(EquipmentSlot::MainHand, greatsword.clone())]).aggregate();
        let upgraded = AggregateInputs {
            equipped: vec![(EquipmentSlot::MainHand, greatsword)],
            ..AggregateInputs::unequipped(
                AbilityScores::default(),
                4,
                PermanentUpgrades::LEGENDARY_ARMORY | PermanentUpgrades::TRAINING_YARD,
            )
        }
        .aggregate();

        assert_eq!(plain.stance, CombatStance::TwoHanded);
        // 1 + 10 × 1.5; base and upgrades unscaled
        assert_eq!(plain.derived.weapon_power, 16);
        assert_eq!(upgraded.derived.weapon_power, plain.derived.weapon_power + 3);
        assert_eq!(upgraded.derived.defense, plain.derived.defense + 2);
    }

    #[test]
    fn dual_wield_penalty_hits_equipment_defense_only() {
        let mut vest = EquipmentDefinition::builder(
            "Padded Vest",
            ItemCategory::Armor {
                slot: EquipmentSlot::Body,
            },
        )
        .build();
        vest.bonuses.defense = 10;

        let snapshot = AggregateInputs {
            equipped: vec![
                (
                    EquipmentSlot::MainHand,
                    weapon("Sword", WeaponHandedness::OneHanded, 6),
                ),
                (
                    EquipmentSlot::OffHand,
                    weapon("Short Sword", WeaponHandedness::OneHanded, 4),
                ),
                (EquipmentSlot::Body, Arc::new(vest)),
            ],
            ..AggregateInputs::unequipped(
                AbilityScores::default(),
                4,
                PermanentUpgrades::TRAINING_YARD,
            )
        }
        .aggregate();

        // 2 (level 4) + 10 × 0.85 + 2 upgrade
        assert_eq!(snapshot.derived.defense, 12);
    }

    #[test]
    fn upgrades_fold_in_without_equipment() {
        let base = AggregateInputs::unequipped(
            AbilityScores::default(),
            1,
            PermanentUpgrades::empty(),
        )
        .aggregate();
        let upgraded = AggregateInputs::unequipped(
            AbilityScores::default(),
            1,
            PermanentUpgrades::LEGENDARY_ARMORY | PermanentUpgrades::VITALITY_FOUNTAIN,
        )
        .aggregate();

        assert_eq!(upgraded.derived.weapon_power, base.derived.weapon_power + 3);
        assert_eq!(upgraded.derived.armor_class, base.derived.armor_class + 2);
        assert_eq!(upgraded.derived.max_hp, base.derived.max_hp + 25);
    }
}
