//! Layer 2: derived combat stats.
//!
//! Pure functions of [`EffectiveAbilities`] plus equipment, upgrade and
//! stance bonuses. Never stored outside the cached snapshot.

use super::bonus::{BonusStack, StatBounds, StatLayer};
use super::core::EffectiveAbilities;

/// Derived combat statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DerivedStats {
    /// Effective weapon power (damage scaling)
    pub weapon_power: i32,
    pub defense: i32,
    pub armor_class: i32,
    /// Shield block chance in percent
    pub block_chance: i32,
    pub magic_resistance: i32,
    pub max_hp: i32,
    pub max_mana: i32,
    pub critical_chance: i32,
    pub lifesteal: i32,
    pub poison: i32,
}

impl DerivedStats {
    /// Base values before any bonus:
    /// - Weapon power: 1 + STR mod (bare hands)
    /// - Defense: level / 2 + CON mod
    /// - AC: 10 + DEX mod
    /// - Magic resistance: WIS mod, never negative
    /// - HP: 50 + 10 × level + 5 × CON mod
    /// - Mana: 20 + 5 × level + 5 × INT mod
    /// - Critical: 5 + DEX mod, never below 5
    fn compute_base(core: &EffectiveAbilities) -> Self {
        let level = i32::from(core.level);
        Self {
            weapon_power: 1 + core.str_mod(),
            defense: level / 2 + core.con_mod(),
            armor_class: 10 + core.dex_mod(),
            block_chance: 0,
            magic_resistance: core.wis_mod().max(0),
            max_hp: 50 + 10 * level + 5 * core.con_mod(),
            max_mana: 20 + 5 * level + 5 * core.int_mod(),
            critical_chance: 5 + core.dex_mod().max(0),
            lifesteal: 0,
            poison: 0,
        }
    }
}

/// Bonuses that apply to derived stats.
///
/// Sources: worn equipment, permanent upgrades, combat stance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DerivedBonuses {
    pub weapon_power: BonusStack,
    pub defense: BonusStack,
    pub armor_class: BonusStack,
    pub block_chance: BonusStack,
    pub magic_resistance: BonusStack,
    pub max_hp: BonusStack,
    pub max_mana: BonusStack,
    pub critical_chance: BonusStack,
    pub lifesteal: BonusStack,
    pub poison: BonusStack,
}

impl StatLayer for DerivedStats {
    type Base = EffectiveAbilities;
    type Bonuses = DerivedBonuses;
    type Final = Self;

    fn compute(base: &Self::Base, bonuses: &Self::Bonuses) -> Self::Final {
        let b = Self::compute_base(base);

        Self {
            weapon_power: bonuses
                .weapon_power
                .apply_bounded(b.weapon_power, StatBounds::COMBAT),
            defense: bonuses.defense.apply_bounded(b.defense, StatBounds::COMBAT),
            armor_class: bonuses
                .armor_class
                .apply_bounded(b.armor_class, StatBounds::COMBAT),
            block_chance: bonuses
                .block_chance
                .apply_bounded(b.block_chance, StatBounds::BLOCK),
            magic_resistance: bonuses
                .magic_resistance
                .apply_bounded(b.magic_resistance, StatBounds::PERCENT),
            max_hp: bonuses.max_hp.apply_bounded(b.max_hp, StatBounds::HIT_POINTS),
            max_mana: bonuses.max_mana.apply_bounded(b.max_mana, StatBounds::MANA),
            critical_chance: bonuses
                .critical_chance
                .apply_bounded(b.critical_chance, StatBounds::PERCENT),
            lifesteal: bonuses
                .lifesteal
                .apply_bounded(b.lifesteal, StatBounds::PERCENT),
            poison: bonuses.poison.apply_bounded(b.poison, StatBounds::PERCENT),
        }
    }
}
