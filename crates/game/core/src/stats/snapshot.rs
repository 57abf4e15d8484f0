//! Cached derived stats for a character.
//!
//! A snapshot is written by the engine after every successful loadout
//! mutation and is never assumed current outside those triggers.

use super::aggregate::{AggregateInputs, CombatStance};
use super::core::EffectiveAbilities;
use super::derived::DerivedStats;
use super::upgrades::PermanentUpgrades;
use crate::state::AbilityScores;

/// Complete derived stat set at the last recomputation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSnapshot {
    /// Ability scores after item bonuses (layer 1)
    pub abilities: EffectiveAbilities,

    /// Derived combat stats (layer 2)
    pub derived: DerivedStats,

    /// Situational configuration the snapshot was computed under
    pub stance: CombatStance,

    /// Defense multiplier in percent; 100 is neutral
    pub defense_modifier: i32,
}

impl StatsSnapshot {
    /// Snapshot for a character with nothing worn.
    pub fn unequipped(abilities: &AbilityScores, level: u16, upgrades: PermanentUpgrades) -> Self {
        AggregateInputs::unequipped(*abilities, level, upgrades).aggregate()
    }

    /// True when the stance applies a defense penalty.
    pub fn is_defense_penalized(&self) -> bool {
        self.defense_modifier < 100
    }
}
