//! Layer 1: effective ability scores.
//!
//! EffectiveAbilities = clamp(Base + item ability bonuses, 1, 99)

use super::bonus::{BonusStack, StatBounds, StatLayer};
use crate::env::ItemBonuses;
use crate::state::AbilityScores;

/// Ability bonuses gathered from worn equipment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AbilityBonuses {
    pub strength: BonusStack,
    pub dexterity: BonusStack,
    pub constitution: BonusStack,
    pub intelligence: BonusStack,
    pub wisdom: BonusStack,
    pub charisma: BonusStack,
}

impl AbilityBonuses {
    pub fn from_items(total: &ItemBonuses) -> Self {
        let mut bonuses = Self::default();
        bonuses.strength.add_flat(total.strength);
        bonuses.dexterity.add_flat(total.dexterity);
        bonuses.constitution.add_flat(total.constitution);
        bonuses.intelligence.add_flat(total.intelligence);
        bonuses.wisdom.add_flat(total.wisdom);
        bonuses.charisma.add_flat(total.charisma);
        bonuses
    }
}

/// Base scores with equipment applied, plus the character level.
///
/// Never stored; recomputed with the rest of the snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectiveAbilities {
    pub scores: AbilityScores,
    pub level: u16,
}

impl EffectiveAbilities {
    pub fn str_mod(&self) -> i32 {
        AbilityScores::modifier(self.scores.strength)
    }

    pub fn dex_mod(&self) -> i32 {
        AbilityScores::modifier(self.scores.dexterity)
    }

    pub fn con_mod(&self) -> i32 {
        AbilityScores::modifier(self.scores.constitution)
    }

    pub fn int_mod(&self) -> i32 {
        AbilityScores::modifier(self.scores.intelligence)
    }

    pub fn wis_mod(&self) -> i32 {
        AbilityScores::modifier(self.scores.wisdom)
    }
}

/// Base for layer 1: the stored scores and level.
#[derive(Clone, Copy, Debug)]
pub struct AbilityBase {
    pub scores: AbilityScores,
    pub level: u16,
}

impl StatLayer for EffectiveAbilities {
    type Base = AbilityBase;
    type Bonuses = AbilityBonuses;
    type Final = Self;

    fn compute(base: &Self::Base, bonuses: &Self::Bonuses) -> Self::Final {
        const BOUNDS: StatBounds = StatBounds::ABILITY;
        let s = &base.scores;

        Self {
            scores: AbilityScores {
                strength: bonuses.strength.apply_bounded(s.strength, BOUNDS),
                dexterity: bonuses.dexterity.apply_bounded(s.dexterity, BOUNDS),
                constitution: bonuses.constitution.apply_bounded(s.constitution, BOUNDS),
                intelligence: bonuses.intelligence.apply_bounded(s.intelligence, BOUNDS),
                wisdom: bonuses.wisdom.apply_bounded(s.wisdom, BOUNDS),
                charisma: bonuses.charisma.apply_bounded(s.charisma, BOUNDS),
            },
            level: base.level,
        }
    }
}
