//! Equip-time restriction gates.
//!
//! Order: minimum level, minimum strength, alignment. The same check is public
//! so shops can warn at purchase time; purchase and equip remain independent.

use super::errors::RestrictionFailure;
use crate::env::{EquipmentDefinition, RestrictionFlags};
use crate::state::Character;

/// Returns the first gate `character` fails for `definition`.
///
/// Strength is the base score: item bonuses do not lift a character over
/// another item's strength gate. Alignment is good when strictly positive and
/// evil when strictly negative.
pub fn check_restrictions(
    definition: &EquipmentDefinition,
    character: &Character,
) -> Result<(), RestrictionFailure> {
    let requirements = &definition.requirements;

    if character.level < requirements.min_level {
        return Err(RestrictionFailure::LevelTooLow {
            required: requirements.min_level,
            actual: character.level,
        });
    }

    let strength = character.abilities.strength;
    if strength < requirements.min_strength {
        return Err(RestrictionFailure::StrengthTooLow {
            required: requirements.min_strength,
            actual: strength,
        });
    }

    let alignment = character.alignment;
    if requirements.flags.contains(RestrictionFlags::GOOD_ONLY) && alignment <= 0 {
        return Err(RestrictionFailure::RequiresGoodAlignment { alignment });
    }
    if requirements.flags.contains(RestrictionFlags::EVIL_ONLY) && alignment >= 0 {
        return Err(RestrictionFailure::RequiresEvilAlignment { alignment });
    }

    Ok(())
}
