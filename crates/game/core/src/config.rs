/// Loadout configuration constants and tunable combat parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadoutConfig {
    /// Situational modifiers applied by the stat aggregator.
    #[cfg_attr(feature = "serde", serde(default))]
    pub tuning: CombatTuning,
}

impl LoadoutConfig {
    // ===== compile-time constants used as type parameters =====
    /// Hard upper bound for any inventory. Per-character capacity may be lower.
    pub const MAX_INVENTORY_SLOTS: usize = 40;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_PLAYER_CAPACITY: u16 = 30;
    pub const DEFAULT_COMPANION_CAPACITY: u16 = 12;

    /// First handle handed out to items registered at runtime.
    ///
    /// Static catalog entries must stay below this value.
    pub const DYNAMIC_HANDLE_BASE: u32 = 100_000;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tuning(tuning: CombatTuning) -> Self {
        Self { tuning }
    }
}

/// Fixed factors applied for each situational combat configuration.
///
/// Percentages follow the bonus stack convention: `50` on a "more" modifier
/// means ×1.5, `25` on a "less" modifier means ×0.75.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatTuning {
    /// Extra weapon damage for a two-handed grip (more %).
    pub two_handed_damage_bonus: i32,
    /// Defense penalty while holding a two-handed weapon (less %).
    pub two_handed_defense_penalty: i32,
    /// Weight of the off-hand weapon's attack power while dual-wielding (%).
    pub dual_wield_offhand_weight: i32,
    /// Flat attack added while dual-wielding.
    pub dual_wield_attack_bonus: i32,
    /// Defense penalty while dual-wielding (less %).
    pub dual_wield_defense_penalty: i32,
}

impl CombatTuning {
    pub const DEFAULT_TWO_HANDED_DAMAGE_BONUS: i32 = 50;
    pub const DEFAULT_TWO_HANDED_DEFENSE_PENALTY: i32 = 25;
    pub const DEFAULT_DUAL_WIELD_OFFHAND_WEIGHT: i32 = 50;
    pub const DEFAULT_DUAL_WIELD_ATTACK_BONUS: i32 = 5;
    pub const DEFAULT_DUAL_WIELD_DEFENSE_PENALTY: i32 = 15;
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            two_handed_damage_bonus: Self::DEFAULT_TWO_HANDED_DAMAGE_BONUS,
            two_handed_defense_penalty: Self::DEFAULT_TWO_HANDED_DEFENSE_PENALTY,
            dual_wield_offhand_weight: Self::DEFAULT_DUAL_WIELD_OFFHAND_WEIGHT,
            dual_wield_attack_bonus: Self::DEFAULT_DUAL_WIELD_ATTACK_BONUS,
            dual_wield_defense_penalty: Self::DEFAULT_DUAL_WIELD_DEFENSE_PENALTY,
        }
    }
}
