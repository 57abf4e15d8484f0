//! Bonus application stack shared by every stat layer.
//!
//! Calculation order: `Flat → %Inc → More → Less → Clamp`
//!
//! Equipment contributes flat bonuses; situational combat configuration
//! (two-handed grip, dual-wielding) contributes `More`/`Less` multipliers.

/// A single bonus applied to a stat value.
///
/// Percentages are stored as integers:
/// - `Increased(20)` = +20%, summed with other increases
/// - `More(50)` = ×1.5, applied sequentially
/// - `Less(25)` = ×0.75, applied sequentially
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bonus {
    Flat(i32),
    Increased(i32),
    More(i32),
    Less(i32),
}

/// Ordered collection of bonuses for one stat.
///
/// # Example
/// ```
/// # use loadout_core::stats::BonusStack;
/// let value = BonusStack::new()
///     .flat(5)       // 10 + 5 = 15
///     .more(50)      // ×1.5 = 22
///     .less(25)      // ×0.75 = 16
///     .apply(10, 0, 100);
/// assert_eq!(value, 16);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusStack {
    bonuses: Vec<Bonus>,
}

impl BonusStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, bonus: Bonus) {
        self.bonuses.push(bonus);
    }

    /// Adds a flat bonus, skipping zero so empty item fields stay invisible.
    pub fn add_flat(&mut self, value: i32) {
        if value != 0 {
            self.bonuses.push(Bonus::Flat(value));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bonuses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bonuses.len()
    }

    /// Applies every bonus to `base` and clamps the result to `[min, max]`.
    ///
    /// ```text
    /// result = clamp((base + Σflat) × (1 + Σinc/100) × Πmore × Πless, min, max)
    /// ```
    ///
    /// Each multiplication truncates toward zero. Intermediate values are
    /// widened and saturate, so extreme bonuses clamp instead of overflowing.
    pub fn apply(&self, base: i32, min: i32, max: i32) -> i32 {
        let mut flat = 0i64;
        let mut increased = 0i64;
        for bonus in &self.bonuses {
            match bonus {
                Bonus::Flat(v) => flat = flat.saturating_add(i64::from(*v)),
                Bonus::Increased(p) => increased = increased.saturating_add(i64::from(*p)),
                Bonus::More(_) | Bonus::Less(_) => {}
            }
        }

        let mut value = i64::from(base).saturating_add(flat);
        if increased != 0 {
            value = scale(value, 100i64.saturating_add(increased));
        }
        for bonus in &self.bonuses {
            if let Bonus::More(p) = bonus {
                value = scale(value, 100 + i64::from(*p));
            }
        }
        for bonus in &self.bonuses {
            if let Bonus::Less(p) = bonus {
                value = scale(value, 100 - i64::from(*p));
            }
        }
        // In range after the clamp.
        value.clamp(i64::from(min), i64::from(max)) as i32
    }

    pub fn apply_bounded(&self, base: i32, bounds: StatBounds) -> i32 {
        self.apply(base, bounds.min, bounds.max)
    }
}

fn scale(value: i64, percent: i64) -> i64 {
    value.saturating_mul(percent) / 100
}

// Builder helpers
impl BonusStack {
    pub fn flat(mut self, value: i32) -> Self {
        self.add(Bonus::Flat(value));
        self
    }

    pub fn increased(mut self, percent: i32) -> Self {
        self.add(Bonus::Increased(percent));
        self
    }

    pub fn more(mut self, percent: i32) -> Self {
        self.add(Bonus::More(percent));
        self
    }

    pub fn less(mut self, percent: i32) -> Self {
        self.add(Bonus::Less(percent));
        self
    }
}

/// A stat layer computed as `Base + Bonuses -> Final`.
///
/// ```text
/// Layer 1: AbilityScores + AbilityBonuses -> EffectiveAbilities
/// Layer 2: EffectiveAbilities + DerivedBonuses -> DerivedStats
/// ```
pub trait StatLayer {
    type Base;
    type Bonuses: Default;
    type Final;

    fn compute(base: &Self::Base, bonuses: &Self::Bonuses) -> Self::Final;

    /// Computes the layer with no bonuses.
    fn from_base(base: &Self::Base) -> Self::Final {
        Self::compute(base, &Self::Bonuses::default())
    }
}

/// Clamping range for a family of stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatBounds {
    pub min: i32,
    pub max: i32,
}

impl StatBounds {
    /// Ability scores never reach 0 nor exceed 99.
    pub const ABILITY: Self = Self { min: 1, max: 99 };

    /// Weapon power, defense, armor class.
    pub const COMBAT: Self = Self { min: 0, max: 9999 };

    /// Chances and resistances expressed in percent.
    pub const PERCENT: Self = Self { min: 0, max: 100 };

    /// Shield block is capped below certainty.
    pub const BLOCK: Self = Self { min: 0, max: 75 };

    /// Hit points never drop to zero from equipment alone.
    pub const HIT_POINTS: Self = Self { min: 1, max: 99_999 };

    pub const MANA: Self = Self { min: 0, max: 99_999 };
}
