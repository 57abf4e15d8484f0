//! Stat aggregation.
//!
//! # Architecture
//!
//! ```text
//! [ AbilityScores + item ability bonuses ]  -> EffectiveAbilities  (Layer 1)
//!      ↓
//! [ EffectiveAbilities + item/upgrade/stance bonuses ] -> DerivedStats (Layer 2)
//! ```
//!
//! ## Principles
//!
//! 1. **SSOT**: Only base scores, level and upgrade flags are stored
//! 2. **Derived Stance**: The combat stance is read from the hand slots
//! 3. **Deterministic**: Pure functions, no I/O; calling twice yields the same snapshot
//!
//! ## Bonus Stack
//!
//! Both layers use the same calculation order:
//! `Flat → %Inc → More → Less → Clamp`

pub mod aggregate;
pub mod bonus;
pub mod core;
pub mod derived;
pub mod snapshot;
pub mod upgrades;

pub use aggregate::{AggregateInputs, CombatStance};
pub use bonus::{Bonus, BonusStack, StatBounds, StatLayer};
pub use core::{AbilityBonuses, EffectiveAbilities};
pub use derived::{DerivedBonuses, DerivedStats};
pub use snapshot::StatsSnapshot;
pub use upgrades::PermanentUpgrades;
