//! Characters that own a loadout.
//!
//! A [`Character`] is either the player or a companion. It owns exactly one
//! [`Loadout`] and one [`Inventory`], exposes base ability scores, and caches
//! the derived stats computed by the aggregator.
//!
//! # Design Principles
//!
//! 1. **SSOT**: Only base scores, level, alignment, upgrades and equipment are stored
//! 2. **Cached Stats**: `stats` is recomputed by the engine after every loadout mutation
//! 3. **Revision Counter**: `stats_revision` counts recomputations so callers can tell
//!    whether the cache was refreshed

use super::{CharacterId, EquipmentSlot, Inventory, ItemHandle, Loadout};
use crate::config::LoadoutConfig;
use crate::engine::LoadoutError;
use crate::stats::{PermanentUpgrades, StatsSnapshot};

/// Player or companion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CharacterKind {
    #[default]
    Player,
    Companion,
}

impl CharacterKind {
    /// Inventory capacity used when a template does not specify one.
    pub const fn default_capacity(self) -> u16 {
        match self {
            CharacterKind::Player => LoadoutConfig::DEFAULT_PLAYER_CAPACITY,
            CharacterKind::Companion => LoadoutConfig::DEFAULT_COMPANION_CAPACITY,
        }
    }
}

/// The six base ability scores.
///
/// These are owned by collaborators (character creation, level-up) and only
/// read by the engine.
/// - **Strength**: weapon power, minimum-strength gates
/// - **Dexterity**: armor class, critical chance
/// - **Constitution**: defense, hit points
/// - **Intelligence**: mana
/// - **Wisdom**: magic resistance
/// - **Charisma**: carried for item bonuses only
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    pub fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Self {
        Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        }
    }

    /// Roll modifier for a score: floor((score - 10) / 2).
    pub const fn modifier(score: i32) -> i32 {
        (score - 10).div_euclid(2)
    }
}

impl Default for AbilityScores {
    /// Default scores: all 10 (average human)
    fn default() -> Self {
        Self::new(10, 10, 10, 10, 10, 10)
    }
}

/// Complete character state.
///
/// # Invariants
///
/// - Every item in `loadout` is absent from `inventory` (no double-accounting)
/// - `stats` reflects `loadout` as of the last engine trigger
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub kind: CharacterKind,

    // === SSOT: base stats (owned by collaborators) ===
    pub level: u16,
    pub abilities: AbilityScores,
    /// Net alignment; positive leans good, negative leans evil.
    pub alignment: i32,
    pub upgrades: PermanentUpgrades,

    // === Equipment (mutated through the engine) ===
    pub(crate) loadout: Loadout,
    pub(crate) inventory: Inventory,

    // === Cached: derived from loadout + base stats + upgrades ===
    stats: StatsSnapshot,
    stats_revision: u64,
}

impl Character {
    /// Creates a character with an empty loadout and the kind's default capacity.
    pub fn new(id: CharacterId, name: impl Into<String>, kind: CharacterKind) -> Self {
        let abilities = AbilityScores::default();
        let level = 1;
        let upgrades = PermanentUpgrades::empty();
        Self {
            id,
            name: name.into(),
            kind,
            level,
            abilities,
            alignment: 0,
            upgrades,
            loadout: Loadout::empty(),
            inventory: Inventory::with_capacity(kind.default_capacity()),
            stats: StatsSnapshot::unequipped(&abilities, level, upgrades),
            stats_revision: 0,
        }
    }

    pub fn with_level(mut self, level: u16) -> Self {
        self.level = level;
        self.refresh_unequipped_stats();
        self
    }

    pub fn with_abilities(mut self, abilities: AbilityScores) -> Self {
        self.abilities = abilities;
        self.refresh_unequipped_stats();
        self
    }

    pub fn with_alignment(mut self, alignment: i32) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_upgrades(mut self, upgrades: PermanentUpgrades) -> Self {
        self.upgrades = upgrades;
        self.refresh_unequipped_stats();
        self
    }

    /// Replaces the (empty) inventory with one of the given capacity.
    pub fn with_inventory_capacity(mut self, capacity: u16) -> Self {
        self.inventory = Inventory::with_capacity(capacity);
        self
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Derived stats as of the last recomputation.
    pub fn stats(&self) -> &StatsSnapshot {
        &self.stats
    }

    /// Number of times derived stats were recomputed.
    pub fn stats_revision(&self) -> u64 {
        self.stats_revision
    }

    /// Returns true if `handle` is carried or worn.
    pub fn owns(&self, handle: ItemHandle) -> bool {
        self.inventory.contains(handle) || self.loadout.slot_of(handle).is_some()
    }

    /// Adds an acquired item (purchase, loot, gift) to the inventory.
    ///
    /// # Errors
    ///
    /// Returns `LoadoutError::InventoryFull` when the inventory is at capacity.
    pub fn receive_item(&mut self, handle: ItemHandle) -> Result<(), LoadoutError> {
        let capacity = self.inventory.capacity();
        self.inventory
            .push(handle)
            .map_err(|_| LoadoutError::InventoryFull { capacity })
    }

    /// Removes a carried (not worn) item, e.g. when it is sold.
    pub fn discard_item(&mut self, handle: ItemHandle) -> Option<ItemHandle> {
        self.inventory.remove(handle)
    }

    /// Clears the curse on the occupant of `slot` for this character.
    ///
    /// This is the hook used by the curse-removal service; afterwards the
    /// normal unequip path applies to the item. Stats are unaffected.
    ///
    /// # Errors
    ///
    /// Returns `LoadoutError::SlotAlreadyEmpty` if nothing is worn in `slot`.
    pub fn lift_curse(&mut self, slot: EquipmentSlot) -> Result<ItemHandle, LoadoutError> {
        let handle = self
            .loadout
            .get(slot)
            .ok_or(LoadoutError::SlotAlreadyEmpty(slot))?;
        self.loadout.lift_curse(slot);
        Ok(handle)
    }

    /// Stores freshly computed stats and bumps the revision.
    pub(crate) fn apply_stats(&mut self, stats: StatsSnapshot) {
        self.stats = stats;
        self.stats_revision += 1;
    }

    /// Builder helpers run before any item is worn, so no catalog is needed.
    fn refresh_unequipped_stats(&mut self) {
        if self.loadout.is_empty() {
            self.stats = StatsSnapshot::unequipped(&self.abilities, self.level, self.upgrades);
        }
    }
}

/// Data-driven description of a character, loaded from content files.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterTemplate {
    pub id: CharacterId,
    pub name: String,
    pub kind: CharacterKind,
    #[cfg_attr(feature = "serde", serde(default = "CharacterTemplate::default_level"))]
    pub level: u16,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: AbilityScores,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alignment: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgrades: PermanentUpgrades,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory_capacity: Option<u16>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub starting_items: Vec<ItemHandle>,
}

impl CharacterTemplate {
    #[cfg(feature = "serde")]
    fn default_level() -> u16 {
        1
    }

    /// Builds a character with an empty loadout and the starting items carried.
    ///
    /// # Errors
    ///
    /// Returns `LoadoutError::InventoryFull` if the starting items exceed capacity.
    pub fn instantiate(&self) -> Result<Character, LoadoutError> {
        let capacity = self
            .inventory_capacity
            .unwrap_or_else(|| self.kind.default_capacity());
        let mut character = Character::new(self.id, self.name.clone(), self.kind)
            .with_level(self.level)
            .with_abilities(self.abilities)
            .with_alignment(self.alignment)
            .with_upgrades(self.upgrades)
            .with_inventory_capacity(capacity);

        for handle in &self.starting_items {
            character.receive_item(*handle)?;
        }
        Ok(character)
    }
}
