//! Read-only equipment data.
//!
//! The engine resolves every item handle through an [`ItemOracle`]. The
//! concrete [`ItemCatalog`] is owned by whoever drives the engine and passed in
//! explicitly; there is no process-wide registry.
mod catalog;
mod items;

pub use catalog::{CatalogError, ItemCatalog};
pub use items::{
    EquipmentBuilder, EquipmentDefinition, ItemBonuses, ItemCategory, ItemOracle, Rarity,
    Requirements, RestrictionFlags,
};
