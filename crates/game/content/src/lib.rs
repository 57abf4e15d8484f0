//! Data-driven equipment content and loaders.
//!
//! This crate reads static content from RON/TOML data files:
//! - Item catalogs (data-driven via RON)
//! - Character templates for the player and companions (data-driven via RON)
//! - Combat tuning (data-driven via TOML)
//!
//! Content feeds the runtime catalog and roster; it never appears in save files.
//!
//! All loaders use loadout-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{CharacterLoader, ConfigLoader, ContentBundle, ContentFactory, ItemLoader};
