//! Session orchestration for the loadout engine.
//!
//! This crate wires the deterministic engine in `loadout-core` to content,
//! persistence and event delivery. Consumers embed an [`Armory`] to manage the
//! player and companion roster, subscribe to [`LoadoutEvent`]s, and save or
//! restore equipment through a [`SaveRepository`].
//!
//! Modules are organized by responsibility:
//! - [`armory`] hosts the session facade and its builder
//! - [`api`] exposes the error types downstream clients interact with
//! - [`catalog`] shares the item catalog between the session and shop collaborators
//! - [`events`] provides the topic-based event bus
//! - [`repository`] persists equipment records
//! - [`config`] reads runtime settings from the environment
pub mod api;
pub mod armory;
pub mod catalog;
pub mod config;
pub mod events;
pub mod repository;

pub use api::{Result, RuntimeError};
pub use armory::{Armory, ArmoryBuilder};
pub use catalog::SharedCatalog;
pub use config::RuntimeConfig;
pub use events::{EventBus, LoadoutEvent, Topic};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveFile, SaveRepository,
};
