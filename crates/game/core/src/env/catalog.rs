//! Owned, injectable equipment catalog.
//!
//! Static definitions are inserted once at content load. Ad-hoc items
//! (crafted, enchanted) are appended at runtime through
//! [`ItemCatalog::register_dynamic`], which takes `&mut self`: callers sharing a
//! catalog must serialize registrations behind a single writer while readers
//! continue to resolve existing entries.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::items::{EquipmentBuilder, EquipmentDefinition, ItemOracle};
use crate::config::LoadoutConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::ItemHandle;

/// Errors raised while building or extending a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("{0} is already defined")]
    DuplicateHandle(ItemHandle),

    #[error("an item named '{0}' already exists")]
    DuplicateName(String),

    #[error("{0} is reserved for dynamic registration")]
    ReservedHandle(ItemHandle),

    #[error("invalid definition '{name}': {reason}")]
    InvalidDefinition { name: String, reason: &'static str },
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            CatalogError::DuplicateHandle(_) => "CATALOG_DUPLICATE_HANDLE",
            CatalogError::DuplicateName(_) => "CATALOG_DUPLICATE_NAME",
            CatalogError::ReservedHandle(_) => "CATALOG_RESERVED_HANDLE",
            CatalogError::InvalidDefinition { .. } => "CATALOG_INVALID_DEFINITION",
        }
    }
}

/// Append-only registry of equipment definitions.
#[derive(Clone, Debug)]
pub struct ItemCatalog {
    definitions: BTreeMap<ItemHandle, Arc<EquipmentDefinition>>,
    by_name: HashMap<String, ItemHandle>,
    next_dynamic: u32,
}

impl Default for ItemCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self {
            definitions: BTreeMap::new(),
            by_name: HashMap::new(),
            next_dynamic: LoadoutConfig::DYNAMIC_HANDLE_BASE,
        }
    }

    /// Builds a catalog from static definitions.
    ///
    /// # Errors
    ///
    /// Fails on the first definition rejected by [`ItemCatalog::insert`].
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = EquipmentDefinition>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for definition in definitions {
            catalog.insert(definition)?;
        }
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Number of runtime-registered items.
    pub fn dynamic_count(&self) -> usize {
        self.dynamic_definitions().count()
    }

    /// Inserts a static definition under its own handle.
    ///
    /// # Errors
    ///
    /// Rejects handles in the dynamic range, duplicate handles or names, and
    /// definitions that fail [`EquipmentDefinition::validate`].
    pub fn insert(&mut self, definition: EquipmentDefinition) -> Result<ItemHandle, CatalogError> {
        if definition.handle.is_dynamic() {
            return Err(CatalogError::ReservedHandle(definition.handle));
        }
        self.admit(definition)
    }

    /// Registers an ad-hoc item and assigns it a fresh handle.
    ///
    /// # Errors
    ///
    /// Rejects duplicate names and invalid definitions; the handle counter only
    /// advances on success.
    pub fn register_dynamic(
        &mut self,
        builder: EquipmentBuilder,
    ) -> Result<ItemHandle, CatalogError> {
        let handle = ItemHandle(self.next_dynamic);
        let handle = self.admit(builder.handle(handle).build())?;
        self.next_dynamic += 1;
        tracing::trace!(%handle, "registered dynamic item");
        Ok(handle)
    }

    /// Re-admits a previously registered dynamic definition under its
    /// original handle, e.g. when loading a save.
    ///
    /// The handle counter moves past the restored handle so later
    /// registrations never collide with it.
    pub fn restore_dynamic(
        &mut self,
        definition: EquipmentDefinition,
    ) -> Result<ItemHandle, CatalogError> {
        if !definition.handle.is_dynamic() {
            return Err(CatalogError::ReservedHandle(definition.handle));
        }
        let handle = self.admit(definition)?;
        self.next_dynamic = self.next_dynamic.max(handle.0 + 1);
        Ok(handle)
    }

    /// Definitions registered at runtime, ordered by handle.
    pub fn dynamic_definitions(&self) -> impl Iterator<Item = &EquipmentDefinition> + '_ {
        self.definitions
            .range(ItemHandle(LoadoutConfig::DYNAMIC_HANDLE_BASE)..)
            .map(|(_, def)| def.as_ref())
    }

    fn admit(&mut self, definition: EquipmentDefinition) -> Result<ItemHandle, CatalogError> {
        definition
            .validate()
            .map_err(|reason| CatalogError::InvalidDefinition {
                name: definition.name.clone(),
                reason,
            })?;
        if self.definitions.contains_key(&definition.handle) {
            return Err(CatalogError::DuplicateHandle(definition.handle));
        }
        let key = definition.name.to_lowercase();
        if self.by_name.contains_key(&key) {
            return Err(CatalogError::DuplicateName(definition.name));
        }

        let handle = definition.handle;
        self.by_name.insert(key, handle);
        self.definitions.insert(handle, Arc::new(definition));
        Ok(handle)
    }
}

impl ItemOracle for ItemCatalog {
    fn definition(&self, handle: ItemHandle) -> Option<Arc<EquipmentDefinition>> {
        self.definitions.get(&handle).cloned()
    }

    fn find_by_name(&self, name: &str) -> Option<Arc<EquipmentDefinition>> {
        let handle = self.by_name.get(&name.to_lowercase())?;
        self.definition(*handle)
    }

    fn all_definitions(&self) -> Vec<Arc<EquipmentDefinition>> {
        self.definitions.values().cloned().collect()
    }
}
