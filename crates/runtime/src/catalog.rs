//! Shared item catalog.
//!
//! The session and shop collaborators read the same catalog while runtime
//! registrations are serialized behind a single write lock. A registration
//! only holds the lock for one insertion, so readers never observe a partially
//! registered item.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use loadout_core::{EquipmentBuilder, EquipmentDefinition, ItemCatalog, ItemHandle, ItemOracle};

use crate::api::{Result, RuntimeError};

/// Cloneable handle to an [`ItemCatalog`] shared across the runtime.
#[derive(Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<ItemCatalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: ItemCatalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(catalog)),
        }
    }

    /// Locks the catalog for reading.
    pub fn read(&self) -> Result<RwLockReadGuard<'_, ItemCatalog>> {
        self.inner.read().map_err(|_| RuntimeError::LockPoisoned)
    }

    /// Registers an ad-hoc item and returns its fresh handle.
    pub fn register(&self, builder: EquipmentBuilder) -> Result<ItemHandle> {
        let mut catalog = self.inner.write().map_err(|_| RuntimeError::LockPoisoned)?;
        Ok(catalog.register_dynamic(builder)?)
    }

    /// Swaps in a fully prepared catalog.
    pub(crate) fn replace(&self, catalog: ItemCatalog) -> Result<()> {
        let mut current = self.inner.write().map_err(|_| RuntimeError::LockPoisoned)?;
        *current = catalog;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Writers never leave the catalog half-updated, so a poisoned lock still
    // guards consistent data.
    fn snapshot(&self) -> RwLockReadGuard<'_, ItemCatalog> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ItemOracle for SharedCatalog {
    fn definition(&self, handle: ItemHandle) -> Option<Arc<EquipmentDefinition>> {
        self.snapshot().definition(handle)
    }

    fn find_by_name(&self, name: &str) -> Option<Arc<EquipmentDefinition>> {
        self.snapshot().find_by_name(name)
    }

    fn all_definitions(&self) -> Vec<Arc<EquipmentDefinition>> {
        self.snapshot().all_definitions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadout_core::ItemCategory;

    #[test]
    fn registrations_are_visible_to_every_clone() {
        let shop_view = SharedCatalog::default();
        let session_view = shop_view.clone();

        let handle = session_view
            .register(EquipmentDefinition::builder("Etched Band", ItemCategory::Ring))
            .unwrap();

        assert!(handle.is_dynamic());
        assert_eq!(shop_view.definition(handle).unwrap().name, "Etched Band");
        assert!(shop_view.find_by_name("etched band").is_some());
        assert_eq!(shop_view.len(), 1);
    }

    #[test]
    fn rejected_registration_surfaces_catalog_error() {
        let catalog = SharedCatalog::default();
        catalog
            .register(EquipmentDefinition::builder("Band", ItemCategory::Ring))
            .unwrap();

        let err = catalog
            .register(EquipmentDefinition::builder("BAND", ItemCategory::Ring))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::Catalog(_)));
        assert_eq!(catalog.len(), 1);
    }
}
