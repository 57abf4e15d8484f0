//! Inventory storage for characters.

use arrayvec::ArrayVec;

use crate::config::LoadoutConfig;
use crate::state::types::ItemHandle;

/// Ordered item storage owned by exactly one character.
///
/// Insertion order is preserved for display only. Every character has its own
/// `capacity`, bounded by [`LoadoutConfig::MAX_INVENTORY_SLOTS`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    items: ArrayVec<ItemHandle, { LoadoutConfig::MAX_INVENTORY_SLOTS }>,
    capacity: u16,
}

impl Inventory {
    /// Creates an empty inventory. `capacity` is clamped to the hard maximum.
    pub fn with_capacity(capacity: u16) -> Self {
        Self {
            items: ArrayVec::new(),
            capacity: capacity.min(LoadoutConfig::MAX_INVENTORY_SLOTS as u16),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> u16 {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= usize::from(self.capacity)
    }

    /// Number of items that can still be appended.
    pub fn free_slots(&self) -> usize {
        usize::from(self.capacity).saturating_sub(self.items.len())
    }

    pub fn contains(&self, handle: ItemHandle) -> bool {
        self.items.contains(&handle)
    }

    /// Number of copies of `handle` carried.
    pub fn count(&self, handle: ItemHandle) -> usize {
        self.items.iter().filter(|h| **h == handle).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemHandle> + '_ {
        self.items.iter().copied()
    }

    pub fn as_slice(&self) -> &[ItemHandle] {
        &self.items
    }

    /// Appends an item at the end.
    ///
    /// Returns the item back when the inventory is at capacity.
    pub fn push(&mut self, handle: ItemHandle) -> Result<(), ItemHandle> {
        if self.is_full() {
            return Err(handle);
        }
        self.items.try_push(handle).map_err(|err| err.element())
    }

    /// Removes the first copy of `handle`, keeping the order of the rest.
    pub fn remove(&mut self, handle: ItemHandle) -> Option<ItemHandle> {
        let index = self.items.iter().position(|h| *h == handle)?;
        Some(self.items.remove(index))
    }

    /// Removes the most recently appended copy of `handle`.
    pub fn remove_last(&mut self, handle: ItemHandle) -> Option<ItemHandle> {
        let index = self.items.iter().rposition(|h| *h == handle)?;
        Some(self.items.remove(index))
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(LoadoutConfig::DEFAULT_PLAYER_CAPACITY)
    }
}
