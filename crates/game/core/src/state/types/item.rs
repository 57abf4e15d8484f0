//! Item identity.
//!
//! Characters never own definitions directly: loadouts and inventories hold
//! [`ItemHandle`]s that are resolved through the catalog (see `env`).

use std::fmt;

/// Reference to an equipment definition stored outside the character (lookup via catalog).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ItemHandle(pub u32);

impl ItemHandle {
    /// Returns true if this handle was allocated by runtime registration.
    #[inline]
    pub const fn is_dynamic(self) -> bool {
        self.0 >= crate::config::LoadoutConfig::DYNAMIC_HANDLE_BASE
    }
}

impl fmt::Display for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item:{}", self.0)
    }
}
