//! Error classification shared by every loadout error.
//!
//! Each subsystem defines its own enum next to the operations it guards
//! (`LoadoutError` in the engine, `CatalogError` in the catalog, `RestoreError`
//! for persisted records). All of them report a [`ErrorSeverity`] and a stable
//! code through [`GameError`] so the runtime can pick a log level and tag
//! rejection events without matching on concrete variants.

/// How a caller should react to a failed loadout operation.
///
/// A failed operation never changes the characters involved, whatever the
/// severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The request was incomplete or the actor lacks room; ask again.
    ///
    /// Ambiguous slot selection, full inventory.
    Recoverable,

    /// The request breaks a rule and fails the same way until inputs change.
    ///
    /// Ineligible slot, unmet level/strength/alignment gate, cursed occupant.
    Validation,

    /// Stored state disagrees with the loadout invariants.
    ///
    /// A persisted record wearing an item in an illegal slot.
    Internal,

    /// Content is broken and no operation on the affected item can proceed.
    ///
    /// A worn or carried handle with no catalog definition.
    Fatal,
}

impl ErrorSeverity {
    pub const fn is_recoverable(self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Internal and fatal errors point at bad data rather than a bad request.
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Classification implemented by every error in the crate.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the variant, used in logs and rejection events.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities_render_lowercase() {
        assert_eq!(ErrorSeverity::Recoverable.to_string(), "recoverable");
        assert_eq!(ErrorSeverity::Fatal.to_string(), "fatal");
    }

    #[test]
    fn only_data_problems_count_as_internal() {
        assert!(!ErrorSeverity::Recoverable.is_internal());
        assert!(!ErrorSeverity::Validation.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert!(ErrorSeverity::Fatal.is_internal());
    }
}
