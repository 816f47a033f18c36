//! Error types for the registry.
//!
//! The core registry API reports "not found" through `Option` and `bool`.
//! These errors back the strict helpers (`require`, `try_add`) for callers
//! that prefer to propagate a missing or conflicting identifier with `?`.

use thiserror::Error;

/// Errors returned by the strict registry helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Nothing is registered under the identifier.
    #[error("Unknown identifier: '{identifier}'")]
    UnknownIdentifier {
        /// The identifier that was looked up.
        identifier: String,
    },

    /// The identifier is already registered.
    #[error("Identifier '{identifier}' is already registered")]
    DuplicateIdentifier {
        /// The identifier that was offered.
        identifier: String,
    },
}

impl RegistryError {
    /// Creates an unknown-identifier error.
    #[must_use]
    pub fn unknown(identifier: impl Into<String>) -> Self {
        Self::UnknownIdentifier {
            identifier: identifier.into(),
        }
    }

    /// Creates a duplicate-identifier error.
    #[must_use]
    pub fn duplicate(identifier: impl Into<String>) -> Self {
        Self::DuplicateIdentifier {
            identifier: identifier.into(),
        }
    }

    /// Returns true if this is an unknown-identifier error.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::UnknownIdentifier { .. })
    }

    /// Returns true if this is a duplicate-identifier error.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateIdentifier { .. })
    }

    /// Returns the identifier the error refers to.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            Self::UnknownIdentifier { identifier } | Self::DuplicateIdentifier { identifier } => {
                identifier
            }
        }
    }
}

/// Result type alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_identifier_message() {
        let err = RegistryError::unknown("ghost");
        let msg = format!("{err}");
        assert!(msg.contains("Unknown identifier"));
        assert!(msg.contains("ghost"));
        assert!(err.is_unknown());
        assert!(!err.is_duplicate());
    }

    #[test]
    fn test_duplicate_identifier_message() {
        let err = RegistryError::duplicate("alpha");
        let msg = format!("{err}");
        assert!(msg.contains("already registered"));
        assert!(err.is_duplicate());
        assert_eq!(err.identifier(), "alpha");
    }
}
