//! Opaque per-entry handles.
//!
//! A [`Handle`] is the only key into a registry's value table. Handles are
//! minted by the registry itself on every `add`, so an identifier string can
//! never be used to address storage directly.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use uuid::Uuid;

/// Unforgeable token identifying one registry entry.
///
/// Two handles compare equal only if they were cloned from the same minted
/// handle; minting twice for the same identifier yields distinct handles.
/// The identifier copy carried inside is a label for display and debugging.
///
/// # Examples
///
/// ```
/// use entity_registry::Registry;
///
/// let mut registry = Registry::new();
/// registry.add("alpha", 1);
/// let first = registry.handle("alpha").cloned().unwrap();
///
/// registry.add("alpha", 2);
/// let second = registry.handle("alpha").unwrap();
/// assert_ne!(&first, second);
/// assert_eq!(first.label(), second.label());
/// ```
#[derive(Clone)]
pub struct Handle {
    token: Uuid,
    label: Arc<str>,
}

impl Handle {
    /// Mints a fresh handle tagged with `identifier`.
    pub(crate) fn mint(identifier: &str) -> Self {
        Self {
            token: Uuid::new_v4(),
            label: Arc::from(identifier),
        }
    }

    /// Returns the unique token backing this handle.
    #[must_use]
    pub const fn token(&self) -> &Uuid {
        &self.token
    }

    /// Returns the identifier this handle was minted for.
    ///
    /// The registry never resolves entries through this label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for Handle {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl Eq for Handle {}

impl Hash for Handle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.token.hash(state);
    }
}

impl PartialOrd for Handle {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Handle {
    fn cmp(&self, other: &Self) -> Ordering {
        self.token.cmp(&other.token)
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("label", &&*self.label)
            .field("token", &self.token)
            .finish()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = self.token.simple().to_string();
        write!(f, "{}#{}", self.label, &token[..8])
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_mint_same_identifier_is_distinct() {
        let a = Handle::mint("player");
        let b = Handle::mint("player");
        assert_ne!(a, b);
        assert_eq!(a.label(), b.label());
    }

    #[test]
    fn test_clone_is_equal() {
        let a = Handle::mint("player");
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(a.token(), b.token());
    }

    #[test]
    fn test_hash_follows_token() {
        let a = Handle::mint("x");
        let mut set = HashSet::new();
        set.insert(a.clone());
        set.insert(a.clone());
        set.insert(Handle::mint("x"));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&a));
    }

    #[test]
    fn test_display_contains_label() {
        let handle = Handle::mint("enemy");
        let display = format!("{handle}");
        assert!(display.starts_with("enemy#"));
        assert_eq!(display.len(), "enemy#".len() + 8);
    }

    #[test]
    fn test_debug_contains_label() {
        let handle = Handle::mint("enemy");
        let debug = format!("{handle:?}");
        assert!(debug.contains("enemy"));
        assert!(debug.contains("token"));
    }
}
