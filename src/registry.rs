//! The entity registry.
//!
//! A [`Registry`] keeps two tables in lockstep:
//!
//! - an identifier table mapping caller-chosen names to [`Handle`]s, and
//! - a handle table mapping each live handle to its stored value.
//!
//! The handle table's insertion order is the canonical enumeration order for
//! every read, combinator and iteration view. Each slot in the handle table
//! also records the identifier it is registered under, so identifier
//! enumeration follows that order without ever reading a handle's label.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::config::RegistryConfig;
use crate::error::{RegistryError, RegistryResult};
use crate::handle::Handle;

/// A handle-table slot: the stored value plus its registered identifier.
#[derive(Debug)]
pub(crate) struct Slot<V> {
    pub(crate) identifier: String,
    pub(crate) value: V,
}

/// Keyed container routing every identifier lookup through a minted handle.
///
/// The value type is fixed per registry instance. Cloning a registry mints
/// fresh handles for every entry, so a handle taken from one registry never
/// resolves in a clone of it.
///
/// # Examples
///
/// ```
/// use entity_registry::Registry;
///
/// let mut registry = Registry::from_entries([("a", 10), ("b", 20)]);
/// registry.add("c", 30).add("a", 11);
///
/// assert_eq!(registry.len(), 3);
/// assert_eq!(registry.get("a"), Some(&11));
/// assert_eq!(registry.get_all_identifiers(), vec!["b", "c", "a"]);
/// ```
#[derive(Debug)]
pub struct Registry<V> {
    pub(crate) identifiers: HashMap<String, Handle>,
    pub(crate) entries: IndexMap<Handle, Slot<V>>,
}

impl<V: Clone> Clone for Registry<V> {
    fn clone(&self) -> Self {
        let mut registry = Self::with_config(RegistryConfig::with_capacity(self.len()));
        for slot in self.entries.values() {
            registry.install(slot.identifier.clone(), slot.value.clone());
        }
        registry
    }
}

impl<V> Default for Registry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Registry<V> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry using `config`.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            identifiers: HashMap::with_capacity(config.initial_capacity),
            entries: IndexMap::with_capacity(config.initial_capacity),
        }
    }

    /// Creates a registry pre-populated from `initial`.
    ///
    /// Entries are added in the iterator's order; a repeated identifier
    /// replaces the earlier entry exactly as [`add`](Self::add) does.
    #[must_use]
    pub fn from_entries<I, K>(initial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        let mut registry = Self::new();
        registry.extend(initial);
        registry
    }

    /// Registers `value` under `identifier` and returns the registry for chaining.
    ///
    /// A fresh handle is minted on every call. If `identifier` was already
    /// registered its previous handle is evicted from the handle table, and
    /// the entry moves to the end of the enumeration order.
    pub fn add(&mut self, identifier: impl Into<String>, value: V) -> &mut Self {
        self.install(identifier.into(), value);
        self
    }

    /// Registers `value` under a new `identifier`, refusing to overwrite.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateIdentifier`] if `identifier` is
    /// already registered. The registry is left unchanged in that case.
    pub fn try_add(&mut self, identifier: impl Into<String>, value: V) -> RegistryResult<Handle> {
        let identifier = identifier.into();
        if self.identifiers.contains_key(&identifier) {
            return Err(RegistryError::duplicate(identifier));
        }
        Ok(self.install(identifier, value))
    }

    fn install(&mut self, identifier: String, value: V) -> Handle {
        let handle = Handle::mint(&identifier);
        trace!(identifier = %identifier, handle = %handle, "registering entity");

        self.entries.insert(
            handle.clone(),
            Slot {
                identifier: identifier.clone(),
                value,
            },
        );
        if let Some(previous) = self.identifiers.insert(identifier, handle.clone()) {
            self.entries.shift_remove(&previous);
            debug!(evicted = %previous, replacement = %handle, "identifier re-registered, evicted previous handle");
        }

        debug_assert_eq!(self.identifiers.len(), self.entries.len());
        handle
    }

    /// Returns the value registered under `identifier`.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&V> {
        let handle = self.identifiers.get(identifier)?;
        self.entries.get(handle).map(|slot| &slot.value)
    }

    /// Returns a mutable reference to the value registered under `identifier`.
    pub fn get_mut(&mut self, identifier: &str) -> Option<&mut V> {
        let handle = self.identifiers.get(identifier)?;
        self.entries.get_mut(handle).map(|slot| &mut slot.value)
    }

    /// Returns the value registered under `identifier`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownIdentifier`] if nothing is registered
    /// under `identifier`.
    pub fn require(&self, identifier: &str) -> RegistryResult<&V> {
        self.get(identifier)
            .ok_or_else(|| RegistryError::unknown(identifier))
    }

    /// Returns the live handle for `identifier`.
    #[must_use]
    pub fn handle(&self, identifier: &str) -> Option<&Handle> {
        self.identifiers.get(identifier)
    }

    /// Returns the value stored against `handle`.
    ///
    /// Handles evicted by a re-add, `remove` or `clear` resolve to `None`.
    #[must_use]
    pub fn get_by_handle(&self, handle: &Handle) -> Option<&V> {
        self.entries.get(handle).map(|slot| &slot.value)
    }

    /// Removes the entry registered under `identifier`.
    ///
    /// Returns `false` and leaves the registry untouched if the identifier
    /// is unknown.
    pub fn remove(&mut self, identifier: &str) -> bool {
        self.take(identifier).is_some()
    }

    /// Removes the entry registered under `identifier` and returns its value.
    pub fn take(&mut self, identifier: &str) -> Option<V> {
        let handle = self.identifiers.remove(identifier)?;
        let slot = self.entries.shift_remove(&handle);
        trace!(identifier, handle = %handle, "removed entity");

        debug_assert_eq!(self.identifiers.len(), self.entries.len());
        slot.map(|slot| slot.value)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            debug!(entries = self.entries.len(), "clearing registry");
        }
        self.identifiers.clear();
        self.entries.clear();
    }

    /// Returns the number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no entries are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `identifier` is registered.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.contains_key(identifier)
    }

    /// Returns an owned identifier-to-value snapshot in enumeration order.
    ///
    /// The snapshot is detached: mutating it never affects the registry.
    #[must_use]
    pub fn get_all_entities(&self) -> IndexMap<String, V>
    where
        V: Clone,
    {
        self.entries
            .values()
            .map(|slot| (slot.identifier.clone(), slot.value.clone()))
            .collect()
    }

    /// Returns every identifier in enumeration order.
    #[must_use]
    pub fn get_all_identifiers(&self) -> Vec<&str> {
        self.entries
            .values()
            .map(|slot| slot.identifier.as_str())
            .collect()
    }

    /// Returns every live handle in enumeration order.
    #[must_use]
    pub fn get_all_handles(&self) -> Vec<&Handle> {
        self.entries.keys().collect()
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.identifiers.len(), self.entries.len());
        for (identifier, handle) in &self.identifiers {
            let slot = self
                .entries
                .get(handle)
                .unwrap_or_else(|| panic!("dangling handle {handle} for '{identifier}'"));
            assert_eq!(&slot.identifier, identifier);
        }
    }
}

impl<V, K> Extend<(K, V)> for Registry<V>
where
    K: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (identifier, value) in iter {
            self.add(identifier, value);
        }
    }
}

impl<V, K> FromIterator<(K, V)> for Registry<V>
where
    K: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}
