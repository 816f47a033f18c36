//! Default iteration over a registry.
//!
//! Iteration walks the handle table in its insertion order. Each item
//! carries the value, its handle, its identifier and a view of the whole
//! handle table. An [`Iter`] is one-shot; call [`Registry::iter`] again to
//! start over. The shared borrow held by the iterator rules out mutating
//! the registry mid-walk.

use std::iter::FusedIterator;

use indexmap::map;

use crate::combinators::HandleTableView;
use crate::handle::Handle;
use crate::registry::{Registry, Slot};

/// One item of default iteration.
pub struct Entry<'a, V> {
    /// The stored value.
    pub value: &'a V,
    /// The handle the value is stored against.
    pub handle: &'a Handle,
    /// The identifier the entry is registered under.
    pub identifier: &'a str,
    /// View of the full handle table.
    pub table: HandleTableView<'a, V>,
}

impl<V> Clone for Entry<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Entry<'_, V> {}

impl<V: std::fmt::Debug> std::fmt::Debug for Entry<'_, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("value", self.value)
            .field("handle", self.handle)
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

/// Iterator returned by [`Registry::iter`].
pub struct Iter<'a, V> {
    inner: map::Iter<'a, Handle, Slot<V>>,
    table: HandleTableView<'a, V>,
}

impl<'a, V> Iter<'a, V> {
    fn entry(&self, handle: &'a Handle, slot: &'a Slot<V>) -> Entry<'a, V> {
        Entry {
            value: &slot.value,
            handle,
            identifier: &slot.identifier,
            table: self.table,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = Entry<'a, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let (handle, slot) = self.inner.next()?;
        Some(self.entry(handle, slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let (handle, slot) = self.inner.next_back()?;
        Some(self.entry(handle, slot))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Registry<V> {
    /// Iterates entries in canonical enumeration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use entity_registry::Registry;
    ///
    /// let registry = Registry::from_entries([("a", 1), ("b", 2)]);
    /// let total: i32 = registry.iter().map(|entry| *entry.value).sum();
    /// assert_eq!(total, 3);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.entries.iter(),
            table: self.view(),
        }
    }
}

impl<'a, V> IntoIterator for &'a Registry<V> {
    type Item = Entry<'a, V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
