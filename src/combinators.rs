//! Read-only combinators over a registry.
//!
//! Every combinator walks entries in canonical enumeration order and hands
//! the callback a [`HandleTableView`] of the handle table alongside the
//! value and identifier. Callbacks capture whatever context they need; a
//! panic inside a callback propagates to the caller and the registry is
//! left untouched, since none of these methods mutate it.

use std::fmt;

use indexmap::IndexMap;

use crate::handle::Handle;
use crate::registry::{Registry, Slot};

/// Read-only view of a registry's handle-to-value table.
pub struct HandleTableView<'a, V> {
    entries: &'a IndexMap<Handle, Slot<V>>,
}

impl<V> Clone for HandleTableView<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for HandleTableView<'_, V> {}

impl<'a, V> HandleTableView<'a, V> {
    pub(crate) fn new(entries: &'a IndexMap<Handle, Slot<V>>) -> Self {
        Self { entries }
    }

    /// Returns the value stored against `handle`.
    #[must_use]
    pub fn get(&self, handle: &Handle) -> Option<&'a V> {
        self.entries.get(handle).map(|slot| &slot.value)
    }

    /// Returns true if `handle` is live in the table.
    #[must_use]
    pub fn contains(&self, handle: &Handle) -> bool {
        self.entries.contains_key(handle)
    }

    /// Returns the number of live handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table holds no handles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates live handles in enumeration order.
    pub fn handles(&self) -> impl Iterator<Item = &'a Handle> + 'a {
        self.entries.keys()
    }

    /// Iterates stored values in enumeration order.
    pub fn values(&self) -> impl Iterator<Item = &'a V> + 'a {
        self.entries.values().map(|slot| &slot.value)
    }

    /// Iterates `(handle, value)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a Handle, &'a V)> + 'a {
        self.entries.iter().map(|(handle, slot)| (handle, &slot.value))
    }
}

impl<V: fmt::Debug> fmt::Debug for HandleTableView<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> Registry<V> {
    /// Returns a read-only view of the handle table.
    #[must_use]
    pub fn view(&self) -> HandleTableView<'_, V> {
        HandleTableView::new(&self.entries)
    }

    /// Calls `f(identifier, value, table)` once per entry, in order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&str, &V, HandleTableView<'_, V>),
    {
        let table = self.view();
        for slot in self.entries.values() {
            f(&slot.identifier, &slot.value, table);
        }
    }

    /// Collects `f(value, identifier, table)` for every entry, in order.
    pub fn map<R, F>(&self, mut f: F) -> Vec<R>
    where
        F: FnMut(&V, &str, HandleTableView<'_, V>) -> R,
    {
        let table = self.view();
        self.entries
            .values()
            .map(|slot| f(&slot.value, &slot.identifier, table))
            .collect()
    }

    /// Collects the values for which `predicate` holds, preserving order.
    pub fn filter<F>(&self, mut predicate: F) -> Vec<&V>
    where
        F: FnMut(&V, &str, HandleTableView<'_, V>) -> bool,
    {
        let table = self.view();
        self.entries
            .values()
            .filter(|slot| predicate(&slot.value, &slot.identifier, table))
            .map(|slot| &slot.value)
            .collect()
    }

    /// Returns the LAST value for which `predicate` holds.
    ///
    /// The walk does not short-circuit: `predicate` runs for every entry and
    /// later matches replace earlier ones. Use [`find_first`](Self::find_first)
    /// for first-match semantics.
    ///
    /// # Examples
    ///
    /// ```
    /// use entity_registry::Registry;
    ///
    /// let registry = Registry::from_entries([("a", 10), ("b", 20)]);
    /// assert_eq!(registry.find(|v, _, _| *v > 0), Some(&20));
    /// ```
    pub fn find<F>(&self, mut predicate: F) -> Option<&V>
    where
        F: FnMut(&V, &str, HandleTableView<'_, V>) -> bool,
    {
        let table = self.view();
        let mut found = None;
        for slot in self.entries.values() {
            if predicate(&slot.value, &slot.identifier, table) {
                found = Some(&slot.value);
            }
        }
        found
    }

    /// Returns the first value for which `predicate` holds, stopping there.
    pub fn find_first<F>(&self, mut predicate: F) -> Option<&V>
    where
        F: FnMut(&V, &str, HandleTableView<'_, V>) -> bool,
    {
        let table = self.view();
        self.entries
            .values()
            .find(|slot| predicate(&slot.value, &slot.identifier, table))
            .map(|slot| &slot.value)
    }

    /// Left-folds over entries in order, starting from `initial`.
    pub fn reduce<A, F>(&self, initial: A, mut f: F) -> A
    where
        F: FnMut(A, &V, &str, HandleTableView<'_, V>) -> A,
    {
        let table = self.view();
        self.entries
            .values()
            .fold(initial, |acc, slot| f(acc, &slot.value, &slot.identifier, table))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn sample() -> Registry<i32> {
        Registry::from_entries([("a", 10), ("b", 20)])
    }

    #[test]
    fn test_for_each_visits_in_order() {
        let registry = sample();
        let mut seen = Vec::new();
        registry.for_each(|identifier, value, table| {
            assert_eq!(table.len(), 2);
            seen.push((identifier.to_string(), *value));
        });
        assert_eq!(seen, vec![("a".to_string(), 10), ("b".to_string(), 20)]);
    }

    #[test]
    fn test_map() {
        let registry = sample();
        assert_eq!(registry.map(|v, _, _| v * 2), vec![20, 40]);
        assert_eq!(registry.map(|_, id, _| id.to_string()), vec!["a", "b"]);
    }

    #[test]
    fn test_filter() {
        let registry = sample();
        assert_eq!(registry.filter(|v, _, _| *v > 15), vec![&20]);
        assert!(registry.filter(|v, _, _| *v > 100).is_empty());
    }

    #[test]
    fn test_find_returns_last_match() {
        let registry = sample();
        assert_eq!(registry.find(|v, _, _| *v > 0), Some(&20));
        assert_eq!(registry.find(|v, _, _| *v < 0), None);
    }

    #[test]
    fn test_find_visits_every_entry() {
        let registry = Registry::from_entries([("a", 1), ("b", 2), ("c", 3)]);
        let calls = Cell::new(0);
        let found = registry.find(|v, _, _| {
            calls.set(calls.get() + 1);
            *v == 1
        });
        assert_eq!(found, Some(&1));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_find_first_short_circuits() {
        let registry = Registry::from_entries([("a", 1), ("b", 2), ("c", 3)]);
        let calls = Cell::new(0);
        let found = registry.find_first(|v, _, _| {
            calls.set(calls.get() + 1);
            *v > 0
        });
        assert_eq!(found, Some(&1));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_reduce() {
        let registry = sample();
        assert_eq!(registry.reduce(0, |acc, v, _, _| acc + v), 30);
        let joined = registry.reduce(String::new(), |mut acc, _, id, _| {
            acc.push_str(id);
            acc
        });
        assert_eq!(joined, "ab");
    }

    #[test]
    fn test_reduce_empty_returns_initial() {
        let registry: Registry<i32> = Registry::new();
        assert_eq!(registry.reduce(7, |acc, v, _, _| acc + v), 7);
    }

    #[test]
    fn test_view_resolves_handles() {
        let registry = sample();
        let handle = registry.handle("b").unwrap();
        registry.for_each(|_, _, table| {
            assert!(table.contains(handle));
            assert_eq!(table.get(handle), Some(&20));
        });

        let view = registry.view();
        assert_eq!(view.values().copied().collect::<Vec<_>>(), vec![10, 20]);
        assert_eq!(view.handles().count(), 2);
        assert!(!view.is_empty());
    }

    #[test]
    #[should_panic(expected = "callback failure")]
    fn test_callback_panic_propagates() {
        let registry = sample();
        registry.for_each(|_, _, _| panic!("callback failure"));
    }
}
