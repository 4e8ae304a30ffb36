//! # Raw Value Cache
//!
//! Concurrent `name -> raw string` store backing every property. The registry only
//! reads from it; the writer side exists for loaders and runtime overrides.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Shared handle to the raw values. Clones point at the same store.
#[derive(Debug, Clone, Default)]
pub struct RawValues {
    inner: Arc<DashMap<String, String>>,
}

impl RawValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current raw value for `name`; `None` is the normal "unset" case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<String> {
        self.inner.get(name).map(|entry| entry.value().clone())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Sets the raw value and returns the previous one.
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.inner.insert(name.into(), value.into())
    }

    /// Sets the raw value only if `name` has none yet. Returns `true` if it was inserted.
    pub fn set_if_absent(&self, name: impl Into<String>, value: impl Into<String>) -> bool {
        match self.inner.entry(name.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value.into());
                true
            },
        }
    }

    /// Replaces an existing raw value. Returns the previous one, or `None` if `name` was unset.
    pub fn replace(&self, name: &str, value: impl Into<String>) -> Option<String> {
        self.inner.get_mut(name).map(|mut entry| std::mem::replace(entry.value_mut(), value.into()))
    }

    pub fn remove(&self, name: &str) -> Option<String> {
        self.inner.remove(name).map(|(_, value)| value)
    }

    /// Writes every pair, overwriting existing values. Returns the number written.
    pub fn extend<I, K, V>(&self, values: I) -> usize
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        values.into_iter().map(|(k, v)| self.set(k, v)).count()
    }

    pub fn clear(&self) {
        self.inner.clear();
    }

    /// Point-in-time copy, ordered by name.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.inner.iter().map(|entry| (entry.key().clone(), entry.value().clone())).collect()
    }
}
