//! # Global Registry
//!
//! One property definition per name for the lifetime of the registry. Entries are
//! type-erased behind [`RegisteredProperty`] and downcast on typed lookup.

use crate::kind::{Kind, PropertyType};
use crate::property::SystemProperty;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::Serialize;
use std::any::Any;
use std::fmt::Debug;

/// Object-safe view of a registered [`SystemProperty`].
pub trait RegisteredProperty: Any + Debug + Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> Kind;

    /// Diagnostics snapshot taken at call time.
    fn info(&self) -> PropertyInfo;

    /// Helper to allow downcasting from the trait object.
    fn as_any(&self) -> &dyn Any;
}

/// Serializable description of a property and its current resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyInfo {
    pub name: String,
    pub kind: Kind,
    pub default: Option<String>,
    pub minimum: Option<String>,
    pub maximum: Option<String>,
    pub initial: Option<String>,
    pub current: Option<String>,
    pub raw: Option<String>,
    pub overridden: bool,
}

/// Name-unique store of property definitions. There is no removal.
#[derive(Debug, Default)]
pub struct PropertyRegistry {
    entries: DashMap<String, Box<dyn RegisteredProperty>>,
}

impl PropertyRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically registers `property` under its name unless the name is taken.
    ///
    /// Returns `false` when another definition already owns the name; the existing
    /// entry is left untouched.
    pub fn register_if_absent<T: PropertyType>(&self, property: &SystemProperty<T>) -> bool {
        match self.entries.entry(property.name().to_owned()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Box::new(property.clone()));
                true
            },
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Typed lookup. `None` if the name is unknown or registered with another type.
    #[must_use]
    pub fn get<T: PropertyType>(&self, name: &str) -> Option<SystemProperty<T>> {
        let entry = self.entries.get(name)?;
        entry.value().as_any().downcast_ref::<SystemProperty<T>>().cloned()
    }

    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<Kind> {
        self.entries.get(name).map(|entry| entry.value().kind())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in ascending order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.entries.iter().map(|entry| entry.key().clone()).collect();
        names.sort_unstable();
        names
    }

    /// Describes every registered property, ordered by name.
    #[must_use]
    pub fn describe(&self) -> Vec<PropertyInfo> {
        let mut infos: Vec<_> = self.entries.iter().map(|entry| entry.value().info()).collect();
        infos.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        infos
    }
}
