use crate::cache::RawValues;
use crate::converter::Converter;
use crate::kind::{Kind, PropertyType};
use crate::registry::{PropertyInfo, RegisteredProperty};
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

pub(crate) struct PropertyInner<T> {
    pub(crate) name: String,
    pub(crate) default: T,
    pub(crate) minimum: Option<T>,
    pub(crate) maximum: Option<T>,
    pub(crate) converter: Converter,
    pub(crate) values: RawValues,
}

/// A named, typed property with a default and optional bounds.
///
/// Built once through [`PropertyBuilder`](crate::PropertyBuilder) and immutable afterwards.
/// Clones are cheap and refer to the same definition.
///
/// [`SystemProperty::value`] reads the raw value on every call, so overrides written to
/// the [`RawValues`] are picked up without any invalidation step. A missing, unparsable
/// or out-of-bounds raw value resolves to the default.
pub struct SystemProperty<T: PropertyType> {
    inner: Arc<PropertyInner<T>>,
    initial: Arc<T>,
}

impl<T: PropertyType> Clone for SystemProperty<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner), initial: Arc::clone(&self.initial) }
    }
}

impl<T: PropertyType> fmt::Debug for SystemProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemProperty")
            .field("name", &self.inner.name)
            .field("kind", &T::KIND)
            .field("default", &self.inner.default)
            .field("minimum", &self.inner.minimum)
            .field("maximum", &self.inner.maximum)
            .field("initial", &self.initial)
            .finish_non_exhaustive()
    }
}

impl<T: PropertyType> SystemProperty<T> {
    /// Creates the definition and memoizes its initial value.
    pub(crate) fn new(inner: PropertyInner<T>) -> Self {
        let initial = inner.resolve(inner.values.get(&inner.name).as_deref());
        Self { inner: Arc::new(inner), initial: Arc::new(initial) }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        T::KIND
    }

    /// Resolves the effective value from the current raw value.
    #[must_use]
    pub fn value(&self) -> T {
        self.inner.resolve(self.raw().as_deref())
    }

    /// The raw value currently stored for this property, if any.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.inner.values.get(&self.inner.name)
    }

    /// `true` when a raw value is present and accepted (parsable and within bounds).
    #[must_use]
    pub fn is_overridden(&self) -> bool {
        self.raw().is_some_and(|raw| self.inner.accept(Some(&raw)).is_some())
    }

    #[must_use]
    pub fn default_value(&self) -> &T {
        &self.inner.default
    }

    #[must_use]
    pub fn minimum_value(&self) -> Option<&T> {
        self.inner.minimum.as_ref()
    }

    #[must_use]
    pub fn maximum_value(&self) -> Option<&T> {
        self.inner.maximum.as_ref()
    }

    /// Value resolved when the property was built. Never refreshed.
    #[must_use]
    pub fn initial_value(&self) -> &T {
        &self.initial
    }

    /// `true` if both handles refer to the same definition.
    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

impl<T: PropertyType> PropertyInner<T> {
    fn resolve(&self, raw: Option<&str>) -> T {
        self.accept(raw).unwrap_or_else(|| self.default.clone())
    }

    /// The converted raw value, or `None` when the default must be used instead.
    fn accept(&self, raw: Option<&str>) -> Option<T> {
        let value = (self.converter)(raw)
            .and_then(T::from_converted)
            .filter(|value| !value.is_empty_collection())?;

        if self.minimum.as_ref().is_some_and(|min| exceeds(min, &value)) {
            return None;
        }
        if self.maximum.as_ref().is_some_and(|max| exceeds(&value, max)) {
            return None;
        }
        Some(value)
    }
}

/// `a > b`, treating incomparable values (NaN) as out of order.
pub(crate) fn exceeds<T: PropertyType>(a: &T, b: &T) -> bool {
    !matches!(a.compare(b), Some(Ordering::Less | Ordering::Equal))
}

impl<T: PropertyType> RegisteredProperty for SystemProperty<T> {
    fn name(&self) -> &str {
        self.name()
    }

    fn kind(&self) -> Kind {
        T::KIND
    }

    fn info(&self) -> PropertyInfo {
        let raw = self.raw();
        let current = self.inner.resolve(raw.as_deref());
        PropertyInfo {
            name: self.inner.name.clone(),
            kind: T::KIND,
            default: self.inner.default.to_raw(),
            minimum: self.inner.minimum.as_ref().and_then(PropertyType::to_raw),
            maximum: self.inner.maximum.as_ref().and_then(PropertyType::to_raw),
            initial: self.initial.to_raw(),
            current: current.to_raw(),
            overridden: raw.as_deref().is_some_and(|raw| self.inner.accept(Some(raw)).is_some()),
            raw,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
