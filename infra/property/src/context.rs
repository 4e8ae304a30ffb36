use crate::builder::PropertyBuilder;
use crate::cache::RawValues;
use crate::converter::ConverterRegistry;
use crate::error::PropertyError;
use crate::kind::PropertyType;
use crate::property::SystemProperty;
use crate::registry::PropertyRegistry;
use crate::source::SourceLoader;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Properties> = OnceLock::new();

#[derive(Debug)]
struct PropertiesInner {
    converters: ConverterRegistry,
    values: RawValues,
    registry: PropertyRegistry,
}

/// Handle bundling converters, raw values and the name registry.
///
/// Cheap to clone. The process normally uses [`Properties::global`]; tests and
/// embedded uses can create isolated instances with [`Properties::new`].
#[derive(Debug, Clone)]
pub struct Properties {
    inner: Arc<PropertiesInner>,
}

impl Default for Properties {
    fn default() -> Self {
        Self::new()
    }
}

impl Properties {
    /// Isolated instance with the standard converters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_converters(ConverterRegistry::standard())
    }

    #[must_use]
    pub fn with_converters(converters: ConverterRegistry) -> Self {
        Self {
            inner: Arc::new(PropertiesInner {
                converters,
                values: RawValues::new(),
                registry: PropertyRegistry::new(),
            }),
        }
    }

    /// The process-wide instance, created with the standard converters on first use
    /// unless [`Properties::install`] ran before.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::new)
    }

    /// Makes `self` the process-wide instance.
    ///
    /// # Errors
    /// Gives `self` back if the global instance already exists.
    pub fn install(self) -> Result<(), Self> {
        GLOBAL.set(self)
    }

    #[must_use]
    pub fn converters(&self) -> &ConverterRegistry {
        &self.inner.converters
    }

    #[must_use]
    pub fn values(&self) -> &RawValues {
        &self.inner.values
    }

    #[must_use]
    pub fn registry(&self) -> &PropertyRegistry {
        &self.inner.registry
    }

    /// Starts a [`PropertyBuilder`] bound to this instance.
    ///
    /// # Errors
    /// Fails with [`Violation::UnsupportedType`](crate::Violation::UnsupportedType) when
    /// `T` has no converter here.
    pub fn builder<T: PropertyType>(&self) -> Result<PropertyBuilder<T>, PropertyError> {
        PropertyBuilder::within(self)
    }

    /// Typed lookup of an already registered property.
    #[must_use]
    pub fn get<T: PropertyType>(&self, name: &str) -> Option<SystemProperty<T>> {
        self.inner.registry.get(name)
    }

    /// Loads raw values from `loader` into this instance.
    ///
    /// Environment overrides are matched against the registered property names
    /// ignoring ASCII case, so `APP__POOL__MAXSIZE` reaches `pool.maxSize`.
    ///
    /// # Errors
    /// Returns [`PropertyError::Source`] if a source cannot be read or parsed.
    pub fn load(&self, loader: &SourceLoader) -> Result<usize, PropertyError> {
        loader.load_into_with_names(&self.inner.values, &self.inner.registry.names())
    }

    #[must_use]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Kind;

    #[test]
    fn instances_are_isolated() {
        let a = Properties::new();
        let b = Properties::new();
        a.builder::<bool>().unwrap().name("flag").default_value(true).build().unwrap();

        assert!(a.get::<bool>("flag").is_some());
        assert!(b.get::<bool>("flag").is_none());
        assert!(Properties::ptr_eq(&a, &a.clone()));
        assert!(!Properties::ptr_eq(&a, &b));
    }

    #[test]
    fn custom_converters_apply_to_builders() {
        let props = Properties::with_converters(ConverterRegistry::empty());
        let err = props.builder::<i32>().unwrap_err();
        assert_eq!(err.violation(), Some(crate::Violation::UnsupportedType));
        assert!(!props.converters().supports(Kind::Integer));
    }
}
