use crate::context::Properties;
use crate::converter::Converter;
use crate::error::{PropertyError, Violation};
use crate::kind::PropertyType;
use crate::property::{PropertyInner, SystemProperty, exceeds};
use tracing::{debug, warn};

/// One-shot builder for a [`SystemProperty`].
///
/// Setters only record values; every invariant is checked by [`PropertyBuilder::build`],
/// which consumes the builder so it cannot be reused.
///
/// ```rust
/// use sysprop::prelude::*;
///
/// # fn main() -> Result<(), PropertyError> {
/// let props = Properties::new();
/// let ratio = props.builder::<f64>()?
///     .name("cache.hitRatio")
///     .default_value(0.8)
///     .minimum_value(0.0)
///     .maximum_value(1.0)
///     .build()?;
///
/// props.values().set("cache.hitRatio", "1.5");
/// assert!((ratio.value() - 0.8).abs() < f64::EPSILON);
///
/// let err = props.builder::<f64>()?.name("cache.hitRatio").default_value(0.5).build();
/// assert_eq!(err.unwrap_err().violation(), Some(Violation::NameExists));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
#[must_use = "A property builder does nothing until `build` is called"]
pub struct PropertyBuilder<T: PropertyType> {
    properties: Properties,
    converter: Converter,
    name: Option<String>,
    default: Option<T>,
    minimum: Option<T>,
    maximum: Option<T>,
}

impl<T: PropertyType> PropertyBuilder<T> {
    /// Starts a builder registered against [`Properties::global`].
    ///
    /// # Results
    /// Returns an empty builder bound to the process-wide [`Properties`].
    ///
    /// # Errors
    /// Returns [`PropertyError::InvalidArgument`] with [`Violation::UnsupportedType`]
    /// if `T` is neither an enum nor a kind with a registered converter.
    pub fn of() -> Result<Self, PropertyError> {
        Self::within(Properties::global())
    }

    /// Starts a builder registered against an explicit [`Properties`] handle.
    ///
    /// # Errors
    /// See [`PropertyBuilder::of`].
    pub fn within(properties: &Properties) -> Result<Self, PropertyError> {
        let converter = properties.converters().resolve(T::KIND).ok_or_else(|| {
            PropertyError::invalid(
                Violation::UnsupportedType,
                format!(
                    "type `{}` ({}) has no registered converter",
                    std::any::type_name::<T>(),
                    T::KIND
                ),
            )
        })?;

        Ok(Self {
            properties: properties.clone(),
            converter,
            name: None,
            default: None,
            minimum: None,
            maximum: None,
        })
    }

    /// Sets the globally unique property name.
    ///
    /// # Arguments
    /// * `name`: Key looked up in the [`RawValues`](crate::RawValues). Used verbatim and
    ///   case-sensitive; a blank name is rejected by [`PropertyBuilder::build`].
    ///
    /// # Errors
    /// None. Validation happens in [`PropertyBuilder::build`].
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the value used whenever the raw value is missing or rejected.
    ///
    /// # Arguments
    /// * `value`: Required unless `T` is nilable (`Option<String>`), whose default is `None`.
    ///
    /// # Errors
    /// None. A missing default is reported by [`PropertyBuilder::build`].
    pub fn default_value(mut self, value: T) -> Self {
        self.default = Some(value);
        self
    }

    /// Sets the inclusive lower bound. Smaller raw values resolve to the default.
    ///
    /// # Arguments
    /// * `value`: Must not exceed the default; only allowed for ordered types.
    ///
    /// # Errors
    /// None. [`PropertyBuilder::build`] reports [`Violation::MinimumUnordered`] and
    /// [`Violation::MinimumAboveDefault`].
    pub fn minimum_value(mut self, value: T) -> Self {
        self.minimum = Some(value);
        self
    }

    /// Sets the inclusive upper bound. Larger raw values resolve to the default.
    ///
    /// # Arguments
    /// * `value`: Must not be below the default; only allowed for ordered types.
    ///
    /// # Errors
    /// None. [`PropertyBuilder::build`] reports [`Violation::MaximumUnordered`] and
    /// [`Violation::MaximumBelowDefault`].
    pub fn maximum_value(mut self, value: T) -> Self {
        self.maximum = Some(value);
        self
    }

    /// Validates the configuration and registers the property under its name.
    ///
    /// Checks, in order: name present, name free, default present for non-nilable
    /// types, minimum ordered and not above the default, maximum ordered and not below
    /// the default. Registration is an atomic insert-if-absent, so two concurrent builds
    /// with the same name yield exactly one property.
    ///
    /// # Errors
    /// Returns [`PropertyError::InvalidArgument`] carrying the first [`Violation`] found.
    pub fn build(self) -> Result<SystemProperty<T>, PropertyError> {
        let name = self.name.filter(|name| !name.trim().is_empty()).ok_or_else(|| {
            PropertyError::invalid(Violation::NameRequired, "a property name is required")
        })?;

        let registry = self.properties.registry();
        if registry.contains(&name) {
            return Err(name_exists(&name));
        }

        let default = self.default.clone().or_else(T::nil).ok_or_else(|| {
            PropertyError::invalid(
                Violation::DefaultRequired,
                format!("property `{name}` of kind {} requires a default value", T::KIND),
            )
        })?;

        if let Some(minimum) = &self.minimum {
            if !T::ORDERED {
                return Err(PropertyError::invalid(
                    Violation::MinimumUnordered,
                    format!("property `{name}` of kind {} cannot have a minimum", T::KIND),
                ));
            }
            if self.default.as_ref().is_some_and(|default| exceeds(minimum, default)) {
                return Err(PropertyError::invalid(
                    Violation::MinimumAboveDefault,
                    format!("minimum {minimum:?} of `{name}` exceeds default {default:?}"),
                ));
            }
        }

        if let Some(maximum) = &self.maximum {
            if !T::ORDERED {
                return Err(PropertyError::invalid(
                    Violation::MaximumUnordered,
                    format!("property `{name}` of kind {} cannot have a maximum", T::KIND),
                ));
            }
            if self.default.as_ref().is_some_and(|default| exceeds(default, maximum)) {
                return Err(PropertyError::invalid(
                    Violation::MaximumBelowDefault,
                    format!("maximum {maximum:?} of `{name}` is below default {default:?}"),
                ));
            }
        }

        let property = SystemProperty::new(PropertyInner {
            name,
            default,
            minimum: self.minimum,
            maximum: self.maximum,
            converter: self.converter,
            values: self.properties.values().clone(),
        });

        if !registry.register_if_absent(&property) {
            warn!(name = property.name(), "Concurrent registration lost the race for property name");
            return Err(name_exists(property.name()));
        }

        debug!(name = property.name(), kind = %T::KIND, "Registered system property");
        Ok(property)
    }
}

fn name_exists(name: &str) -> PropertyError {
    PropertyError::invalid(Violation::NameExists, format!("property `{name}` is already registered"))
}
