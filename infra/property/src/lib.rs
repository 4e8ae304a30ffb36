//! A typed, validated registry of named system properties.
//!
//! Each [`SystemProperty`] has a globally unique name, a value type, a default and
//! optional bounds. Its effective value is resolved on every read from a shared store
//! of raw strings ([`RawValues`]), so overrides become visible without invalidation.
//!
//! ## Resolution
//!
//! [`SystemProperty::value`] never fails. It looks up the raw value, converts it with
//! the converter registered for the property's [`Kind`], and falls back to the default
//! when the raw value is missing, unparsable, an empty list, below the minimum or above
//! the maximum.
//!
//! ## Construction
//!
//! Definitions are created once through [`PropertyBuilder`]. `build` validates the
//! definition and registers it with an atomic insert-if-absent; a second definition
//! with the same name is rejected with [`Violation::NameExists`], even under races.
//!
//! ## Examples
//!
//! ```rust
//! use sysprop::prelude::*;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, PropertyEnum)]
//! enum Mode {
//!     Strict,
//!     Lenient,
//! }
//!
//! # fn main() -> Result<(), PropertyError> {
//! let props = Properties::new();
//!
//! let workers = props.builder::<i32>()?
//!     .name("pool.workers")
//!     .default_value(4)
//!     .minimum_value(1)
//!     .maximum_value(64)
//!     .build()?;
//!
//! let mode = props.builder::<Mode>()?.name("pool.mode").default_value(Mode::Strict).build()?;
//!
//! props.values().set("pool.workers", "16");
//! props.values().set("pool.mode", "lenient");
//! assert_eq!(workers.value(), 16);
//! assert_eq!(mode.value(), Mode::Lenient);
//!
//! // Out of bounds: the default wins.
//! props.values().set("pool.workers", "128");
//! assert_eq!(workers.value(), 4);
//! # Ok(())
//! # }
//! ```

mod builder;
mod cache;
mod context;
mod converter;
mod error;
mod kind;
mod property;
mod registry;
mod source;

pub use builder::PropertyBuilder;
pub use cache::RawValues;
pub use context::Properties;
pub use converter::{Converter, ConverterRegistry, parse_boolean};
pub use error::{PropertyError, PropertyErrorExt, Violation};
pub use kind::{Converted, Kind, LIST_SEPARATOR, PropertyType, resolve_enum};
pub use property::SystemProperty;
pub use registry::{PropertyInfo, PropertyRegistry, RegisteredProperty};
pub use source::SourceLoader;
pub use sysprop_derive::PropertyEnum;

pub mod prelude {
    pub use crate::builder::PropertyBuilder;
    pub use crate::context::Properties;
    pub use crate::error::{PropertyError, PropertyErrorExt, Violation};
    pub use crate::kind::PropertyType;
    pub use crate::property::SystemProperty;
    pub use sysprop_derive::PropertyEnum;
}
