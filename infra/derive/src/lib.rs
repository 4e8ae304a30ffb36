#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the system-property registry.
//!
//! * [`sysprop_error`] turns a plain enum into a `thiserror`-backed error type with
//!   a `Result` alias and a `.context(..)` extension trait.
//! * [`PropertyEnum`] lets a unit-only enum be used as the value type of a
//!   `sysprop::SystemProperty`.
//!
//! Examples are `ignore`d here because they need the consuming crates to compile.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for defining the crate-level error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Type Aliasing**: Creates a `Result<T>` type alias next to the enum.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants holding a `source` field
///   (or a field marked `#[source]`/`#[from]`), enabling `?` on upstream errors.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal` variant exists.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields.
/// 3. A variant with a source must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[sysprop_derive::sysprop_error]
/// pub enum LoaderError {
///     #[error("Config error{}: {source}", format_context(.context))]
///     Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<()> {
///     builder.build().context("Reading property file")?;
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn sysprop_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Derives `sysprop::PropertyType` for a unit-only enum.
///
/// Raw values are matched against the variant names (exact match first, then
/// ASCII case-insensitive). A variant can publish a different name with
/// `#[property(rename = "...")]`. The enum must also be `Clone` and `Debug`.
///
/// # Example
///
/// ```rust,ignore
/// use sysprop::PropertyEnum;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, PropertyEnum)]
/// enum Mode {
///     Strict,
///     #[property(rename = "best-effort")]
///     BestEffort,
/// }
/// ```
#[proc_macro_derive(PropertyEnum, attributes(property))]
pub fn property_enum(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::property::expand_derive(input).into()
}
