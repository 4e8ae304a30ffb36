//! # Property Errors
//!
//! Construction-time failures of the registry. Reading a property never fails:
//! bad or missing raw values resolve to the default instead.

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// The invariant a rejected builder violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Violation {
    /// The value type has no converter and is not an enum.
    UnsupportedType,
    /// No name (or a blank one) was configured.
    NameRequired,
    /// Another property already owns the name.
    NameExists,
    /// A non-nilable type was built without a default.
    DefaultRequired,
    /// A minimum was given for an unordered type.
    MinimumUnordered,
    /// The minimum is greater than the default.
    MinimumAboveDefault,
    /// A maximum was given for an unordered type.
    MaximumUnordered,
    /// The maximum is less than the default.
    MaximumBelowDefault,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnsupportedType => "unsupported type",
            Self::NameRequired => "name required",
            Self::NameExists => "name exists",
            Self::DefaultRequired => "default required",
            Self::MinimumUnordered => "minimum on unordered type",
            Self::MinimumAboveDefault => "minimum above default",
            Self::MaximumUnordered => "maximum on unordered type",
            Self::MaximumBelowDefault => "maximum below default",
        })
    }
}

/// A specialized [`PropertyError`] enum of this crate.
#[sysprop_derive::sysprop_error]
pub enum PropertyError {
    /// A builder argument broke one of the definition invariants.
    #[error("Invalid argument [{violation}]{}: {message}", format_context(.context))]
    InvalidArgument {
        violation: Violation,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    /// A raw value source could not be read or parsed.
    #[error("Property source error{}: {source}", format_context(.context))]
    Source { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

impl PropertyError {
    pub(crate) fn invalid(violation: Violation, message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidArgument { violation, message: message.into(), context: None }
    }

    /// Returns the violated invariant for [`PropertyError::InvalidArgument`].
    #[must_use]
    pub const fn violation(&self) -> Option<Violation> {
        match self {
            Self::InvalidArgument { violation, .. } => Some(*violation),
            Self::Source { .. } => None,
        }
    }
}
