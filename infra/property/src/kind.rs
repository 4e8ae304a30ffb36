//! Value kinds and the [`PropertyType`] trait that ties a Rust type to one of them.

use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Separator used by list values in their raw form.
pub const LIST_SEPARATOR: char = ',';

/// The semantic type of a property value.
///
/// Every enum shares [`Kind::Enum`]; [`Kind::Custom`] covers user types whose
/// converter must be registered on the [`ConverterRegistry`](crate::ConverterRegistry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Boolean,
    Integer,
    Long,
    Float,
    Double,
    String,
    List,
    Enum,
    Custom(&'static str),
}

impl Kind {
    #[must_use]
    pub const fn is_enum(self) -> bool {
        matches!(self, Self::Enum)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => f.write_str("boolean"),
            Self::Integer => f.write_str("integer"),
            Self::Long => f.write_str("long"),
            Self::Float => f.write_str("float"),
            Self::Double => f.write_str("double"),
            Self::String => f.write_str("string"),
            Self::List => f.write_str("list"),
            Self::Enum => f.write_str("enum"),
            Self::Custom(name) => write!(f, "custom:{name}"),
        }
    }
}

/// Result of running a converter over a raw string.
#[derive(Debug, Clone, PartialEq)]
pub enum Converted {
    Boolean(bool),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Text(String),
    List(Vec<String>),
    /// A trimmed token still to be matched against the enum's variant names.
    Enum(String),
}

/// A Rust type that can back a [`SystemProperty`](crate::SystemProperty).
///
/// Implemented for `bool`, `i32`, `i64`, `f32`, `f64`, `String`, `Option<String>`
/// and `Vec<String>`. Unit-only enums get it from `#[derive(PropertyEnum)]`.
pub trait PropertyType: Clone + fmt::Debug + Send + Sync + 'static {
    const KIND: Kind;

    /// Whether [`PropertyType::compare`] defines a usable ordering for bounds.
    const ORDERED: bool = false;

    /// Extracts a typed value, or `None` if the converted value has the wrong shape.
    fn from_converted(value: Converted) -> Option<Self>;

    /// Canonical raw form; converting it back yields an equal value.
    fn to_raw(&self) -> Option<String>;

    /// The implicit default of a nilable type. `None` for every other type.
    #[must_use]
    fn nil() -> Option<Self> {
        None
    }

    fn compare(&self, _other: &Self) -> Option<Ordering> {
        None
    }

    fn is_empty_collection(&self) -> bool {
        false
    }
}

macro_rules! ordered_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl PropertyType for $ty {
            const KIND: Kind = Kind::$kind;
            const ORDERED: bool = true;

            fn from_converted(value: Converted) -> Option<Self> {
                match value {
                    Converted::$kind(v) => Some(v),
                    _ => None,
                }
            }

            fn to_raw(&self) -> Option<String> {
                Some(self.to_string())
            }

            fn compare(&self, other: &Self) -> Option<Ordering> {
                self.partial_cmp(other)
            }
        }
    )*};
}

ordered_scalar!(i32 => Integer, i64 => Long, f32 => Float, f64 => Double);

impl PropertyType for bool {
    const KIND: Kind = Kind::Boolean;

    fn from_converted(value: Converted) -> Option<Self> {
        match value {
            Converted::Boolean(v) => Some(v),
            _ => None,
        }
    }

    fn to_raw(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl PropertyType for String {
    const KIND: Kind = Kind::String;
    const ORDERED: bool = true;

    fn from_converted(value: Converted) -> Option<Self> {
        match value {
            Converted::Text(v) => Some(v),
            _ => None,
        }
    }

    fn to_raw(&self) -> Option<String> {
        Some(self.clone())
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The nilable string: absence is a meaningful value and no default is required.
impl PropertyType for Option<String> {
    const KIND: Kind = Kind::String;
    const ORDERED: bool = true;

    fn from_converted(value: Converted) -> Option<Self> {
        String::from_converted(value).map(Some)
    }

    fn to_raw(&self) -> Option<String> {
        self.clone()
    }

    fn nil() -> Option<Self> {
        Some(None)
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PropertyType for Vec<String> {
    const KIND: Kind = Kind::List;

    fn from_converted(value: Converted) -> Option<Self> {
        match value {
            Converted::List(v) => Some(v),
            _ => None,
        }
    }

    fn to_raw(&self) -> Option<String> {
        Some(self.join(&LIST_SEPARATOR.to_string()))
    }

    fn is_empty_collection(&self) -> bool {
        self.is_empty()
    }
}

/// Resolves an enum token against the declared `(name, variant)` table.
///
/// An exact name match wins; otherwise the first ASCII case-insensitive match is used.
/// Used by `#[derive(PropertyEnum)]`.
#[must_use]
pub fn resolve_enum<E: Clone>(value: Converted, variants: &[(&str, E)]) -> Option<E> {
    let Converted::Enum(token) = value else {
        return None;
    };

    variants
        .iter()
        .find(|(name, _)| *name == token)
        .or_else(|| variants.iter().find(|(name, _)| name.eq_ignore_ascii_case(&token)))
        .map(|(_, variant)| variant.clone())
}
