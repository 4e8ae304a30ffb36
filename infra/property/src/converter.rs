//! # Converter Registry
//!
//! Maps a [`Kind`] to the function that turns a raw string into a [`Converted`] value.
//! Converters never fail loudly: anything they cannot parse becomes `None`.

use crate::kind::{Converted, Kind, LIST_SEPARATOR};
use fxhash::FxHashMap;

/// Parses an optional raw string. `None` means "no value".
pub type Converter = fn(Option<&str>) -> Option<Converted>;

/// Fixed table of converters, keyed by [`Kind`].
///
/// Every enum type shares [`Kind::Enum`]; when that entry is absent the built-in enum
/// converter is used, so enums are supported by every registry.
#[derive(Debug, Clone)]
pub struct ConverterRegistry {
    table: FxHashMap<Kind, Converter>,
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl ConverterRegistry {
    /// A registry without any converter. Every kind except [`Kind::Enum`] is unsupported
    /// until added.
    #[must_use]
    pub fn empty() -> Self {
        Self { table: FxHashMap::default() }
    }

    /// The built-in converters for every scalar kind and lists.
    #[must_use]
    pub fn standard() -> Self {
        Self::empty()
            .with(Kind::Boolean, parse_boolean)
            .with(Kind::Integer, |raw| parse_number(raw).map(Converted::Integer))
            .with(Kind::Long, |raw| parse_number(raw).map(Converted::Long))
            .with(Kind::Float, |raw| parse_number(raw).map(Converted::Float))
            .with(Kind::Double, |raw| parse_number(raw).map(Converted::Double))
            .with(Kind::String, |raw| raw.map(|s| Converted::Text(s.to_owned())))
            .with(Kind::List, parse_list)
    }

    /// Adds or replaces the converter for `kind`.
    #[must_use]
    pub fn with(mut self, kind: Kind, converter: Converter) -> Self {
        self.table.insert(kind, converter);
        self
    }

    /// Looks up the converter for `kind`. Enums fall back to the built-in enum converter
    /// when no override was registered.
    #[must_use]
    pub fn resolve(&self, kind: Kind) -> Option<Converter> {
        self.table.get(&kind).copied().or_else(|| kind.is_enum().then_some(parse_enum as Converter))
    }

    #[must_use]
    pub fn supports(&self, kind: Kind) -> bool {
        self.resolve(kind).is_some()
    }

    /// Converts `raw` for `kind`. Unknown kinds and unparsable input yield `None`.
    #[must_use]
    pub fn convert(&self, kind: Kind, raw: Option<&str>) -> Option<Converted> {
        self.resolve(kind).and_then(|convert| convert(raw))
    }
}

/// Only `true` and `false` (any case) are accepted; everything else is "no value".
#[must_use]
pub fn parse_boolean(raw: Option<&str>) -> Option<Converted> {
    match raw? {
        s if s.eq_ignore_ascii_case("true") => Some(Converted::Boolean(true)),
        s if s.eq_ignore_ascii_case("false") => Some(Converted::Boolean(false)),
        _ => None,
    }
}

fn parse_number<N: std::str::FromStr>(raw: Option<&str>) -> Option<N> {
    raw.filter(|s| !s.is_empty()).and_then(|s| s.parse().ok())
}

fn parse_list(raw: Option<&str>) -> Option<Converted> {
    let items = raw?
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect();
    Some(Converted::List(items))
}

fn parse_enum(raw: Option<&str>) -> Option<Converted> {
    raw.map(str::trim).filter(|s| !s.is_empty()).map(|s| Converted::Enum(s.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_accepts_only_true_and_false() {
        let converters = ConverterRegistry::standard();
        for (raw, expected) in [
            (Some("true"), Some(Converted::Boolean(true))),
            (Some("TRUE"), Some(Converted::Boolean(true))),
            (Some("False"), Some(Converted::Boolean(false))),
            (Some("yes"), None),
            (Some("1"), None),
            (Some(""), None),
            (None, None),
        ] {
            assert_eq!(converters.convert(Kind::Boolean, raw), expected, "raw = {raw:?}");
        }
    }

    #[test]
    fn numbers_reject_empty_and_malformed_text() {
        let converters = ConverterRegistry::standard();
        assert_eq!(converters.convert(Kind::Integer, Some("42")), Some(Converted::Integer(42)));
        assert_eq!(converters.convert(Kind::Integer, Some("-7")), Some(Converted::Integer(-7)));
        assert_eq!(converters.convert(Kind::Integer, Some("abc")), None);
        assert_eq!(converters.convert(Kind::Integer, Some("")), None);
        assert_eq!(converters.convert(Kind::Integer, Some("3000000000")), None);
        assert_eq!(
            converters.convert(Kind::Long, Some("3000000000")),
            Some(Converted::Long(3_000_000_000))
        );
        assert_eq!(converters.convert(Kind::Double, Some("2.5")), Some(Converted::Double(2.5)));
        assert_eq!(converters.convert(Kind::Float, Some("0.5")), Some(Converted::Float(0.5)));
        assert_eq!(converters.convert(Kind::Double, None), None);
    }

    #[test]
    fn strings_pass_through() {
        let converters = ConverterRegistry::standard();
        assert_eq!(
            converters.convert(Kind::String, Some(" spaced ")),
            Some(Converted::Text(" spaced ".to_owned()))
        );
        assert_eq!(converters.convert(Kind::String, Some("")), Some(Converted::Text(String::new())));
        assert_eq!(converters.convert(Kind::String, None), None);
    }

    #[test]
    fn lists_split_and_trim() {
        let converters = ConverterRegistry::standard();
        assert_eq!(
            converters.convert(Kind::List, Some("a, b,,c ")),
            Some(Converted::List(vec!["a".into(), "b".into(), "c".into()]))
        );
        assert_eq!(converters.convert(Kind::List, Some(" , ")), Some(Converted::List(Vec::new())));
    }

    #[test]
    fn enum_tokens_are_trimmed() {
        let converters = ConverterRegistry::standard();
        assert_eq!(converters.convert(Kind::Enum, Some(" High ")), Some(Converted::Enum("High".into())));
        assert_eq!(converters.convert(Kind::Enum, Some("  ")), None);
    }

    #[test]
    fn custom_kinds_need_registration() {
        let kind = Kind::Custom("upper");
        assert!(!ConverterRegistry::standard().supports(kind));

        let converters = ConverterRegistry::standard()
            .with(kind, |raw| raw.map(|s| Converted::Text(s.to_uppercase())));
        assert_eq!(converters.convert(kind, Some("abc")), Some(Converted::Text("ABC".into())));
    }

    #[test]
    fn empty_registry_supports_only_enums() {
        let converters = ConverterRegistry::empty();
        assert!(!converters.supports(Kind::Boolean));
        assert_eq!(converters.convert(Kind::Boolean, Some("true")), None);

        assert!(converters.supports(Kind::Enum));
        assert_eq!(converters.convert(Kind::Enum, Some(" low ")), Some(Converted::Enum("low".into())));
    }

    #[test]
    fn enum_converter_can_be_overridden() {
        let converters = ConverterRegistry::empty()
            .with(Kind::Enum, |raw| raw.map(|s| Converted::Enum(s.replace('_', "-"))));
        assert_eq!(
            converters.convert(Kind::Enum, Some("very_high")),
            Some(Converted::Enum("very-high".into()))
        );
    }
}
