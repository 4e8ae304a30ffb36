//! # Raw value sources
//!
//! Fills [`RawValues`] from a configuration file and prefixed environment variables.
//! Parsing is left to the `config` crate; nested tables are flattened into dotted
//! property names and arrays into comma separated lists.

use crate::cache::RawValues;
use crate::error::{PropertyError, PropertyErrorExt};
use crate::kind::LIST_SEPARATOR;
use config::{Config, Environment, File, Map, Source, Value, ValueKind};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_SEPARATOR: &str = "__";

/// Layered loader: the file first, environment variables on top.
///
/// With prefix `APP` and the default separator, `APP__SERVER__PORT=8080` yields the
/// raw value `server.port = "8080"`.
#[derive(Debug, Clone)]
pub struct SourceLoader {
    file: Option<PathBuf>,
    required: bool,
    env_prefix: Option<String>,
    separator: String,
    environment: Option<Map<String, String>>,
}

impl Default for SourceLoader {
    fn default() -> Self {
        Self {
            file: None,
            required: true,
            env_prefix: None,
            separator: DEFAULT_SEPARATOR.to_owned(),
            environment: None,
        }
    }
}

impl SourceLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a file whose format is inferred from its extension (e.g. `.toml`).
    #[must_use]
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Whether a missing file is an error. Defaults to `true`.
    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Enables environment variables starting with `prefix`.
    #[must_use]
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Separator between prefix and nested key segments. Defaults to `__`.
    #[must_use]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Uses the given variables instead of the process environment.
    #[must_use]
    pub fn environment<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Reads every source and returns the flattened raw values.
    ///
    /// Environment keys arrive lowercased, so each one is written under the file key
    /// that matches it ignoring ASCII case, if there is one.
    ///
    /// # Errors
    /// Returns [`PropertyError::Source`] if a required file is missing or a source
    /// cannot be parsed.
    pub fn collect(&self) -> Result<BTreeMap<String, String>, PropertyError> {
        self.collect_with_names(&[])
    }

    /// Like [`SourceLoader::collect`], but environment keys also resolve to the
    /// matching entry of `names` (typically the registered property names).
    ///
    /// An exact match wins over a case-insensitive one; `names` are consulted before
    /// file keys.
    ///
    /// # Errors
    /// See [`SourceLoader::collect`].
    pub fn collect_with_names(
        &self,
        names: &[String],
    ) -> Result<BTreeMap<String, String>, PropertyError> {
        let mut values = self.file_values()?;

        for (key, value) in self.environment_values()? {
            let name = canonical_name(key, names, &values);
            values.insert(name, value);
        }
        Ok(values)
    }

    /// Collects every source and writes the result into `values`.
    ///
    /// Keys already present in `values` count as known names for environment matching.
    ///
    /// # Errors
    /// See [`SourceLoader::collect`].
    pub fn load_into(&self, values: &RawValues) -> Result<usize, PropertyError> {
        self.load_into_with_names(values, &[])
    }

    /// Collects every source, resolving environment keys against `names` and the keys
    /// already in `values`, and writes the result into `values`.
    ///
    /// # Errors
    /// See [`SourceLoader::collect`].
    pub fn load_into_with_names(
        &self,
        values: &RawValues,
        names: &[String],
    ) -> Result<usize, PropertyError> {
        let mut known = names.to_vec();
        known.extend(values.snapshot().into_keys());

        let collected = self.collect_with_names(&known)?;
        let count = values.extend(collected);
        info!(count, "Loaded raw property values");
        Ok(count)
    }

    fn file_values(&self) -> Result<BTreeMap<String, String>, PropertyError> {
        let mut values = BTreeMap::new();
        let Some(path) = &self.file else {
            return Ok(values);
        };

        info!(path = %path.display(), required = self.required, "Loading property file");
        let table = Config::builder()
            .add_source(File::from(path.as_path()).required(self.required))
            .build()
            .context("Failed to read property file")?
            .collect()
            .context("Failed to collect property file")?;

        for (key, value) in table {
            flatten(key, value, &mut values);
        }
        Ok(values)
    }

    fn environment_values(&self) -> Result<BTreeMap<String, String>, PropertyError> {
        let mut values = BTreeMap::new();
        let Some(prefix) = &self.env_prefix else {
            return Ok(values);
        };

        info!(prefix = %prefix, "Loading property overrides from environment");
        let table = Environment::with_prefix(prefix)
            .separator(&self.separator)
            .source(self.environment.clone())
            .collect()
            .context("Failed to collect environment overrides")?;

        for (key, value) in table {
            flatten(key, value, &mut values);
        }
        Ok(values)
    }
}

/// Name to store an environment key under: an exact match, then the first
/// case-insensitive match in `names`, then in the file keys, else the key itself.
fn canonical_name(key: String, names: &[String], file: &BTreeMap<String, String>) -> String {
    if names.iter().any(|name| *name == key) || file.contains_key(&key) {
        return key;
    }

    names
        .iter()
        .chain(file.keys())
        .find(|name| name.eq_ignore_ascii_case(&key))
        .cloned()
        .unwrap_or(key)
}

fn flatten(key: String, value: Value, out: &mut BTreeMap<String, String>) {
    match value.kind {
        ValueKind::Nil => {},
        ValueKind::Table(table) => {
            for (child, value) in table {
                flatten(format!("{key}.{child}"), value, out);
            }
        },
        ValueKind::Array(items) => {
            let joined = items
                .into_iter()
                .filter_map(|item| scalar(item.kind))
                .collect::<Vec<_>>()
                .join(&LIST_SEPARATOR.to_string());
            out.insert(key, joined);
        },
        kind => {
            if let Some(raw) = scalar(kind) {
                out.insert(key, raw);
            }
        },
    }
}

fn scalar(kind: ValueKind) -> Option<String> {
    match kind {
        ValueKind::Nil | ValueKind::Table(_) | ValueKind::Array(_) => None,
        ValueKind::String(s) => Some(s),
        ValueKind::Boolean(b) => Some(b.to_string()),
        ValueKind::I64(n) => Some(n.to_string()),
        ValueKind::I128(n) => Some(n.to_string()),
        ValueKind::U64(n) => Some(n.to_string()),
        ValueKind::U128(n) => Some(n.to_string()),
        ValueKind::Float(n) => Some(n.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const FILE: &str = r#"
        [server]
        port = 8080
        debug = true
        ratio = 0.75
        name = "primary"
        hosts = ["a", "b"]

        [server.tls]
        enabled = false
    "#;

    #[test]
    fn flattens_file_tables_and_arrays() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("properties.toml");
        fs::write(&path, FILE)?;

        let values = SourceLoader::new().file(&path).collect()?;

        assert_eq!(values.get("server.port").map(String::as_str), Some("8080"));
        assert_eq!(values.get("server.debug").map(String::as_str), Some("true"));
        assert_eq!(values.get("server.ratio").map(String::as_str), Some("0.75"));
        assert_eq!(values.get("server.name").map(String::as_str), Some("primary"));
        assert_eq!(values.get("server.hosts").map(String::as_str), Some("a,b"));
        assert_eq!(values.get("server.tls.enabled").map(String::as_str), Some("false"));
        Ok(())
    }

    #[test]
    fn environment_overrides_file() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("properties.toml");
        fs::write(&path, FILE)?;

        let values = SourceLoader::new()
            .file(&path)
            .env_prefix("APP")
            .environment([("APP__SERVER__PORT", "9090"), ("OTHER__SERVER__PORT", "1")])
            .collect()?;

        assert_eq!(values.get("server.port").map(String::as_str), Some("9090"));
        assert_eq!(values.get("server.name").map(String::as_str), Some("primary"));
        Ok(())
    }

    #[test]
    fn missing_required_file_is_a_source_error() {
        let dir = tempdir().expect("temp dir");
        let err = SourceLoader::new()
            .file(dir.path().join("absent.toml"))
            .collect()
            .expect_err("missing file must fail");

        assert!(matches!(err, PropertyError::Source { .. }));
        assert!(err.violation().is_none());
    }

    #[test]
    fn missing_optional_file_is_empty() {
        let dir = tempdir().expect("temp dir");
        let values = SourceLoader::new()
            .file(dir.path().join("absent.toml"))
            .required(false)
            .collect()
            .expect("optional file");

        assert!(values.is_empty());
    }

    #[test]
    fn load_into_writes_raw_values() {
        let values = RawValues::new();
        let count = SourceLoader::new()
            .env_prefix("SYSPROP")
            .environment([("SYSPROP__POOL__SIZE", "16")])
            .load_into(&values)
            .expect("environment source");

        assert_eq!(count, 1);
        assert_eq!(values.get("pool.size").as_deref(), Some("16"));
    }

    #[test]
    fn environment_reaches_mixed_case_file_keys() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let path = dir.path().join("properties.toml");
        fs::write(&path, "[pool]\nmaxSize = 4\n")?;

        let values = SourceLoader::new()
            .file(&path)
            .env_prefix("APP")
            .environment([("APP__POOL__MAXSIZE", "32")])
            .collect()?;

        assert_eq!(values.get("pool.maxSize").map(String::as_str), Some("32"));
        assert!(!values.contains_key("pool.maxsize"));
        Ok(())
    }

    #[test]
    fn environment_reaches_known_mixed_case_names() {
        let values = RawValues::new();
        values.set("cache.TTL", "10");

        SourceLoader::new()
            .env_prefix("APP")
            .environment([("APP__POOL__MAXSIZE", "32"), ("APP__CACHE__TTL", "60")])
            .load_into_with_names(&values, &["pool.maxSize".to_owned()])
            .expect("environment source");

        assert_eq!(values.get("pool.maxSize").as_deref(), Some("32"));
        assert_eq!(values.get("cache.TTL").as_deref(), Some("60"));
        assert!(!values.contains("pool.maxsize"));
        assert!(!values.contains("cache.ttl"));
    }

    #[test]
    fn exact_name_wins_over_case_insensitive_match() {
        let names = ["pool.maxSize".to_owned(), "pool.maxsize".to_owned()];
        let file = BTreeMap::new();

        assert_eq!(canonical_name("pool.maxsize".to_owned(), &names, &file), "pool.maxsize");
        assert_eq!(canonical_name("other.key".to_owned(), &names, &file), "other.key");
    }
}
