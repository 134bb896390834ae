//! Reading YAML and JSON documents into parameter trees.
//!
//! Both formats end up as a [`serde_json::Value`]. YAML documents go through
//! two extra steps: merge keys (`<<`) are applied, and scalar mapping keys
//! are stringified, so `0: dice` reads as `{"0": "dice"}`.

use std::fs;
use std::path::Path;

use parschema_core::Schema;
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::error::{LoadError, Result};

/// Document syntax, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Picks the format from a path's extension (`.json`, `.yaml`, `.yml`).
    ///
    /// # Examples
    ///
    /// ```
    /// use parschema_loader::Format;
    ///
    /// assert_eq!(Format::from_path("train.yml"), Some(Format::Yaml));
    /// assert_eq!(Format::from_path("train.json"), Some(Format::Json));
    /// assert_eq!(Format::from_path("train.toml"), None);
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Parses document text.
///
/// # Errors
///
/// Returns [`LoadError::Json`] or [`LoadError::Yaml`] for syntax errors and
/// [`LoadError::InvalidDocument`] for YAML content with no JSON
/// counterpart (non-finite floats, composite mapping keys).
///
/// # Examples
///
/// ```
/// use parschema_loader::{Format, parse_document};
/// use serde_json::json;
///
/// let doc = parse_document("loss:\n  0: dice\n", Format::Yaml).unwrap();
/// assert_eq!(doc, json!({"loss": {"0": "dice"}}));
/// ```
pub fn parse_document(text: &str, format: Format) -> Result<Value> {
    match format {
        Format::Json => Ok(serde_json::from_str(text)?),
        Format::Yaml => {
            let mut value: serde_yaml::Value = serde_yaml::from_str(text)?;
            value.apply_merge()?;
            yaml_to_json(value)
        }
    }
}

/// Reads and parses the document at `path`.
pub fn load_document(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let format =
        Format::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    let text = fs::read_to_string(path)?;
    debug!(path = %path.display(), ?format, "Read document");
    parse_document(&text, format)
}

/// Reads a config document. An empty document counts as no config.
pub fn load_config(path: impl AsRef<Path>) -> Result<Option<Value>> {
    let value = load_document(path)?;
    Ok((!value.is_null()).then_some(value))
}

/// Parses and builds a schema from document text.
pub fn parse_schema(text: &str, format: Format) -> Result<Schema> {
    let document = parse_document(text, format)?;
    Ok(Schema::from_value(&document)?)
}

/// Reads and builds the schema at `path`.
///
/// # Errors
///
/// Any [`LoadError`]; build failures surface as [`LoadError::Schema`].
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    let document = load_document(path)?;
    let schema = Schema::from_value(&document)?;
    debug!(path = %path.display(), flags = schema.flags().len(), "Built schema");
    Ok(schema)
}

fn yaml_to_json(value: serde_yaml::Value) -> Result<Value> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => yaml_number(&n)?,
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<Vec<_>>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(mapping_key(key)?, yaml_to_json(value)?);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Result<Value> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Ok(Value::from(u));
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| LoadError::InvalidDocument(format!("number {n} has no JSON form")))
}

fn mapping_key(key: serde_yaml::Value) -> Result<String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => mapping_key(tagged.value),
        Yaml::Sequence(_) | Yaml::Mapping(_) => Err(LoadError::InvalidDocument(
            "mapping keys must be scalars".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_yaml_and_json_agree() {
        let yaml = "data:\n  train: [a, b]\n  split: 0.2\nverbose: true\n";
        let json = r#"{"data": {"train": ["a", "b"], "split": 0.2}, "verbose": true}"#;
        assert_eq!(
            parse_document(yaml, Format::Yaml).unwrap(),
            parse_document(json, Format::Json).unwrap()
        );
    }

    #[test]
    fn test_yaml_keys_are_stringified() {
        let doc = parse_document("1: a\ntrue: b\n2.5: c\n", Format::Yaml).unwrap();
        assert_eq!(doc, json!({"1": "a", "true": "b", "2.5": "c"}));
    }

    #[test]
    fn test_yaml_merge_keys() {
        let yaml = "base: &base\n  lr: 0.1\n  momentum: 0.9\noptim:\n  <<: *base\n  lr: 0.5\n";
        let doc = parse_document(yaml, Format::Yaml).unwrap();
        assert_eq!(doc["optim"], json!({"lr": 0.5, "momentum": 0.9}));
    }

    #[test]
    fn test_yaml_tags_are_dropped() {
        let doc = parse_document("split: !ratio 0.2\n", Format::Yaml).unwrap();
        assert_eq!(doc, json!({"split": 0.2}));
    }

    #[test]
    fn test_yaml_composite_key_rejected() {
        let err = parse_document("? [a, b]\n: c\n", Format::Yaml).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDocument(_)));
    }

    #[test]
    fn test_yaml_non_finite_float_rejected() {
        let err = parse_document("split: .nan\n", Format::Yaml).unwrap_err();
        assert!(matches!(err, LoadError::InvalidDocument(_)));
    }

    #[test]
    fn test_empty_yaml_is_null() {
        assert_eq!(parse_document("", Format::Yaml).unwrap(), Value::Null);
    }

    #[test]
    fn test_parse_schema_reports_builder_errors() {
        let err = parse_schema("properties:\n  x:\n    type: complex\n", Format::Yaml).unwrap_err();
        assert!(matches!(err, LoadError::Schema(_)));
    }

    #[test]
    fn test_load_document_rejects_unknown_extension() {
        let err = load_document("params.toml").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }
}
