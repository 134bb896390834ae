//! Building a [`Schema`] from a parsed schema document.
//!
//! The document is a generic tree (`serde_json::Value`) produced by any
//! YAML/JSON loader. Building normalizes it into [`SchemaNode`]s, resolves
//! every `x-action` / `x-check` against the registry and derives the flag
//! table, so that every defect in the document is reported here with its
//! path rather than during argument parsing.

use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::path::ParamPath;
use crate::registry::{self, Action, Check, Params, RegistryError};
use crate::surface::FlagTable;
use crate::types::{NodeKind, Primitive, Schema, SchemaNode};

/// Settings inherited from the enclosing node.
#[derive(Debug, Clone, Copy)]
struct Inherited {
    help_level: u32,
    simpletag: bool,
}

impl Schema {
    /// Builds a schema from a parsed document.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] naming the offending path when the document
    /// is malformed, uses an unknown type, action or check, or derives
    /// colliding flag names.
    ///
    /// # Examples
    ///
    /// ```
    /// use parschema_core::{Schema, SchemaError};
    /// use serde_json::json;
    ///
    /// let schema = Schema::from_value(&json!({
    ///     "title": "train",
    ///     "properties": {
    ///         "split": {"type": "number", "default": 0.2}
    ///     }
    /// }))
    /// .unwrap();
    /// assert_eq!(schema.flags().len(), 1);
    ///
    /// let err = Schema::from_value(&json!({
    ///     "properties": {"out": {"type": "string", "x-action": "MakeDri"}}
    /// }))
    /// .unwrap_err();
    /// assert!(matches!(err, SchemaError::UnknownAction { .. }));
    /// ```
    pub fn from_value(document: &Value) -> Result<Self, SchemaError> {
        let path = ParamPath::root();
        let map = as_mapping(document, &path)?;
        let inherited = Inherited {
            help_level: 0,
            simpletag: true,
        };

        let root = build_node(document, &path, inherited)?;
        if !root.is_object() {
            return Err(malformed(&path, "the root schema must be an object"));
        }

        let flags = FlagTable::derive(&root)?;
        Ok(Self {
            title: optional_string(map, "title", &path)?,
            description: optional_string(map, "description", &path)?,
            root,
            flags,
        })
    }
}

fn build_node(
    value: &Value,
    path: &ParamPath,
    inherited: Inherited,
) -> Result<SchemaNode, SchemaError> {
    let map = as_mapping(value, path)?;

    let help_level = match map.get("x-help") {
        None => inherited.help_level,
        Some(raw) => raw
            .as_u64()
            .and_then(|level| u32::try_from(level).ok())
            .ok_or_else(|| malformed(path, "x-help must be a non-negative integer"))?,
    };
    let simpletag = match map.get("x-simpletag") {
        None => inherited.simpletag,
        Some(raw) => raw
            .as_bool()
            .ok_or_else(|| malformed(path, "x-simpletag must be a boolean"))?,
    };
    let here = Inherited {
        help_level,
        simpletag,
    };

    let enum_values = match map.get("enum") {
        None => None,
        Some(Value::Array(values)) if !values.is_empty() => Some(values.clone()),
        Some(_) => return Err(malformed(path, "enum must be a non-empty sequence")),
    };

    let (kind, enum_values) = build_kind(map, path, here, enum_values)?;

    Ok(SchemaNode {
        kind,
        enum_values,
        default: map.get("default").cloned(),
        actions: build_actions(map.get("x-action"), path)?,
        checks: build_checks(map.get("x-check"), path)?,
        help_level,
        description: optional_string(map, "description", path)?,
        aliases: build_aliases(map.get("x-alias"), path)?,
        simpletag,
    })
}

/// Determines the node kind. Returns the enum that stays on the node itself;
/// for type arrays the enum moves to the scalar alternatives.
fn build_kind(
    map: &Map<String, Value>,
    path: &ParamPath,
    inherited: Inherited,
    enum_values: Option<Vec<Value>>,
) -> Result<(NodeKind, Option<Vec<Value>>), SchemaError> {
    if let Some(one_of) = map.get("oneOf") {
        let alternatives = match one_of {
            Value::Array(alternatives) if !alternatives.is_empty() => alternatives,
            _ => return Err(malformed(path, "oneOf must be a non-empty sequence")),
        };
        if enum_values.is_some() {
            return Err(malformed(path, "enum belongs on the oneOf alternatives"));
        }
        let mut alt_path = path.join("oneOf");
        let mut built = Vec::with_capacity(alternatives.len());
        for (i, alternative) in alternatives.iter().enumerate() {
            alt_path.push_index(i);
            built.push(build_node(alternative, &alt_path, inherited)?);
            alt_path.pop();
        }
        return Ok((NodeKind::Union { alternatives: built }, None));
    }

    let kind = match map.get("type") {
        None if map.contains_key("properties") => kind_for_type("object", map, path, inherited)?,
        None if map.contains_key("items") => kind_for_type("array", map, path, inherited)?,
        None => NodeKind::Scalar(Primitive::Any),
        Some(Value::String(name)) => kind_for_type(name, map, path, inherited)?,
        Some(Value::Array(names)) => {
            let names = names
                .iter()
                .map(|name| {
                    name.as_str()
                        .ok_or_else(|| malformed(path, "type names must be strings"))
                })
                .collect::<Result<Vec<_>, _>>()?;
            match names.as_slice() {
                [] => return Err(malformed(path, "type must not be an empty sequence")),
                [single] => kind_for_type(single, map, path, inherited)?,
                _ => {
                    let mut alternatives = Vec::with_capacity(names.len());
                    for name in names {
                        let kind = kind_for_type(name, map, path, inherited)?;
                        let mut alternative = SchemaNode::new(kind);
                        alternative.help_level = inherited.help_level;
                        alternative.simpletag = inherited.simpletag;
                        if matches!(alternative.kind, NodeKind::Scalar(_)) {
                            alternative.enum_values = enum_values.clone();
                        }
                        alternatives.push(alternative);
                    }
                    return Ok((NodeKind::Union { alternatives }, None));
                }
            }
        }
        Some(_) => return Err(malformed(path, "type must be a string or a sequence")),
    };

    if enum_values.is_some() && !matches!(kind, NodeKind::Scalar(_)) {
        return Err(malformed(path, "enum is only supported on scalar nodes"));
    }
    Ok((kind, enum_values))
}

fn kind_for_type(
    name: &str,
    map: &Map<String, Value>,
    path: &ParamPath,
    inherited: Inherited,
) -> Result<NodeKind, SchemaError> {
    match name {
        "object" => {
            let properties = match map.get("properties") {
                None => return Ok(NodeKind::Object { properties: Vec::new() }),
                Some(Value::Object(properties)) => properties,
                Some(_) => return Err(malformed(path, "properties must be a mapping")),
            };
            let mut built = Vec::with_capacity(properties.len());
            for (key, child) in properties {
                built.push((key.clone(), build_node(child, &path.join(key), inherited)?));
            }
            Ok(NodeKind::Object { properties: built })
        }
        "array" => {
            let items = match map.get("items") {
                None => SchemaNode::scalar(Primitive::Any),
                Some(items) => build_node(items, &path.join("items"), inherited)?,
            };
            Ok(NodeKind::Array {
                items: Box::new(items),
            })
        }
        other => Primitive::from_name(other)
            .map(NodeKind::Scalar)
            .ok_or_else(|| SchemaError::UnknownType {
                path: path.to_string(),
                name: other.to_string(),
            }),
    }
}

/// Splits an `x-action` / `x-check` value into `(name, params)` entries.
///
/// An entry is a name, or a one-entry mapping from name to parameters; the
/// value is one entry or a sequence of them.
fn parse_entries(raw: Option<&Value>, path: &ParamPath) -> Result<Vec<(String, Params)>, SchemaError> {
    let entries = match raw {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries.iter().collect::<Vec<_>>(),
        Some(entry) => vec![entry],
    };

    entries
        .into_iter()
        .map(|entry| match entry {
            Value::String(name) => Ok((name.clone(), Params::default())),
            Value::Object(map) => match (map.len(), map.iter().next()) {
                (1, Some((name, params))) => Ok((name.clone(), Params::from_value(Some(params)))),
                (entries, _) => Err(malformed(
                    path,
                    &format!(
                        "an action or check entry must be a name or a one-entry mapping, got {entries} entries"
                    ),
                )),
            },
            _ => Err(malformed(
                path,
                "an action or check entry must be a name or a one-entry mapping",
            )),
        })
        .collect()
}

fn build_actions(raw: Option<&Value>, path: &ParamPath) -> Result<Vec<Action>, SchemaError> {
    parse_entries(raw, path)?
        .into_iter()
        .map(|(name, params)| {
            registry::build_action(&name, &params).map_err(|err| match err {
                RegistryError::Unknown => SchemaError::UnknownAction {
                    path: path.to_string(),
                    name,
                },
                RegistryError::InvalidParams(message) => SchemaError::InvalidParams {
                    path: path.to_string(),
                    name,
                    message,
                },
            })
        })
        .collect()
}

fn build_checks(raw: Option<&Value>, path: &ParamPath) -> Result<Vec<Check>, SchemaError> {
    parse_entries(raw, path)?
        .into_iter()
        .map(|(name, params)| {
            registry::build_check(&name, &params).map_err(|err| match err {
                RegistryError::Unknown => SchemaError::UnknownCheck {
                    path: path.to_string(),
                    name,
                },
                RegistryError::InvalidParams(message) => SchemaError::InvalidParams {
                    path: path.to_string(),
                    name,
                    message,
                },
            })
        })
        .collect()
}

fn build_aliases(raw: Option<&Value>, path: &ParamPath) -> Result<Vec<String>, SchemaError> {
    match raw {
        None => Ok(Vec::new()),
        Some(Value::String(alias)) => Ok(vec![alias.clone()]),
        Some(Value::Array(aliases)) => aliases
            .iter()
            .map(|alias| {
                alias
                    .as_str()
                    .map(String::from)
                    .ok_or_else(|| malformed(path, "x-alias entries must be strings"))
            })
            .collect(),
        Some(_) => Err(malformed(path, "x-alias must be a string or a sequence of strings")),
    }
}

fn optional_string(
    map: &Map<String, Value>,
    key: &str,
    path: &ParamPath,
) -> Result<Option<String>, SchemaError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(_) => Err(malformed(path, &format!("{key} must be a string"))),
    }
}

fn as_mapping<'a>(value: &'a Value, path: &ParamPath) -> Result<&'a Map<String, Value>, SchemaError> {
    value
        .as_object()
        .ok_or_else(|| malformed(path, "a schema node must be a mapping"))
}

fn malformed(path: &ParamPath, message: &str) -> SchemaError {
    SchemaError::Malformed {
        path: path.to_string(),
        message: message.to_string(),
    }
}
