//! The resolution engine.
//!
//! Resolution walks the schema tree once. Object nodes are descended
//! property by property, mirrored against the config document. Every other
//! node reached this way is a flag node and takes its raw value from the
//! first source that has one: the command line, then the config document,
//! then the schema default. The raw value is then shaped to the node's kind
//! (coercion, union selection, per-element resolution), transformed by the
//! node's actions and validated by its checks.
//!
//! Siblings of a flag overridden on the command line keep their config
//! values: objects merge per leaf, they are never replaced wholesale.

use serde_json::{Map, Value};
use tracing::debug;

use crate::coerce::{coerce_scalar, describe, enum_member, render_literal};
use crate::error::ResolveError;
use crate::path::ParamPath;
use crate::tokens::{CliInput, CliValue};
use crate::types::{NodeKind, Schema, SchemaNode};

/// Where a raw value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Cli,
    Config,
    Default,
}

#[derive(Debug)]
struct Raw {
    value: Value,
    source: Source,
    /// The flag appeared on the command line without a value.
    bare: bool,
}

impl Raw {
    fn nested(value: Value) -> Self {
        Self {
            value,
            source: Source::Config,
            bare: false,
        }
    }
}

/// Resolves parameters for `schema`.
///
/// `config` is a parsed config document mirroring the schema; `tokens` is a
/// raw command-line token list. Either may be absent.
///
/// # Errors
///
/// Returns the first [`ResolveError`] encountered; no partial result is
/// produced.
///
/// # Examples
///
/// ```
/// use parschema_core::{Schema, resolve};
/// use serde_json::json;
///
/// let schema = Schema::from_value(&json!({
///     "properties": {
///         "data": {
///             "properties": {
///                 "train": {
///                     "type": ["string", "array"],
///                     "items": {"type": "string"},
///                     "x-action": ["MakeList"],
///                     "default": []
///                 },
///                 "split": {"type": "number", "default": 0.2}
///             }
///         }
///     }
/// }))
/// .unwrap();
///
/// let config = json!({"data": {"split": 0.1}});
/// let tokens = ["--train", "/tmp"].map(String::from);
/// let params = resolve(&schema, Some(&config), Some(&tokens)).unwrap();
/// assert_eq!(params, json!({"data": {"train": ["/tmp"], "split": 0.1}}));
/// ```
pub fn resolve(
    schema: &Schema,
    config: Option<&Value>,
    tokens: Option<&[String]>,
) -> Result<Value, ResolveError> {
    let cli = match tokens {
        Some(tokens) => CliInput::parse(tokens, schema.flags())?,
        None => CliInput::default(),
    };
    Resolver::new(schema, &cli).run(config)
}

impl Schema {
    /// Resolves parameters; see [`resolve`].
    pub fn resolve(
        &self,
        config: Option<&Value>,
        tokens: Option<&[String]>,
    ) -> Result<Value, ResolveError> {
        resolve(self, config, tokens)
    }
}

/// One resolution pass over a schema with already-read command-line input.
pub(crate) struct Resolver<'a> {
    schema: &'a Schema,
    cli: &'a CliInput,
}

impl<'a> Resolver<'a> {
    pub fn new(schema: &'a Schema, cli: &'a CliInput) -> Self {
        Self { schema, cli }
    }

    /// Resolves the whole parameter tree against `config`.
    pub fn run(&self, config: Option<&Value>) -> Result<Value, ResolveError> {
        let mut path = ParamPath::root();
        let root = self.schema.root();
        let value = self.resolve_object(root, config, &mut path, true)?;
        self.finish(root, Raw::nested(value), &mut path)
    }

    /// Resolves a property that is present in the schema, given the config
    /// value at its path. `flag_scope` is `true` while the node is reachable
    /// from the root through object properties only, i.e. has a flag.
    fn resolve_property(
        &self,
        node: &SchemaNode,
        config: Option<&Value>,
        path: &mut ParamPath,
        flag_scope: bool,
    ) -> Result<Value, ResolveError> {
        if node.is_object() {
            let subtree = config.filter(|v| !v.is_null()).or(node.default.as_ref());
            let value = self.resolve_object(node, subtree, path, flag_scope)?;
            return self.finish(node, Raw::nested(value), path);
        }

        let raw = self.pick_source(node, config, path, flag_scope)?;
        debug!(path = %path, source = ?raw.source, bare = raw.bare, "Selected parameter source");
        let shaped = self.shape(node, raw.value, path)?;
        self.finish(
            node,
            Raw {
                value: shaped,
                ..raw
            },
            path,
        )
    }

    fn pick_source(
        &self,
        node: &SchemaNode,
        config: Option<&Value>,
        path: &ParamPath,
        flag_scope: bool,
    ) -> Result<Raw, ResolveError> {
        if flag_scope {
            if let Some(cli) = self.cli.get(&path.keys()) {
                let (value, bare) = match cli {
                    CliValue::Bare => {
                        let value = node.presence_value().unwrap_or_else(|| {
                            if node.is_variadic() {
                                Value::Array(Vec::new())
                            } else {
                                Value::Bool(true)
                            }
                        });
                        (value, true)
                    }
                    CliValue::Single(token) => (Value::String(token.clone()), false),
                    CliValue::Many(tokens) => (
                        Value::Array(tokens.iter().cloned().map(Value::String).collect()),
                        false,
                    ),
                };
                return Ok(Raw {
                    value,
                    source: Source::Cli,
                    bare,
                });
            }
        }

        if let Some(value) = config {
            return Ok(Raw {
                value: value.clone(),
                source: Source::Config,
                bare: false,
            });
        }

        match &node.default {
            Some(default) => Ok(Raw {
                value: default.clone(),
                source: Source::Default,
                bare: false,
            }),
            None => Err(ResolveError::MissingRequiredValue {
                path: path.to_string(),
            }),
        }
    }

    fn resolve_object(
        &self,
        node: &SchemaNode,
        value: Option<&Value>,
        path: &mut ParamPath,
        flag_scope: bool,
    ) -> Result<Value, ResolveError> {
        let NodeKind::Object { properties } = &node.kind else {
            return Err(self.mismatch(path, "mapping", value.unwrap_or(&Value::Null)));
        };

        let supplied = match value {
            None => None,
            Some(Value::Object(map)) => Some(map),
            Some(other) => return Err(self.mismatch(path, "mapping", other)),
        };

        if let Some(map) = supplied {
            if let Some(key) = map.keys().find(|key| node.property(key).is_none()) {
                return Err(ResolveError::UnknownKey {
                    path: path.join(key).to_string(),
                });
            }
        }

        let mut resolved = Map::new();
        for (key, child) in properties {
            path.push_key(key);
            let value = self.resolve_property(
                child,
                supplied.and_then(|map| map.get(key)),
                path,
                flag_scope,
            )?;
            path.pop();
            resolved.insert(key.clone(), value);
        }
        Ok(Value::Object(resolved))
    }

    /// Structural and type resolution of a raw value against `node`.
    fn shape(&self, node: &SchemaNode, value: Value, path: &mut ParamPath) -> Result<Value, ResolveError> {
        if value.is_null() && node.default == Some(Value::Null) {
            return Ok(Value::Null);
        }

        match &node.kind {
            NodeKind::Object { .. } => self.resolve_object(node, Some(&value), path, false),
            NodeKind::Array { items } => {
                let elements = match value {
                    Value::Array(elements) => elements,
                    other if node.makes_list() && !other.is_null() => vec![other],
                    other => return Err(self.mismatch(path, &node.type_summary(), &other)),
                };
                let mut resolved = Vec::with_capacity(elements.len());
                for (i, element) in elements.into_iter().enumerate() {
                    path.push_index(i);
                    let shaped = self.shape(items, element, path)?;
                    resolved.push(self.finish(items, Raw::nested(shaped), path)?);
                    path.pop();
                }
                Ok(Value::Array(resolved))
            }
            NodeKind::Union { alternatives } => {
                let wraps = node.makes_list();
                let Some(index) = alternatives
                    .iter()
                    .position(|alt| matches_shape(alt, &value, wraps))
                else {
                    return Err(ResolveError::NoMatchingAlternative {
                        path: path.to_string(),
                        found: describe(&value),
                        alternatives: alternatives.iter().map(SchemaNode::type_summary).collect(),
                    });
                };
                debug!(path = %path, alternative = index, "Selected union alternative");
                let alternative = &alternatives[index];
                let value = match (&alternative.kind, value) {
                    (NodeKind::Array { .. }, Value::Array(elements)) => Value::Array(elements),
                    (NodeKind::Array { .. }, scalar) => Value::Array(vec![scalar]),
                    (_, value) => value,
                };
                let shaped = self.shape(alternative, value, path)?;
                self.finish(alternative, Raw::nested(shaped), path)
            }
            NodeKind::Scalar(primitive) => {
                let coerced = coerce_scalar(&value, *primitive)
                    .ok_or_else(|| self.mismatch(path, primitive.name(), &value))?;
                match &node.enum_values {
                    None => Ok(coerced),
                    Some(allowed) => {
                        enum_member(&coerced, allowed).ok_or_else(|| ResolveError::InvalidEnumValue {
                            path: path.to_string(),
                            value: render_literal(&coerced),
                            allowed: allowed.iter().map(render_literal).collect(),
                        })
                    }
                }
            }
        }
    }

    /// Applies the node's actions, then runs its checks.
    fn finish(&self, node: &SchemaNode, raw: Raw, path: &mut ParamPath) -> Result<Value, ResolveError> {
        let mut value = raw.value;
        if value.is_null() {
            return Ok(value);
        }

        for action in &node.actions {
            if action.is_presence() && !raw.bare {
                continue;
            }
            value = action.apply(value).map_err(|err| ResolveError::ActionFailed {
                path: path.to_string(),
                action: action.name().to_string(),
                message: err.to_string(),
            })?;
        }

        for check in &node.checks {
            check.run(&value).map_err(|err| ResolveError::CheckFailed {
                path: path.to_string(),
                check: check.name().to_string(),
                message: err.to_string(),
            })?;
        }

        Ok(value)
    }

    fn mismatch(&self, path: &ParamPath, expected: &str, found: &Value) -> ResolveError {
        ResolveError::TypeMismatch {
            path: path.to_string(),
            expected: expected.to_string(),
            found: describe(found),
        }
    }
}

/// Decides whether `value` fits the shape of a union alternative. `wraps` is
/// set when the union itself carries `MakeList`.
fn matches_shape(alternative: &SchemaNode, value: &Value, wraps: bool) -> bool {
    if value.is_null() {
        return alternative.default == Some(Value::Null);
    }
    match (&alternative.kind, value) {
        (NodeKind::Array { .. }, Value::Array(_)) => true,
        (NodeKind::Array { .. }, Value::Object(_)) => false,
        (NodeKind::Array { .. }, _) => wraps || alternative.makes_list(),
        (NodeKind::Object { properties }, Value::Object(map)) => map
            .keys()
            .all(|key| properties.iter().any(|(declared, _)| declared == key)),
        (NodeKind::Object { .. }, _) => false,
        (NodeKind::Union { alternatives }, value) => {
            alternatives.iter().any(|alt| matches_shape(alt, value, wraps))
        }
        (NodeKind::Scalar(primitive), value) => match coerce_scalar(value, *primitive) {
            None => false,
            Some(coerced) => alternative
                .enum_values
                .as_ref()
                .is_none_or(|allowed| enum_member(&coerced, allowed).is_some()),
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema(document: Value) -> Schema {
        Schema::from_value(&document).unwrap()
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_defaults_fill_empty_input() {
        let schema = schema(json!({
            "properties": {
                "split": {"type": "number", "default": 0.2},
                "name": {"type": "string", "default": "unet"}
            }
        }));
        assert_eq!(
            resolve(&schema, None, None).unwrap(),
            json!({"split": 0.2, "name": "unet"})
        );
    }

    #[test]
    fn test_missing_value_without_default() {
        let schema = schema(json!({
            "properties": {"data": {"properties": {"train": {"type": "string"}}}}
        }));
        assert_eq!(
            resolve(&schema, None, None),
            Err(ResolveError::MissingRequiredValue {
                path: "data.train".to_string()
            })
        );
    }

    #[test]
    fn test_cli_beats_config_beats_default() {
        let schema = schema(json!({
            "properties": {"epochs": {"type": "integer", "default": 10}}
        }));
        let config = json!({"epochs": 20});

        let cli = resolve(&schema, Some(&config), Some(&tokens(&["--epochs", "30"]))).unwrap();
        assert_eq!(cli, json!({"epochs": 30}));
        let cfg = resolve(&schema, Some(&config), None).unwrap();
        assert_eq!(cfg, json!({"epochs": 20}));
    }

    #[test]
    fn test_cli_override_keeps_config_siblings() {
        let schema = schema(json!({
            "properties": {
                "optim": {
                    "properties": {
                        "lr": {"type": "number", "default": 0.001},
                        "momentum": {"type": "number", "default": 0.9}
                    }
                }
            }
        }));
        let config = json!({"optim": {"momentum": 0.5}});
        let params = resolve(&schema, Some(&config), Some(&tokens(&["--lr", "0.1"]))).unwrap();
        assert_eq!(params, json!({"optim": {"lr": 0.1, "momentum": 0.5}}));
    }

    #[test]
    fn test_unknown_config_key() {
        let schema = schema(json!({
            "properties": {"data": {"properties": {"train": {"default": "."}}}}
        }));
        let config = json!({"data": {"train": ".", "valid": "."}});
        assert_eq!(
            resolve(&schema, Some(&config), None),
            Err(ResolveError::UnknownKey {
                path: "data.valid".to_string()
            })
        );
    }

    #[test]
    fn test_object_given_a_scalar() {
        let schema = schema(json!({
            "properties": {"data": {"properties": {"train": {"default": "."}}}}
        }));
        let err = resolve(&schema, Some(&json!({"data": 3})), None).unwrap_err();
        assert!(matches!(err, ResolveError::TypeMismatch { ref path, .. } if path == "data"));
    }

    #[test]
    fn test_null_object_counts_as_absent() {
        let schema = schema(json!({
            "properties": {"data": {"properties": {"train": {"default": "."}}}}
        }));
        let params = resolve(&schema, Some(&json!({"data": null})), None).unwrap();
        assert_eq!(params, json!({"data": {"train": "."}}));
    }

    #[test]
    fn test_object_default_acts_as_config_layer() {
        let schema = schema(json!({
            "properties": {
                "model": {
                    "default": {"depth": 3},
                    "properties": {"depth": {"type": "integer", "default": 5}}
                }
            }
        }));
        assert_eq!(resolve(&schema, None, None).unwrap(), json!({"model": {"depth": 3}}));
    }

    #[test]
    fn test_type_mismatch_on_bad_token() {
        let schema = schema(json!({"properties": {"epochs": {"type": "integer", "default": 1}}}));
        let err = resolve(&schema, None, Some(&tokens(&["--epochs", "many"]))).unwrap_err();
        assert_eq!(
            err,
            ResolveError::TypeMismatch {
                path: "epochs".to_string(),
                expected: "integer".to_string(),
                found: "string \"many\"".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_enum_value() {
        let schema = schema(json!({
            "properties": {"optim": {"type": "string", "enum": ["adam", "sgd"], "default": "adam"}}
        }));
        let err = resolve(&schema, None, Some(&tokens(&["--optim", "lbfgs"]))).unwrap_err();
        assert_eq!(
            err,
            ResolveError::InvalidEnumValue {
                path: "optim".to_string(),
                value: "lbfgs".to_string(),
                allowed: vec!["adam".to_string(), "sgd".to_string()],
            }
        );
    }

    #[test]
    fn test_integer_enum_from_token() {
        let schema = schema(json!({
            "properties": {"dim": {"enum": [2, 3], "default": 3}}
        }));
        let params = resolve(&schema, None, Some(&tokens(&["--dim", "2"]))).unwrap();
        assert_eq!(params, json!({"dim": 2}));
    }

    #[test]
    fn test_bare_boolean_flag_is_true() {
        let schema = schema(json!({
            "properties": {"verbose": {"type": "boolean", "default": false}}
        }));
        assert_eq!(
            resolve(&schema, None, Some(&tokens(&["--verbose"]))).unwrap(),
            json!({"verbose": true})
        );
        assert_eq!(
            resolve(&schema, None, Some(&tokens(&["--verbose", "no"]))).unwrap(),
            json!({"verbose": false})
        );
    }

    #[test]
    fn test_presence_actions_fire_only_for_bare_flags() {
        let schema = schema(json!({
            "properties": {
                "cache": {"type": "boolean", "default": true, "x-action": "SetFalse", "x-alias": "--no-cache"},
                "format": {"type": "string", "default": "yaml", "x-action": {"SetValue": "json"}}
            }
        }));

        assert_eq!(
            resolve(&schema, None, None).unwrap(),
            json!({"cache": true, "format": "yaml"})
        );
        assert_eq!(
            resolve(&schema, None, Some(&tokens(&["--no-cache", "--format"]))).unwrap(),
            json!({"cache": false, "format": "json"})
        );
        let config = json!({"cache": true, "format": "toml"});
        assert_eq!(resolve(&schema, Some(&config), None).unwrap(), config);
    }

    #[test]
    fn test_bare_variadic_flag_is_empty() {
        let schema = schema(json!({
            "properties": {"eval": {"type": "array", "items": {"type": "string"}, "default": ["a"]}}
        }));
        assert_eq!(
            resolve(&schema, None, Some(&tokens(&["--eval"]))).unwrap(),
            json!({"eval": []})
        );
    }

    #[test]
    fn test_bare_string_flag_is_type_mismatch() {
        let schema = schema(json!({
            "properties": {"name": {"type": "string", "default": "x"}}
        }));
        let err = resolve(&schema, None, Some(&tokens(&["--name"]))).unwrap_err();
        assert!(matches!(err, ResolveError::TypeMismatch { .. }));
    }

    #[test]
    fn test_array_elements_are_coerced() {
        let schema = schema(json!({
            "properties": {"sizes": {"type": "array", "items": {"type": "integer"}, "default": []}}
        }));
        assert_eq!(
            resolve(&schema, None, Some(&tokens(&["--sizes", "1", "2", "3"]))).unwrap(),
            json!({"sizes": [1, 2, 3]})
        );
        let err = resolve(&schema, None, Some(&tokens(&["--sizes", "1", "x"]))).unwrap_err();
        assert_eq!(err.path(), Some("sizes[1]"));
    }

    #[test]
    fn test_array_scalar_needs_make_list() {
        let plain = schema(json!({
            "properties": {"sizes": {"type": "array", "items": {"type": "integer"}}}
        }));
        let err = resolve(&plain, Some(&json!({"sizes": 4})), None).unwrap_err();
        assert!(matches!(err, ResolveError::TypeMismatch { .. }));

        let wrapping = schema(json!({
            "properties": {"sizes": {"type": "array", "items": {"type": "integer"}, "x-action": "MakeList"}}
        }));
        assert_eq!(
            resolve(&wrapping, Some(&json!({"sizes": 4})), None).unwrap(),
            json!({"sizes": [4]})
        );
    }

    #[test]
    fn test_array_of_objects_fills_element_defaults() {
        let schema = schema(json!({
            "properties": {
                "layers": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "width": {"type": "integer"},
                            "act": {"type": "string", "default": "relu"}
                        }
                    }
                }
            }
        }));
        let config = json!({"layers": [{"width": 8}, {"width": 16, "act": "tanh"}]});
        assert_eq!(
            resolve(&schema, Some(&config), None).unwrap(),
            json!({"layers": [{"width": 8, "act": "relu"}, {"width": 16, "act": "tanh"}]})
        );

        let bad = json!({"layers": [{"width": 8, "depth": 2}]});
        assert_eq!(
            resolve(&schema, Some(&bad), None),
            Err(ResolveError::UnknownKey {
                path: "layers[0].depth".to_string()
            })
        );
    }

    #[test]
    fn test_union_prefers_earlier_alternative() {
        let schema = schema(json!({
            "properties": {"value": {"type": ["integer", "string"], "default": "x"}}
        }));
        assert_eq!(
            resolve(&schema, None, Some(&tokens(&["--value", "7"]))).unwrap(),
            json!({"value": 7})
        );
        assert_eq!(
            resolve(&schema, None, Some(&tokens(&["--value", "seven"]))).unwrap(),
            json!({"value": "seven"})
        );
    }

    #[test]
    fn test_union_no_match_lists_alternatives() {
        let schema = schema(json!({
            "properties": {"value": {"type": ["integer", "boolean"], "default": 1}}
        }));
        let err = resolve(&schema, Some(&json!({"value": "x"})), None).unwrap_err();
        assert_eq!(
            err,
            ResolveError::NoMatchingAlternative {
                path: "value".to_string(),
                found: "string \"x\"".to_string(),
                alternatives: vec!["int".to_string(), "bool".to_string()],
            }
        );
    }

    #[test]
    fn test_object_alternative_requires_declared_keys() {
        let schema = schema(json!({
            "properties": {
                "loss": {
                    "oneOf": [
                        {"type": "object", "properties": {"0": {"enum": ["dice", "ce"]}, "1": {"enum": ["dice", "ce"], "default": "ce"}}},
                        {"type": "object", "properties": {"main": {"type": "string"}}}
                    ]
                }
            }
        }));
        assert_eq!(
            resolve(&schema, Some(&json!({"loss": {"0": "dice"}})), None).unwrap(),
            json!({"loss": {"0": "dice", "1": "ce"}})
        );
        assert_eq!(
            resolve(&schema, Some(&json!({"loss": {"main": "l1"}})), None).unwrap(),
            json!({"loss": {"main": "l1"}})
        );
        assert!(matches!(
            resolve(&schema, Some(&json!({"loss": {"aux": "l1"}})), None),
            Err(ResolveError::NoMatchingAlternative { .. })
        ));
    }

    #[test]
    fn test_union_make_list_wraps_into_array_alternative() {
        let schema = schema(json!({
            "properties": {
                "sizes": {
                    "type": ["boolean", "array"],
                    "items": {"type": "integer"},
                    "x-action": "MakeList",
                    "default": []
                }
            }
        }));
        assert_eq!(
            resolve(&schema, Some(&json!({"sizes": 4})), None).unwrap(),
            json!({"sizes": [4]})
        );
        assert_eq!(
            resolve(&schema, Some(&json!({"sizes": true})), None).unwrap(),
            json!({"sizes": [true]})
        );
    }

    #[test]
    fn test_alternative_make_list_wraps_scalar() {
        let schema = schema(json!({
            "properties": {
                "tags": {
                    "oneOf": [
                        {"type": "integer"},
                        {"type": "array", "items": {"type": "string"}, "x-action": "MakeList"}
                    ]
                }
            }
        }));
        assert_eq!(
            resolve(&schema, Some(&json!({"tags": "a"})), None).unwrap(),
            json!({"tags": ["a"]})
        );
        assert_eq!(
            resolve(&schema, Some(&json!({"tags": 3})), None).unwrap(),
            json!({"tags": 3})
        );
        assert_eq!(
            resolve(&schema, Some(&json!({"tags": ["a", "b"]})), None).unwrap(),
            json!({"tags": ["a", "b"]})
        );
    }

    #[test]
    fn test_nullable_parameter() {
        let schema = schema(json!({
            "properties": {
                "resume": {"type": "string", "default": null, "x-check": "FileExists"}
            }
        }));
        assert_eq!(resolve(&schema, None, None).unwrap(), json!({"resume": null}));
        assert_eq!(
            resolve(&schema, Some(&json!({"resume": null})), None).unwrap(),
            json!({"resume": null})
        );

        let required = Schema::from_value(&json!({
            "properties": {"name": {"type": "string", "default": "x"}}
        }))
        .unwrap();
        assert!(matches!(
            resolve(&required, Some(&json!({"name": null})), None),
            Err(ResolveError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_convert_action() {
        let schema = schema(json!({
            "properties": {"tag": {"x-action": {"Convert": {"dtype": "string"}}, "default": 5}}
        }));
        assert_eq!(resolve(&schema, None, None).unwrap(), json!({"tag": "5"}));
    }

    #[test]
    fn test_token_errors_abort_resolution() {
        let schema = schema(json!({"properties": {"a": {"default": 1}}}));
        assert_eq!(
            resolve(&schema, None, Some(&tokens(&["--b"]))),
            Err(ResolveError::UnknownFlag {
                flag: "--b".to_string()
            })
        );
    }

    #[test]
    fn test_schema_resolve_method() {
        let schema = schema(json!({"properties": {"a": {"default": 1}}}));
        assert_eq!(schema.resolve(None, None).unwrap(), json!({"a": 1}));
    }
}
