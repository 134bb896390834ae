//! The closed catalogue of actions and checks.
//!
//! Schemas reference operations by name (`x-action: [MakeList]`,
//! `x-check: PathExists`). Names are looked up once, when the schema is
//! built, through [`build_action`] and [`build_check`]; resolution only ever
//! sees the typed [`Action`] and [`Check`] variants. Adding a kind means
//! adding a variant and a row in the matching table below.

use std::fs::DirBuilder;
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::info;

use crate::coerce::{convert_scalar, render_literal};
use crate::types::Primitive;

/// Parameters attached to an action or check in the schema.
///
/// `{MakeDict: {key: "0"}}` yields named parameters, `{SetValue: [3]}`
/// positional ones, and `{SetValue: 3}` a single positional parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    positional: Vec<Value>,
    named: Map<String, Value>,
}

impl Params {
    /// Builds parameters from the value of a one-entry action mapping.
    pub fn from_value(raw: Option<&Value>) -> Self {
        match raw {
            None | Some(Value::Null) => Self::default(),
            Some(Value::Object(named)) => Self {
                positional: Vec::new(),
                named: named.clone(),
            },
            Some(Value::Array(positional)) => Self {
                positional: positional.clone(),
                named: Map::new(),
            },
            Some(single) => Self {
                positional: vec![single.clone()],
                named: Map::new(),
            },
        }
    }

    /// Returns the parameter at `index` or named `name`.
    pub fn get(&self, index: usize, name: &str) -> Option<&Value> {
        self.named.get(name).or_else(|| self.positional.get(index))
    }

    fn expect_at_most(&self, names: &[&str]) -> Result<(), String> {
        if self.positional.len() > names.len() {
            return Err(format!(
                "expected at most {} parameter(s), got {}",
                names.len(),
                self.positional.len()
            ));
        }
        match self.named.keys().find(|key| !names.contains(&key.as_str())) {
            Some(key) => Err(format!("unexpected parameter '{key}'")),
            None => Ok(()),
        }
    }
}

/// A named post-type-resolution transform.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Wraps a non-sequence into a one-element sequence.
    MakeList,
    /// Wraps a non-mapping into `{key: value}`.
    MakeDict { key: String },
    /// Assigns `true` when the flag is given without a value.
    SetTrue,
    /// Assigns `false` when the flag is given without a value.
    SetFalse,
    /// Assigns `value` when the flag is given without a value.
    SetValue { value: Value },
    /// Ensures the directory (or each directory of a sequence) exists.
    MakeDir { mode: Option<u32>, exist_ok: bool },
    /// Converts a scalar (or each element of a sequence) to `dtype`.
    Convert { dtype: Primitive },
}

/// A named post-action validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    PathExists,
    FileExists,
    DirExists,
}

/// Failure of an action at resolution time.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("cannot create directory '{path}': {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },
    #[error("expected a path string, found {0}")]
    NotAPath(String),
    #[error("cannot convert {value} to {dtype}")]
    Convert { value: String, dtype: &'static str },
}

/// Failure of a check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    #[error("path does not exist: {0}")]
    PathMissing(String),
    #[error("file does not exist: {0}")]
    FileMissing(String),
    #[error("directory does not exist: {0}")]
    DirMissing(String),
    #[error("expected a path string, found {0}")]
    NotAPath(String),
}

/// Lookup failure while building a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("not registered")]
    Unknown,
    #[error("{0}")]
    InvalidParams(String),
}

type ActionCtor = fn(&Params) -> Result<Action, String>;
type CheckCtor = fn(&Params) -> Result<Check, String>;

const ACTIONS: &[(&str, ActionCtor)] = &[
    ("MakeList", make_list),
    ("MakeDict", make_dict),
    ("SetTrue", set_true),
    ("SetFalse", set_false),
    ("SetValue", set_value),
    ("MakeDir", make_dir),
    ("Convert", convert),
];

const CHECKS: &[(&str, CheckCtor)] = &[
    ("PathExists", path_exists),
    ("FileExists", file_exists),
    ("DirExists", dir_exists),
];

/// Returns the names of all registered actions.
pub fn action_names() -> impl Iterator<Item = &'static str> {
    ACTIONS.iter().map(|(name, _)| *name)
}

/// Returns the names of all registered checks.
pub fn check_names() -> impl Iterator<Item = &'static str> {
    CHECKS.iter().map(|(name, _)| *name)
}

/// Builds the action registered as `name`.
///
/// # Examples
///
/// ```
/// use parschema_core::{Action, Params, RegistryError, build_action};
/// use serde_json::json;
///
/// let params = Params::from_value(Some(&json!({"key": "0"})));
/// assert_eq!(
///     build_action("MakeDict", &params),
///     Ok(Action::MakeDict { key: "0".into() })
/// );
/// assert_eq!(
///     build_action("MakeLsit", &Params::default()),
///     Err(RegistryError::Unknown)
/// );
/// ```
pub fn build_action(name: &str, params: &Params) -> Result<Action, RegistryError> {
    let (_, ctor) = ACTIONS
        .iter()
        .find(|(key, _)| *key == name)
        .ok_or(RegistryError::Unknown)?;
    ctor(params).map_err(RegistryError::InvalidParams)
}

/// Builds the check registered as `name`.
pub fn build_check(name: &str, params: &Params) -> Result<Check, RegistryError> {
    let (_, ctor) = CHECKS
        .iter()
        .find(|(key, _)| *key == name)
        .ok_or(RegistryError::Unknown)?;
    ctor(params).map_err(RegistryError::InvalidParams)
}

fn make_list(params: &Params) -> Result<Action, String> {
    params.expect_at_most(&[])?;
    Ok(Action::MakeList)
}

fn make_dict(params: &Params) -> Result<Action, String> {
    params.expect_at_most(&["key"])?;
    let key = params
        .get(0, "key")
        .ok_or_else(|| "missing parameter 'key'".to_string())?;
    match key {
        Value::Array(_) | Value::Object(_) | Value::Null => {
            Err("'key' must be a scalar".to_string())
        }
        scalar => Ok(Action::MakeDict {
            key: render_literal(scalar),
        }),
    }
}

fn set_true(params: &Params) -> Result<Action, String> {
    params.expect_at_most(&[])?;
    Ok(Action::SetTrue)
}

fn set_false(params: &Params) -> Result<Action, String> {
    params.expect_at_most(&[])?;
    Ok(Action::SetFalse)
}

fn set_value(params: &Params) -> Result<Action, String> {
    params.expect_at_most(&["value"])?;
    let value = params
        .get(0, "value")
        .ok_or_else(|| "missing parameter 'value'".to_string())?;
    Ok(Action::SetValue {
        value: value.clone(),
    })
}

fn make_dir(params: &Params) -> Result<Action, String> {
    params.expect_at_most(&["mode", "exist_ok"])?;
    let mode = match params.get(0, "mode") {
        None => None,
        Some(raw) => Some(
            raw.as_u64()
                .filter(|mode| *mode <= 0o7777)
                .ok_or_else(|| format!("'mode' must be a permission mask, got {raw}"))?
                as u32,
        ),
    };
    let exist_ok = match params.get(1, "exist_ok") {
        None => true,
        Some(raw) => raw
            .as_bool()
            .ok_or_else(|| format!("'exist_ok' must be a boolean, got {raw}"))?,
    };
    Ok(Action::MakeDir { mode, exist_ok })
}

fn convert(params: &Params) -> Result<Action, String> {
    params.expect_at_most(&["dtype"])?;
    let dtype = params
        .get(0, "dtype")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing parameter 'dtype'".to_string())?;
    match Primitive::from_name(dtype) {
        Some(Primitive::Any) | None => Err(format!("cannot convert to '{dtype}'")),
        Some(dtype) => Ok(Action::Convert { dtype }),
    }
}

fn path_exists(params: &Params) -> Result<Check, String> {
    params.expect_at_most(&[])?;
    Ok(Check::PathExists)
}

fn file_exists(params: &Params) -> Result<Check, String> {
    params.expect_at_most(&[])?;
    Ok(Check::FileExists)
}

fn dir_exists(params: &Params) -> Result<Check, String> {
    params.expect_at_most(&[])?;
    Ok(Check::DirExists)
}

impl Action {
    /// Returns the registered name of this action.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MakeList => "MakeList",
            Self::MakeDict { .. } => "MakeDict",
            Self::SetTrue => "SetTrue",
            Self::SetFalse => "SetFalse",
            Self::SetValue { .. } => "SetValue",
            Self::MakeDir { .. } => "MakeDir",
            Self::Convert { .. } => "Convert",
        }
    }

    /// Returns the value a presence action assigns, `None` for other actions.
    ///
    /// Presence actions only fire when their flag appears on the command line
    /// without a value.
    pub fn presence_value(&self) -> Option<Value> {
        match self {
            Self::SetTrue => Some(Value::Bool(true)),
            Self::SetFalse => Some(Value::Bool(false)),
            Self::SetValue { value } => Some(value.clone()),
            _ => None,
        }
    }

    pub fn is_presence(&self) -> bool {
        matches!(self, Self::SetTrue | Self::SetFalse | Self::SetValue { .. })
    }

    /// Applies the action to `value`.
    ///
    /// # Errors
    ///
    /// `MakeDir` fails when the value is not a path or the directory cannot
    /// be created; `Convert` fails when a scalar has no representation in
    /// the target type.
    pub fn apply(&self, value: Value) -> Result<Value, ActionError> {
        match self {
            Self::MakeList => Ok(match value {
                Value::Array(items) => Value::Array(items),
                other => Value::Array(vec![other]),
            }),
            Self::MakeDict { key } => Ok(match value {
                Value::Object(map) => Value::Object(map),
                other => {
                    let mut map = Map::new();
                    map.insert(key.clone(), other);
                    Value::Object(map)
                }
            }),
            Self::SetTrue | Self::SetFalse | Self::SetValue { .. } => {
                Ok(self.presence_value().unwrap_or(value))
            }
            Self::MakeDir { mode, exist_ok } => {
                for_each_path(&value, ActionError::NotAPath, &mut |path: &str| {
                    make_dir_at(path, *mode, *exist_ok)
                })?;
                Ok(value)
            }
            Self::Convert { dtype } => convert_value(value, *dtype),
        }
    }
}

impl Check {
    /// Returns the registered name of this check.
    pub fn name(self) -> &'static str {
        match self {
            Self::PathExists => "PathExists",
            Self::FileExists => "FileExists",
            Self::DirExists => "DirExists",
        }
    }

    /// Validates `value` without altering it.
    pub fn run(self, value: &Value) -> Result<(), CheckError> {
        for_each_path(value, CheckError::NotAPath, &mut |path: &str| {
            let fs_path = Path::new(path);
            match self {
                Self::PathExists if !fs_path.exists() => {
                    Err(CheckError::PathMissing(path.to_string()))
                }
                Self::FileExists if !fs_path.is_file() => {
                    Err(CheckError::FileMissing(path.to_string()))
                }
                Self::DirExists if !fs_path.is_dir() => {
                    Err(CheckError::DirMissing(path.to_string()))
                }
                _ => Ok(()),
            }
        })
    }
}

/// Calls `f` on the path string, or on each path string of a sequence.
fn for_each_path<E>(
    value: &Value,
    not_a_path: fn(String) -> E,
    f: &mut dyn FnMut(&str) -> Result<(), E>,
) -> Result<(), E> {
    match value {
        Value::String(path) => f(path),
        Value::Array(items) => items
            .iter()
            .try_for_each(|item| for_each_path(item, not_a_path, &mut *f)),
        other => Err(not_a_path(crate::coerce::describe(other))),
    }
}

fn make_dir_at(path: &str, mode: Option<u32>, exist_ok: bool) -> Result<(), ActionError> {
    let fail = |source| ActionError::CreateDir {
        path: path.to_string(),
        source,
    };

    if Path::new(path).is_dir() {
        if exist_ok {
            return Ok(());
        }
        return Err(fail(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            "directory already exists",
        )));
    }

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    set_mode(&mut builder, mode);
    builder.create(path).map_err(fail)?;
    info!(path, "Created directory");
    Ok(())
}

#[cfg(unix)]
fn set_mode(builder: &mut DirBuilder, mode: Option<u32>) {
    use std::os::unix::fs::DirBuilderExt;
    if let Some(mode) = mode {
        builder.mode(mode);
    }
}

#[cfg(not(unix))]
fn set_mode(_builder: &mut DirBuilder, _mode: Option<u32>) {}

fn convert_value(value: Value, dtype: Primitive) -> Result<Value, ActionError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| convert_value(item, dtype))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        scalar => convert_scalar(&scalar, dtype).ok_or_else(|| ActionError::Convert {
            value: crate::coerce::describe(&scalar),
            dtype: dtype.name(),
        }),
    }
}
