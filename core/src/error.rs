//! Error types for schema building and parameter resolution.
//!
//! Building a [`Schema`](crate::Schema) fails with a [`SchemaError`]; a
//! schema that failed to build never reaches resolution. Resolving a
//! parameter tree fails with a [`ResolveError`] describing the first problem
//! encountered. Every variant that concerns a node carries its rendered
//! [`ParamPath`](crate::ParamPath).

use thiserror::Error;

/// Build-time errors for malformed schema documents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The document does not follow the schema grammar.
    #[error("malformed schema at {path}: {message}")]
    Malformed { path: String, message: String },
    /// `type` names something other than a supported primitive.
    #[error("unknown type '{name}' at {path}")]
    UnknownType { path: String, name: String },
    /// `x-action` references an action that is not registered.
    #[error("unknown action '{name}' at {path}")]
    UnknownAction { path: String, name: String },
    /// `x-check` references a check that is not registered.
    #[error("unknown check '{name}' at {path}")]
    UnknownCheck { path: String, name: String },
    /// A registered action or check received unusable parameters.
    #[error("invalid parameters for '{name}' at {path}: {message}")]
    InvalidParams {
        path: String,
        name: String,
        message: String,
    },
    /// Two flags derive the same name or alias.
    #[error("flag '{flag}' at {path} collides with the flag at {other}")]
    DuplicateFlag {
        path: String,
        flag: String,
        other: String,
    },
    /// A flag uses one of the tags reserved for help requests.
    #[error("flag '{flag}' at {path} is reserved for help")]
    ReservedFlag { path: String, flag: String },
    /// A derived flag name or alias cannot be typed on a command line.
    #[error("invalid flag name '{flag}' at {path}")]
    InvalidFlagName { path: String, flag: String },
}

impl SchemaError {
    /// Returns the schema path at which the error occurred.
    pub fn path(&self) -> &str {
        match self {
            Self::Malformed { path, .. }
            | Self::UnknownType { path, .. }
            | Self::UnknownAction { path, .. }
            | Self::UnknownCheck { path, .. }
            | Self::InvalidParams { path, .. }
            | Self::DuplicateFlag { path, .. }
            | Self::ReservedFlag { path, .. }
            | Self::InvalidFlagName { path, .. } => path,
        }
    }
}

/// Resolution-time errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The config document supplies a key the schema does not declare.
    #[error("unknown key at {path}")]
    UnknownKey { path: String },
    /// No source supplies a value and the schema declares no default.
    #[error("missing required value at {path}")]
    MissingRequiredValue { path: String },
    /// A value cannot be coerced to the expected type.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: String,
        found: String,
    },
    /// No `oneOf` alternative accepts the value.
    #[error("no alternative at {path} matches {found} (tried {})", .alternatives.join(", "))]
    NoMatchingAlternative {
        path: String,
        found: String,
        alternatives: Vec<String>,
    },
    /// The resolved scalar is not one of the declared `enum` values.
    #[error("invalid value {value} at {path} (expected one of {})", .allowed.join(", "))]
    InvalidEnumValue {
        path: String,
        value: String,
        allowed: Vec<String>,
    },
    /// A post-resolution check rejected the value.
    #[error("check {check} failed at {path}: {message}")]
    CheckFailed {
        path: String,
        check: String,
        message: String,
    },
    /// A side-effecting action failed.
    #[error("action {action} failed at {path}: {message}")]
    ActionFailed {
        path: String,
        action: String,
        message: String,
    },
    /// A token in flag position is not a known flag.
    #[error("unknown flag: {flag}")]
    UnknownFlag { flag: String },
    /// A value token appears before any flag.
    #[error("unexpected token '{token}' before any flag")]
    UnexpectedToken { token: String },
    /// A single-valued flag received several values.
    #[error("flag {flag} at {path} takes one value, got {count}")]
    TooManyValues {
        path: String,
        flag: String,
        count: usize,
    },
}

impl ResolveError {
    /// Returns the parameter path at which the error occurred, if it
    /// concerns a schema node.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::UnknownKey { path }
            | Self::MissingRequiredValue { path }
            | Self::TypeMismatch { path, .. }
            | Self::NoMatchingAlternative { path, .. }
            | Self::InvalidEnumValue { path, .. }
            | Self::CheckFailed { path, .. }
            | Self::ActionFailed { path, .. }
            | Self::TooManyValues { path, .. } => Some(path),
            Self::UnknownFlag { .. } | Self::UnexpectedToken { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_matching_alternative_lists_attempts() {
        let err = ResolveError::NoMatchingAlternative {
            path: "loss".to_string(),
            found: "integer 3".to_string(),
            alternatives: vec!["dict".to_string(), "str".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "no alternative at loss matches integer 3 (tried dict, str)"
        );
        assert_eq!(err.path(), Some("loss"));
    }

    #[test]
    fn test_token_errors_have_no_path() {
        let err = ResolveError::UnknownFlag {
            flag: "--nope".to_string(),
        };
        assert_eq!(err.path(), None);
    }
}
