//! Schema-driven parameter resolution.
//!
//! A schema document (JSON Schema flavored, with `x-` extensions) declares a
//! tree of parameters. From it this crate derives:
//!
//! - [`Schema`]: the normalized, validated tree of [`SchemaNode`]s, built
//!   with [`Schema::from_value`].
//! - [`FlagTable`]: one command-line flag per parameter reachable through
//!   object properties, with types, defaults, choices and help levels.
//! - [`resolve`]: the final parameter tree, merged from command-line tokens,
//!   a config document and schema defaults, in that order of precedence,
//!   then coerced, transformed by actions and validated by checks.
//!
//! Actions and checks come from a closed registry ([`Action`], [`Check`]);
//! an unknown name is a schema error, reported before any resolution runs.
//!
//! # Example
//!
//! ```
//! use parschema_core::*;
//! use serde_json::json;
//!
//! let schema = Schema::from_value(&json!({
//!     "title": "train",
//!     "properties": {
//!         "epochs": {"type": "integer", "default": 10, "description": "Passes over the data"},
//!         "verbose": {"type": "boolean", "default": false}
//!     }
//! }))
//! .unwrap();
//!
//! assert_eq!(schema.flags().len(), 2);
//! assert!(schema.flags().find("--epochs").is_some());
//!
//! let tokens = ["--verbose", "--epochs", "3"].map(String::from);
//! let params = schema.resolve(Some(&json!({"epochs": 5})), Some(&tokens)).unwrap();
//! assert_eq!(params, json!({"epochs": 3, "verbose": true}));
//! ```

mod builder;
mod coerce;
mod error;
mod path;
mod registry;
mod resolve;
mod surface;
mod tokens;
mod types;

pub use coerce::{parse_bool, render_literal};
pub use error::{ResolveError, SchemaError};
pub use path::ParamPath;
pub use registry::{
    Action, ActionError, Check, CheckError, Params, RegistryError, action_names, build_action,
    build_check, check_names,
};
pub use resolve::resolve;
pub use surface::{FlagDescriptor, FlagTable, HELP_TAGS};
pub use tokens::{CliInput, CliValue, find_help};
pub use types::{NodeKind, Primitive, Schema, SchemaNode};
