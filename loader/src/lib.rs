//! Schema and config document loading for parschema.
//!
//! Schemas and config documents are YAML or JSON files; both are read into
//! [`serde_json::Value`] trees and handed to [`parschema_core`].
//!
//! ```no_run
//! use parschema_loader::{load_config, load_schema};
//!
//! let schema = load_schema("train.yaml").unwrap();
//! let config = load_config("experiment.yaml").unwrap();
//! let tokens: Vec<String> = std::env::args().skip(1).collect();
//! let params = schema.resolve(config.as_ref(), Some(&tokens)).unwrap();
//! println!("{params}");
//! ```
//!
//! A directory of schemas forms a [`CommandSet`], one subcommand per file.

mod commands;
mod document;
mod error;

pub use commands::CommandSet;
pub use document::{Format, load_config, load_document, load_schema, parse_document, parse_schema};
pub use error::{LoadError, Result};
