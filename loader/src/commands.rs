//! Named subcommand sets loaded from a directory of schema documents.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parschema_core::Schema;
use tracing::{debug, info};

use crate::document::{Format, load_schema};
use crate::error::{LoadError, Result};

/// A set of schemas keyed by command name.
///
/// Built from a directory where each `*.yaml`, `*.yml` or `*.json` file is
/// one command named after its file stem. Other files are ignored.
///
/// # Examples
///
/// ```no_run
/// use parschema_loader::CommandSet;
///
/// let commands = CommandSet::from_dir("schemas/").unwrap();
/// let tokens: Vec<String> = std::env::args().skip(1).collect();
/// let (name, schema, rest) = commands.dispatch(&tokens).unwrap();
/// println!("{name}: {} flags, {} tokens", schema.flags().len(), rest.len());
/// ```
#[derive(Debug)]
pub struct CommandSet {
    commands: BTreeMap<String, Schema>,
    dir: PathBuf,
}

impl CommandSet {
    /// Loads every schema document in `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the directory cannot be read,
    /// [`LoadError::DuplicateCommand`] if two files share a stem, and any
    /// error from loading an individual schema.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && Format::from_path(&path).is_some() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut commands = BTreeMap::new();
        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if commands.contains_key(name) {
                return Err(LoadError::DuplicateCommand(name.to_string()));
            }
            debug!(command = name, path = %path.display(), "Loading command schema");
            commands.insert(name.to_string(), load_schema(&path)?);
        }

        info!(dir = %dir.display(), count = commands.len(), "Loaded command set");
        Ok(Self {
            commands,
            dir: dir.to_path_buf(),
        })
    }

    /// Creates a set from already-built schemas.
    pub fn from_schemas(commands: impl IntoIterator<Item = (String, Schema)>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
            dir: PathBuf::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Returns command names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The directory the set was loaded from; empty for in-memory sets.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Splits off the command name from `tokens` and returns it with its
    /// schema and the remaining tokens.
    ///
    /// # Errors
    ///
    /// [`LoadError::NoCommand`] for an empty token list and
    /// [`LoadError::UnknownCommand`] for a name outside the set.
    pub fn dispatch<'t>(&self, tokens: &'t [String]) -> Result<(&str, &Schema, &'t [String])> {
        let available = || self.names().map(String::from).collect::<Vec<_>>();
        let (first, rest) = tokens
            .split_first()
            .ok_or_else(|| LoadError::NoCommand(available()))?;
        match self.commands.get_key_value(first.as_str()) {
            Some((name, schema)) => Ok((name.as_str(), schema, rest)),
            None => Err(LoadError::UnknownCommand {
                name: first.clone(),
                available: available(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema(flag: &str) -> Schema {
        Schema::from_value(&json!({"properties": {flag: {"default": 1}}})).unwrap()
    }

    fn set() -> CommandSet {
        CommandSet::from_schemas([
            ("train".to_string(), schema("epochs")),
            ("eval".to_string(), schema("split")),
        ])
    }

    #[test]
    fn test_names_are_sorted() {
        let set = set();
        assert_eq!(set.names().collect::<Vec<_>>(), ["eval", "train"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("train"));
        assert!(set.get("predict").is_none());
    }

    #[test]
    fn test_dispatch_splits_command() {
        let tokens = ["train", "--epochs", "3"].map(String::from);
        let set = set();
        let (name, schema, rest) = set.dispatch(&tokens).unwrap();
        assert_eq!(name, "train");
        assert!(schema.flags().find("--epochs").is_some());
        assert_eq!(rest, ["--epochs", "3"]);
    }

    #[test]
    fn test_dispatch_errors() {
        let set = set();
        assert!(matches!(set.dispatch(&[]), Err(LoadError::NoCommand(names)) if names.len() == 2));

        let tokens = ["predict".to_string()];
        match set.dispatch(&tokens) {
            Err(LoadError::UnknownCommand { name, available }) => {
                assert_eq!(name, "predict");
                assert_eq!(available, ["eval", "train"]);
            }
            other => panic!("expected UnknownCommand, got {other:?}"),
        }
    }
}
