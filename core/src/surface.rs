//! The command-line surface derived from a schema.
//!
//! Every scalar, array and union node reachable from the root through object
//! properties becomes one [`FlagDescriptor`]. The resulting [`FlagTable`]
//! drives both token consumption and help rendering.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::coerce::render_literal;
use crate::error::SchemaError;
use crate::path::ParamPath;
use crate::types::{NodeKind, SchemaNode};

/// Tags reserved for help requests.
pub const HELP_TAGS: [&str; 2] = ["-h", "--help"];

static FLAG_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$").expect("static regex must compile")
});
static ALIAS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^--?[A-Za-z0-9][A-Za-z0-9_.-]*$").expect("static regex must compile")
});

/// One command-line flag.
///
/// # Examples
///
/// ```
/// use parschema_core::Schema;
/// use serde_json::json;
///
/// let schema = Schema::from_value(&json!({
///     "properties": {
///         "data": {
///             "properties": {
///                 "train": {
///                     "type": ["string", "array"],
///                     "items": {"type": "string"},
///                     "x-action": ["MakeList"]
///                 }
///             }
///         }
///     }
/// }))
/// .unwrap();
///
/// let train = schema.flags().find("--train").unwrap();
/// assert_eq!(train.path, vec!["data", "train"]);
/// assert_eq!(train.type_summary, "[str] ...");
/// assert!(train.variadic);
/// assert_eq!(train.group.as_deref(), Some("data"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlagDescriptor {
    /// Flag name without dashes.
    pub name: String,
    /// Every tag that selects this flag, `--name` first.
    pub tags: Vec<String>,
    /// Property path from the schema root.
    pub path: Vec<String>,
    pub type_summary: String,
    /// Takes any number of values.
    pub variadic: bool,
    /// May appear without a value.
    pub optional_value: bool,
    /// Rendered default, if the schema declares one.
    pub default: Option<String>,
    /// Rendered enum literals, if any.
    pub choices: Vec<String>,
    /// First-level property owning the flag; `None` for root leaves.
    pub group: Option<String>,
    pub help_level: u32,
    pub description: Option<String>,
}

impl FlagDescriptor {
    /// Returns the primary tag (`--name`).
    pub fn long_tag(&self) -> &str {
        &self.tags[0]
    }

    /// Returns the dotted parameter path (`data.train`).
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

/// Ordered flag table with lookup by tag.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct FlagTable {
    flags: Vec<FlagDescriptor>,
    #[serde(skip)]
    by_tag: HashMap<String, usize>,
}

impl FlagTable {
    /// Derives the flag table of a schema tree.
    ///
    /// # Errors
    ///
    /// Fails with [`SchemaError::DuplicateFlag`] when two nodes derive the
    /// same tag, [`SchemaError::ReservedFlag`] for `-h`/`--help`, and
    /// [`SchemaError::InvalidFlagName`] for names that cannot be typed.
    pub fn derive(root: &SchemaNode) -> Result<Self, SchemaError> {
        let mut table = Self::default();
        let mut path = ParamPath::root();
        table.walk(root, &mut path, "")?;
        Ok(table)
    }

    fn walk(&mut self, node: &SchemaNode, path: &mut ParamPath, prefix: &str) -> Result<(), SchemaError> {
        let NodeKind::Object { properties } = &node.kind else {
            return Ok(());
        };
        for (key, child) in properties {
            path.push_key(key);
            let name = if child.simpletag {
                key.clone()
            } else {
                format!("{prefix}{key}")
            };
            if child.is_object() {
                self.walk(child, path, &format!("{name}-"))?;
            } else {
                self.insert(describe_flag(child, path, name))?;
            }
            path.pop();
        }
        Ok(())
    }

    fn insert(&mut self, flag: FlagDescriptor) -> Result<(), SchemaError> {
        let dotted = flag.dotted_path();
        if !FLAG_NAME_RE.is_match(&flag.name) {
            return Err(SchemaError::InvalidFlagName {
                path: dotted,
                flag: flag.name.clone(),
            });
        }
        for (i, tag) in flag.tags.iter().enumerate() {
            if i > 0 && !ALIAS_RE.is_match(tag) {
                return Err(SchemaError::InvalidFlagName {
                    path: dotted,
                    flag: tag.clone(),
                });
            }
            if HELP_TAGS.contains(&tag.as_str()) {
                return Err(SchemaError::ReservedFlag {
                    path: dotted,
                    flag: tag.clone(),
                });
            }
            let other = match self.by_tag.get(tag) {
                Some(&other) => Some(self.flags[other].dotted_path()),
                None if flag.tags[..i].contains(tag) => Some(dotted.clone()),
                None => None,
            };
            if let Some(other) = other {
                return Err(SchemaError::DuplicateFlag {
                    path: dotted,
                    flag: tag.clone(),
                    other,
                });
            }
        }
        let index = self.flags.len();
        for tag in &flag.tags {
            self.by_tag.insert(tag.clone(), index);
        }
        self.flags.push(flag);
        Ok(())
    }

    /// Finds the flag selected by `tag` (`--train`, or an alias).
    pub fn find(&self, tag: &str) -> Option<&FlagDescriptor> {
        self.by_tag.get(tag).map(|&index| &self.flags[index])
    }

    /// Returns `true` if `token` is a recognized flag tag.
    pub fn is_flag(&self, token: &str) -> bool {
        self.by_tag.contains_key(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlagDescriptor> {
        self.flags.iter()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Returns the flags shown at help level `level`.
    pub fn visible(&self, level: u32) -> impl Iterator<Item = &FlagDescriptor> {
        self.flags.iter().filter(move |flag| flag.help_level <= level)
    }

    /// Returns the highest help level of any flag.
    pub fn max_help_level(&self) -> u32 {
        self.flags.iter().map(|flag| flag.help_level).max().unwrap_or(0)
    }
}

fn describe_flag(node: &SchemaNode, path: &ParamPath, name: String) -> FlagDescriptor {
    let keys = path.keys();
    let variadic = node.is_variadic();

    let mut type_summary = node.type_summary();
    if variadic {
        type_summary.push_str(" ...");
    }

    let mut tags = vec![format!("--{name}")];
    tags.extend(node.aliases.iter().cloned());

    FlagDescriptor {
        group: (keys.len() > 1).then(|| keys[0].clone()),
        path: keys,
        tags,
        name,
        type_summary,
        variadic,
        optional_value: node.accepts_bare_flag(),
        default: node.default.as_ref().map(render_literal),
        choices: node
            .enum_values
            .iter()
            .flatten()
            .map(render_literal)
            .collect(),
        help_level: node.help_level,
        description: node.description.clone(),
    }
}
