//! Reading command-line tokens against a flag table.

use std::collections::HashMap;

use crate::error::ResolveError;
use crate::surface::{FlagTable, HELP_TAGS};

/// What the command line supplied for one flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliValue {
    /// The flag appeared with no value.
    Bare,
    /// A single-valued flag and its token.
    Single(String),
    /// A variadic flag and all tokens it claimed.
    Many(Vec<String>),
}

/// Flag values read from a token list, keyed by parameter path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliInput {
    values: HashMap<Vec<String>, CliValue>,
}

impl CliInput {
    /// Reads `tokens` against `flags`.
    ///
    /// A flag claims every following token up to the next recognized flag
    /// tag. A flag given twice keeps its last occurrence.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::UnexpectedToken`] for a value before any flag.
    /// - [`ResolveError::UnknownFlag`] for an unrecognized dashed token in
    ///   flag position.
    /// - [`ResolveError::TooManyValues`] when a single-valued flag claims
    ///   more than one token.
    ///
    /// # Examples
    ///
    /// ```
    /// use parschema_core::{CliInput, CliValue, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::from_value(&json!({
    ///     "properties": {
    ///         "train": {"type": "array", "items": {"type": "string"}},
    ///         "verbose": {"type": "boolean", "default": false}
    ///     }
    /// }))
    /// .unwrap();
    ///
    /// let tokens = ["--train", "a", "b", "--verbose"].map(String::from);
    /// let input = CliInput::parse(&tokens, schema.flags()).unwrap();
    /// assert_eq!(
    ///     input.get(&["train".to_string()]),
    ///     Some(&CliValue::Many(vec!["a".into(), "b".into()]))
    /// );
    /// assert_eq!(input.get(&["verbose".to_string()]), Some(&CliValue::Bare));
    /// ```
    pub fn parse(tokens: &[String], flags: &FlagTable) -> Result<Self, ResolveError> {
        let mut values = HashMap::new();
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];
            let flag = match flags.find(token) {
                Some(flag) => flag,
                None if token.starts_with('-') => {
                    return Err(ResolveError::UnknownFlag {
                        flag: token.clone(),
                    });
                }
                None => {
                    return Err(ResolveError::UnexpectedToken {
                        token: token.clone(),
                    });
                }
            };

            i += 1;
            let start = i;
            while i < tokens.len() && !flags.is_flag(&tokens[i]) {
                i += 1;
            }
            let claimed = &tokens[start..i];

            let value = match claimed {
                [] => CliValue::Bare,
                _ if flag.variadic => CliValue::Many(claimed.to_vec()),
                [single] => CliValue::Single(single.clone()),
                _ => {
                    return Err(ResolveError::TooManyValues {
                        path: flag.dotted_path(),
                        flag: token.clone(),
                        count: claimed.len(),
                    });
                }
            };
            values.insert(flag.path.clone(), value);
        }

        Ok(Self { values })
    }

    /// Returns the value supplied for the flag at `path`.
    pub fn get(&self, path: &[String]) -> Option<&CliValue> {
        self.values.get(path)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Detects a help request (`-h` or `--help`, optionally followed by a level).
///
/// Returns the requested help level, `0` when none is given or the level
/// does not parse.
///
/// # Examples
///
/// ```
/// use parschema_core::find_help;
///
/// assert_eq!(find_help(&["--train", "x", "--help", "2"]), Some(2));
/// assert_eq!(find_help(&["-h"]), Some(0));
/// assert_eq!(find_help(&["--train", "x"]), None);
/// ```
pub fn find_help<S: AsRef<str>>(tokens: &[S]) -> Option<u32> {
    let index = tokens
        .iter()
        .position(|token| HELP_TAGS.contains(&token.as_ref()))?;
    Some(
        tokens
            .get(index + 1)
            .and_then(|level| level.as_ref().parse().ok())
            .unwrap_or(0),
    )
}
