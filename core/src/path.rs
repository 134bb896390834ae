//! Addressing of nodes inside a schema or a parameter tree.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Location of a node, rendered as `data.train[0]` (`<root>` when empty).
///
/// # Examples
///
/// ```
/// use parschema_core::ParamPath;
///
/// let mut path = ParamPath::root();
/// assert_eq!(path.to_string(), "<root>");
///
/// path.push_key("data");
/// path.push_key("train");
/// path.push_index(0);
/// assert_eq!(path.to_string(), "data.train[0]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamPath {
    segments: Vec<Segment>,
}

impl ParamPath {
    /// Returns the empty path.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push_key(&mut self, key: &str) {
        self.segments.push(Segment::Key(key.to_string()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(Segment::Index(index));
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the property names along the path, skipping sequence indices.
    pub fn keys(&self) -> Vec<String> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Key(key) => Some(key.clone()),
                Segment::Index(_) => None,
            })
            .collect()
    }

    /// Returns a copy of the path extended with `key`.
    pub fn join(&self, key: &str) -> Self {
        let mut joined = self.clone();
        joined.push_key(key);
        joined
    }
}

impl fmt::Display for ParamPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => write!(f, "{key}")?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_skip_indices() {
        let mut path = ParamPath::root();
        path.push_key("model");
        path.push_index(2);
        path.push_key("name");
        assert_eq!(path.keys(), vec!["model", "name"]);
        assert_eq!(path.to_string(), "model[2].name");
    }

    #[test]
    fn test_pop_returns_to_root() {
        let mut path = ParamPath::root().join("save");
        assert!(!path.is_root());
        path.pop();
        assert!(path.is_root());
        assert_eq!(path.to_string(), "<root>");
    }
}
