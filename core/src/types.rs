//! Schema model definitions.
//!
//! A [`Schema`] is the normalized, immutable form of a schema document: a
//! tree of [`SchemaNode`]s plus the [`FlagTable`] derived from it. Type
//! arrays (`type: [string, array]`) and `oneOf` share one representation,
//! [`NodeKind::Union`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::registry::{Action, Check};
use crate::surface::FlagTable;

/// Primitive scalar types.
///
/// # Examples
///
/// ```
/// use parschema_core::Primitive;
///
/// assert_eq!(Primitive::from_name("number"), Some(Primitive::Number));
/// assert_eq!(Primitive::Number.summary(), "float");
/// assert_eq!(Primitive::from_name("object"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    String,
    Integer,
    Number,
    Boolean,
    /// No declared type; any value is accepted.
    #[default]
    Any,
}

impl Primitive {
    /// Looks up a primitive by its schema `type` name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "any" => Some(Self::Any),
            _ => None,
        }
    }

    /// Returns the schema `type` name.
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Any => "any",
        }
    }

    /// Returns the short form used in flag type summaries.
    pub fn summary(self) -> &'static str {
        match self {
            Self::String => "str",
            Self::Integer => "int",
            Self::Number => "float",
            Self::Boolean => "bool",
            Self::Any => "any",
        }
    }
}

/// The shape of a schema node. Children exist only for the matching kind.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A mapping with declared properties, in declaration order.
    Object { properties: Vec<(String, SchemaNode)> },
    /// A sequence whose elements follow `items`.
    Array { items: Box<SchemaNode> },
    /// Ordered candidate shapes; the first that matches wins.
    Union { alternatives: Vec<SchemaNode> },
    /// A leaf value.
    Scalar(Primitive),
}

/// One normalized schema subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    pub kind: NodeKind,
    /// Allowed literals for a scalar node.
    pub enum_values: Option<Vec<Value>>,
    /// Value used when neither the command line nor the config provides one.
    pub default: Option<Value>,
    /// Transforms applied in order after type resolution.
    pub actions: Vec<Action>,
    /// Validations run in order after the actions.
    pub checks: Vec<Check>,
    /// 0 = always shown in help, higher = more advanced.
    pub help_level: u32,
    pub description: Option<String>,
    /// Extra command-line tags for this node's flag.
    pub aliases: Vec<String>,
    /// Whether the flag name is the bare property name (`true`) or is
    /// prefixed with the names of enclosing objects (`false`).
    pub simpletag: bool,
}

impl SchemaNode {
    /// Creates a node of the given kind with no metadata.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            enum_values: None,
            default: None,
            actions: Vec::new(),
            checks: Vec::new(),
            help_level: 0,
            description: None,
            aliases: Vec::new(),
            simpletag: true,
        }
    }

    /// Creates a scalar node.
    pub fn scalar(primitive: Primitive) -> Self {
        Self::new(NodeKind::Scalar(primitive))
    }

    /// Appends an action.
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Returns the declared property `name` of an object node.
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        match &self.kind {
            NodeKind::Object { properties } => properties
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, node)| node),
            _ => None,
        }
    }

    pub fn is_object(&self) -> bool {
        matches!(self.kind, NodeKind::Object { .. })
    }

    /// Returns `true` if a flag backed by this node takes any number of
    /// values: arrays, and unions with an array alternative.
    pub fn is_variadic(&self) -> bool {
        match &self.kind {
            NodeKind::Array { .. } => true,
            NodeKind::Union { alternatives } => alternatives
                .iter()
                .any(|alt| matches!(alt.kind, NodeKind::Array { .. })),
            _ => false,
        }
    }

    /// Returns `true` if the node carries a `MakeList` action.
    pub fn makes_list(&self) -> bool {
        self.actions.iter().any(|a| matches!(a, Action::MakeList))
    }

    /// Returns the value assigned by the last presence action, if any.
    pub fn presence_value(&self) -> Option<Value> {
        self.actions.iter().rev().find_map(Action::presence_value)
    }

    /// Returns `true` if a flag backed by this node may appear without a
    /// value.
    pub fn accepts_bare_flag(&self) -> bool {
        matches!(self.kind, NodeKind::Scalar(Primitive::Boolean)) || self.presence_value().is_some()
    }

    /// Renders the node's type the way it appears in the flag table.
    ///
    /// A union renders as its array alternative when it has one, otherwise as
    /// the summary its scalar alternatives share (`any` when they differ).
    ///
    /// # Examples
    ///
    /// ```
    /// use parschema_core::{NodeKind, Primitive, SchemaNode};
    ///
    /// let list = SchemaNode::new(NodeKind::Array {
    ///     items: Box::new(SchemaNode::scalar(Primitive::String)),
    /// });
    /// assert_eq!(list.type_summary(), "[str]");
    ///
    /// let either = SchemaNode::new(NodeKind::Union {
    ///     alternatives: vec![SchemaNode::scalar(Primitive::Integer), list],
    /// });
    /// assert_eq!(either.type_summary(), "[str]");
    ///
    /// let number = SchemaNode::new(NodeKind::Union {
    ///     alternatives: vec![
    ///         SchemaNode::scalar(Primitive::Integer),
    ///         SchemaNode::scalar(Primitive::String),
    ///     ],
    /// });
    /// assert_eq!(number.type_summary(), "any");
    /// ```
    pub fn type_summary(&self) -> String {
        match &self.kind {
            NodeKind::Scalar(primitive) => primitive.summary().to_string(),
            NodeKind::Array { items } => format!("[{}]", items.type_summary()),
            NodeKind::Object { .. } => "dict".to_string(),
            NodeKind::Union { alternatives } => {
                if let Some(list) = alternatives
                    .iter()
                    .find(|alt| matches!(alt.kind, NodeKind::Array { .. }))
                {
                    return list.type_summary();
                }
                let mut scalars: Vec<String> = alternatives
                    .iter()
                    .filter(|alt| !alt.is_object())
                    .map(SchemaNode::type_summary)
                    .collect();
                scalars.dedup();
                match scalars.as_slice() {
                    [] => "dict".to_string(),
                    [only] => only.clone(),
                    _ => "any".to_string(),
                }
            }
        }
    }
}

/// A built, validated schema document.
///
/// Only [`Schema::from_value`] creates one, so a `Schema` always has an
/// object root, registered actions and checks, and a collision-free flag
/// table. It is immutable and safe to share across threads.
#[derive(Debug, Clone)]
pub struct Schema {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) root: SchemaNode,
    pub(crate) flags: FlagTable,
}

impl Schema {
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the root object node.
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Returns the derived flag table.
    pub fn flags(&self) -> &FlagTable {
        &self.flags
    }

    /// Returns the description of a first-level property, used as a group
    /// heading by help renderers.
    pub fn group_description(&self, group: &str) -> Option<&str> {
        self.root.property(group)?.description.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_union_with_array_is_variadic() {
        let node = SchemaNode::new(NodeKind::Union {
            alternatives: vec![
                SchemaNode::scalar(Primitive::String),
                SchemaNode::new(NodeKind::Array {
                    items: Box::new(SchemaNode::scalar(Primitive::String)),
                }),
            ],
        });
        assert!(node.is_variadic());
        assert!(!SchemaNode::scalar(Primitive::String).is_variadic());
    }

    #[test]
    fn test_union_summary_without_array() {
        let object = || SchemaNode::new(NodeKind::Object { properties: Vec::new() });
        let loss = SchemaNode::new(NodeKind::Union {
            alternatives: vec![object(), SchemaNode::scalar(Primitive::String)],
        });
        assert_eq!(loss.type_summary(), "str");

        let only_objects = SchemaNode::new(NodeKind::Union {
            alternatives: vec![object(), object()],
        });
        assert_eq!(only_objects.type_summary(), "dict");
    }

    #[test]
    fn test_presence_value_uses_last_presence_action() {
        let node = SchemaNode::scalar(Primitive::String)
            .with_action(Action::SetValue {
                value: json!("first"),
            })
            .with_action(Action::MakeList)
            .with_action(Action::SetValue {
                value: json!("second"),
            });
        assert_eq!(node.presence_value(), Some(json!("second")));
        assert!(node.accepts_bare_flag());
    }

    #[test]
    fn test_boolean_accepts_bare_flag() {
        assert!(SchemaNode::scalar(Primitive::Boolean).accepts_bare_flag());
        assert!(!SchemaNode::scalar(Primitive::Integer).accepts_bare_flag());
    }

    #[test]
    fn test_property_lookup_only_on_objects() {
        let node = SchemaNode::new(NodeKind::Object {
            properties: vec![("split".to_string(), SchemaNode::scalar(Primitive::Number))],
        });
        assert!(node.property("split").is_some());
        assert!(node.property("missing").is_none());
        assert!(SchemaNode::scalar(Primitive::Any).property("split").is_none());
    }
}
