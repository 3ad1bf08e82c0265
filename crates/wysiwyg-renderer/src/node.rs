//! Document tree types.
//!
//! [`Node`] and [`Mark`] mirror the ProseMirror/TipTap JSON shape and
//! deserialize from it directly with serde.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::util::value_to_text;

/// Attribute mapping carried by nodes and marks.
pub type Attrs = Map<String, Value>;

/// One element of a document tree.
///
/// `node_type` is an open vocabulary: unknown types are valid input and are
/// handled by the `"default"` renderer at render time.
///
/// # Example
///
/// ```
/// use wysiwyg_renderer::Node;
///
/// let json = r#"{"type":"heading","attrs":{"level":2},"content":[{"type":"text","text":"Hi"}]}"#;
/// let node: Node = serde_json::from_str(json).unwrap();
///
/// assert_eq!(node.node_type, "heading");
/// assert_eq!(node.children().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Node type tag (e.g. `"doc"`, `"paragraph"`, `"text"`).
    #[serde(rename = "type")]
    pub node_type: String,
    /// Renderer-specific attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
    /// Child nodes. Absent is equivalent to empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Node>>,
    /// Raw text for text nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Formatting marks for text nodes, applied in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<Vec<Mark>>,
}

impl Node {
    /// Create a node of the given type with no attributes or children.
    #[must_use]
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            ..Self::default()
        }
    }

    /// Create a `"text"` node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            node_type: "text".to_owned(),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs
            .get_or_insert_with(Attrs::new)
            .insert(key.into(), value.into());
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        self.content.get_or_insert_with(Vec::new).push(child);
        self
    }

    /// Append several child nodes.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.content.get_or_insert_with(Vec::new).extend(children);
        self
    }

    /// Append a mark.
    #[must_use]
    pub fn with_mark(mut self, mark: Mark) -> Self {
        self.marks.get_or_insert_with(Vec::new).push(mark);
        self
    }

    /// Child nodes, empty when `content` is absent.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        self.content.as_deref().unwrap_or_default()
    }

    /// Marks, empty when absent.
    #[must_use]
    pub fn mark_list(&self) -> &[Mark] {
        self.marks.as_deref().unwrap_or_default()
    }

    /// Raw attribute value.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.as_ref()?.get(key)
    }

    /// Attribute value as text. Strings, numbers and booleans are accepted.
    #[must_use]
    pub fn attr_str(&self, key: &str) -> Option<Cow<'_, str>> {
        self.attr(key).and_then(value_to_text)
    }
}

/// Inline formatting annotation on a text node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    /// Mark type tag (e.g. `"bold"`, `"link"`).
    #[serde(rename = "type")]
    pub mark_type: String,
    /// Mark-specific attributes (e.g. `href` for links).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attrs>,
}

impl Mark {
    /// Create a mark of the given type.
    #[must_use]
    pub fn new(mark_type: impl Into<String>) -> Self {
        Self {
            mark_type: mark_type.into(),
            attrs: None,
        }
    }

    /// Set an attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs
            .get_or_insert_with(Attrs::new)
            .insert(key.into(), value.into());
        self
    }

    /// Raw attribute value.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.as_ref()?.get(key)
    }

    /// Attribute value as text. Strings, numbers and booleans are accepted.
    #[must_use]
    pub fn attr_str(&self, key: &str) -> Option<Cow<'_, str>> {
        self.attr(key).and_then(value_to_text)
    }
}
