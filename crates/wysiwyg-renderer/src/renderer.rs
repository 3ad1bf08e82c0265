//! Recursive tree traversal and renderer dispatch.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use crate::escape::escape_html;
use crate::html::{DEFAULT_NODE, default_mark_renderers, default_node_renderers, depth_exceeded};
use crate::node::{Attrs, Mark, Node};
use crate::registry::{MarkRenderer, MarkRenderers, NodeRenderer, NodeRenderers};

/// Default maximum nesting depth, counting the root as depth 1.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Largest accepted maximum nesting depth.
///
/// Rendering recurses once per level; this keeps a tree at the limit within
/// the default 2 MiB stack of a spawned thread.
pub const MAX_DEPTH_LIMIT: usize = 512;

/// Result of rendering a document tree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Warnings generated during rendering (unknown node types, depth limit).
    pub warnings: Vec<String>,
}

/// Document renderer with caller-supplied overrides.
///
/// Holds the overrides only. Every call to [`render`](Self::render) merges
/// them over the built-in HTML renderers into a fresh registry, so a single
/// `Renderer` can be shared between threads.
///
/// # Example
///
/// ```
/// use wysiwyg_renderer::{Node, Renderer};
///
/// let doc = Node::new("doc").with_children([
///     Node::new("heading").with_attr("level", 1).with_child(Node::text("T")),
///     Node::new("paragraph").with_children([
///         Node::text("A"),
///         Node::new("hardBreak"),
///         Node::text("B"),
///     ]),
/// ]);
///
/// let result = Renderer::new().render(&doc);
/// assert_eq!(result.html, "<h1>T</h1><p>A<br />B</p>");
/// assert!(result.warnings.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct Renderer {
    nodes: NodeRenderers,
    marks: MarkRenderers,
    max_depth: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a renderer that uses the built-in renderers only.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: NodeRenderers::new(),
            marks: MarkRenderers::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override or add the renderer for a node type.
    #[must_use]
    pub fn with_node<F>(mut self, node_type: impl Into<String>, renderer: F) -> Self
    where
        F: Fn(&RenderNode<'_>, &RenderContext<'_>) -> String + Send + Sync + 'static,
    {
        self.nodes.insert(node_type, renderer);
        self
    }

    /// Override or add a [`NodeRenderer`] implementation for a node type.
    #[must_use]
    pub fn with_node_renderer(
        mut self,
        node_type: impl Into<String>,
        renderer: impl NodeRenderer + 'static,
    ) -> Self {
        self.nodes.insert(node_type, renderer);
        self
    }

    /// Override or add the renderer for a mark type.
    #[must_use]
    pub fn with_mark<F>(mut self, mark_type: impl Into<String>, renderer: F) -> Self
    where
        F: Fn(&str, &Mark) -> String + Send + Sync + 'static,
    {
        self.marks.insert(mark_type, renderer);
        self
    }

    /// Override or add a [`MarkRenderer`] implementation for a mark type.
    #[must_use]
    pub fn with_mark_renderer(
        mut self,
        mark_type: impl Into<String>,
        renderer: impl MarkRenderer + 'static,
    ) -> Self {
        self.marks.insert(mark_type, renderer);
        self
    }

    /// Add a whole set of node overrides. Later overrides win.
    #[must_use]
    pub fn with_node_overrides(mut self, overrides: &NodeRenderers) -> Self {
        self.nodes = self.nodes.merge(overrides);
        self
    }

    /// Add a whole set of mark overrides. Later overrides win.
    #[must_use]
    pub fn with_mark_overrides(mut self, overrides: &MarkRenderers) -> Self {
        self.marks = self.marks.merge(overrides);
        self
    }

    /// Set the maximum nesting depth.
    ///
    /// Nodes nested deeper than `max_depth` (the root is depth 1) are not
    /// dispatched; they render a visible diagnostic instead. The value is
    /// clamped to `1..=`[`MAX_DEPTH_LIMIT`].
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.clamp(1, MAX_DEPTH_LIMIT);
        self
    }

    /// Maximum nesting depth.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Render a document tree.
    ///
    /// The tree is not modified. Rendering never fails: unknown node types
    /// and depth overflow produce inline diagnostics plus an entry in
    /// [`RenderResult::warnings`].
    pub fn render(&self, tree: &Node) -> RenderResult {
        let nodes = default_node_renderers().merge(&self.nodes);
        let marks = default_mark_renderers().merge(&self.marks);
        let ctx = RenderContext::new(&nodes, &marks, self.max_depth);

        let html = ctx.render_node(tree);
        let warnings = ctx.into_warnings();

        tracing::debug!(
            root = %tree.node_type,
            html_len = html.len(),
            warnings = warnings.len(),
            "Rendered document"
        );

        RenderResult { html, warnings }
    }
}

/// Render a document tree with optional node and mark overrides.
///
/// Overrides are merged over the built-in renderers for this call only;
/// entries in the overrides win on key collision.
///
/// # Example
///
/// ```
/// use wysiwyg_renderer::{MarkRenderers, Node, render};
///
/// let text = Node::text("hi").with_mark(wysiwyg_renderer::Mark::new("bold"));
/// let marks = MarkRenderers::new().with("bold", |text, _| format!("<b>{text}</b>"));
///
/// assert_eq!(render(&text, None, Some(&marks)), "<b>hi</b>");
/// assert_eq!(render(&text, None, None), "<strong>hi</strong>");
/// ```
pub fn render(
    tree: &Node,
    node_overrides: Option<&NodeRenderers>,
    mark_overrides: Option<&MarkRenderers>,
) -> String {
    let mut renderer = Renderer::new();
    if let Some(nodes) = node_overrides {
        renderer = renderer.with_node_overrides(nodes);
    }
    if let Some(marks) = mark_overrides {
        renderer = renderer.with_mark_overrides(marks);
    }
    renderer.render(tree).html
}

/// Normalized view of a node handed to a [`NodeRenderer`].
///
/// Borrows the caller's node and adds the derived fields renderers rely on:
/// `content` is always a slice, and text nodes with non-empty text carry
/// `sanitized_text`. The derived text is computed for each render call.
#[derive(Debug)]
pub struct RenderNode<'a> {
    node: &'a Node,
    sanitized_text: Option<String>,
}

impl<'a> RenderNode<'a> {
    /// Build the normalized view of `node`.
    #[must_use]
    pub fn new(node: &'a Node) -> Self {
        let sanitized_text = node
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(escape_html);
        Self {
            node,
            sanitized_text,
        }
    }

    /// The underlying node.
    #[must_use]
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// Node type tag.
    #[must_use]
    pub fn node_type(&self) -> &'a str {
        &self.node.node_type
    }

    /// All attributes, if any.
    #[must_use]
    pub fn attrs(&self) -> Option<&'a Attrs> {
        self.node.attrs.as_ref()
    }

    /// Raw attribute value.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&'a serde_json::Value> {
        self.node.attr(key)
    }

    /// Attribute value as text. Not escaped.
    #[must_use]
    pub fn attr_str(&self, key: &str) -> Option<Cow<'a, str>> {
        self.node.attr_str(key)
    }

    /// Attribute value escaped for use inside a double-quoted HTML attribute.
    ///
    /// Missing and non-scalar values yield an empty string.
    #[must_use]
    pub fn escaped_attr(&self, key: &str) -> String {
        self.attr_str(key)
            .map(|value| escape_html(&value))
            .unwrap_or_default()
    }

    /// Child nodes, empty when the node has no `content`.
    #[must_use]
    pub fn content(&self) -> &'a [Node] {
        self.node.children()
    }

    /// Raw, unescaped text.
    #[must_use]
    pub fn text(&self) -> Option<&'a str> {
        self.node.text.as_deref()
    }

    /// Escaped text, present only when the node has non-empty text.
    #[must_use]
    pub fn sanitized_text(&self) -> Option<&str> {
        self.sanitized_text.as_deref()
    }

    /// Marks in application order.
    #[must_use]
    pub fn marks(&self) -> &'a [Mark] {
        self.node.mark_list()
    }
}

/// Per-call rendering state passed to every [`NodeRenderer`].
///
/// Owns nothing beyond the call: it borrows the merged registries and tracks
/// nesting depth and warnings.
pub struct RenderContext<'r> {
    nodes: &'r NodeRenderers,
    marks: &'r MarkRenderers,
    max_depth: usize,
    depth: Cell<usize>,
    warnings: RefCell<Vec<String>>,
    unknown_types: RefCell<HashSet<String>>,
}

impl<'r> RenderContext<'r> {
    fn new(nodes: &'r NodeRenderers, marks: &'r MarkRenderers, max_depth: usize) -> Self {
        Self {
            nodes,
            marks,
            max_depth,
            depth: Cell::new(0),
            warnings: RefCell::new(Vec::new()),
            unknown_types: RefCell::new(HashSet::new()),
        }
    }

    /// Render a single node through the registry.
    ///
    /// Resolves the renderer for the node's type, falling back to the
    /// `"default"` renderer for unknown types. A node whose type is literally
    /// `"default"` counts as unknown too.
    pub fn render_node(&self, node: &Node) -> String {
        let depth = self.depth.get() + 1;
        if depth > self.max_depth {
            tracing::warn!(
                node_type = %node.node_type,
                max_depth = self.max_depth,
                "Maximum nesting depth exceeded"
            );
            self.warnings.borrow_mut().push(format!(
                "Maximum nesting depth of {} exceeded at node \"{}\"",
                self.max_depth, node.node_type
            ));
            return depth_exceeded(self.max_depth);
        }

        let registered = self
            .nodes
            .get(&node.node_type)
            .filter(|_| node.node_type != DEFAULT_NODE);
        let renderer = match registered {
            Some(renderer) => renderer,
            None => {
                self.note_unknown(&node.node_type);
                let Some(fallback) = self.nodes.get(DEFAULT_NODE) else {
                    return String::new();
                };
                fallback
            }
        };

        let view = RenderNode::new(node);
        self.depth.set(depth);
        let html = renderer.render(&view, self);
        self.depth.set(depth - 1);
        html
    }

    /// Render each node in order and concatenate the results.
    pub fn render_children(&self, nodes: &[Node]) -> String {
        nodes.iter().map(|node| self.render_node(node)).collect()
    }

    /// Apply marks in sequence to already-escaped text.
    ///
    /// Each registered mark renderer wraps the output of the previous one.
    /// Marks without a registered renderer are skipped.
    pub fn apply_marks(&self, text: &str, marks: &[Mark]) -> String {
        marks
            .iter()
            .fold(text.to_owned(), |rendered, mark| {
                match self.marks.get(&mark.mark_type) {
                    Some(renderer) => renderer.render(&rendered, mark),
                    None => rendered,
                }
            })
    }

    /// Current nesting depth. The node being rendered is at this depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Record a warning in the render result.
    pub fn warn(&self, message: impl Into<String>) {
        self.warnings.borrow_mut().push(message.into());
    }

    fn note_unknown(&self, node_type: &str) {
        if self.unknown_types.borrow_mut().insert(node_type.to_owned()) {
            tracing::warn!(node_type, "No renderer for node type");
            self.warn(format!("Unknown node type \"{node_type}\""));
        }
    }

    fn into_warnings(self) -> Vec<String> {
        self.warnings.into_inner()
    }
}
