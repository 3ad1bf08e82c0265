//! Renderer traits and the type-tag registries that hold them.
//!
//! A registry maps a type tag to a shared renderer. Registries are cheap to
//! clone (renderers are reference counted) and are merged per render call:
//! the built-in defaults first, then caller overrides on top.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::node::Mark;
use crate::renderer::{RenderContext, RenderNode};

/// Renders one node to an HTML fragment.
///
/// The node arrives normalized: [`RenderNode::content`] is always a slice and
/// [`RenderNode::sanitized_text`] holds the escaped text of text nodes.
/// Children are rendered through [`RenderContext::render_node`] or
/// [`RenderContext::render_children`], in whatever order or wrapping the
/// renderer needs.
///
/// Implemented for any `Fn(&RenderNode, &RenderContext) -> String` closure.
///
/// # Example
///
/// ```
/// use wysiwyg_renderer::{NodeRenderer, RenderContext, RenderNode};
///
/// struct Callout;
///
/// impl NodeRenderer for Callout {
///     fn render(&self, node: &RenderNode<'_>, ctx: &RenderContext<'_>) -> String {
///         format!(r#"<aside class="callout">{}</aside>"#, ctx.render_children(node.content()))
///     }
/// }
/// ```
pub trait NodeRenderer: Send + Sync {
    /// Render the node and, if it has any, its children.
    fn render(&self, node: &RenderNode<'_>, ctx: &RenderContext<'_>) -> String;
}

impl<F> NodeRenderer for F
where
    F: Fn(&RenderNode<'_>, &RenderContext<'_>) -> String + Send + Sync,
{
    fn render(&self, node: &RenderNode<'_>, ctx: &RenderContext<'_>) -> String {
        self(node, ctx)
    }
}

/// Wraps already-rendered text for one mark.
///
/// `text` is escaped text, possibly already wrapped by earlier marks. Mark
/// renderers must not escape it again.
///
/// Implemented for any `Fn(&str, &Mark) -> String` closure.
pub trait MarkRenderer: Send + Sync {
    /// Wrap `text` in the markup for `mark`.
    fn render(&self, text: &str, mark: &Mark) -> String;
}

impl<F> MarkRenderer for F
where
    F: Fn(&str, &Mark) -> String + Send + Sync,
{
    fn render(&self, text: &str, mark: &Mark) -> String {
        self(text, mark)
    }
}

/// Node type tag to [`NodeRenderer`] mapping.
#[derive(Clone, Default)]
pub struct NodeRenderers {
    entries: HashMap<String, Arc<dyn NodeRenderer>>,
}

impl NodeRenderers {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer, replacing any existing one for `node_type`.
    pub fn insert(&mut self, node_type: impl Into<String>, renderer: impl NodeRenderer + 'static) {
        self.entries.insert(node_type.into(), Arc::new(renderer));
    }

    /// Register a closure renderer.
    #[must_use]
    pub fn with<F>(mut self, node_type: impl Into<String>, renderer: F) -> Self
    where
        F: Fn(&RenderNode<'_>, &RenderContext<'_>) -> String + Send + Sync + 'static,
    {
        self.insert(node_type, renderer);
        self
    }

    /// Look up the renderer for `node_type`.
    #[must_use]
    pub fn get(&self, node_type: &str) -> Option<&Arc<dyn NodeRenderer>> {
        self.entries.get(node_type)
    }

    /// Whether a renderer is registered for `node_type`.
    #[must_use]
    pub fn contains(&self, node_type: &str) -> bool {
        self.entries.contains_key(node_type)
    }

    /// Overlay `overrides` on this registry. Entries in `overrides` win.
    #[must_use]
    pub fn merge(mut self, overrides: &Self) -> Self {
        for (node_type, renderer) in &overrides.entries {
            self.entries
                .insert(node_type.clone(), Arc::clone(renderer));
        }
        self
    }

    /// Registered type tags, in arbitrary order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered renderers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no renderer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for NodeRenderers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.types().collect();
        types.sort_unstable();
        f.debug_struct("NodeRenderers").field("types", &types).finish()
    }
}

/// Mark type tag to [`MarkRenderer`] mapping.
#[derive(Clone, Default)]
pub struct MarkRenderers {
    entries: HashMap<String, Arc<dyn MarkRenderer>>,
}

impl MarkRenderers {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a renderer, replacing any existing one for `mark_type`.
    pub fn insert(&mut self, mark_type: impl Into<String>, renderer: impl MarkRenderer + 'static) {
        self.entries.insert(mark_type.into(), Arc::new(renderer));
    }

    /// Register a closure renderer.
    #[must_use]
    pub fn with<F>(mut self, mark_type: impl Into<String>, renderer: F) -> Self
    where
        F: Fn(&str, &Mark) -> String + Send + Sync + 'static,
    {
        self.insert(mark_type, renderer);
        self
    }

    /// Look up the renderer for `mark_type`.
    #[must_use]
    pub fn get(&self, mark_type: &str) -> Option<&Arc<dyn MarkRenderer>> {
        self.entries.get(mark_type)
    }

    /// Whether a renderer is registered for `mark_type`.
    #[must_use]
    pub fn contains(&self, mark_type: &str) -> bool {
        self.entries.contains_key(mark_type)
    }

    /// Overlay `overrides` on this registry. Entries in `overrides` win.
    #[must_use]
    pub fn merge(mut self, overrides: &Self) -> Self {
        for (mark_type, renderer) in &overrides.entries {
            self.entries
                .insert(mark_type.clone(), Arc::clone(renderer));
        }
        self
    }

    /// Registered type tags, in arbitrary order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered renderers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no renderer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for MarkRenderers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<_> = self.types().collect();
        types.sort_unstable();
        f.debug_struct("MarkRenderers").field("types", &types).finish()
    }
}
