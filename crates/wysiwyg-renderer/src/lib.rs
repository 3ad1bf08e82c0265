//! Extensible renderer for ProseMirror/TipTap JSON documents.
//!
//! This crate turns a document tree of [`Node`]s (paragraphs, headings, lists,
//! text with formatting [`Mark`]s, embedded media) into an HTML fragment.
//!
//! # Architecture
//!
//! Rendering is driven by two registries keyed by type tag:
//! - [`NodeRenderers`]: node type (e.g. `"paragraph"`) to [`NodeRenderer`]
//! - [`MarkRenderers`]: mark type (e.g. `"bold"`) to [`MarkRenderer`]
//!
//! Each render call overlays the caller's overrides on the built-in HTML
//! renderers, then walks the tree. Node renderers receive a [`RenderContext`]
//! so container nodes decide how their children are composed.
//!
//! Unknown node types render a visible diagnostic through the `"default"`
//! renderer. Unknown mark types are skipped.
//!
//! Text content is escaped exactly once with [`escape_html`] before any mark
//! renderer sees it.
//!
//! # Example
//!
//! ```
//! use wysiwyg_renderer::{Node, Renderer};
//!
//! let doc = Node::new("doc").with_child(
//!     Node::new("paragraph").with_child(Node::text("Hello <world>")),
//! );
//!
//! let result = Renderer::new()
//!     .with_node("paragraph", |node, ctx| {
//!         format!(r#"<p class="lead">{}</p>"#, ctx.render_children(node.content()))
//!     })
//!     .render(&doc);
//!
//! assert_eq!(result.html, r#"<p class="lead">Hello &lt;world&gt;</p>"#);
//! ```

mod escape;
mod html;
mod node;
mod registry;
mod renderer;
mod template;
mod util;

pub use escape::escape_html;
pub use html::{DEFAULT_NODE, default_mark_renderers, default_node_renderers};
pub use node::{Attrs, Mark, Node};
pub use registry::{MarkRenderer, MarkRenderers, NodeRenderer, NodeRenderers};
pub use renderer::{
    DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT, RenderContext, RenderNode, RenderResult, Renderer, render,
};
pub use template::{TemplateError, TemplateRenderer};
