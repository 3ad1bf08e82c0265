//! Built-in HTML renderers.
//!
//! Produces plain HTML fragments for the TipTap starter-kit node and mark
//! types. Attribute values are escaped; text arrives already escaped.

use crate::escape::escape_html;
use crate::node::Mark;
use crate::registry::{MarkRenderers, NodeRenderers};
use crate::renderer::{RenderContext, RenderNode};
use crate::util::heading_level;

/// Registry key of the fallback renderer for unknown node types.
pub const DEFAULT_NODE: &str = "default";

const DIAGNOSTIC_STYLE: &str = "border:1px solid red";

const YOUTUBE_ALLOW: &str = "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share";

/// Built-in node renderers, including the `"default"` fallback.
#[must_use]
pub fn default_node_renderers() -> NodeRenderers {
    NodeRenderers::new()
        .with(DEFAULT_NODE, unknown_node)
        .with("doc", doc)
        .with("heading", heading)
        .with("paragraph", paragraph)
        .with("bulletList", bullet_list)
        .with("orderedList", ordered_list)
        .with("listItem", list_item)
        .with("hardBreak", hard_break)
        .with("blockquote", blockquote)
        .with("image", image)
        .with("youtube", youtube)
        .with("text", text)
}

/// Built-in mark renderers.
#[must_use]
pub fn default_mark_renderers() -> MarkRenderers {
    MarkRenderers::new()
        .with("bold", bold)
        .with("italic", italic)
        .with("underline", underline)
        .with("strikethrough", strikethrough)
        .with("link", link)
}

/// Diagnostic emitted in place of a node nested past the depth limit.
pub(crate) fn depth_exceeded(max_depth: usize) -> String {
    format!(r#"<div style="{DIAGNOSTIC_STYLE}">Maximum nesting depth of {max_depth} exceeded.</div>"#)
}

fn unknown_node(node: &RenderNode<'_>, _ctx: &RenderContext<'_>) -> String {
    format!(
        r#"<div style="{DIAGNOSTIC_STYLE}">Node "{}" is not defined.</div>"#,
        escape_html(node.node_type())
    )
}

fn doc(node: &RenderNode<'_>, ctx: &RenderContext<'_>) -> String {
    ctx.render_children(node.content())
}

fn heading(node: &RenderNode<'_>, ctx: &RenderContext<'_>) -> String {
    let level = heading_level(node.attr("level"));
    format!(
        "<h{level}>{}</h{level}>",
        ctx.render_children(node.content())
    )
}

fn paragraph(node: &RenderNode<'_>, ctx: &RenderContext<'_>) -> String {
    format!("<p>{}</p>", ctx.render_children(node.content()))
}

fn bullet_list(node: &RenderNode<'_>, ctx: &RenderContext<'_>) -> String {
    list("ul", node, ctx)
}

fn ordered_list(node: &RenderNode<'_>, ctx: &RenderContext<'_>) -> String {
    list("ol", node, ctx)
}

/// Every child gets its own `<li>`, whatever its type.
fn list(tag: &str, node: &RenderNode<'_>, ctx: &RenderContext<'_>) -> String {
    let mut out = format!("<{tag}>");
    for child in node.content() {
        out.push_str("<li>");
        out.push_str(&ctx.render_node(child));
        out.push_str("</li>");
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    out
}

/// Paragraph children are unwrapped so list items hold inline content directly.
fn list_item(node: &RenderNode<'_>, ctx: &RenderContext<'_>) -> String {
    node.content()
        .iter()
        .map(|child| {
            if child.node_type == "paragraph" {
                ctx.render_children(child.children())
            } else {
                ctx.render_node(child)
            }
        })
        .collect()
}

fn hard_break(_node: &RenderNode<'_>, _ctx: &RenderContext<'_>) -> String {
    "<br />".to_owned()
}

fn blockquote(node: &RenderNode<'_>, ctx: &RenderContext<'_>) -> String {
    format!(
        "<blockquote>{}</blockquote>",
        ctx.render_children(node.content())
    )
}

fn image(node: &RenderNode<'_>, _ctx: &RenderContext<'_>) -> String {
    format!(
        r#"<img src="{}" alt="{}" title="{}" />"#,
        node.escaped_attr("src"),
        node.escaped_attr("alt"),
        node.escaped_attr("title")
    )
}

fn youtube(node: &RenderNode<'_>, _ctx: &RenderContext<'_>) -> String {
    format!(
        r#"<iframe width="560" height="315" src="{}" title="YouTube video player" frameborder="0" allow="{YOUTUBE_ALLOW}" allowfullscreen></iframe>"#,
        node.escaped_attr("src")
    )
}

fn text(node: &RenderNode<'_>, ctx: &RenderContext<'_>) -> String {
    ctx.apply_marks(node.sanitized_text().unwrap_or_default(), node.marks())
}

fn bold(text: &str, _mark: &Mark) -> String {
    format!("<strong>{text}</strong>")
}

fn italic(text: &str, _mark: &Mark) -> String {
    format!("<em>{text}</em>")
}

fn underline(text: &str, _mark: &Mark) -> String {
    format!("<u>{text}</u>")
}

fn strikethrough(text: &str, _mark: &Mark) -> String {
    format!("<del>{text}</del>")
}

/// `target` is omitted when the mark has none.
fn link(text: &str, mark: &Mark) -> String {
    let href = mark
        .attr_str("href")
        .map(|href| escape_html(&href))
        .unwrap_or_default();
    match mark.attr_str("target") {
        Some(target) => format!(
            r#"<a href="{href}" target="{}">{text}</a>"#,
            escape_html(&target)
        ),
        None => format!(r#"<a href="{href}">{text}</a>"#),
    }
}
