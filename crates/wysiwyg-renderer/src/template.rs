//! String-template renderers.
//!
//! A [`TemplateRenderer`] is a [`NodeRenderer`] and a [`MarkRenderer`] built
//! from a template string, so overrides can live in configuration files.
//!
//! # Placeholders
//!
//! - `{content}`: rendered children (node); the wrapped text (mark)
//! - `{text}`: escaped text with marks applied (node); the wrapped text (mark)
//! - `{type}`: the node or mark type
//! - `{attrs.NAME}`: attribute value, escaped; empty when absent
//!
//! `{{` and `}}` produce literal braces.

use std::str::FromStr;

use crate::escape::escape_html;
use crate::node::Mark;
use crate::registry::{MarkRenderer, NodeRenderer};
use crate::renderer::{RenderContext, RenderNode};

/// Template parse error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    /// `{` without a matching `}`.
    #[error("unclosed placeholder at byte {0}")]
    Unclosed(usize),
    /// `}` that does not close a placeholder.
    #[error("unmatched `}}` at byte {0}")]
    UnmatchedBrace(usize),
    /// Placeholder name not recognized.
    #[error("unknown placeholder `{{{0}}}`")]
    UnknownPlaceholder(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Content,
    Text,
    Type,
    Attr(String),
}

impl Segment {
    fn placeholder(name: &str) -> Result<Self, TemplateError> {
        match name {
            "content" => Ok(Self::Content),
            "text" => Ok(Self::Text),
            "type" => Ok(Self::Type),
            _ => match name.strip_prefix("attrs.") {
                Some(attr) if !attr.is_empty() => Ok(Self::Attr(attr.to_owned())),
                _ => Err(TemplateError::UnknownPlaceholder(name.to_owned())),
            },
        }
    }
}

/// Renderer driven by a template string.
///
/// # Example
///
/// ```
/// use wysiwyg_renderer::{Node, Renderer, TemplateRenderer};
///
/// let accordion: TemplateRenderer =
///     "<details><summary>{attrs.title}</summary>{content}</details>".parse().unwrap();
///
/// let node = Node::new("accordion")
///     .with_attr("title", "More")
///     .with_child(Node::new("paragraph").with_child(Node::text("Hidden")));
///
/// let html = Renderer::new()
///     .with_node_renderer("accordion", accordion)
///     .render(&node)
///     .html;
///
/// assert_eq!(html, "<details><summary>More</summary><p>Hidden</p></details>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRenderer {
    source: String,
    segments: Vec<Segment>,
}

impl TemplateRenderer {
    /// Parse a template.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] for unbalanced braces or unknown placeholders.
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = template.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if chars.next_if(|&(_, next)| next == '{').is_some() => literal.push('{'),
                '}' if chars.next_if(|&(_, next)| next == '}').is_some() => literal.push('}'),
                '{' => {
                    let rest = &template[pos + 1..];
                    let len = rest.find('}').ok_or(TemplateError::Unclosed(pos))?;
                    let segment = Segment::placeholder(&rest[..len])?;

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);

                    let close = pos + 1 + len;
                    while chars.next_if(|&(i, _)| i <= close).is_some() {}
                }
                '}' => return Err(TemplateError::UnmatchedBrace(pos)),
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: template.to_owned(),
            segments,
        })
    }

    /// The template string this renderer was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl FromStr for TemplateRenderer {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl NodeRenderer for TemplateRenderer {
    fn render(&self, node: &RenderNode<'_>, ctx: &RenderContext<'_>) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Content => out.push_str(&ctx.render_children(node.content())),
                Segment::Text => out.push_str(&ctx.apply_marks(
                    node.sanitized_text().unwrap_or_default(),
                    node.marks(),
                )),
                Segment::Type => out.push_str(&escape_html(node.node_type())),
                Segment::Attr(name) => out.push_str(&node.escaped_attr(name)),
            }
        }
        out
    }
}

impl MarkRenderer for TemplateRenderer {
    fn render(&self, text: &str, mark: &Mark) -> String {
        let mut out = String::with_capacity(self.source.len() + text.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => out.push_str(s),
                Segment::Content | Segment::Text => out.push_str(text),
                Segment::Type => out.push_str(&escape_html(&mark.mark_type)),
                Segment::Attr(name) => {
                    if let Some(value) = mark.attr_str(name) {
                        out.push_str(&escape_html(&value));
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use crate::renderer::Renderer;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_segments() {
        let template = TemplateRenderer::parse("<a>{content}</a>{attrs.x}").unwrap();
        assert_eq!(
            template.segments,
            vec![
                Segment::Literal("<a>".to_owned()),
                Segment::Content,
                Segment::Literal("</a>".to_owned()),
                Segment::Attr("x".to_owned()),
            ]
        );
        assert_eq!(template.source(), "<a>{content}</a>{attrs.x}");
    }

    #[test]
    fn test_parse_escaped_braces() {
        let template = TemplateRenderer::parse("{{content}} {text}").unwrap();
        assert_eq!(
            template.segments,
            vec![
                Segment::Literal("{content} ".to_owned()),
                Segment::Text,
            ]
        );
    }

    #[test]
    fn test_parse_multibyte_literals() {
        let template = TemplateRenderer::parse("« {text} »").unwrap();
        assert_eq!(
            template.segments,
            vec![
                Segment::Literal("« ".to_owned()),
                Segment::Text,
                Segment::Literal(" »".to_owned()),
            ]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            TemplateRenderer::parse("<p>{content</p>"),
            Err(TemplateError::Unclosed(3))
        );
        assert_eq!(
            TemplateRenderer::parse("a } b"),
            Err(TemplateError::UnmatchedBrace(2))
        );
        assert_eq!(
            TemplateRenderer::parse("{children}"),
            Err(TemplateError::UnknownPlaceholder("children".to_owned()))
        );
        assert_eq!(
            TemplateRenderer::parse("{attrs.}"),
            Err(TemplateError::UnknownPlaceholder("attrs.".to_owned()))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            TemplateError::UnknownPlaceholder("x".to_owned()).to_string(),
            "unknown placeholder `{x}`"
        );
        assert_eq!(
            TemplateError::UnmatchedBrace(4).to_string(),
            "unmatched `}` at byte 4"
        );
    }

    #[test]
    fn test_node_template() {
        let template: TemplateRenderer =
            r#"<figure data-type="{type}"><img src="{attrs.src}" />{content}</figure>"#
                .parse()
                .unwrap();
        let node = Node::new("figure")
            .with_attr("src", "a<b>.png")
            .with_child(Node::new("paragraph").with_child(Node::text("caption")));

        let html = Renderer::new()
            .with_node_renderer("figure", template)
            .render(&node)
            .html;

        assert_eq!(
            html,
            r#"<figure data-type="figure"><img src="a&lt;b&gt;.png" /><p>caption</p></figure>"#
        );
    }

    #[test]
    fn test_node_template_text_keeps_marks() {
        let template: TemplateRenderer = "<span>{text}</span>".parse().unwrap();
        let node = Node::text("a & b").with_mark(Mark::new("bold"));

        let html = Renderer::new()
            .with_node_renderer("text", template)
            .render(&node)
            .html;

        assert_eq!(html, "<span><strong>a &amp; b</strong></span>");
    }

    #[test]
    fn test_mark_template() {
        let template: TemplateRenderer =
            r#"<a href="{attrs.href}" rel="noopener">{text}</a>"#.parse().unwrap();
        let node = Node::text("<go>").with_mark(Mark::new("link").with_attr("href", "/x?a&b"));

        let html = Renderer::new()
            .with_mark_renderer("link", template)
            .render(&node)
            .html;

        assert_eq!(html, r#"<a href="/x?a&amp;b" rel="noopener">&lt;go&gt;</a>"#);
    }

    #[test]
    fn test_mark_template_missing_attr_is_empty() {
        let template: TemplateRenderer = r#"<mark class="{attrs.color}">{content}</mark>"#
            .parse()
            .unwrap();
        assert_eq!(
            MarkRenderer::render(&template, "hi", &Mark::new("highlight")),
            r#"<mark class="">hi</mark>"#
        );
    }
}
