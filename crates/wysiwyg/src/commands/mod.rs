//! CLI command implementations.

mod check;
mod render;

pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;

use std::path::{Path, PathBuf};

use clap::Args;
use clap::builder::RangedU64ValueParser;
use wysiwyg_config::{CliSettings, Config};
use wysiwyg_renderer::{Node, RenderResult};

use crate::error::CliError;

/// Input and configuration arguments shared by all commands.
#[derive(Args)]
pub(crate) struct DocumentArgs {
    /// JSON document to render (default: stdin, also `-`).
    input: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover wysiwyg.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum nesting depth (overrides config).
    #[arg(long, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    max_depth: Option<usize>,
}

impl DocumentArgs {
    /// Load configuration and the input document, then render it.
    pub(crate) fn render(&self) -> Result<RenderResult, CliError> {
        let cli_settings = CliSettings {
            max_depth: self.max_depth,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }
        let renderer = config.renderer()?;

        let document = self.load_document()?;
        tracing::info!(root = %document.node_type, "Rendering document");

        Ok(renderer.render(&document))
    }

    fn load_document(&self) -> Result<Node, CliError> {
        let json = match self.input.as_deref() {
            Some(path) if path != Path::new("-") => std::fs::read_to_string(path)?,
            _ => std::io::read_to_string(std::io::stdin())?,
        };
        parse_document(&json)
    }
}

/// Parse a JSON document tree.
fn parse_document(json: &str) -> Result<Node, CliError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(input: &Path, config: &Path, max_depth: Option<usize>) -> DocumentArgs {
        DocumentArgs {
            input: Some(input.to_path_buf()),
            config: Some(config.to_path_buf()),
            max_depth,
        }
    }

    #[test]
    fn test_parse_document() {
        let node = parse_document(r#"{"type":"doc","content":[{"type":"paragraph"}]}"#).unwrap();
        assert_eq!(node.node_type, "doc");
        assert_eq!(node.children().len(), 1);
    }

    #[test]
    fn test_parse_document_invalid_json() {
        let err = parse_document("{not json").unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
        assert!(err.to_string().starts_with("Invalid document JSON"));
    }

    #[test]
    fn test_parse_document_missing_type() {
        assert!(parse_document(r#"{"content":[]}"#).is_err());
    }

    #[test]
    fn test_render_from_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("doc.json");
        let config = temp_dir.path().join("wysiwyg.toml");
        std::fs::write(
            &input,
            r#"{"type":"doc","content":[
                {"type":"paragraph","content":[{"type":"text","text":"Hi","marks":[{"type":"bold"}]}]},
                {"type":"accordion","attrs":{"title":"More"}}
            ]}"#,
        )
        .unwrap();
        std::fs::write(
            &config,
            "[nodes]\naccordion = \"<details><summary>{attrs.title}</summary></details>\"\n",
        )
        .unwrap();

        let result = args(&input, &config, None).render().unwrap();

        assert_eq!(
            result.html,
            "<p><strong>Hi</strong></p><details><summary>More</summary></details>"
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_render_reports_unknown_nodes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("doc.json");
        let config = temp_dir.path().join("wysiwyg.toml");
        std::fs::write(&input, r#"{"type":"doc","content":[{"type":"hard_break"}]}"#).unwrap();
        std::fs::write(&config, "").unwrap();

        let result = args(&input, &config, None).render().unwrap();

        assert!(result.html.contains(r#"Node "hard_break" is not defined."#));
        assert_eq!(result.warnings, vec![r#"Unknown node type "hard_break""#]);
    }

    #[test]
    fn test_render_reports_default_typed_node() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("doc.json");
        let config = temp_dir.path().join("wysiwyg.toml");
        std::fs::write(&input, r#"{"type":"doc","content":[{"type":"default"}]}"#).unwrap();
        std::fs::write(&config, "").unwrap();

        let result = args(&input, &config, None).render().unwrap();

        assert_eq!(result.warnings, vec![r#"Unknown node type "default""#]);
    }

    #[test]
    fn test_render_rejects_max_depth_above_limit() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("doc.json");
        let config = temp_dir.path().join("wysiwyg.toml");
        std::fs::write(&input, r#"{"type":"doc"}"#).unwrap();
        std::fs::write(&config, "").unwrap();

        let result = args(&input, &config, Some(4096)).render();

        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_render_max_depth_overrides_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("doc.json");
        let config = temp_dir.path().join("wysiwyg.toml");
        std::fs::write(
            &input,
            r#"{"type":"doc","content":[{"type":"paragraph","content":[{"type":"text","text":"x"}]}]}"#,
        )
        .unwrap();
        std::fs::write(&config, "[render]\nmax_depth = 100\n").unwrap();

        let result = args(&input, &config, Some(2)).render().unwrap();

        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_render_missing_input() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = temp_dir.path().join("wysiwyg.toml");
        std::fs::write(&config, "").unwrap();

        let result = args(&temp_dir.path().join("missing.json"), &config, None).render();

        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn test_render_missing_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let input = temp_dir.path().join("doc.json");
        std::fs::write(&input, r#"{"type":"doc"}"#).unwrap();

        let result = args(&input, &temp_dir.path().join("nope.toml"), None).render();

        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
