//! Configuration management for wysiwyg.
//!
//! Parses `wysiwyg.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Template overrides
//!
//! The `[nodes]` and `[marks]` tables map a type tag to a template string
//! (see [`TemplateRenderer`]). They are merged over the built-in renderers:
//!
//! ```toml
//! [render]
//! max_depth = 64
//!
//! [nodes]
//! image = '<img src="{attrs.src}" alt="{attrs.alt}" loading="lazy" />'
//! accordion = "<details><summary>{attrs.title}</summary>{content}</details>"
//!
//! [marks]
//! bold = "<b>{text}</b>"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use wysiwyg_renderer::{
    DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT, MarkRenderers, NodeRenderers, Renderer, TemplateError,
    TemplateRenderer,
};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "wysiwyg.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override maximum nesting depth.
    pub max_depth: Option<usize>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Rendering limits.
    pub render: RenderConfig,
    /// Node type to template overrides.
    pub nodes: BTreeMap<String, String>,
    /// Mark type to template overrides.
    pub marks: BTreeMap<String, String>,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Render configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Maximum nesting depth before a node is replaced by a diagnostic.
    pub max_depth: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Invalid template in `[nodes]` or `[marks]`.
    #[error("Invalid template for {key}: {source}")]
    Template {
        /// Config key (e.g., "`nodes.image`").
        key: String,
        /// Underlying parse error.
        source: TemplateError,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `wysiwyg.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading and take precedence over config
    /// file values. The result is validated last.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(max_depth) = settings.max_depth {
            self.render.max_depth = max_depth;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks limits and parses every template. Called automatically by
    /// [`load`](Self::load).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for out-of-range values or empty keys,
    /// `ConfigError::Template` for templates that fail to parse.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_render()?;
        self.node_overrides()?;
        self.mark_overrides()?;
        Ok(())
    }

    fn validate_render(&self) -> Result<(), ConfigError> {
        let max_depth = self.render.max_depth;
        if max_depth == 0 {
            return Err(ConfigError::Validation(
                "render.max_depth must be greater than 0".to_owned(),
            ));
        }
        if max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Validation(format!(
                "render.max_depth cannot exceed {MAX_DEPTH_LIMIT}"
            )));
        }
        Ok(())
    }

    /// Build node overrides from the `[nodes]` table.
    ///
    /// # Errors
    ///
    /// Returns an error for empty type names or invalid templates.
    pub fn node_overrides(&self) -> Result<NodeRenderers, ConfigError> {
        let mut overrides = NodeRenderers::new();
        for (node_type, template) in &self.nodes {
            overrides.insert(node_type.clone(), parse_template("nodes", node_type, template)?);
        }
        Ok(overrides)
    }

    /// Build mark overrides from the `[marks]` table.
    ///
    /// # Errors
    ///
    /// Returns an error for empty type names or invalid templates.
    pub fn mark_overrides(&self) -> Result<MarkRenderers, ConfigError> {
        let mut overrides = MarkRenderers::new();
        for (mark_type, template) in &self.marks {
            overrides.insert(mark_type.clone(), parse_template("marks", mark_type, template)?);
        }
        Ok(overrides)
    }

    /// Build a [`Renderer`] with this configuration's limits and overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if any template is invalid.
    pub fn renderer(&self) -> Result<Renderer, ConfigError> {
        Ok(Renderer::new()
            .with_max_depth(self.render.max_depth)
            .with_node_overrides(&self.node_overrides()?)
            .with_mark_overrides(&self.mark_overrides()?))
    }
}

fn parse_template(
    table: &str,
    key: &str,
    template: &str,
) -> Result<TemplateRenderer, ConfigError> {
    if key.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "{table} keys cannot be empty"
        )));
    }
    TemplateRenderer::parse(template).map_err(|source| ConfigError::Template {
        key: format!("{table}.{key}"),
        source,
    })
}
