//! Declarative renderer configuration.
//!
//! ```rust
//! use tmplrender::RendererConfig;
//!
//! let config = RendererConfig::from_yaml(r#"
//! base_dir: templates
//! include_patterns:
//!   - layouts/*.html
//!   - partials/*.html
//! "#).unwrap();
//!
//! assert_eq!(config.base_dir, "templates");
//! assert_eq!(config.include_patterns.len(), 2);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Where templates live and which shared fragments are always parsed.
///
/// Functions cannot be expressed in a file; pass them with
/// [`Renderer::with_funcs`](crate::Renderer::with_funcs).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    /// Prefix joined onto every template path.
    pub base_dir: String,
    /// Patterns, relative to `base_dir`, parsed before every template.
    pub include_patterns: Vec<String>,
}

/// Error loading a [`RendererConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid renderer config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl RendererConfig {
    pub fn new(base_dir: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            include_patterns: Vec::new(),
        }
    }

    /// Builder helper appending one include pattern.
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include_patterns.push(pattern.into());
        self
    }

    /// Parses a config from YAML. Missing keys take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Reads and parses a YAML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
