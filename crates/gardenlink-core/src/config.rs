//! Configuration types for the Gardenlink engine.
//!
//! Follows a builder pattern for complex configuration with validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default route prefix for rendered wiki-links
pub const DEFAULT_LINK_BASE_PATH: &str = "/notes";

/// Default style marker attached to rendered wiki-links
pub const DEFAULT_LINK_CLASS: &str = "wiki-link";

/// Global engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    /// Directory holding the note files
    pub notes_dir: PathBuf,
    /// Configuration profile name
    pub profile: String,

    // Rendering
    pub link_base_path: String,
    pub link_class: String,

    // Traversal and graph derivation
    pub default_max_depth: usize,
    pub parallel_graph: bool,

    // Loading
    pub allowed_extensions: HashSet<String>,
    pub excluded_paths: HashSet<String>,

    pub log_level: String,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            notes_dir: PathBuf::from("src/content/notes"),
            profile: "default".to_string(),
            link_base_path: DEFAULT_LINK_BASE_PATH.to_string(),
            link_class: DEFAULT_LINK_CLASS.to_string(),
            default_max_depth: 1,
            parallel_graph: true,
            allowed_extensions: [".md", ".mdx"].iter().map(|s| s.to_string()).collect(),
            excluded_paths: [".git", ".DS_Store", "node_modules", "drafts"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            log_level: "INFO".to_string(),
        }
    }
}

impl GardenConfig {
    /// Create new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with builder
    pub fn builder(notes_dir: impl Into<PathBuf>) -> GardenConfigBuilder {
        GardenConfigBuilder::new(notes_dir)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.link_base_path.starts_with('/') {
            return Err(Error::config_error(format!(
                "link_base_path must start with '/': {}",
                self.link_base_path
            )));
        }

        if self.link_class.trim().is_empty() {
            return Err(Error::config_error("link_class cannot be empty"));
        }

        if self.allowed_extensions.is_empty() {
            return Err(Error::config_error(
                "At least one note file extension must be allowed",
            ));
        }

        if let Some(ext) = self.allowed_extensions.iter().find(|e| !e.starts_with('.')) {
            return Err(Error::config_error(format!(
                "Extensions must start with '.': {}",
                ext
            )));
        }

        Ok(())
    }

    /// Validate configuration and check that the notes directory exists
    pub fn validate_notes_dir(&self) -> Result<()> {
        self.validate()?;

        if !self.notes_dir.exists() {
            return Err(Error::config_error(format!(
                "Notes directory does not exist: {}",
                self.notes_dir.display()
            )));
        }

        if !self.notes_dir.is_dir() {
            return Err(Error::config_error(format!(
                "Notes path is not a directory: {}",
                self.notes_dir.display()
            )));
        }

        Ok(())
    }

    /// Rendering options derived from this configuration
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            link_base_path: self.link_base_path.clone(),
            link_class: self.link_class.clone(),
        }
    }

    /// Save configuration to a YAML file
    pub async fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| Error::config_error(format!("Failed to serialize config: {}", e)))?;

        tokio::fs::write(path, yaml).await.map_err(|e| {
            Error::config_error(format!(
                "Failed to save config to {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load configuration from a YAML file; missing keys take defaults
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path));
        }

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::config_error(format!(
                "Failed to load config from {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::config_error(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

/// Builder for GardenConfig
pub struct GardenConfigBuilder {
    config: GardenConfig,
}

impl GardenConfigBuilder {
    /// Create a new builder
    pub fn new(notes_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: GardenConfig {
                notes_dir: notes_dir.into(),
                ..GardenConfig::default()
            },
        }
    }

    pub fn link_base_path(mut self, base: impl Into<String>) -> Self {
        self.config.link_base_path = base.into();
        self
    }

    pub fn link_class(mut self, class: impl Into<String>) -> Self {
        self.config.link_class = class.into();
        self
    }

    pub fn default_max_depth(mut self, depth: usize) -> Self {
        self.config.default_max_depth = depth;
        self
    }

    pub fn parallel_graph(mut self, parallel: bool) -> Self {
        self.config.parallel_graph = parallel;
        self
    }

    pub fn exclude(mut self, path: impl Into<String>) -> Self {
        self.config.excluded_paths.insert(path.into());
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<GardenConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// How link nodes are rendered to HTML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    pub link_base_path: String,
    pub link_class: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            link_base_path: DEFAULT_LINK_BASE_PATH.to_string(),
            link_class: DEFAULT_LINK_CLASS.to_string(),
        }
    }
}

impl RenderOptions {
    /// Anchor destination for a slug, e.g. `/notes/my-note`
    pub fn href(&self, slug: &str) -> String {
        format!("{}/{}", self.link_base_path.trim_end_matches('/'), slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builder_defaults() {
        let config = GardenConfig::builder("notes").build().unwrap();
        assert_eq!(config.notes_dir, PathBuf::from("notes"));
        assert_eq!(config.link_base_path, "/notes");
        assert_eq!(config.link_class, "wiki-link");
        assert_eq!(config.default_max_depth, 1);
    }

    #[test]
    fn test_validation_rejects_relative_base_path() {
        let result = GardenConfig::builder("notes").link_base_path("notes").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_notes_dir() {
        let temp = TempDir::new().unwrap();
        let config = GardenConfig::builder(temp.path()).build().unwrap();
        assert!(config.validate_notes_dir().is_ok());

        let missing = GardenConfig::builder(temp.path().join("missing")).build().unwrap();
        assert!(missing.validate_notes_dir().is_err());
    }

    #[test]
    fn test_href_joins_without_double_slash() {
        let opts = RenderOptions {
            link_base_path: "/garden/".to_string(),
            ..RenderOptions::default()
        };
        assert_eq!(opts.href("a-note"), "/garden/a-note");
        assert_eq!(RenderOptions::default().href("x"), "/notes/x");
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gardenlink.yaml");
        let config = GardenConfig::builder(temp.path())
            .default_max_depth(3)
            .build()
            .unwrap();

        config.save(&path).await.unwrap();
        let loaded = GardenConfig::load(&path).await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_load_partial_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gardenlink.yaml");
        tokio::fs::write(&path, "link_class: garden-link\n").await.unwrap();

        let loaded = GardenConfig::load(&path).await.unwrap();
        assert_eq!(loaded.link_class, "garden-link");
        assert_eq!(loaded.link_base_path, "/notes");
    }
}
