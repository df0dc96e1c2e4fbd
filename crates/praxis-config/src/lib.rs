//! Configuration management for the PRAXIS site builder.
//!
//! Parses `praxis.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Every section is
//! optional; an absent file yields the defaults below, rooted at the current
//! working directory.
//!
//! ```toml
//! [site]
//! name = "PRAXIS"
//! version = "0.1.0"
//! description = "Process Algebra for eXtensible Industrial Systems"
//!
//! [paths]
//! source_dir = "spec"
//! paper_pdf = "paper/whitepaper.pdf"
//! output_dir = "_site"
//!
//! [highlight]
//! theme = "InspiredGitHub"
//! ```
//!
//! Relative paths are resolved against the directory containing the config file.

mod paths;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use paths::{is_within, normalize_path};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "praxis.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site identity shown in page chrome.
    pub site: SiteConfig,
    /// Input and output locations (paths are relative strings from TOML).
    paths: PathsConfigRaw,
    /// Syntax highlighting configuration.
    pub highlight: HighlightConfig,

    /// Resolved paths (set after loading).
    #[serde(skip)]
    pub paths_resolved: PathsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site identity configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Short name shown in the sidebar header and page titles.
    pub name: String,
    /// Specification version shown next to the name.
    pub version: String,
    /// Expanded name shown in the footer.
    pub description: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "PRAXIS".to_owned(),
            version: "0.1.0".to_owned(),
            description: "Process Algebra for eXtensible Industrial Systems".to_owned(),
        }
    }
}

/// Raw paths configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PathsConfigRaw {
    source_dir: Option<String>,
    paper_pdf: Option<String>,
    output_dir: Option<String>,
}

/// Resolved paths configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PathsConfig {
    /// Directory holding the chapter sources (`{source_id}.md`).
    pub source_dir: PathBuf,
    /// Optional white paper PDF copied next to the pages.
    pub paper_pdf: PathBuf,
    /// Output directory, wiped on every build.
    pub output_dir: PathBuf,
}

/// Syntax highlighting configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Name of a theme bundled with syntect.
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "InspiredGitHub".to_owned(),
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
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `praxis.toml` in current directory and parents,
    /// falling back to defaults rooted at the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from_file(path);
        }

        match Self::discover_config() {
            Some(discovered) => Self::load_from_file(&discovered),
            None => {
                tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
                Ok(Self::default_with_cwd())
            }
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            site: SiteConfig::default(),
            paths: PathsConfigRaw::default(),
            highlight: HighlightConfig::default(),
            paths_resolved: PathsConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "Loading configuration");
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.name, "site.name")?;
        require_non_empty(&self.site.version, "site.version")?;
        require_non_empty(&self.highlight.theme, "highlight.theme")?;

        // The output directory is wiped on every build.
        let output_dir = &self.paths_resolved.output_dir;
        let protected = [
            ("paths.source_dir", Some(&self.paths_resolved.source_dir)),
            ("paths.paper_pdf", Some(&self.paths_resolved.paper_pdf)),
            ("the config file", self.config_path.as_ref()),
        ];
        for (name, path) in protected {
            if let Some(path) = path
                && is_within(path, output_dir)
            {
                return Err(ConfigError::Validation(format!(
                    "paths.output_dir ({}) must not contain {name} ({})",
                    output_dir.display(),
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.paths_resolved = PathsConfig {
            source_dir: resolve(self.paths.source_dir.as_deref(), "spec"),
            paper_pdf: resolve(self.paths.paper_pdf.as_deref(), "paper/whitepaper.pdf"),
            output_dir: resolve(self.paths.output_dir.as_deref(), "_site"),
        };
    }
}
