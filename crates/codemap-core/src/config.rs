//! Configuration management for codemap.

use crate::filter::ExclusionSet;
use crate::gitignore;
use crate::languages::{self, Language};
use crate::paths::config_path;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Exclusion patterns active unless the override file replaces them.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    "**/node_modules/**",
    "**/__pycache__/**",
    "**/venv/**",
    "**/.venv/**",
    "**/dist/**",
    "**/build/**",
    "**/*.min.js",
    "**/migrations/**",
    "**/.git/**",
    "**/.tox/**",
    "**/.eggs/**",
    "**/*.egg-info/**",
];

/// Default maximum docstring length kept by symbol extraction.
pub const DEFAULT_MAX_DOCSTRING_LENGTH: usize = 150;

/// Default output file name.
pub const DEFAULT_OUTPUT: &str = ".codemap.json";

/// Main configuration structure for codemap.
///
/// Field order is the key order of the saved file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Language identifiers to index.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Exclusion patterns.
    #[serde(rename = "exclude", default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Source-file include globs.
    #[serde(rename = "include", default = "default_include_patterns")]
    pub include_patterns: Vec<String>,

    /// Docstrings longer than this are truncated by symbol extraction.
    #[serde(default = "default_max_docstring_length")]
    pub max_docstring_length: usize,

    /// Output file for the generated map.
    #[serde(default = "default_output")]
    pub output: String,
}

fn default_languages() -> Vec<String> {
    Language::ALL.iter().map(|l| l.as_str().to_string()).collect()
}

fn default_exclude_patterns() -> Vec<String> {
    DEFAULT_EXCLUDE_PATTERNS.iter().map(|p| p.to_string()).collect()
}

fn default_include_patterns() -> Vec<String> {
    Language::ALL
        .iter()
        .flat_map(|l| l.extensions())
        .map(|ext| format!("**/*{ext}"))
        .collect()
}

fn default_max_docstring_length() -> usize {
    DEFAULT_MAX_DOCSTRING_LENGTH
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            exclude_patterns: default_exclude_patterns(),
            include_patterns: default_include_patterns(),
            max_docstring_length: default_max_docstring_length(),
            output: default_output(),
        }
    }
}

impl Config {
    /// Load the configuration for a project root.
    ///
    /// Reads `<root>/.codemaprc` when present. A missing, unreadable, or
    /// malformed file yields the built-in defaults. With `respect_gitignore`
    /// the translated `.gitignore` rules are appended to the exclusions.
    pub fn load(root: &Path, respect_gitignore: bool) -> Self {
        let path = config_path(root);
        let mut config = if path.exists() {
            match Self::from_file(&path) {
                Ok(config) => {
                    info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Using default configuration, {} is invalid: {}", path.display(), e);
                    Self::default()
                }
            }
        } else {
            debug!("No override file at {}, using defaults", path.display());
            Self::default()
        };

        if respect_gitignore {
            let added = config.extend_excludes(gitignore::load_patterns(root));
            if added > 0 {
                info!("Added {} exclusion patterns from .gitignore", added);
            }
        }

        config
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text. An empty document yields defaults.
    pub fn from_yaml(content: &str) -> crate::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let parsed: Option<Self> =
            serde_yaml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        Ok(parsed.unwrap_or_default())
    }

    /// Render configuration as YAML.
    pub fn to_yaml(&self) -> crate::Result<String> {
        serde_yaml::to_string(self).map_err(|e| crate::Error::Serialization(e.to_string()))
    }

    /// Save configuration to `<root>/.codemaprc`.
    pub fn save(&self, root: &Path) -> crate::Result<()> {
        let path = config_path(root);
        std::fs::write(&path, self.to_yaml()?)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Append patterns not already excluded, keeping first occurrences.
    ///
    /// Returns how many patterns were added.
    pub fn extend_excludes<I>(&mut self, patterns: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.exclude_patterns.len();
        for pattern in patterns {
            if !self.exclude_patterns.contains(&pattern) {
                self.exclude_patterns.push(pattern);
            }
        }
        self.exclude_patterns.len() - before
    }

    /// Compile the exclusion patterns.
    pub fn exclusion_set(&self) -> ExclusionSet {
        ExclusionSet::new(&self.exclude_patterns)
    }

    /// Known languages named by the configuration.
    pub fn resolved_languages(&self) -> Vec<Language> {
        languages::resolve(&self.languages)
    }
}
