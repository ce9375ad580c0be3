//! Scan configuration loaded from YAML.
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration. Unknown keys are ignored, which lets the scanner
//! share a config file with the tools that consume its output.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::scan::{Vocabulary, DEFAULT_EXTENSIONS, DEFAULT_PREVIEW_CHARS};

/// Top-level scan configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScanConfig {
    /// Root directory to scan.
    #[serde(default, alias = "cpp_repo_path")]
    pub repo_path: Option<PathBuf>,
    /// Directory that receives `cpp_analysis.json`.
    #[serde(default)]
    pub output_path: Option<PathBuf>,
    /// File-name suffixes to scan (e.g. ".cpp").
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Glob patterns, relative to the root, for files to skip (e.g. "**/third_party/**")
    #[serde(default)]
    pub excluded_paths: Vec<String>,
    #[serde(default)]
    pub follow_links: bool,
    /// Scan files on a thread pool (default: true).
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
    #[serde(default)]
    pub keywords: Vocabulary,
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

fn default_parallel() -> bool {
    true
}

fn default_preview_chars() -> usize {
    DEFAULT_PREVIEW_CHARS
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            repo_path: None,
            output_path: None,
            extensions: default_extensions(),
            excluded_paths: Vec::new(),
            follow_links: false,
            parallel: default_parallel(),
            preview_chars: default_preview_chars(),
            keywords: Vocabulary::default(),
        }
    }
}

impl ScanConfig {
    /// Parse a configuration from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        // An empty document deserializes as null, not as an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ScanConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Pick the root to scan: an explicit path wins over `repo_path`.
    pub fn resolve_root(&self, explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
        match (explicit, &self.repo_path) {
            (Some(path), _) => Ok(path.to_path_buf()),
            (None, Some(path)) => Ok(path.clone()),
            (None, None) => anyhow::bail!("no path given and no repo_path configured"),
        }
    }
}

/// Validate a configuration.
pub fn validate(config: &ScanConfig) -> anyhow::Result<()> {
    if config.extensions.is_empty() {
        anyhow::bail!("extensions must list at least one suffix");
    }
    if let Some(ext) = config.extensions.iter().find(|e| e.trim().is_empty()) {
        anyhow::bail!("invalid empty extension {:?}", ext);
    }

    if config.preview_chars == 0 {
        anyhow::bail!("preview_chars must be greater than zero");
    }

    // Validate excluded_paths glob patterns compile
    for pattern in &config.excluded_paths {
        globset::Glob::new(pattern)
            .map_err(|e| anyhow::anyhow!("invalid excluded_paths pattern {:?}: {}", pattern, e))?;
    }

    Ok(())
}
