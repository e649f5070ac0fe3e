use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::CompressOptions;
use crate::core::compressor::DEFAULT_MAX_DEPTH;
use crate::fetch::{DocumentSource, HttpClientConfig, client::DEFAULT_API_BASE};

pub const CONFIG_FILE: &str = "figpress.toml";

/// Output format for the compressed tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
    Tree,
    Css, // Background CSS of the raw root, bypasses compression
}

/// Main configuration for figpress
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FigpressConfig {
    /// Figma links, JSON export paths, or "-" for stdin
    pub sources: Vec<String>,
    /// Figma personal access token
    pub token: Option<String>,
    /// Path to the output file (stdout when unset)
    pub output: Option<PathBuf>,
    /// Output format (JSON, Markdown, Tree, CSS)
    pub output_format: OutputFormat,
    /// Custom prompt/instruction to prepend to the output
    pub prompt: Option<String>,
    /// Include the short-key legend in JSON and Markdown output
    pub legend: bool,
    /// If true, skip token counting (faster)
    pub no_tokens: bool,
    /// Warn when the compact output exceeds this many tokens
    pub max_tokens: Option<usize>,
    /// Deepest raw node the compressor will recurse into
    pub max_depth: usize,
    /// Deepest level printed by the tree format
    pub tree_depth: usize,
    /// Clamp color channels to [0, 1] before quantizing
    pub clamp_colors: bool,
    /// If true, copy output to system clipboard
    pub clipboard_copy: bool,
    /// Enable debug logging
    pub verbose: bool,
    /// Base URL of the Figma REST API
    pub api_base: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Retries for throttled or failed requests
    pub max_retries: u32,
}

impl FigpressConfig {
    /// Parses every configured source.
    pub fn document_sources(&self) -> anyhow::Result<Vec<DocumentSource>> {
        self.sources
            .iter()
            .map(|s| DocumentSource::parse(s).with_context(|| format!("Bad source: {}", s)))
            .collect()
    }

    /// Validates the configuration, ensuring sources parse and a token is
    /// available for remote documents.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.sources.is_empty() {
            anyhow::bail!("No input given: pass a Figma link, a JSON file, or '-' for stdin");
        }
        let sources = self.document_sources()?;
        if sources.iter().any(DocumentSource::is_remote)
            && self.token.as_deref().is_none_or(|t| t.trim().is_empty())
        {
            anyhow::bail!("A Figma access token is required for links (--token or FIGMA_TOKEN)");
        }
        if self.max_depth == 0 {
            anyhow::bail!("max_depth must be at least 1");
        }
        if self.tree_depth == 0 {
            anyhow::bail!("tree_depth must be at least 1");
        }
        Ok(())
    }

    pub fn compress_options(&self) -> CompressOptions {
        CompressOptions {
            max_depth: self.max_depth,
            clamp_colors: self.clamp_colors,
        }
    }

    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            api_base: self.api_base.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
            ..Default::default()
        }
    }

    /// Attempts to load configuration from `figpress.toml` in the current directory.
    pub fn load_from_file() -> Option<Self> {
        Self::load_from_path(Path::new(CONFIG_FILE)).ok()
    }

    pub fn load_from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

impl Default for FigpressConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            token: None,
            output: None,
            output_format: OutputFormat::Json,
            prompt: None,
            legend: true,
            no_tokens: false,
            max_tokens: None,
            max_depth: DEFAULT_MAX_DEPTH,
            tree_depth: 10,
            clamp_colors: false,
            clipboard_copy: false,
            verbose: false,
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}
