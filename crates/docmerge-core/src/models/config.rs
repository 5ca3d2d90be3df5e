//! Configuration structures for extraction and output.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DocmergeError, Result as DocmergeResult};
use crate::extract::rules::{patterns, RuleSet};

/// Main configuration for docmerge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocmergeConfig {
    /// Field extraction rules.
    pub rules: RulesConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Rule tables per document kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Rules for primary documents (invoices).
    pub primary: RuleSet,

    /// Rules for secondary documents (quotations).
    pub secondary: RuleSet,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            primary: patterns::primary_rules(),
            secondary: patterns::secondary_rules(),
        }
    }
}

/// Output format for consolidated rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values with a header row.
    #[default]
    Csv,
    /// Pretty-printed JSON.
    Json,
    /// Human-readable report.
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => f.write_str("csv"),
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Text => f.write_str("text"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,

    /// Show which secondary document was merged into each row.
    pub include_secondary_source: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Csv,
            include_secondary_source: true,
        }
    }
}

impl DocmergeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Load a configuration file, reporting malformed JSON as a
    /// configuration error.
    pub fn load(path: &Path) -> DocmergeResult<Self> {
        Self::from_file(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => {
                DocmergeError::Config(format!("{}: {}", path.display(), e))
            }
            _ => DocmergeError::Io(e),
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
