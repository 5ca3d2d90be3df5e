//! Subcommands and the helpers they share.

pub mod config;
pub mod consolidate;
pub mod extract;

use std::path::{Path, PathBuf};

use glob::glob;
use tracing::{debug, warn};

use docmerge_core::DocmergeConfig;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docmerge")
        .join("config.json")
}

/// Load the configuration: the explicit path if given, else the default
/// file if it exists, else built-in defaults.
pub fn load_config(config_path: Option<&Path>) -> anyhow::Result<DocmergeConfig> {
    if let Some(path) = config_path {
        return Ok(DocmergeConfig::load(path)?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        Ok(DocmergeConfig::load(&default_path)?)
    } else {
        Ok(DocmergeConfig::default())
    }
}

fn is_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

/// Expand file arguments in order. Glob matches are sorted; plain paths are
/// kept even when missing so they show up as unreadable rows.
pub fn expand_inputs(inputs: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if !is_pattern(input) {
            files.push(PathBuf::from(input));
            continue;
        }

        let mut matches: Vec<PathBuf> = glob(input)?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        matches.sort();

        if matches.is_empty() {
            warn!("No files match {}", input);
        }
        files.extend(matches);
    }

    Ok(files)
}
