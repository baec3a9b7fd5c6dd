//! CLI command implementations.

pub mod batch;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod extract;
pub mod reclassify;
pub mod stats;

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde_json::Value;

use excursia_core::{ExcursiaConfig, RawPage};

/// Output format for single-page and statistics commands.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable text
    Text,
}

/// Load configuration from `--config`, or fall back to defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<ExcursiaConfig> {
    let config = match config_path {
        Some(path) => ExcursiaConfig::from_file(Path::new(path))
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path, e))?,
        None => ExcursiaConfig::default(),
    };
    Ok(config)
}

/// Read a page file holding one page object or an array of pages.
pub fn read_pages(path: &Path) -> anyhow::Result<Vec<RawPage>> {
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;

    let pages = match value {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<RawPage>, _>>()?,
        other => vec![serde_json::from_value(other)?],
    };
    Ok(pages)
}

/// Read a file holding exactly one page.
pub fn read_page(path: &Path) -> anyhow::Result<RawPage> {
    let mut pages = read_pages(path)?;
    if pages.len() != 1 {
        anyhow::bail!("Expected one page in {}, found {}", path.display(), pages.len());
    }
    Ok(pages.remove(0))
}
