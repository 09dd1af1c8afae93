// src/config.rs
//! Optional `devrank.toml` report preferences. Missing or malformed config
//! falls back to defaults; CLI flags override whatever was loaded.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "devrank.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Maximum ranked rows to render; 0 renders all of them.
    #[serde(default)]
    pub limit: usize,
    #[serde(default = "default_format")]
    pub format: Format,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            limit: 0,
            format: default_format(),
        }
    }
}

fn default_format() -> Format {
    Format::Table
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    /// Loads `devrank.toml` from the working directory.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Loads a config file, falling back to defaults when the file is
    /// missing or unreadable.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => Self::parse_toml(&content),
            Err(_) => Self::default(),
        }
    }

    /// Parses config TOML; malformed content yields the defaults rather than
    /// an error, same skip-and-continue stance as the parsers.
    #[must_use]
    pub fn parse_toml(content: &str) -> Self {
        toml::from_str(content).unwrap_or_default()
    }
}
