use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::grid::AsciiStyle;

/// How the containment map is written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Nested `{"x": {"y": bool}}` object
    #[default]
    Json,
    /// One text row per Y
    Ascii,
    /// Cell counts only
    Summary,
}

fn default_max_cells() -> u64 {
    4_000_000
}
fn default_inside() -> char {
    '#'
}
fn default_outside() -> char {
    '.'
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct AsciiConfig {
    #[serde(default = "default_inside")]
    pub inside: char,
    #[serde(default = "default_outside")]
    pub outside: char,
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            inside: default_inside(),
            outside: default_outside(),
        }
    }
}

impl From<AsciiConfig> for AsciiStyle {
    fn from(config: AsciiConfig) -> Self {
        AsciiStyle {
            inside: config.inside,
            outside: config.outside,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub pretty: bool,
    /// Largest grid the CLI will evaluate
    #[serde(default = "default_max_cells")]
    pub max_cells: u64,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub ascii: AsciiConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            output: None,
            format: OutputFormat::default(),
            pretty: false,
            max_cells: default_max_cells(),
            verbose: false,
            ascii: AsciiConfig::default(),
        }
    }
}

impl FileConfig {
    /// Load the first parseable config file from the search paths
    pub fn load() -> Option<Self> {
        Self::load_from(&get_config_paths())
    }

    fn load_from(paths: &[PathBuf]) -> Option<Self> {
        for path in paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        if !path.exists() {
            anyhow::bail!("Config file not found: {:?}", path);
        }
        let contents = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("castrays.toml"));
    paths.push(PathBuf::from(".castrays.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("castrays").join("config.toml"));
        paths.push(config_dir.join("castrays.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".castrays.toml"));
        paths.push(home.join(".config").join("castrays").join("config.toml"));
    }

    paths
}
