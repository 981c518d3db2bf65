//! Configuration for lessonlink paths.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (LESSONLINK_DATA_DIR, LESSONLINK_NOTES_DIR)
//! 2. Config file (.lessonlink/config.yaml)
//! 3. Defaults (data/ and notes/ relative to the project root)
//!
//! Config file discovery:
//! - Searches current directory and parents for .lessonlink/config.yaml
//! - Paths in config file are relative to the config file's parent directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<std::result::Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the playlist document (relative to project root)
    pub data: Option<String>,
    /// Directory holding the lesson note files (relative to project root)
    pub notes: Option<String>,
}

/// Resolved configuration with concrete paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory for the playlist document
    pub data_dir: PathBuf,
    /// Directory for the lesson note files
    pub notes_dir: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".lessonlink").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to a base directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Resolve configuration from the given sources
fn resolve(
    config_file: Option<PathBuf>,
    env_data: Option<String>,
    env_notes: Option<String>,
) -> Result<ResolvedConfig> {
    let (data_dir, notes_dir) = if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Base directory is the parent of .lessonlink/ (i.e., the project root)
        let base_dir = config_path
            .parent() // .lessonlink/
            .and_then(|p| p.parent()) // project root
            .unwrap_or(Path::new("."))
            .to_path_buf();

        let data_dir = if let Some(env) = env_data {
            PathBuf::from(env)
        } else if let Some(ref data) = config.paths.data {
            resolve_path(&base_dir, data)
        } else {
            base_dir.join("data")
        };

        let notes_dir = if let Some(env) = env_notes {
            PathBuf::from(env)
        } else if let Some(ref notes) = config.paths.notes {
            resolve_path(&base_dir, notes)
        } else {
            base_dir.join("notes")
        };

        (data_dir, notes_dir)
    } else {
        // No config file - use env vars or defaults relative to the
        // current directory
        let data_dir = env_data
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("data"));
        let notes_dir = env_notes
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("notes"));

        (data_dir, notes_dir)
    };

    Ok(ResolvedConfig {
        data_dir,
        notes_dir,
        config_file,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    resolve(
        find_config_file(),
        std::env::var("LESSONLINK_DATA_DIR").ok(),
        std::env::var("LESSONLINK_NOTES_DIR").ok(),
    )
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{e:#}")));

    match result {
        Ok(cfg) => Ok(cfg),
        Err(e) => Err(anyhow::anyhow!("Failed to load configuration: {}", e)),
    }
}
