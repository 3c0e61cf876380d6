use std::fs;
use std::path::{Path, PathBuf};

use super::core::RunLogConfig;
use crate::errors::{Result, RunLogError};

pub const CONFIG_FILE_NAME: &str = ".runlog.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse config from a TOML string
pub fn parse_config(contents: &str) -> std::result::Result<RunLogConfig, String> {
    toml::from_str::<RunLogConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
}

/// Load an explicitly requested config file. Any failure is an error.
pub fn load_config_from(path: &Path) -> Result<RunLogConfig> {
    let contents = fs::read_to_string(path).map_err(|e| RunLogError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let config = parse_config(&contents).map_err(|message| RunLogError::Config {
        path: path.to_path_buf(),
        message,
    })?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Try loading config from a discovered path. Broken files are logged and
/// skipped.
fn try_load_config_from_path(config_path: &Path) -> Option<RunLogConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Directory ancestors of `start`, nearest first, up to `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.runlog.toml`, falling back to
/// defaults.
pub fn discover_config(start: PathBuf) -> RunLogConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No {} found after checking {} directories. Using default config.",
                CONFIG_FILE_NAME,
                MAX_TRAVERSAL_DEPTH
            );
            RunLogConfig::default()
        })
}

/// Load config from the working directory hierarchy.
pub fn load_config() -> RunLogConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            RunLogConfig::default()
        }
    }
}
