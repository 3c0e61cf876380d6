//! Run log configuration.
//!
//! Resolution order, lowest to highest precedence: built-in defaults, a
//! `.runlog.toml` discovered in the working directory hierarchy (or an
//! explicit `--config` file), then command-line overrides.

mod core;
mod loader;

pub use self::core::{
    ColumnNames, ConfigOverrides, RunLogConfig, DEFAULT_INPUT, DEFAULT_OUTPUT_DIR,
    DEFAULT_STOP_MARKER,
};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from, parse_config,
    CONFIG_FILE_NAME,
};

use crate::errors::Result;
use std::path::Path;

/// Resolve the effective configuration for one invocation.
pub fn resolve_config(
    explicit_path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<RunLogConfig> {
    let base = match explicit_path {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };
    Ok(overrides.apply(base))
}
