use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"# Run log analyzer configuration

# Run log exported from the test stations
input = "RunLog.csv"

# Where CSV and HTML reports are written
output_dir = "output"

# Status value marking a stopped run (trimmed, case-insensitive)
stop_marker = "Stopped"

# Extra timestamp layouts (chrono syntax), tried before the built-in ones
datetime_formats = []

[columns]
status = "Aborted"
user = "User Name"
test_name = "Test Name"
test_datetime = "Test Date Time"
part_number = "Part Number"
stage_serial = "Stage Serial Number"
"#;

/// Write a default `.runlog.toml` into `dir`.
pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    Ok(config_path)
}

pub fn init_config(force: bool) -> Result<()> {
    let path = init_config_in(Path::new("."), force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}
