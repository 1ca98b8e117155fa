//! Common paths for Pawshop data storage
//!
//! Pawshop keeps its configuration under ~/.config/pawshop/ on all
//! platforms:
//! - config.toml - User configuration

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the Pawshop config directory (~/.config/pawshop/)
pub fn pawshop_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = home.join(".config").join("pawshop");
    fs::create_dir_all(&dir).context("Failed to create pawshop directory")?;
    Ok(dir)
}

/// Get the config file path (~/.config/pawshop/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(pawshop_dir()?.join("config.toml"))
}
