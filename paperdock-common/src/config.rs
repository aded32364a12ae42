//! Configuration loading and root folder resolution

use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the root folder
pub const ROOT_ENV_VAR: &str = "PAPERDOCK_ROOT";

/// Database file name inside the root folder
pub const DB_FILE_NAME: &str = "paperdock.db";

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. PAPERDOCK_ROOT environment variable
/// 3. `root_folder` key in the TOML config file
/// 4. OS-dependent default data directory (fallback)
pub fn resolve_root_folder(cli_arg: Option<&Path>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = config_file_path() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent default
    default_root_folder()
}

/// Path of the SQLite database inside the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join(DB_FILE_NAME)
}

/// Create the root folder if it does not exist yet
pub fn ensure_root_exists(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)?;
    Ok(())
}

/// Configuration file path for the platform (~/.config/paperdock/config.toml
/// or the OS equivalent)
fn config_file_path() -> Result<PathBuf> {
    let path = dirs::config_dir()
        .map(|d| d.join("paperdock").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if path.exists() {
        Ok(path)
    } else {
        Err(Error::Config(format!("Config file not found: {:?}", path)))
    }
}

/// OS-dependent default root folder
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("paperdock"))
        .unwrap_or_else(|| PathBuf::from("./paperdock_data"))
}
