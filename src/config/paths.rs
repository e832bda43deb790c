use crate::config::ConfigError;
use std::path::PathBuf;

pub const GLOBAL_STATE_DIR: &str = ".launchdeck";
pub const GLOBAL_SETTINGS_FILE_NAME: &str = "config.yaml";
pub const SANDBOX_DIR_NAME: &str = "sandbox";

pub fn home_dir() -> Result<PathBuf, ConfigError> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .ok_or(ConfigError::HomeDirectoryUnavailable)
}

pub fn default_global_config_path() -> Result<PathBuf, ConfigError> {
    Ok(home_dir()?
        .join(GLOBAL_STATE_DIR)
        .join(GLOBAL_SETTINGS_FILE_NAME))
}

/// Home-relative directories scanned for games when no roots are configured.
pub const DEFAULT_GAME_SCAN_DIRS: &[&str] = &[
    "Games",
    "Applications",
    "Desktop",
    "Downloads",
    "Documents",
    "IdeaProjects",
    "Projects",
    "workspace",
    "NetBeansProjects",
];

pub fn default_game_scan_roots() -> Result<Vec<PathBuf>, ConfigError> {
    let home = home_dir()?;
    let mut roots: Vec<PathBuf> = DEFAULT_GAME_SCAN_DIRS
        .iter()
        .map(|dir| home.join(dir))
        .collect();
    if cfg!(windows) {
        roots.push(PathBuf::from("C:/Program Files"));
        roots.push(PathBuf::from("C:/Program Files (x86)"));
    }
    Ok(roots)
}
