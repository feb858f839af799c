//! Shared CLI utilities.

use crate::config::{main_config_path, ConfigManager};
use std::path::{Path, PathBuf};

/// The `--config` override, or the default XDG location.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(main_config_path)
}

/// Build a manager for `path` and parse it once.
pub fn load_manager(path: &Path) -> ConfigManager {
    let manager = ConfigManager::new(path);
    manager.init();
    manager
}
