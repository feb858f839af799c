//! Check command implementation

use anyhow::Result;
use std::path::Path;

use super::utils::load_manager;

pub fn run(config_path: &Path) -> Result<()> {
    if !config_path.exists() {
        println!("No config at {}, defaults apply", config_path.display());
        return Ok(());
    }

    let manager = load_manager(config_path);
    let errors = manager.errors();

    if errors.is_empty() {
        let widgets = manager.widget_configs();
        println!("Config OK: {} ({} widgets)", config_path.display(), widgets.len());
        return Ok(());
    }

    for error in &errors {
        println!("{}", error);
    }
    anyhow::bail!("Config has {} error(s)", errors.len())
}
