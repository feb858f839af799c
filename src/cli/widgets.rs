//! Widgets command implementation

use anyhow::Result;
use clap::Args;
use std::path::Path;

use super::utils::load_manager;
use crate::config::schema::WIDGET_CATEGORIES;

#[derive(Args)]
pub struct WidgetsArgs {
    /// Only show widgets of this type (background, input-field, label)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub kind: Option<String>,
}

pub fn run(config_path: &Path, args: WidgetsArgs) -> Result<()> {
    if let Some(kind) = &args.kind {
        if !WIDGET_CATEGORIES.contains(&kind.as_str()) {
            anyhow::bail!(
                "Unknown widget type '{}', expected one of: {}",
                kind,
                WIDGET_CATEGORIES.join(", ")
            );
        }
    }

    let manager = load_manager(config_path);
    let widgets: Vec<_> = manager
        .widget_configs()
        .into_iter()
        .filter(|w| args.kind.as_deref().map_or(true, |kind| w.kind == kind))
        .collect();

    println!("{}", serde_json::to_string_pretty(&widgets)?);
    Ok(())
}
