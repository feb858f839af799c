//! hyprlock-conf: inspect lock screen configuration from the command line

use anyhow::Result;

fn main() -> Result<()> {
    hyprlock_conf::cli::run()
}
