//! Command-line interface for hyprlock-conf
//!
//! Provides `path`, `check`, `get`, `widgets` and `format` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod check;
mod format;
mod get;
mod utils;
mod widgets;

/// Load lock screen configuration and expand widget label templates
#[derive(Parser)]
#[command(name = "hyprlock-conf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file to load instead of $XDG_CONFIG_HOME/hypr/hyprlock.conf
    #[arg(short, long, global = true, env = "HYPRLOCK_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved config file path
    Path,

    /// Parse the config and report every error
    Check,

    /// Print a single option, e.g. general:grace
    Get(get::GetArgs),

    /// Print all widget configurations as JSON
    Widgets(widgets::WidgetsArgs),

    /// Expand label tokens ($USER, $TIME, <br/>, cmd[...]) in a string
    Format(format::FormatArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    let config_path = utils::resolve_config_path(cli.config);

    match cli.command {
        Commands::Path => {
            println!("{}", config_path.display());
            Ok(())
        }
        Commands::Check => check::run(&config_path),
        Commands::Get(args) => get::run(&config_path, args),
        Commands::Widgets(args) => widgets::run(&config_path, args),
        Commands::Format(args) => format::run(args),
    }
}
