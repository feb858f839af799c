//! hyprlock-conf: lock screen configuration loading and label formatting
//!
//! The [`config`] module parses `hyprlock.conf` (with `source=` includes and
//! repeatable widget blocks) into typed values; [`format`] expands the
//! placeholder tokens used in label text.

pub mod cli;
pub mod config;
pub mod domain;
pub mod format;
pub mod layout;

pub use config::{ConfigError, ConfigManager};
pub use domain::{ConfigValue, FormatResult, Vec2, WidgetConfig};
pub use format::{format_string, format_string_with, FormatContext};
