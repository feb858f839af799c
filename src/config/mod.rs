//! Configuration loading
//!
//! Parses `hyprlock.conf` (plus any files pulled in with `source=`) into a
//! typed store and hands widget settings to the renderer.

pub mod error;
pub mod manager;
pub mod parser;
pub mod paths;
pub mod schema;
pub mod source;
pub mod store;
pub mod value;

pub use error::{ConfigError, ParseError, ParseReport};
pub use manager::ConfigManager;
pub use paths::{config_dir, main_config_path};
pub use store::{ConfigStore, KeywordHandler};
