//! Config manager: owns the store behind a lock and exposes typed reads

use super::error::{ConfigError, ParseError, ParseReport};
use super::parser::Parser;
use super::paths::main_config_path;
use super::schema::{self, WIDGET_CATEGORIES};
use super::store::ConfigStore;
use crate::domain::{ConfigValue, Vec2, WidgetConfig};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Default)]
struct State {
    store: ConfigStore,
    report: ParseReport,
}

/// Loads the lock screen configuration and serves values to widgets.
///
/// All reads go through a single mutex; values are returned by copy so no
/// lock is held by callers.
pub struct ConfigManager {
    path: PathBuf,
    state: Mutex<State>,
}

impl ConfigManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), state: Mutex::new(State::default()) }
    }

    /// Manager for `$XDG_CONFIG_HOME/hypr/hyprlock.conf` (or `~/.config/...`).
    pub fn from_default_path() -> Self {
        Self::new(main_config_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Register the schema and parse the config file. Errors are logged and
    /// returned as an advisory report; faulty entries keep their defaults.
    pub fn init(&self) -> ParseReport {
        let mut state = self.state.lock();
        schema::register(&mut state.store);
        let report = parse_into(&mut state.store, &self.path);

        if report.has_errors() {
            tracing::error!(
                "Config has errors:\n{}\nProceeding ignoring faulty entries",
                report.error_string()
            );
        }

        state.report = report.clone();
        report
    }

    /// Errors from the last parse, one message per entry.
    pub fn errors(&self) -> Vec<String> {
        self.state.lock().report.messages()
    }

    pub fn get_value(&self, name: &str) -> Result<ConfigValue, ConfigError> {
        self.state.lock().store.get(name).cloned()
    }

    pub fn get_int(&self, name: &str) -> Result<i64, ConfigError> {
        self.state.lock().store.get_int(name)
    }

    pub fn get_float(&self, name: &str) -> Result<f64, ConfigError> {
        self.state.lock().store.get_float(name)
    }

    pub fn get_string(&self, name: &str) -> Result<String, ConfigError> {
        self.state.lock().store.get_string(name).map(str::to_string)
    }

    pub fn get_vec2(&self, name: &str) -> Result<Vec2, ConfigError> {
        self.state.lock().store.get_vec2(name)
    }

    /// Every configured widget: backgrounds first, then input fields, then
    /// labels, each in declaration order.
    pub fn widget_configs(&self) -> Vec<WidgetConfig> {
        let state = self.state.lock();
        let store = &state.store;
        let mut result = Vec::new();

        for category in WIDGET_CATEGORIES {
            let names = store.special_value_names(category);
            for key in store.list_keys_for_special_category(category) {
                let monitor = store
                    .special_value(category, "monitor", &key)
                    .ok()
                    .and_then(|value| value.as_str().map(str::to_string))
                    .unwrap_or_default();

                let mut values = BTreeMap::new();
                for name in names.iter().filter(|name| name.as_str() != "monitor") {
                    match store.special_value(category, name, &key) {
                        Ok(value) => {
                            values.insert(name.clone(), value.clone());
                        }
                        Err(e) => tracing::warn!("widget {} #{}: {}", category, key, e),
                    }
                }

                result.push(WidgetConfig { kind: category.to_string(), monitor, values });
            }
        }

        result
    }
}

fn parse_into(store: &mut ConfigStore, path: &Path) -> ParseReport {
    store.reset();

    if !path.exists() {
        tracing::warn!("Config file {} not found, using defaults", path.display());
        return ParseReport::default();
    }

    let mut parser = Parser::new(store, path);
    let root_error = parser.parse_file(path).err();
    let mut report = parser.finish();

    if let Some(message) = root_error {
        report.errors.insert(0, ParseError { path: path.to_path_buf(), line: 0, message });
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let tmp = TempDir::new().expect("tmp");
        let manager = ConfigManager::new(tmp.path().join("hypr").join("hyprlock.conf"));
        let report = manager.init();

        assert!(!report.has_errors());
        assert_eq!(manager.get_int("general:grace").unwrap(), 0);
        assert!(manager.widget_configs().is_empty());
    }

    #[test]
    fn test_widget_configs_order_and_monitor() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("hyprlock.conf");
        fs::write(
            &path,
            r#"
general {
    grace = 3
}

label {
    monitor = DP-1
    text = $TIME
}

background {
    path = ~/wall.png
}

input-field {
    size = 200, 50
}
"#,
        )
        .expect("write");

        let manager = ConfigManager::new(&path);
        let report = manager.init();
        assert!(!report.has_errors(), "{}", report.error_string());

        let widgets = manager.widget_configs();
        let kinds: Vec<&str> = widgets.iter().map(|w| w.kind.as_str()).collect();
        similar_asserts::assert_eq!(kinds, vec!["background", "input-field", "label"]);

        let label = &widgets[2];
        assert_eq!(label.monitor, "DP-1");
        assert!(!label.values.contains_key("monitor"));
        assert_eq!(label.values["text"], ConfigValue::String("$TIME".into()));
        assert_eq!(label.values["font_family"], ConfigValue::String("Sans".into()));

        assert_eq!(widgets[0].values["path"], ConfigValue::String("~/wall.png".into()));
        assert_eq!(widgets[0].values["blur_size"], ConfigValue::Int(8));
        assert_eq!(widgets[1].values["size"], ConfigValue::Vec2(Vec2::new(200.0, 50.0)));
        assert_eq!(widgets[1].values.len(), 14);
        assert_eq!(manager.get_int("general:grace").unwrap(), 3);
    }

    #[test]
    fn test_errors_are_advisory() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("hyprlock.conf");
        fs::write(&path, "general:grace = later\ngeneral:hide_cursor = 1\n").expect("write");

        let manager = ConfigManager::new(&path);
        let report = manager.init();

        assert_eq!(report.errors.len(), 1);
        assert_eq!(manager.errors().len(), 1);
        assert!(manager.errors()[0].starts_with("Config error in file"));
        assert_eq!(manager.get_int("general:grace").unwrap(), 0);
        assert_eq!(manager.get_int("general:hide_cursor").unwrap(), 1);
    }

    #[test]
    fn test_init_twice_does_not_duplicate_widgets() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("hyprlock.conf");
        fs::write(&path, "label {\n}\n").expect("write");

        let manager = ConfigManager::new(&path);
        manager.init();
        manager.init();
        assert_eq!(manager.widget_configs().len(), 1);
    }

    #[test]
    fn test_typed_getters() {
        let tmp = TempDir::new().expect("tmp");
        let manager = ConfigManager::new(tmp.path().join("none.conf"));
        manager.init();

        assert_eq!(manager.get_value("general:no_fade_in").unwrap(), ConfigValue::Int(0));
        assert!(matches!(
            manager.get_string("general:grace"),
            Err(ConfigError::TypeMismatch { .. })
        ));
        assert!(matches!(manager.get_float("nope"), Err(ConfigError::UnknownKey(_))));
    }
}
