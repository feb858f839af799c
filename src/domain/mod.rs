//! Core value types shared by the loader, formatter and CLI

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A two-component vector used for sizes and positions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

/// A typed configuration value.
///
/// Colours are stored as `Int` holding `0xAARRGGBB`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Int(i64),
    Float(f64),
    String(String),
    Vec2(Vec2),
}

impl ConfigValue {
    /// Name of the variant, used in type mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Int(_) => "int",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Vec2(_) => "vec2",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        match self {
            ConfigValue::Vec2(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Int(v) => write!(f, "{}", v),
            ConfigValue::Float(v) => write!(f, "{}", v),
            ConfigValue::String(v) => f.write_str(v),
            ConfigValue::Vec2(v) => write!(f, "{}", v),
        }
    }
}

/// One widget instance as handed to the renderer: its kind, the monitor it
/// is pinned to (empty for all monitors) and the remaining properties.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetConfig {
    #[serde(rename = "type")]
    pub kind: String,
    pub monitor: String,
    pub values: BTreeMap<String, ConfigValue>,
}

/// Result of expanding a label template.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FormatResult {
    pub formatted: String,
    pub always_update: bool,
    /// Refresh interval in milliseconds, 0 when the text is static.
    pub update_every_ms: u64,
    /// `formatted` is a shell command whose output is the label text.
    pub cmd: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_value_serializes_untagged() {
        let value = ConfigValue::Vec2(Vec2::new(400.0, 90.0));
        let json = serde_json::to_string(&value).expect("serialize");
        assert_eq!(json, r#"{"x":400.0,"y":90.0}"#);
        assert_eq!(serde_json::to_string(&ConfigValue::Int(4)).expect("serialize"), "4");
    }

    #[test]
    fn test_widget_config_uses_type_key() {
        let widget = WidgetConfig {
            kind: "label".to_string(),
            monitor: String::new(),
            values: BTreeMap::new(),
        };
        let json = serde_json::to_value(&widget).expect("serialize");
        assert_eq!(json["type"], "label");
    }
}
