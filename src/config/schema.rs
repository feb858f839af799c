//! Registered options and their defaults

use super::source::SourceHandler;
use super::store::ConfigStore;
use crate::domain::{ConfigValue, Vec2};
use std::sync::Arc;

/// Widget categories, in the order widgets are reported to the renderer.
pub const WIDGET_CATEGORIES: [&str; 3] = ["background", "input-field", "label"];

fn int(v: i64) -> ConfigValue {
    ConfigValue::Int(v)
}

fn float(v: f64) -> ConfigValue {
    ConfigValue::Float(v)
}

fn string(v: &str) -> ConfigValue {
    ConfigValue::String(v.to_string())
}

fn vec2(x: f64, y: f64) -> ConfigValue {
    ConfigValue::Vec2(Vec2::new(x, y))
}

pub fn general_defaults() -> Vec<(&'static str, ConfigValue)> {
    vec![
        ("general:disable_loading_bar", int(0)),
        ("general:hide_cursor", int(0)),
        ("general:grace", int(0)),
        ("general:no_fade_in", int(0)),
    ]
}

pub fn background_defaults() -> Vec<(&'static str, ConfigValue)> {
    vec![
        ("monitor", string("")),
        ("path", string("")),
        ("color", int(0xFF11_1111)),
        ("blur_size", int(8)),
        ("blur_passes", int(0)),
        ("noise", float(0.0117)),
        ("contrast", float(0.8917)),
        ("brightness", float(0.8172)),
        ("vibrancy", float(0.1686)),
        ("vibrancy_darkness", float(0.05)),
    ]
}

pub fn input_field_defaults() -> Vec<(&'static str, ConfigValue)> {
    vec![
        ("monitor", string("")),
        ("size", vec2(400.0, 90.0)),
        ("inner_color", int(0xFFDD_DDDD)),
        ("outer_color", int(0xFF11_1111)),
        ("outline_thickness", int(4)),
        ("dots_size", float(0.25)),
        ("dots_center", int(1)),
        ("dots_spacing", float(0.2)),
        ("fade_on_empty", int(1)),
        ("font_color", int(0xFF00_0000)),
        ("halign", string("center")),
        ("valign", string("center")),
        ("position", vec2(0.0, -20.0)),
        ("placeholder_text", string("<i>Input Password</i>")),
        ("hide_input", int(0)),
    ]
}

pub fn label_defaults() -> Vec<(&'static str, ConfigValue)> {
    vec![
        ("monitor", string("")),
        ("position", vec2(400.0, 90.0)),
        ("color", int(0xFFFF_FFFF)),
        ("font_size", int(16)),
        ("text", string("Sample Text")),
        ("font_family", string("Sans")),
        ("halign", string("none")),
        ("valign", string("none")),
    ]
}

/// Register every option, widget category and the `source` keyword.
pub fn register(store: &mut ConfigStore) {
    for (name, default) in general_defaults() {
        store.add_value(name, default);
    }

    let widgets = [
        ("background", background_defaults()),
        ("input-field", input_field_defaults()),
        ("label", label_defaults()),
    ];
    for (category, defaults) in widgets {
        store.add_special_category(category);
        for (name, default) in defaults {
            store.add_special_value(category, name, default);
        }
    }

    store.register_handler("source", Arc::new(SourceHandler));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_covers_widget_categories() {
        let mut store = ConfigStore::new();
        register(&mut store);

        for category in WIDGET_CATEGORIES {
            assert!(store.is_special_category(category), "{} not registered", category);
            assert_eq!(store.special_value_names(category)[0], "monitor");
        }
        assert_eq!(store.get_int("general:grace").unwrap(), 0);
        assert!(store.handler("source").is_some());
        assert_eq!(store.special_value_names("input-field").len(), 15);
    }
}
