//! Typed configuration value store
//!
//! Holds the registered schema (plain values, special categories, keyword
//! handlers) together with the values assigned by the parser. Plain values
//! are addressed by their full colon-joined name (`general:grace`); special
//! category values by category, instance key and value name.

use super::error::ConfigError;
use super::parser::Parser;
use super::value::parse_as;
use crate::domain::{ConfigValue, Vec2};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

static VARIABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));

/// A keyword that is handled by code instead of being stored, such as `source`.
pub trait KeywordHandler: Send + Sync {
    /// Handle `keyword = value`. The returned message becomes a parse error.
    fn handle(&self, parser: &mut Parser<'_>, keyword: &str, value: &str) -> Result<(), String>;
}

#[derive(Debug, Clone)]
struct ValueSlot {
    default: ConfigValue,
    current: ConfigValue,
}

#[derive(Debug, Clone)]
struct SpecialInstance {
    key: String,
    values: BTreeMap<String, ConfigValue>,
}

#[derive(Debug, Clone, Default)]
struct SpecialCategory {
    /// Registration order is kept so widget property bags are stable.
    defaults: Vec<(String, ConfigValue)>,
    instances: Vec<SpecialInstance>,
    next_key: usize,
}

impl SpecialCategory {
    fn default_for(&self, name: &str) -> Option<&ConfigValue> {
        self.defaults.iter().find(|(key, _)| key == name).map(|(_, value)| value)
    }

    fn instance(&self, key: &str) -> Option<&SpecialInstance> {
        self.instances.iter().find(|instance| instance.key == key)
    }
}

#[derive(Default, Clone)]
pub struct ConfigStore {
    values: BTreeMap<String, ValueSlot>,
    special: BTreeMap<String, SpecialCategory>,
    handlers: HashMap<String, Arc<dyn KeywordHandler>>,
    variables: BTreeMap<String, String>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plain value under its full name, e.g. `general:grace`.
    pub fn add_value(&mut self, name: &str, default: ConfigValue) {
        self.values.insert(
            name.to_string(),
            ValueSlot { default: default.clone(), current: default },
        );
    }

    /// Register a repeatable, anonymously keyed category such as `label`.
    pub fn add_special_category(&mut self, name: &str) {
        self.special.entry(name.to_string()).or_default();
    }

    pub fn add_special_value(&mut self, category: &str, name: &str, default: ConfigValue) {
        let entry = self.special.entry(category.to_string()).or_default();
        match entry.defaults.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = default,
            None => entry.defaults.push((name.to_string(), default)),
        }
    }

    pub fn register_handler(&mut self, keyword: &str, handler: Arc<dyn KeywordHandler>) {
        self.handlers.insert(keyword.to_string(), handler);
    }

    pub fn handler(&self, keyword: &str) -> Option<Arc<dyn KeywordHandler>> {
        self.handlers.get(keyword).cloned()
    }

    pub fn is_special_category(&self, name: &str) -> bool {
        self.special.contains_key(name)
    }

    /// Start a new anonymous instance of `category`, returning its key.
    pub fn new_special_instance(&mut self, category: &str) -> Result<String, ConfigError> {
        let entry = self
            .special
            .get_mut(category)
            .ok_or_else(|| ConfigError::UnknownCategory(category.to_string()))?;
        let key = entry.next_key.to_string();
        entry.next_key += 1;
        let values = entry.defaults.iter().cloned().collect();
        entry.instances.push(SpecialInstance { key: key.clone(), values });
        Ok(key)
    }

    /// Assign a plain value from its raw text.
    pub fn set(&mut self, name: &str, raw: &str) -> Result<(), ConfigError> {
        let slot =
            self.values.get_mut(name).ok_or_else(|| ConfigError::UnknownKey(name.to_string()))?;
        slot.current = parse_as(&slot.current, raw).map_err(|reason| ConfigError::InvalidValue {
            key: name.to_string(),
            value: raw.to_string(),
            reason,
        })?;
        Ok(())
    }

    /// Assign a value inside one special category instance.
    pub fn set_special(
        &mut self,
        category: &str,
        key: &str,
        name: &str,
        raw: &str,
    ) -> Result<(), ConfigError> {
        let full_name = format!("{}:{}", category, name);
        let entry = self
            .special
            .get_mut(category)
            .ok_or_else(|| ConfigError::UnknownCategory(category.to_string()))?;
        let instance = entry
            .instances
            .iter_mut()
            .find(|instance| instance.key == key)
            .ok_or_else(|| ConfigError::UnknownInstance {
                category: category.to_string(),
                key: key.to_string(),
            })?;
        let slot =
            instance.values.get_mut(name).ok_or_else(|| ConfigError::UnknownKey(full_name.clone()))?;
        *slot = parse_as(slot, raw).map_err(|reason| ConfigError::InvalidValue {
            key: full_name,
            value: raw.to_string(),
            reason,
        })?;
        Ok(())
    }

    /// Reset every value to its default and drop all special instances and
    /// variables. The schema and handlers stay registered.
    pub fn reset(&mut self) {
        for slot in self.values.values_mut() {
            slot.current = slot.default.clone();
        }
        for category in self.special.values_mut() {
            category.instances.clear();
            category.next_key = 0;
        }
        self.variables.clear();
    }

    pub fn get(&self, name: &str) -> Result<&ConfigValue, ConfigError> {
        self.values
            .get(name)
            .map(|slot| &slot.current)
            .ok_or_else(|| ConfigError::UnknownKey(name.to_string()))
    }

    pub fn get_int(&self, name: &str) -> Result<i64, ConfigError> {
        let value = self.get(name)?;
        value.as_int().ok_or_else(|| mismatch(name, "int", value))
    }

    pub fn get_float(&self, name: &str) -> Result<f64, ConfigError> {
        let value = self.get(name)?;
        value.as_float().ok_or_else(|| mismatch(name, "float", value))
    }

    pub fn get_string(&self, name: &str) -> Result<&str, ConfigError> {
        let value = self.get(name)?;
        value.as_str().ok_or_else(|| mismatch(name, "string", value))
    }

    pub fn get_vec2(&self, name: &str) -> Result<Vec2, ConfigError> {
        let value = self.get(name)?;
        value.as_vec2().ok_or_else(|| mismatch(name, "vec2", value))
    }

    /// Instance keys of a special category in declaration order.
    pub fn list_keys_for_special_category(&self, category: &str) -> Vec<String> {
        self.special
            .get(category)
            .map(|entry| entry.instances.iter().map(|instance| instance.key.clone()).collect())
            .unwrap_or_default()
    }

    pub fn special_value(
        &self,
        category: &str,
        name: &str,
        key: &str,
    ) -> Result<&ConfigValue, ConfigError> {
        let entry = self
            .special
            .get(category)
            .ok_or_else(|| ConfigError::UnknownCategory(category.to_string()))?;
        if entry.default_for(name).is_none() {
            return Err(ConfigError::UnknownKey(format!("{}:{}", category, name)));
        }
        let instance = entry.instance(key).ok_or_else(|| ConfigError::UnknownInstance {
            category: category.to_string(),
            key: key.to_string(),
        })?;
        instance
            .values
            .get(name)
            .ok_or_else(|| ConfigError::UnknownKey(format!("{}:{}", category, name)))
    }

    /// Value names registered for `category`, in registration order.
    pub fn special_value_names(&self, category: &str) -> Vec<String> {
        self.special
            .get(category)
            .map(|entry| entry.defaults.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default()
    }

    pub fn define_variable(&mut self, name: &str, value: &str) -> Result<(), String> {
        if !VARIABLE_NAME.is_match(name) {
            return Err(format!("invalid variable name ${}", name));
        }
        self.variables.insert(name.to_string(), value.to_string());
        Ok(())
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Substitute defined `$NAME` variables in `raw`. Longer names win so
    /// `$COLOR_DARK` is not clobbered by `$COLOR`; unknown tokens stay as-is.
    pub fn expand_variables(&self, raw: &str) -> String {
        if self.variables.is_empty() || !raw.contains('$') {
            return raw.to_string();
        }
        let mut names: Vec<&String> = self.variables.keys().collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut out = String::with_capacity(raw.len());
        let mut rest = raw;
        while let Some(pos) = rest.find('$') {
            out.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];
            match names.iter().find(|name| after.starts_with(name.as_str())) {
                Some(name) => {
                    out.push_str(&self.variables[name.as_str()]);
                    rest = &after[name.len()..];
                }
                None => {
                    out.push('$');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

fn mismatch(name: &str, expected: &'static str, found: &ConfigValue) -> ConfigError {
    ConfigError::TypeMismatch { key: name.to_string(), expected, found: found.type_name() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> ConfigStore {
        let mut store = ConfigStore::new();
        store.add_value("general:grace", ConfigValue::Int(0));
        store.add_special_category("label");
        store.add_special_value("label", "text", ConfigValue::String("Sample Text".into()));
        store.add_special_value("label", "font_size", ConfigValue::Int(16));
        store
    }

    #[test]
    fn test_set_and_typed_get() {
        let mut store = store();
        store.set("general:grace", "5").expect("set");
        assert_eq!(store.get_int("general:grace").unwrap(), 5);
        assert_eq!(
            store.get_float("general:grace"),
            Err(ConfigError::TypeMismatch {
                key: "general:grace".into(),
                expected: "float",
                found: "int"
            })
        );
        assert_eq!(store.get("general:nope"), Err(ConfigError::UnknownKey("general:nope".into())));
    }

    #[test]
    fn test_invalid_value_keeps_previous() {
        let mut store = store();
        store.set("general:grace", "3").expect("set");
        assert!(matches!(
            store.set("general:grace", "soon"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert_eq!(store.get_int("general:grace").unwrap(), 3);
    }

    #[test]
    fn test_special_instances_start_from_defaults() {
        let mut store = store();
        let first = store.new_special_instance("label").expect("instance");
        let second = store.new_special_instance("label").expect("instance");
        store.set_special("label", &first, "text", "hello").expect("set");

        assert_eq!(store.list_keys_for_special_category("label"), vec!["0", "1"]);
        assert_eq!(
            store.special_value("label", "text", &first).unwrap(),
            &ConfigValue::String("hello".into())
        );
        assert_eq!(
            store.special_value("label", "text", &second).unwrap(),
            &ConfigValue::String("Sample Text".into())
        );
        assert!(store.set_special("label", &first, "bogus", "1").is_err());
        assert_eq!(store.special_value_names("label"), vec!["text", "font_size"]);
    }

    #[test]
    fn test_reset_drops_instances_and_values() {
        let mut store = store();
        store.set("general:grace", "9").expect("set");
        store.new_special_instance("label").expect("instance");
        store.define_variable("X", "1").expect("var");
        store.reset();
        assert_eq!(store.get_int("general:grace").unwrap(), 0);
        assert!(store.list_keys_for_special_category("label").is_empty());
        assert!(store.variable("X").is_none());
    }

    #[test]
    fn test_expand_variables_longest_first() {
        let mut store = store();
        store.define_variable("COLOR", "red").expect("var");
        store.define_variable("COLOR_DARK", "black").expect("var");
        assert_eq!(store.expand_variables("$COLOR_DARK and $COLOR"), "black and red");
        assert_eq!(store.expand_variables("Hi $USER at $TIME"), "Hi $USER at $TIME");
        assert!(store.define_variable("1BAD", "x").is_err());
    }
}
