//! Line-oriented parser for hyprlang-style configuration files
//!
//! Supported syntax:
//! - `key = value` and `category:key = value`
//! - `category { ... }` blocks, nestable; keys are joined with `:`
//! - repeatable special category blocks, one anonymous instance per block
//! - `$NAME = value` variables, substituted into later values
//! - `# comments`, with `##` for a literal `#`
//! - keyword handlers registered on the store (`source = ...`)
//!
//! Errors never stop the parse. Each one is recorded with its file and
//! line and the offending entry keeps its previous value.

use super::error::{ConfigError, ParseError, ParseReport};
use super::store::ConfigStore;
use std::fs;
use std::mem;
use std::path::{Path, PathBuf};

/// Upper bound on nested `source=` inclusion, which also stops include cycles.
pub const MAX_SOURCE_DEPTH: usize = 32;

#[derive(Debug, Clone)]
struct Scope {
    /// Segment name; for special categories the full category name.
    name: String,
    /// Instance key when this scope opened a special category block.
    special_key: Option<String>,
}

pub struct Parser<'a> {
    store: &'a mut ConfigStore,
    current_path: PathBuf,
    errors: Vec<ParseError>,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser writing into `store`. `origin` names the file used
    /// for error messages and relative `source=` paths.
    pub fn new(store: &'a mut ConfigStore, origin: &Path) -> Self {
        Self { store, current_path: origin.to_path_buf(), errors: Vec::new(), depth: 0 }
    }

    /// The file currently being parsed.
    pub fn current_path(&self) -> &Path {
        &self.current_path
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn store(&mut self) -> &mut ConfigStore {
        &mut *self.store
    }

    pub fn finish(self) -> ParseReport {
        ParseReport { errors: self.errors }
    }

    /// Parse `path`, making it the current file until it is done.
    pub fn parse_file(&mut self, path: &Path) -> Result<(), String> {
        if self.depth >= MAX_SOURCE_DEPTH {
            return Err("source= nesting too deep".to_string());
        }
        let text = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;

        tracing::debug!("parsing config file {}", path.display());
        let previous = mem::replace(&mut self.current_path, path.to_path_buf());
        self.depth += 1;
        self.parse_str(&text);
        self.depth -= 1;
        self.current_path = previous;
        Ok(())
    }

    /// Parse configuration text attributed to the current file.
    pub fn parse_str(&mut self, text: &str) {
        let mut scopes: Vec<Scope> = Vec::new();
        let mut last_line = 0;

        for (index, raw_line) in text.lines().enumerate() {
            last_line = index + 1;
            self.parse_line(&mut scopes, raw_line, last_line);
        }

        for scope in scopes.iter().rev() {
            self.error(last_line, format!("missing closing }} for category {}", scope.name));
        }
    }

    fn parse_line(&mut self, scopes: &mut Vec<Scope>, raw_line: &str, line_no: usize) {
        let stripped = strip_comment(raw_line);
        let line = stripped.trim();
        if line.is_empty() {
            return;
        }

        if line == "}" {
            if scopes.pop().is_none() {
                self.error(line_no, "unexpected } without an open category".to_string());
            }
            return;
        }

        if let Some(name) = line.strip_suffix('{') {
            let name = name.trim();
            if name.is_empty() || name.contains('=') {
                self.error(line_no, format!("invalid category header '{}'", line));
                // Still push a scope so the matching } does not unbalance the file.
                scopes.push(Scope { name: name.to_string(), special_key: None });
                return;
            }
            self.open_scope(scopes, name, line_no);
            return;
        }

        let Some((key, value)) = line.split_once('=') else {
            self.error(line_no, format!("invalid line '{}': expected key = value", line));
            return;
        };
        let key = key.trim();
        let value = value.trim();

        if key.is_empty() {
            self.error(line_no, format!("missing key in '{}'", line));
            return;
        }

        if let Some(variable) = key.strip_prefix('$') {
            let expanded = self.store.expand_variables(value);
            if let Err(message) = self.store.define_variable(variable, &expanded) {
                self.error(line_no, message);
            }
            return;
        }

        let value = self.store.expand_variables(value);

        if !scopes.iter().any(|scope| scope.special_key.is_some()) {
            let full_key = join_key(scopes, key);
            if let Some(handler) = self.store.handler(&full_key) {
                if let Err(message) = handler.handle(self, &full_key, &value) {
                    self.error(line_no, message);
                }
                return;
            }
        }

        if let Err(err) = self.assign(scopes, key, &value) {
            self.error(line_no, err.to_string());
        }
    }

    fn open_scope(&mut self, scopes: &mut Vec<Scope>, name: &str, line_no: usize) {
        if scopes.iter().any(|scope| scope.special_key.is_some()) {
            scopes.push(Scope { name: name.to_string(), special_key: None });
            return;
        }

        let full_name = join_key(scopes, name);
        if self.store.is_special_category(&full_name) {
            match self.store.new_special_instance(&full_name) {
                Ok(key) => {
                    scopes.push(Scope { name: full_name, special_key: Some(key) });
                }
                Err(err) => {
                    self.error(line_no, err.to_string());
                    scopes.push(Scope { name: name.to_string(), special_key: None });
                }
            }
        } else {
            scopes.push(Scope { name: name.to_string(), special_key: None });
        }
    }

    fn assign(&mut self, scopes: &[Scope], key: &str, value: &str) -> Result<(), ConfigError> {
        if let Some(index) = scopes.iter().position(|scope| scope.special_key.is_some()) {
            let special = &scopes[index];
            let instance = special.special_key.as_deref().unwrap_or_default();
            let name = join_key(&scopes[index + 1..], key);
            return self.store.set_special(&special.name, instance, &name, value);
        }
        self.store.set(&join_key(scopes, key), value)
    }

    fn error(&mut self, line: usize, message: String) {
        tracing::debug!("{}:{}: {}", self.current_path.display(), line, message);
        self.errors.push(ParseError { path: self.current_path.clone(), line, message });
    }
}

fn join_key(scopes: &[Scope], key: &str) -> String {
    let mut parts: Vec<&str> = scopes.iter().map(|scope| scope.name.as_str()).collect();
    parts.push(key);
    parts.join(":")
}

/// Cut a line at the first `#`, turning `##` into a literal `#`.
fn strip_comment(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '#' {
            if chars.peek() == Some(&'#') {
                chars.next();
                out.push('#');
                continue;
            }
            break;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConfigValue, Vec2};

    fn store() -> ConfigStore {
        let mut store = ConfigStore::new();
        store.add_value("general:grace", ConfigValue::Int(0));
        store.add_value("general:hide_cursor", ConfigValue::Int(0));
        store.add_special_category("label");
        store.add_special_value("label", "text", ConfigValue::String("Sample Text".into()));
        store.add_special_value("label", "position", ConfigValue::Vec2(Vec2::new(400.0, 90.0)));
        store.add_special_value("label", "color", ConfigValue::Int(0xFFFF_FFFF));
        store
    }

    fn parse(store: &mut ConfigStore, text: &str) -> ParseReport {
        let mut parser = Parser::new(store, Path::new("test.conf"));
        parser.parse_str(text);
        parser.finish()
    }

    #[test]
    fn test_categories_and_dotted_keys() {
        let mut store = store();
        let report = parse(
            &mut store,
            "general {\n    grace = 5 # seconds\n}\ngeneral:hide_cursor = true\n",
        );
        assert!(!report.has_errors(), "{}", report.error_string());
        assert_eq!(store.get_int("general:grace").unwrap(), 5);
        assert_eq!(store.get_int("general:hide_cursor").unwrap(), 1);
    }

    #[test]
    fn test_special_blocks_create_instances() {
        let mut store = store();
        let report = parse(
            &mut store,
            "label {\n  text = first\n  position = 0, 80\n}\nlabel {\n  color = rgba(ff0000ff)\n}\n",
        );
        assert!(!report.has_errors(), "{}", report.error_string());

        let keys = store.list_keys_for_special_category("label");
        assert_eq!(keys.len(), 2);
        assert_eq!(
            store.special_value("label", "text", &keys[0]).unwrap(),
            &ConfigValue::String("first".into())
        );
        assert_eq!(
            store.special_value("label", "position", &keys[0]).unwrap(),
            &ConfigValue::Vec2(Vec2::new(0.0, 80.0))
        );
        assert_eq!(
            store.special_value("label", "text", &keys[1]).unwrap(),
            &ConfigValue::String("Sample Text".into())
        );
        assert_eq!(
            store.special_value("label", "color", &keys[1]).unwrap(),
            &ConfigValue::Int(0xFFFF_0000)
        );
    }

    #[test]
    fn test_errors_are_collected_and_parsing_continues() {
        let mut store = store();
        let report = parse(
            &mut store,
            "general:grace = soon\nnot a pair\nlabel {\n  bogus = 1\n}\n}\ngeneral:hide_cursor = 1\n",
        );
        assert_eq!(report.errors.len(), 4);
        assert_eq!(report.errors[0].line, 1);
        assert!(report.errors[0].message.contains("general:grace"));
        assert_eq!(report.errors[1].line, 2);
        assert!(report.errors[2].message.contains("label:bogus does not exist"));
        assert!(report.errors[3].message.contains("unexpected }"));
        assert_eq!(store.get_int("general:grace").unwrap(), 0);
        assert_eq!(store.get_int("general:hide_cursor").unwrap(), 1);
    }

    #[test]
    fn test_unclosed_category_is_reported() {
        let mut store = store();
        let report = parse(&mut store, "label {\n  text = x\n");
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].message.contains("missing closing }"));
    }

    #[test]
    fn test_variables_and_escaped_hash() {
        let mut store = store();
        let report = parse(
            &mut store,
            "$accent = rgb(33ccff)\nlabel {\n  color = $accent\n  text = Hi $USER ##1 # comment\n}\n",
        );
        assert!(!report.has_errors(), "{}", report.error_string());
        let key = &store.list_keys_for_special_category("label")[0];
        assert_eq!(store.special_value("label", "color", key).unwrap(), &ConfigValue::Int(0xFF33_CCFF));
        assert_eq!(
            store.special_value("label", "text", key).unwrap(),
            &ConfigValue::String("Hi $USER #1".into())
        );
    }

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("a = 1 # note"), "a = 1 ");
        assert_eq!(strip_comment("color = ##fff"), "color = #fff");
        assert_eq!(strip_comment("# whole line"), "");
    }
}
