//! Config file location, path resolution and glob expansion

use globset::GlobBuilder;
use std::env;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Location of the main config file relative to the config directory.
pub const MAIN_CONFIG_RELATIVE: &str = "hypr/hyprlock.conf";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GlobError {
    #[error("found no match")]
    NoMatch,
    #[error("read error")]
    Read(String),
}

/// `$XDG_CONFIG_HOME` when it is set to an absolute path, otherwise `$HOME/.config`.
pub fn config_dir() -> PathBuf {
    config_dir_from(env::var("XDG_CONFIG_HOME").ok().as_deref(), env::var("HOME").ok().as_deref())
}

pub fn config_dir_from(xdg_config_home: Option<&str>, home: Option<&str>) -> PathBuf {
    if let Some(xdg) = xdg_config_home {
        if Path::new(xdg).is_absolute() {
            return PathBuf::from(xdg);
        }
    }
    if home.is_none() {
        tracing::warn!("HOME is not set, config directory falls back to /.config");
    }
    Path::new(home.unwrap_or("/")).join(".config")
}

pub fn main_config_path() -> PathBuf {
    config_dir().join(MAIN_CONFIG_RELATIVE)
}

/// Resolve `raw` the way `source=` paths are resolved: `~` expands to the
/// home directory and relative paths are taken relative to the directory of
/// `current_file`. The result is normalized lexically, so glob patterns
/// survive untouched. A relative `current_file` is taken from the working
/// directory.
pub fn absolute_path(raw: &str, current_file: &Path) -> PathBuf {
    let resolved = absolute_path_with_home(raw, current_file, env::var("HOME").ok().as_deref());
    match env::current_dir() {
        Ok(cwd) => anchor_to(&resolved, &cwd),
        Err(e) => {
            tracing::warn!("cannot read working directory: {}", e);
            resolved
        }
    }
}

/// Join a relative `path` onto `dir`; absolute paths pass through.
pub fn anchor_to(path: &Path, dir: &Path) -> PathBuf {
    if path.is_relative() {
        normalize_lexically(&dir.join(path))
    } else {
        path.to_path_buf()
    }
}

pub fn absolute_path_with_home(raw: &str, current_file: &Path, home: Option<&str>) -> PathBuf {
    let expanded = match (raw.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            Path::new(home).join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(raw),
    };

    if expanded.is_relative() {
        let base = current_file.parent().unwrap_or_else(|| Path::new(""));
        normalize_lexically(&base.join(expanded))
    } else {
        normalize_lexically(&expanded)
    }
}

/// Drop `.` components and fold `..` into its parent without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Expand a glob pattern into the sorted list of existing paths it matches.
///
/// A pattern without metacharacters matches itself if it exists. Names
/// starting with `.` only match pattern components that start with `.`.
pub fn expand_glob(pattern: &Path) -> Result<Vec<PathBuf>, GlobError> {
    let pattern_str = pattern
        .to_str()
        .ok_or_else(|| GlobError::Read(format!("non UTF-8 pattern {}", pattern.display())))?;

    if !pattern_str.contains(GLOB_META) {
        return if pattern.exists() { Ok(vec![pattern.to_path_buf()]) } else { Err(GlobError::NoMatch) };
    }

    let mut base = PathBuf::new();
    let mut implicit_base = false;
    let mut rest: Vec<String> = Vec::new();
    for component in pattern.components() {
        let text = component.as_os_str().to_string_lossy();
        if rest.is_empty() && !text.contains(GLOB_META) {
            base.push(component.as_os_str());
        } else {
            rest.push(text.into_owned());
        }
    }

    if base.as_os_str().is_empty() {
        base.push(".");
        implicit_base = true;
    }
    if !base.is_dir() {
        return Err(GlobError::NoMatch);
    }

    let matcher = GlobBuilder::new(pattern_str)
        .literal_separator(true)
        .build()
        .map_err(|e| GlobError::Read(e.to_string()))?
        .compile_matcher();

    let recursive = rest.iter().any(|part| part.contains("**"));
    let mut walker = WalkDir::new(&base).min_depth(1).follow_links(true);
    if !recursive {
        walker = walker.max_depth(rest.len());
    }

    let mut matches = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("glob: skipping unreadable entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if is_hidden_mismatch(path, &base, &rest, recursive) {
            continue;
        }
        // walkdir yields `./name` under an implicit base; the pattern has no `./`
        let candidate = if implicit_base { path.strip_prefix(&base).unwrap_or(path) } else { path };
        if matcher.is_match(candidate) {
            matches.push(candidate.to_path_buf());
        }
    }

    if matches.is_empty() {
        return Err(GlobError::NoMatch);
    }
    matches.sort();
    Ok(matches)
}

fn is_hidden_mismatch(path: &Path, base: &Path, rest: &[String], recursive: bool) -> bool {
    let Ok(relative) = path.strip_prefix(base) else {
        return false;
    };
    let names: Vec<String> =
        relative.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();

    if recursive {
        let dot_last = rest.last().is_some_and(|p| p.starts_with('.'));
        return names.iter().any(|n| n.starts_with('.')) && !dot_last;
    }

    names
        .iter()
        .zip(rest.iter())
        .any(|(name, pattern)| name.starts_with('.') && !pattern.starts_with('.'))
}
