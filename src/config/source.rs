//! The `source=` keyword: include other config files by glob

use super::parser::Parser;
use super::paths::{absolute_path, expand_glob, GlobError};
use super::store::KeywordHandler;
use std::path::Path;

/// Includes every file matched by the glob in `source = <pattern>`.
///
/// Relative patterns resolve against the file containing the directive, and
/// each included file becomes the current file while it is parsed, so
/// nested includes resolve against their own location.
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceHandler;

impl KeywordHandler for SourceHandler {
    fn handle(&self, parser: &mut Parser<'_>, _keyword: &str, value: &str) -> Result<(), String> {
        handle_source(parser, value)
    }
}

pub fn handle_source(parser: &mut Parser<'_>, raw_path: &str) -> Result<(), String> {
    if raw_path.len() < 2 {
        tracing::error!("source= path garbage");
        return Err(format!("source path {} bogus!", raw_path));
    }

    let pattern = absolute_path(raw_path, parser.current_path());
    let matches = expand_glob(&pattern).map_err(|e| {
        let err = match e {
            GlobError::NoMatch => "source= globbing error: found no match".to_string(),
            GlobError::Read(_) => "source= globbing error: read error".to_string(),
        };
        tracing::error!("{} ({})", err, pattern.display());
        err
    })?;

    for path in matches {
        if path.as_os_str().is_empty() {
            tracing::warn!("source= skipping invalid path");
            continue;
        }

        if !path.is_file() {
            if path.exists() {
                tracing::warn!("source= skipping non-file {}", path.display());
                continue;
            }
            tracing::error!("source= file doesnt exist");
            return Err(format!("source file {} doesn't exist!", path.display()));
        }

        include(parser, &path)?;
    }

    Ok(())
}

fn include(parser: &mut Parser<'_>, path: &Path) -> Result<(), String> {
    tracing::debug!(depth = parser.depth(), "source= including {}", path.display());
    parser.parse_file(path)
}
