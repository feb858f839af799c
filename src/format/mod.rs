//! Label text formatting
//!
//! Expands the placeholder tokens understood in widget text:
//! - `$USER`: the current user name
//! - `$TIME`: local time as `HH:MM`, refreshed every second
//! - `<br/>`: a line break
//! - `cmd[update:<ms>] <command>`: the label shows the command's output

use crate::domain::FormatResult;
use chrono::Local;
use std::env;

pub mod command;

pub use command::run_command;

const CMD_PREFIX: &str = "cmd[";
const TIME_UPDATE_MS: u64 = 1000;

/// Values substituted into templates. Split out so tests can pin them.
#[derive(Debug, Clone, Default)]
pub struct FormatContext {
    pub user: Option<String>,
    pub time: String,
}

impl FormatContext {
    /// Context for "now": the logged-in user and the local wall clock.
    pub fn current() -> Self {
        Self { user: user_name(), time: current_time() }
    }
}

/// Expand tokens in `input` using the current user and time.
pub fn format_string(input: &str) -> FormatResult {
    format_string_with(input, &FormatContext::current())
}

pub fn format_string_with(input: &str, ctx: &FormatContext) -> FormatResult {
    let mut result = FormatResult::default();

    if ctx.user.is_none() {
        tracing::error!("Error in format_string, user name not available");
    }

    let mut text = input.replace("$USER", ctx.user.as_deref().unwrap_or(""));
    text = text.replace("<br/>", "\n");

    if text.contains("$TIME") {
        text = text.replace("$TIME", &ctx.time);
        result.update_every_ms =
            if result.update_every_ms != 0 && result.update_every_ms < TIME_UPDATE_MS {
                result.update_every_ms
            } else {
                TIME_UPDATE_MS
            };
    }

    if let Some(close) = text.find(']').filter(|_| text.starts_with(CMD_PREFIX)) {
        for option in parse_options(&text[CMD_PREFIX.len()..close]) {
            apply_option(&mut result, option);
        }

        result.always_update = true;
        result.cmd = true;
        text = text[close + 1..].to_string();
    }

    result.formatted = text;
    result
}

fn parse_options(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|option| !option.is_empty())
}

fn apply_option(result: &mut FormatResult, option: &str) {
    if let Some(ms) = option.strip_prefix("update:") {
        match leading_digits(ms.trim()).parse::<u64>() {
            Ok(ms) => result.update_every_ms = ms,
            Err(_) => tracing::error!("Error parsing {} in cmd[]", option),
        }
    } else {
        tracing::error!("Unknown prop in string format {}", option);
    }
}

/// `500ms` reads as `500`; text without leading digits stays invalid.
fn leading_digits(raw: &str) -> &str {
    let end = raw.find(|c: char| !c.is_ascii_digit()).unwrap_or(raw.len());
    &raw[..end]
}

/// Local wall-clock time as zero-padded `HH:MM`.
pub fn current_time() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Name of the logged-in user from `$USER`, falling back to `$LOGNAME`.
///
/// Only the environment is consulted, not the passwd database, so a cleared
/// or overridden environment changes the result.
pub fn user_name() -> Option<String> {
    ["USER", "LOGNAME"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .find(|name| !name.is_empty())
}
