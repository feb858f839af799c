//! Parsing raw configuration text into typed values

use crate::domain::{ConfigValue, Vec2};
use once_cell::sync::Lazy;
use regex::Regex;

static RGBA_HEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^rgba\(\s*([0-9a-fA-F]{8})\s*\)$").expect("valid regex"));
static RGB_HEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^rgb\(\s*([0-9a-fA-F]{6})\s*\)$").expect("valid regex"));
static RGBA_DEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgba\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*([0-9]*\.?[0-9]*)\s*\)$")
        .expect("valid regex")
});
static RGB_DEC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$").expect("valid regex")
});

/// Parse `raw` into a value of the same type as `template`.
pub fn parse_as(template: &ConfigValue, raw: &str) -> Result<ConfigValue, String> {
    let trimmed = raw.trim();
    match template {
        ConfigValue::Int(_) => parse_int(trimmed).map(ConfigValue::Int),
        ConfigValue::Float(_) => parse_float(trimmed).map(ConfigValue::Float),
        ConfigValue::Vec2(_) => parse_vec2(trimmed).map(ConfigValue::Vec2),
        ConfigValue::String(_) => Ok(ConfigValue::String(trimmed.to_string())),
    }
}

/// Integers, hex literals, booleans and colours.
pub fn parse_int(raw: &str) -> Result<i64, String> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => return Ok(1),
        "false" | "no" | "off" => return Ok(0),
        _ => {}
    }

    if raw.starts_with("rgb") {
        return parse_color(raw);
    }

    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        if hex.is_empty() || hex.len() > 8 {
            return Err(format!("invalid hex literal {}", raw));
        }
        return i64::from_str_radix(hex, 16).map_err(|e| format!("invalid hex literal {}: {}", raw, e));
    }

    raw.parse::<i64>().map_err(|_| format!("cannot parse '{}' as an int", raw))
}

pub fn parse_float(raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("cannot parse '{}' as a float", raw))
}

/// Two numbers separated by a comma and/or whitespace.
pub fn parse_vec2(raw: &str) -> Result<Vec2, String> {
    let parts: Vec<&str> =
        raw.split(|c: char| c == ',' || c.is_whitespace()).filter(|p| !p.is_empty()).collect();
    if parts.len() != 2 {
        return Err(format!("expected two components in '{}'", raw));
    }
    let x = parse_float(parts[0])?;
    let y = parse_float(parts[1])?;
    Ok(Vec2::new(x, y))
}

/// `rgba(RRGGBBAA)`, `rgba(r, g, b, a)`, `rgb(RRGGBB)` and `rgb(r, g, b)` into `0xAARRGGBB`.
pub fn parse_color(raw: &str) -> Result<i64, String> {
    if let Some(caps) = RGBA_HEX.captures(raw) {
        let packed = u32::from_str_radix(&caps[1], 16).map_err(|e| e.to_string())?;
        // RRGGBBAA -> AARRGGBB
        let argb = packed.rotate_right(8);
        return Ok(i64::from(argb));
    }

    if let Some(caps) = RGB_HEX.captures(raw) {
        let rgb = u32::from_str_radix(&caps[1], 16).map_err(|e| e.to_string())?;
        return Ok(i64::from(0xFF00_0000 | rgb));
    }

    if let Some(caps) = RGBA_DEC.captures(raw) {
        let r = channel(&caps[1])?;
        let g = channel(&caps[2])?;
        let b = channel(&caps[3])?;
        let alpha: f64 = caps[4].parse().map_err(|_| format!("invalid alpha in {}", raw))?;
        if !(0.0..=1.0).contains(&alpha) {
            return Err(format!("alpha out of range in {}", raw));
        }
        let a = (alpha * 255.0).round() as u32;
        return Ok(pack(a, r, g, b));
    }

    if let Some(caps) = RGB_DEC.captures(raw) {
        let r = channel(&caps[1])?;
        let g = channel(&caps[2])?;
        let b = channel(&caps[3])?;
        return Ok(pack(0xFF, r, g, b));
    }

    Err(format!("invalid color {}", raw))
}

fn channel(raw: &str) -> Result<u32, String> {
    let value: u32 = raw.parse().map_err(|_| format!("invalid color channel {}", raw))?;
    if value > 255 {
        return Err(format!("color channel {} out of range", value));
    }
    Ok(value)
}

fn pack(a: u32, r: u32, g: u32, b: u32) -> i64 {
    i64::from((a << 24) | (r << 16) | (g << 8) | b)
}
