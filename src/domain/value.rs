//! Typed parsing of option values. Values are strings on the wire; these
//! conversions happen on read and are never stored back.

use super::error::RestConfigError;

pub fn parse_int(section: &str, option: &str, value: &str) -> Result<i64, RestConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| parse_error(section, option, value, "integer"))
}

pub fn parse_float(section: &str, option: &str, value: &str) -> Result<f64, RestConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| parse_error(section, option, value, "float"))
}

/// Accepts the configparser boolean states, case-insensitive.
pub fn parse_bool(section: &str, option: &str, value: &str) -> Result<bool, RestConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Ok(true),
        "0" | "no" | "false" | "off" => Ok(false),
        _ => Err(parse_error(section, option, value, "boolean")),
    }
}

fn parse_error(section: &str, option: &str, value: &str, target: &'static str) -> RestConfigError {
    RestConfigError::Parse {
        section: section.to_string(),
        option: option.to_string(),
        value: value.to_string(),
        target,
    }
}
