//! Value parsing shared by the `apply_override` implementations.
use std::{path::PathBuf, str::FromStr};

use crate::error::ConfigError;

pub fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "on" | "1" => Ok(true),
    "false" | "no" | "off" | "0" => Ok(false),
    _ => {
      Err(ConfigError::InvalidValue {
        kind:     "boolean value",
        key:      key.to_string(),
        value:    value.to_string(),
        expected: "true/false, yes/no, on/off, or 1/0",
      })
    },
  }
}

pub fn parse_number<T: FromStr>(
  key: &str,
  value: &str,
) -> Result<T, ConfigError> {
  value.parse().map_err(|_| {
    ConfigError::InvalidValue {
      kind:     "value",
      key:      key.to_string(),
      value:    value.to_string(),
      expected: "a positive integer",
    }
  })
}

/// An empty value clears the option.
pub fn parse_optional_number<T: FromStr>(
  key: &str,
  value: &str,
) -> Result<Option<T>, ConfigError> {
  if value.is_empty() {
    Ok(None)
  } else {
    parse_number(key, value).map(Some)
  }
}

/// An empty value clears the option.
pub fn parse_optional_path(value: &str) -> Option<PathBuf> {
  if value.is_empty() {
    None
  } else {
    Some(PathBuf::from(value))
  }
}

pub fn unknown_key(key: &str) -> ConfigError {
  ConfigError::UnknownKey(key.to_string())
}
