use std::io;

use thiserror::Error;

/// Errors from loading, overriding and validating a quire configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Template error: {0}")]
  Template(String),

  /// A `--config` string that is not `KEY=VALUE`.
  #[error("Invalid config override format: '{0}'. Expected KEY=VALUE")]
  OverrideFormat(String),

  #[error(
    "Unknown configuration key: '{0}'. See documentation for supported keys."
  )]
  UnknownKey(String),

  #[error("Invalid {kind} for '{key}': '{value}'. Expected {expected}")]
  InvalidValue {
    kind:     &'static str,
    key:      String,
    value:    String,
    expected: &'static str,
  },

  /// Every configured input path that is missing or has the wrong type.
  #[error("Configuration path validation errors:\n{}", .0.join("\n"))]
  InvalidPaths(Vec<String>),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("TOML error: {0}")]
  Toml(#[from] toml::de::Error),
}
