use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, overrides};

/// Limits for the generated feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
  /// Number of newest posts in `rss.xml`.
  pub rss_items: usize,

  /// Number of newest posts listed in `llms.txt`.
  pub llms_items: usize,

  /// RSS item descriptions are cut to this many characters.
  pub description_chars: usize,
}

impl Default for FeedsConfig {
  fn default() -> Self {
    Self {
      rss_items:         10,
      llms_items:        5,
      description_chars: 200,
    }
  }
}

impl FeedsConfig {
  pub(crate) fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    let field = match key {
      "rss_items" => &mut self.rss_items,
      "llms_items" => &mut self.llms_items,
      "description_chars" => &mut self.description_chars,
      _ => return Err(overrides::unknown_key(&format!("feeds.{key}"))),
    };
    *field = overrides::parse_number(&format!("feeds.{key}"), value)?;
    Ok(())
  }
}
