use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, overrides};

/// Identity of the site, interpolated into every page and feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
  /// Absolute base URL, without a trailing slash.
  pub url: String,

  pub name: String,

  pub author: String,

  /// Used for the RSS channel, `llms.txt` and page meta descriptions.
  pub description: String,

  /// Shown under the site name in the header.
  pub tagline: String,

  pub footer_text: String,
}

impl Default for SiteConfig {
  fn default() -> Self {
    Self {
      url:         "http://localhost:8000".to_string(),
      name:        "quire".to_string(),
      author:      "quire".to_string(),
      description: "A small static site.".to_string(),
      tagline:     "Notes and posts".to_string(),
      footer_text: "Built with quire.".to_string(),
    }
  }
}

impl SiteConfig {
  /// The base URL with any trailing slashes removed.
  #[must_use]
  pub fn base_url(&self) -> &str {
    self.url.trim_end_matches('/')
  }

  pub(crate) fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    let field = match key {
      "url" => &mut self.url,
      "name" => &mut self.name,
      "author" => &mut self.author,
      "description" => &mut self.description,
      "tagline" => &mut self.tagline,
      "footer_text" => &mut self.footer_text,
      _ => return Err(overrides::unknown_key(&format!("site.{key}"))),
    };
    *field = value.to_string();
    Ok(())
  }
}
