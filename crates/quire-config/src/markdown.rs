use quire_markdown::{RenderOptions, RenderOptionsBuilder};
use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, overrides};

/// Markdown renderer switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "Config struct with related boolean flags"
)]
pub struct MarkdownConfig {
  /// Render triple-backtick fences as code blocks.
  pub fenced_code: bool,

  /// Render standalone `---` lines as horizontal rules.
  pub horizontal_rules: bool,

  /// Point links to `foo.md` at the generated `foo.html`.
  pub rewrite_md_links: bool,

  /// Entity-escape HTML in content before rendering.
  pub escape_html: bool,
}

impl Default for MarkdownConfig {
  fn default() -> Self {
    Self {
      fenced_code:      true,
      horizontal_rules: true,
      rewrite_md_links: true,
      escape_html:      false,
    }
  }
}

impl MarkdownConfig {
  #[must_use]
  pub const fn to_render_options(&self) -> RenderOptions {
    RenderOptionsBuilder::new()
      .fenced_code(self.fenced_code)
      .horizontal_rules(self.horizontal_rules)
      .rewrite_md_links(self.rewrite_md_links)
      .escape_html(self.escape_html)
      .build()
  }

  pub(crate) fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    let field = match key {
      "fenced_code" => &mut self.fenced_code,
      "horizontal_rules" => &mut self.horizontal_rules,
      "rewrite_md_links" => &mut self.rewrite_md_links,
      "escape_html" => &mut self.escape_html,
      _ => return Err(overrides::unknown_key(&format!("markdown.{key}"))),
    };
    *field = overrides::parse_bool(&format!("markdown.{key}"), value)?;
    Ok(())
  }
}
