//! Options for the Markdown renderer.
//!
//! ```
//! use quire_markdown::{MarkdownRenderer, RenderOptionsBuilder};
//!
//! let options = RenderOptionsBuilder::new()
//!   .fenced_code(false)
//!   .escape_html(true)
//!   .build();
//!
//! let renderer = MarkdownRenderer::new(options);
//! assert_eq!(renderer.render("a < b"), "<p>a &lt; b</p>");
//! ```

/// Feature switches for [`crate::MarkdownRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(
  clippy::struct_excessive_bools,
  reason = "Config struct with related boolean flags"
)]
pub struct RenderOptions {
  /// Render triple-backtick fences as `<pre><code>` blocks.
  pub fenced_code: bool,

  /// Render standalone `---` lines as `<hr>`.
  pub horizontal_rules: bool,

  /// Rewrite `href="foo.md"` to `href="foo.html"` after link substitution.
  pub rewrite_md_links: bool,

  /// Entity-escape `&`, `<` and `>` in source text before rendering.
  pub escape_html: bool,
}

impl RenderOptions {
  /// Every construct the renderer knows about. This is the default.
  #[must_use]
  pub const fn full() -> Self {
    Self {
      fenced_code:      true,
      horizontal_rules: true,
      rewrite_md_links: true,
      escape_html:      false,
    }
  }

  /// Headings, emphasis, inline code, links, lists and paragraphs only.
  #[must_use]
  pub const fn basic() -> Self {
    Self {
      fenced_code:      false,
      horizontal_rules: false,
      rewrite_md_links: false,
      escape_html:      false,
    }
  }
}

impl Default for RenderOptions {
  fn default() -> Self {
    Self::full()
  }
}

/// Builder for [`RenderOptions`], starting from [`RenderOptions::full`].
#[derive(Debug, Clone, Default)]
pub struct RenderOptionsBuilder {
  options: RenderOptions,
}

impl RenderOptionsBuilder {
  #[must_use]
  pub const fn new() -> Self {
    Self {
      options: RenderOptions::full(),
    }
  }

  #[must_use]
  pub const fn fenced_code(mut self, enabled: bool) -> Self {
    self.options.fenced_code = enabled;
    self
  }

  #[must_use]
  pub const fn horizontal_rules(mut self, enabled: bool) -> Self {
    self.options.horizontal_rules = enabled;
    self
  }

  #[must_use]
  pub const fn rewrite_md_links(mut self, enabled: bool) -> Self {
    self.options.rewrite_md_links = enabled;
    self
  }

  #[must_use]
  pub const fn escape_html(mut self, enabled: bool) -> Self {
    self.options.escape_html = enabled;
    self
  }

  #[must_use]
  pub const fn build(self) -> RenderOptions {
    self.options
  }
}
