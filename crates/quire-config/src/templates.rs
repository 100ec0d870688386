use std::fmt;

/// Error type for config template lookups.
#[derive(Debug)]
pub enum TemplateError {
  /// The requested configuration format is not supported.
  UnsupportedFormat(String),
}

impl fmt::Display for TemplateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnsupportedFormat(format) => {
        write!(f, "Unsupported config format: {format}")
      },
    }
  }
}

impl std::error::Error for TemplateError {}

/// Default configuration written by `quire init`. Every value matches the
/// built-in default, so the file documents the options without changing
/// behaviour.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# quire configuration file

# Directory holding the `posts/` and `pages/` content directories
content_dir = "content"

# Override the post and page directories individually
# posts_dir = "content/posts"
# pages_dir = "content/pages"

# Output directory for the generated site
output_dir = "build"

# Where the dashboard snapshot files (metrics.json, dashboard-content.html)
# are written
data_dir = "data"

# Custom stylesheet copied to css/style.css (defaults to the embedded one)
# stylesheet = "style.css"

# Directory of template overrides (base.html, post.html, ...)
# template_dir = "templates"

# Directory copied verbatim to assets/ in the output
# assets_dir = "assets"

# CNAME file for custom domains, copied when present
# cname = "CNAME"

# Number of threads used for rendering (defaults to the number of CPU cores)
# jobs = 4

[site]
url = "http://localhost:8000"
name = "quire"
author = "quire"
description = "A small static site."
tagline = "Notes and posts"
footer_text = "Built with quire."

[markdown]
# Triple-backtick code fences
fenced_code = true
# Standalone `---` lines become <hr>
horizontal_rules = true
# Links to foo.md point at foo.html
rewrite_md_links = true
# Escape <, > and & in content before rendering
escape_html = false

[feeds]
rss_items = 10
llms_items = 5
description_chars = 200

[gateway]
# Build the dashboard from the metrics gateway
enable = true
url = "http://localhost:18789"
# Environment variable holding the bearer token
token_env = "OPENCLAW_GATEWAY_TOKEN"
timeout_secs = 10
max_cron_jobs = 5
max_agents = 3
"#;

/// JSON flavour of [`DEFAULT_TOML_TEMPLATE`].
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "content_dir": "content",
  "output_dir": "build",
  "data_dir": "data",
  "site": {
    "url": "http://localhost:8000",
    "name": "quire",
    "author": "quire",
    "description": "A small static site.",
    "tagline": "Notes and posts",
    "footer_text": "Built with quire."
  },
  "markdown": {
    "fenced_code": true,
    "horizontal_rules": true,
    "rewrite_md_links": true,
    "escape_html": false
  },
  "feeds": {
    "rss_items": 10,
    "llms_items": 5,
    "description_chars": 200
  },
  "gateway": {
    "enable": true,
    "url": "http://localhost:18789",
    "token_env": "OPENCLAW_GATEWAY_TOKEN",
    "timeout_secs": 10,
    "max_cron_jobs": 5,
    "max_agents": 3
  }
}
"#;

/// Get the configuration template for the requested format.
///
/// # Errors
///
/// Returns an error if the requested format is not supported.
pub fn get_template(format: &str) -> Result<&'static str, TemplateError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(TemplateError::UnsupportedFormat(format.to_string())),
  }
}
