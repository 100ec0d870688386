//! # quire-markdown
//!
//! The document pipeline behind quire: split a content file into its front
//! matter and body, then turn the body into an HTML fragment.
//!
//! ```rust
//! use quire_markdown::{MarkdownRenderer, RenderOptions, parse_front_matter};
//!
//! let raw = "---\ntitle: Hello\ndate: 2024-01-01\n---\n# Hi\n\nSome text.";
//! let (metadata, body) = parse_front_matter(raw);
//! assert_eq!(metadata.get_str("title"), Some("Hello"));
//!
//! let renderer = MarkdownRenderer::new(RenderOptions::full());
//! assert_eq!(renderer.render(&body), "<h1>Hi</h1>\n<p>Some text.</p>");
//! ```
//!
//! The renderer is deliberately small. It understands headings (`#` to
//! `###`), horizontal rules, `**bold**`, `*italic*`, inline code, fenced code
//! blocks, `[links](url)` and flat `- ` lists. Anything else passes through as
//! text. Both entry points are total: they never fail and never panic, and
//! malformed input degrades to literal characters in the output.
//!
//! ## Escaping
//!
//! By default no HTML escaping is applied, so raw `<` and `&` in a document
//! reach the output unchanged. Enable [`RenderOptions::escape_html`] to
//! entity-escape source text before markup is produced.

pub mod frontmatter;
pub mod options;
pub mod renderer;
mod types;
pub mod utils;

pub use crate::{
  frontmatter::parse as parse_front_matter,
  options::{RenderOptions, RenderOptionsBuilder},
  renderer::MarkdownRenderer,
  types::{MetaValue, Metadata},
  utils::collect_markdown_files,
};
