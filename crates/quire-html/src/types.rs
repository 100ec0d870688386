use std::cmp::Ordering;

use quire_markdown::{MarkdownRenderer, Metadata, parse_front_matter};
use serde::Serialize;

/// A rendered content document, ready for page assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
  /// Base name of the source file, used for output paths and links.
  pub slug: String,

  pub title: String,

  /// Date exactly as written in the front matter, usually `YYYY-MM-DD`.
  pub date: String,

  pub description: String,

  pub tags: Vec<String>,

  /// Rendered HTML fragment of the body.
  pub html: String,

  /// Markdown body with the front matter removed.
  pub markdown: String,

  /// Front matter, including the derived `slug` key.
  pub metadata: Metadata,
}

impl Entry {
  /// Assemble an entry from parsed front matter and an already rendered
  /// body. Adds the `slug` key to the metadata.
  #[must_use]
  pub fn new(
    slug: &str,
    mut metadata: Metadata,
    markdown: String,
    html: String,
  ) -> Self {
    metadata.insert("slug", slug);

    let text = |key: &str| {
      metadata
        .get_str(key)
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
    };
    let title = Some(text("title"))
      .filter(|title| !title.is_empty())
      .unwrap_or_else(|| "Untitled".to_string());
    let date = text("date");
    let description = text("description");
    let tags = metadata.get_list("tags");

    Self {
      slug: slug.to_string(),
      title,
      date,
      description,
      tags,
      html,
      markdown,
      metadata,
    }
  }

  /// Parse and render one raw content document.
  #[must_use]
  pub fn parse(slug: &str, raw: &str, renderer: &MarkdownRenderer) -> Self {
    let (metadata, body) = parse_front_matter(raw);
    let html = renderer.render(&body);
    Self::new(slug, metadata, body, html)
  }
}

/// Sort posts newest first by date, breaking ties by slug.
///
/// Dates compare as strings, which orders `YYYY-MM-DD` correctly.
pub fn sort_newest_first(entries: &mut [Entry]) {
  entries.sort_by(|a, b| {
    match b.date.cmp(&a.date) {
      Ordering::Equal => a.slug.cmp(&b.slug),
      other => other,
    }
  });
}

#[cfg(test)]
mod tests {
  use quire_markdown::RenderOptions;

  use super::*;

  fn entry(slug: &str, date: &str) -> Entry {
    let mut metadata = Metadata::new();
    metadata.insert("date", date);
    Entry::new(slug, metadata, String::new(), String::new())
  }

  #[test]
  fn test_parse_document() {
    let renderer = MarkdownRenderer::new(RenderOptions::full());
    let raw = "---\ntitle: \"Hello\"\ndate: 2024-01-01\ndescription: First \
               post\ntags: [rust, notes]\n---\n# Hi\n\nSome text.";
    let entry = Entry::parse("hello", raw, &renderer);

    assert_eq!(entry.slug, "hello");
    assert_eq!(entry.title, "Hello");
    assert_eq!(entry.date, "2024-01-01");
    assert_eq!(entry.description, "First post");
    assert_eq!(entry.tags, vec!["rust", "notes"]);
    assert_eq!(entry.markdown, "# Hi\n\nSome text.");
    assert_eq!(entry.html, "<h1>Hi</h1>\n<p>Some text.</p>");
    assert_eq!(entry.metadata.get_str("slug"), Some("hello"));
  }

  #[test]
  fn test_missing_fields_default() {
    let renderer = MarkdownRenderer::new(RenderOptions::full());
    let entry = Entry::parse("bare", "Just text.", &renderer);

    assert_eq!(entry.title, "Untitled");
    assert!(entry.date.is_empty());
    assert!(entry.description.is_empty());
    assert!(entry.tags.is_empty());
    assert_eq!(entry.html, "<p>Just text.</p>");
  }

  #[test]
  fn test_blank_title_is_untitled() {
    let mut metadata = Metadata::new();
    metadata.insert("title", "   ");
    let entry = Entry::new("x", metadata, String::new(), String::new());
    assert_eq!(entry.title, "Untitled");
  }

  #[test]
  fn test_sort_newest_first() {
    let mut entries = vec![
      entry("b", "2024-01-01"),
      entry("c", "2024-03-01"),
      entry("a", "2024-01-01"),
      entry("undated", ""),
    ];
    sort_newest_first(&mut entries);

    let slugs: Vec<_> = entries.iter().map(|e| e.slug.as_str()).collect();
    assert_eq!(slugs, vec!["c", "a", "b", "undated"]);
  }
}
