//! Front matter extraction.
//!
//! A document may open with a block of `key: value` lines fenced by `---`
//! lines:
//!
//! ```text
//! ---
//! title: "Hello"
//! tags: [rust, 'notes']
//! ---
//! Body text.
//! ```
//!
//! Only the first closing delimiter ends the block. Later `---` lines belong
//! to the body, where the renderer treats them as horizontal rules.
use crate::types::{MetaValue, Metadata};

/// The line that opens and closes a front matter block.
pub const DELIMITER: &str = "---";

/// Split `raw` into its front matter and body.
///
/// A document that does not open with a delimiter line, or whose block is
/// never closed, has no front matter: the metadata is empty and the body is
/// `raw` itself, untrimmed. Otherwise the body is whatever follows the closing
/// delimiter, trimmed at both ends.
///
/// Inside the block, each line is split on its first colon. Lines without a
/// colon, or with an empty key, are skipped.
#[must_use]
pub fn parse(raw: &str) -> (Metadata, String) {
  let Some((block, body)) = split_block(raw) else {
    return (Metadata::new(), raw.to_string());
  };

  let metadata = block.lines().filter_map(parse_line).collect();
  (metadata, body.trim().to_string())
}

/// Returns `(block, body)` when `raw` holds a complete front matter block.
fn split_block(raw: &str) -> Option<(&str, &str)> {
  let (first, rest) = raw.split_once('\n').unwrap_or((raw, ""));
  if !is_delimiter(first) {
    return None;
  }

  let mut offset = 0;
  for line in rest.split_inclusive('\n') {
    if is_delimiter(line.strip_suffix('\n').unwrap_or(line)) {
      return Some((&rest[..offset], &rest[offset + line.len()..]));
    }
    offset += line.len();
  }

  None
}

fn is_delimiter(line: &str) -> bool {
  line.strip_suffix('\r').unwrap_or(line) == DELIMITER
}

fn parse_line(line: &str) -> Option<(String, MetaValue)> {
  let (key, value) = line.split_once(':')?;
  let key = key.trim();
  if key.is_empty() {
    return None;
  }

  let value = strip_quotes(value.trim());
  let value = match value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
    Some(inner) => MetaValue::List(parse_list(inner)),
    None => MetaValue::Scalar(value.to_string()),
  };

  Some((key.to_string(), value))
}

fn parse_list(inner: &str) -> Vec<String> {
  if inner.trim().is_empty() {
    return Vec::new();
  }

  inner
    .split(',')
    .map(|item| strip_quotes(item.trim()).to_string())
    .collect()
}

/// Remove one matching pair of enclosing `"` or `'` quotes.
///
/// ```rust
/// use quire_markdown::frontmatter::strip_quotes;
///
/// assert_eq!(strip_quotes("\"hello\""), "hello");
/// assert_eq!(strip_quotes("'\"nested\"'"), "\"nested\"");
/// assert_eq!(strip_quotes("\"unbalanced'"), "\"unbalanced'");
/// ```
#[must_use]
pub fn strip_quotes(value: &str) -> &str {
  for quote in ['"', '\''] {
    if let Some(inner) = value
      .strip_prefix(quote)
      .and_then(|rest| rest.strip_suffix(quote))
    {
      return inner;
    }
  }
  value
}
