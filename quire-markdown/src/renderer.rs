//! Markdown-to-HTML rendering.
//!
//! Rendering is a fixed sequence of regex substitutions followed by two line
//! scans that rebuild block structure:
//!
//! 1. fenced code blocks are lifted out of the text (if enabled), then any
//!    complete `<pre>...</pre>` region already in it
//! 2. horizontal rules (if enabled)
//! 3. headings, longest marker first
//! 4. bold, then italic
//! 5. inline code
//! 6. links, then `.md` link rewriting (if enabled)
//! 7. list runs become one `<ul>` line
//! 8. remaining text lines are grouped into `<p>` paragraphs
//! 9. lifted blocks are put back
//!
//! Lines that already open with a block tag pass through step 8 untouched and
//! lifted `<pre>` regions are never seen by the inline rules, so rendering
//! rendered output changes nothing.
use std::{borrow::Cow, fmt::Write, sync::LazyLock};

use log::error;
use regex::{Captures, Regex};

use crate::{options::RenderOptions, utils::never_matching_regex};

static FENCED_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)```(\w+)?\n(.*?)```").unwrap_or_else(|e| {
    error!("Failed to compile FENCED_CODE_RE regex: {e}");
    never_matching_regex()
  })
});

static HORIZONTAL_RULE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?m)^---[ \t]*$").unwrap_or_else(|e| {
    error!("Failed to compile HORIZONTAL_RULE_RE regex: {e}");
    never_matching_regex()
  })
});

static H3_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?m)^### (.+)$").unwrap_or_else(|e| {
    error!("Failed to compile H3_RE regex: {e}");
    never_matching_regex()
  })
});

static H2_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?m)^## (.+)$").unwrap_or_else(|e| {
    error!("Failed to compile H2_RE regex: {e}");
    never_matching_regex()
  })
});

static H1_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?m)^# (.+)$").unwrap_or_else(|e| {
    error!("Failed to compile H1_RE regex: {e}");
    never_matching_regex()
  })
});

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\*\*(.+?)\*\*").unwrap_or_else(|e| {
    error!("Failed to compile BOLD_RE regex: {e}");
    never_matching_regex()
  })
});

static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\*(.+?)\*").unwrap_or_else(|e| {
    error!("Failed to compile ITALIC_RE regex: {e}");
    never_matching_regex()
  })
});

static INLINE_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"`([^`\n]+)`").unwrap_or_else(|e| {
    error!("Failed to compile INLINE_CODE_RE regex: {e}");
    never_matching_regex()
  })
});

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap_or_else(|e| {
    error!("Failed to compile LINK_RE regex: {e}");
    never_matching_regex()
  })
});

static MD_HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"href="([^"]+)\.md""#).unwrap_or_else(|e| {
    error!("Failed to compile MD_HREF_RE regex: {e}");
    never_matching_regex()
  })
});

static PRE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?s)<pre>.*?</pre>").unwrap_or_else(|e| {
    error!("Failed to compile PRE_BLOCK_RE regex: {e}");
    never_matching_regex()
  })
});

static STASH_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new("\u{E000}([0-9]+)\u{E001}").unwrap_or_else(|e| {
    error!("Failed to compile STASH_RE regex: {e}");
    never_matching_regex()
  })
});

/// Delimits the placeholder left where a block was lifted out.
/// Private-use code points, so no other rule can match them.
const STASH_OPEN: char = '\u{E000}';
const STASH_CLOSE: char = '\u{E001}';

/// Line prefixes that mark a line as an already-built block element.
const BLOCK_PREFIXES: &[&str] = &[
  "<hr>", "<h1>", "<h2>", "<h3>", "<ul>", "</ul>", "<li>", "</li>", "<p>",
  "<pre>",
];

/// Renders Markdown bodies into HTML fragments.
///
/// The renderer holds only its [`RenderOptions`], so it is cheap to clone and
/// can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
  options: RenderOptions,
}

impl MarkdownRenderer {
  #[must_use]
  pub const fn new(options: RenderOptions) -> Self {
    Self { options }
  }

  #[must_use]
  pub const fn options(&self) -> &RenderOptions {
    &self.options
  }

  /// Render `body` to an HTML fragment.
  ///
  /// Blocks are separated by single newlines. The output has no surrounding
  /// document shell.
  #[must_use]
  pub fn render(&self, body: &str) -> String {
    let mut text = body.replace("\r\n", "\n");

    if self.options.escape_html {
      text = html_escape::encode_text(&text).into_owned();
    }

    let mut stash = Vec::new();
    if self.options.fenced_code {
      text = lift_fenced_code(&text, &mut stash);
    }
    text = lift_pre_blocks(&text, &mut stash);

    if self.options.horizontal_rules {
      text = HORIZONTAL_RULE_RE.replace_all(&text, "<hr>").into_owned();
    }

    let text = H3_RE.replace_all(&text, "<h3>$1</h3>");
    let text = H2_RE.replace_all(&text, "<h2>$1</h2>");
    let text = H1_RE.replace_all(&text, "<h1>$1</h1>");

    let text = BOLD_RE.replace_all(&text, "<strong>$1</strong>");
    let text = ITALIC_RE.replace_all(&text, "<em>$1</em>");
    let text = INLINE_CODE_RE.replace_all(&text, "<code>$1</code>");

    let text = LINK_RE.replace_all(&text, r#"<a href="$2">$1</a>"#);
    let text = if self.options.rewrite_md_links {
      MD_HREF_RE.replace_all(&text, r#"href="$1.html""#)
    } else {
      Cow::Borrowed(&*text)
    };

    let lines = wrap_lists(&text);
    let html = wrap_paragraphs(&lines);

    if stash.is_empty() {
      html
    } else {
      restore_stashed(&html, &stash)
    }
  }
}

/// Replace each fenced block with a placeholder, pushing its rendered HTML
/// onto `stash`. The language tag on the opening fence is dropped.
fn lift_fenced_code(text: &str, stash: &mut Vec<String>) -> String {
  FENCED_CODE_RE
    .replace_all(text, |caps: &Captures| {
      let index = stash.len();
      stash.push(format!("<pre><code>{}</code></pre>", &caps[2]));
      format!("{STASH_OPEN}{index}{STASH_CLOSE}")
    })
    .into_owned()
}

/// Replace each complete `<pre>...</pre>` region with a placeholder, keeping
/// it verbatim on `stash`.
fn lift_pre_blocks(text: &str, stash: &mut Vec<String>) -> String {
  PRE_BLOCK_RE
    .replace_all(text, |caps: &Captures| {
      let index = stash.len();
      stash.push(caps[0].to_string());
      format!("{STASH_OPEN}{index}{STASH_CLOSE}")
    })
    .into_owned()
}

fn restore_stashed(html: &str, stash: &[String]) -> String {
  STASH_RE
    .replace_all(html, |caps: &Captures| {
      caps[1]
        .parse::<usize>()
        .ok()
        .and_then(|index| stash.get(index))
        .map_or_else(|| caps[0].to_string(), Clone::clone)
    })
    .into_owned()
}

/// First block pass: collapse each run of `- ` lines into a single
/// `<ul>...</ul>` line. Every other line is kept as is.
fn wrap_lists(text: &str) -> Vec<String> {
  let mut lines = Vec::new();
  let mut items = Vec::new();

  for line in text.split('\n') {
    if let Some(item) = line.strip_prefix("- ") {
      items.push(item.trim());
      continue;
    }
    flush_list(&mut items, &mut lines);
    lines.push(line.to_string());
  }
  flush_list(&mut items, &mut lines);

  lines
}

fn flush_list(items: &mut Vec<&str>, lines: &mut Vec<String>) {
  if items.is_empty() {
    return;
  }

  let mut list = String::from("<ul>");
  for item in items.drain(..) {
    // Writing to String is infallible
    let _ = write!(list, "<li>{item}</li>");
  }
  list.push_str("</ul>");
  lines.push(list);
}

/// Second block pass: block lines pass through, runs of other non-blank lines
/// are joined with spaces into one paragraph. A blank line or a block line
/// ends the current paragraph.
fn wrap_paragraphs(lines: &[String]) -> String {
  let mut blocks: Vec<String> = Vec::with_capacity(lines.len());
  let mut paragraph: Vec<&str> = Vec::new();
  let mut in_pre = false;

  for line in lines {
    // Inside a multi-line <pre>, lines are kept verbatim.
    if in_pre {
      blocks.push(line.clone());
      in_pre = !line.contains("</pre>");
      continue;
    }

    let stripped = line.trim();
    if is_block_line(stripped) {
      flush_paragraph(&mut paragraph, &mut blocks);
      blocks.push(stripped.to_string());
      in_pre = stripped.starts_with("<pre>") && !stripped.contains("</pre>");
    } else if stripped.is_empty() {
      flush_paragraph(&mut paragraph, &mut blocks);
    } else {
      paragraph.push(stripped);
    }
  }
  flush_paragraph(&mut paragraph, &mut blocks);

  blocks.join("\n")
}

fn flush_paragraph(paragraph: &mut Vec<&str>, blocks: &mut Vec<String>) {
  if paragraph.is_empty() {
    return;
  }
  blocks.push(format!("<p>{}</p>", paragraph.join(" ")));
  paragraph.clear();
}

fn is_block_line(line: &str) -> bool {
  line.starts_with(STASH_OPEN)
    || BLOCK_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}
