use std::{fs, path::Path};

use color_eyre::eyre::{Context, Result};
use log::debug;
use quire_html::Entry;
use quire_markdown::{MarkdownRenderer, collect_markdown_files};
use rayon::prelude::*;

/// Read, parse and render every Markdown file directly inside `dir`, in
/// parallel. A missing directory yields no entries.
///
/// Entries come back in file name order.
///
/// # Errors
///
/// Returns an error if a file cannot be read or is not valid UTF-8.
pub fn load_entries(
  dir: &Path,
  renderer: &MarkdownRenderer,
) -> Result<Vec<Entry>> {
  let files = collect_markdown_files(dir);
  debug!("Rendering {} documents from {}", files.len(), dir.display());

  files
    .par_iter()
    .map(|path| -> Result<Entry> {
      let raw = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
      let slug = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
      Ok(Entry::parse(&slug, &raw, renderer))
    })
    .collect()
}
