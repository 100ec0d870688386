use std::path::{Path, PathBuf};

use log::trace;
use regex::Regex;
use walkdir::WalkDir;

/// Create a regex that never matches anything.
///
/// Used as the fallback when one of the renderer's patterns fails to compile,
/// so a broken pattern disables its rule instead of panicking.
#[must_use]
pub fn never_matching_regex() -> Regex {
  #[allow(
    clippy::expect_used,
    reason = "This pattern is guaranteed to be valid"
  )]
  Regex::new(r"[^\s\S]").expect("regex pattern [^\\s\\S] should always compile")
}

/// Collect the markdown files that sit directly inside `dir`, sorted by path.
///
/// Subdirectories are not descended into. A missing directory yields no
/// files.
#[must_use]
pub fn collect_markdown_files(dir: &Path) -> Vec<PathBuf> {
  let mut files: Vec<PathBuf> = WalkDir::new(dir)
    .min_depth(1)
    .max_depth(1)
    .follow_links(true)
    .into_iter()
    .filter_map(Result::ok)
    .map(walkdir::DirEntry::into_path)
    .filter(|path| {
      path.is_file() && path.extension().is_some_and(|ext| ext == "md")
    })
    .collect();

  files.sort();
  trace!("Found {} markdown files in {}", files.len(), dir.display());
  files
}
