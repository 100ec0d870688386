use std::{fs, path::Path};

use color_eyre::eyre::{Context, Result};
use log::info;
use quire_config::Config;

/// Write `content` to `rel_path` inside the output directory, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or the file cannot be
/// written.
pub fn write_output(
  config: &Config,
  rel_path: &str,
  content: &str,
) -> Result<()> {
  let path = config.output_dir.join(rel_path);
  write_file(&path, content)?;
  info!("Built: {rel_path}");
  Ok(())
}

/// Write `content` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or the file cannot be
/// written.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create directory: {}", parent.display())
    })?;
  }
  fs::write(path, content)
    .wrap_err_with(|| format!("Failed to write {}", path.display()))
}
