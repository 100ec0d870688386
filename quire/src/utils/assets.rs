use std::{fs, path::Path};

use color_eyre::eyre::{self, Context, Result};
use log::debug;
use quire_config::Config;
use quire_templates as templates;

/// Copies the static files of the site to the output directory.
///
/// This includes:
/// - The stylesheet as `css/style.css` (configured file, template override or
///   the embedded default)
/// - The `CNAME` file, when there is one
/// - Every file under the configured assets directory, below `assets/`
///
/// # Errors
///
/// Returns an error if any asset cannot be read or written.
pub fn copy_assets(config: &Config) -> Result<()> {
  let css_dir = config.output_dir.join("css");
  fs::create_dir_all(&css_dir).wrap_err_with(|| {
    format!("Failed to create directory: {}", css_dir.display())
  })?;

  let css = load_stylesheet(config)?;
  fs::write(css_dir.join("style.css"), css)
    .wrap_err("Failed to write CSS file")?;

  copy_cname(config)?;
  copy_custom_assets(config, &config.output_dir.join("assets"))?;

  Ok(())
}

fn load_stylesheet(config: &Config) -> Result<String> {
  if let Some(ref path) = config.stylesheet {
    return fs::read_to_string(path).wrap_err_with(|| {
      format!("Failed to read stylesheet: {}", path.display())
    });
  }

  if let Some(path) = config.get_template_file("style.css")
    && path.exists()
  {
    return fs::read_to_string(&path).wrap_err_with(|| {
      format!("Failed to read style.css from: {}", path.display())
    });
  }

  Ok(templates::DEFAULT_CSS.to_string())
}

fn copy_cname(config: &Config) -> Result<()> {
  let Some(cname) = config.cname_path() else {
    return Ok(());
  };

  let dest = config.output_dir.join("CNAME");
  fs::copy(&cname, &dest).wrap_err_with(|| {
    format!("Failed to copy {} to {}", cname.display(), dest.display())
  })?;
  debug!("Copied {}", cname.display());
  Ok(())
}

/// Copies the contents of the configured assets directory, if any, into
/// `assets_dir`.
fn copy_custom_assets(config: &Config, assets_dir: &Path) -> eyre::Result<()> {
  let Some(custom_assets_dir) = &config.assets_dir else {
    return Ok(());
  };

  if !custom_assets_dir.is_dir() {
    return Ok(());
  }

  debug!("Copying custom assets from {}", custom_assets_dir.display());
  fs::create_dir_all(assets_dir)?;

  let options = fs_extra::dir::CopyOptions::new()
    .overwrite(true)
    .content_only(true);
  fs_extra::dir::copy(custom_assets_dir, assets_dir, &options)
    .wrap_err("Failed to copy custom assets")?;
  Ok(())
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]
  use super::*;

  fn config_in(root: &Path) -> Config {
    Config {
      output_dir: root.join("out"),
      ..Config::default()
    }
  }

  #[test]
  fn test_default_stylesheet() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    fs::create_dir_all(&config.output_dir).unwrap();

    copy_assets(&config).unwrap();

    let css = fs::read_to_string(config.output_dir.join("css/style.css")).unwrap();
    assert_eq!(css, templates::DEFAULT_CSS);
    assert!(!config.output_dir.join("assets").exists());
  }

  #[test]
  fn test_configured_stylesheet_and_cname() {
    let dir = tempfile::tempdir().unwrap();
    let stylesheet = dir.path().join("custom.css");
    let cname = dir.path().join("CNAME");
    fs::write(&stylesheet, "body { color: red; }").unwrap();
    fs::write(&cname, "blog.example.com\n").unwrap();

    let config = Config {
      stylesheet: Some(stylesheet),
      cname: Some(cname),
      ..config_in(dir.path())
    };
    copy_assets(&config).unwrap();

    assert_eq!(
      fs::read_to_string(config.output_dir.join("css/style.css")).unwrap(),
      "body { color: red; }"
    );
    assert_eq!(
      fs::read_to_string(config.output_dir.join("CNAME")).unwrap(),
      "blog.example.com\n"
    );
  }

  #[test]
  fn test_template_dir_stylesheet() {
    let dir = tempfile::tempdir().unwrap();
    let template_dir = dir.path().join("templates");
    fs::create_dir_all(&template_dir).unwrap();
    fs::write(template_dir.join("style.css"), "main {}").unwrap();

    let config = Config {
      template_dir: Some(template_dir),
      ..config_in(dir.path())
    };
    copy_assets(&config).unwrap();

    assert_eq!(
      fs::read_to_string(config.output_dir.join("css/style.css")).unwrap(),
      "main {}"
    );
  }

  #[test]
  fn test_custom_assets_are_not_nested() {
    let dir = tempfile::tempdir().unwrap();
    let assets = dir.path().join("static");
    fs::create_dir_all(assets.join("img")).unwrap();
    fs::write(assets.join("img/logo.svg"), "<svg/>").unwrap();
    fs::write(assets.join("favicon.ico"), "ico").unwrap();

    let config = Config {
      assets_dir: Some(assets),
      ..config_in(dir.path())
    };
    copy_assets(&config).unwrap();

    let out = config.output_dir.join("assets");
    assert!(out.join("img/logo.svg").is_file());
    assert!(out.join("favicon.ico").is_file());
    assert!(!out.join("static").exists());
  }
}
