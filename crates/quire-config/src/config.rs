use std::{
  collections::HashMap,
  fs,
  path::{Path, PathBuf},
  sync::OnceLock,
};

use serde::{Deserialize, Serialize};

use crate::{
  error::ConfigError,
  feeds::FeedsConfig,
  gateway::GatewayConfig,
  markdown::MarkdownConfig,
  overrides,
  site::SiteConfig,
};

/// Configuration for the quire site generator.
///
/// [`Config`] is built once at start-up from defaults, an optional config
/// file and `--config KEY=VALUE` overrides, then passed by reference to
/// every stage of the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Directory holding `posts/` and `pages/`.
  pub content_dir: PathBuf,

  /// Post directory. Defaults to `<content_dir>/posts`.
  pub posts_dir: Option<PathBuf>,

  /// Page directory. Defaults to `<content_dir>/pages`.
  pub pages_dir: Option<PathBuf>,

  /// Output directory for the generated site.
  pub output_dir: PathBuf,

  /// Directory for dashboard snapshot files.
  pub data_dir: PathBuf,

  /// Stylesheet copied to `css/style.css` instead of the embedded one.
  pub stylesheet: Option<PathBuf>,

  /// Directory of template overrides.
  pub template_dir: Option<PathBuf>,

  /// Directory copied to `assets/`.
  pub assets_dir: Option<PathBuf>,

  /// CNAME file. When unset, a `CNAME` in the working directory is used if
  /// it exists.
  pub cname: Option<PathBuf>,

  /// Number of threads to use for parallel rendering.
  pub jobs: Option<usize>,

  pub site: SiteConfig,

  pub markdown: MarkdownConfig,

  pub feeds: FeedsConfig,

  pub gateway: GatewayConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      content_dir:  PathBuf::from("content"),
      posts_dir:    None,
      pages_dir:    None,
      output_dir:   PathBuf::from("build"),
      data_dir:     PathBuf::from("data"),
      stylesheet:   None,
      template_dir: None,
      assets_dir:   None,
      cname:        None,
      jobs:         None,
      site:         SiteConfig::default(),
      markdown:     MarkdownConfig::default(),
      feeds:        FeedsConfig::default(),
      gateway:      GatewayConfig::default(),
    }
  }
}

impl Config {
  #[must_use]
  pub fn posts_dir(&self) -> PathBuf {
    self
      .posts_dir
      .clone()
      .unwrap_or_else(|| self.content_dir.join("posts"))
  }

  #[must_use]
  pub fn pages_dir(&self) -> PathBuf {
    self
      .pages_dir
      .clone()
      .unwrap_or_else(|| self.content_dir.join("pages"))
  }

  /// The CNAME file to publish, if any.
  #[must_use]
  pub fn cname_path(&self) -> Option<PathBuf> {
    if let Some(ref cname) = self.cname {
      return Some(cname.clone());
    }

    let default = PathBuf::from("CNAME");
    default.is_file().then_some(default)
  }

  /// Path of the template override for `name`, if a template directory is
  /// configured. Does not check that the file exists.
  #[must_use]
  pub fn get_template_file(&self, name: &str) -> Option<PathBuf> {
    self.template_dir.as_ref().map(|dir| dir.join(name))
  }

  /// Load configuration from a file (TOML or JSON).
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file: {}: {}",
        path.display(),
        e
      ))
    })?;

    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
      return Err(ConfigError::Config(format!(
        "Config file has no extension: {}",
        path.display()
      )));
    };

    match ext.to_lowercase().as_str() {
      "json" => {
        serde_json::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse JSON config from {}: {}",
            path.display(),
            e
          ))
        })
      },
      "toml" => {
        toml::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse TOML config from {}: {}",
            path.display(),
            e
          ))
        })
      },
      _ => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
    }
  }

  /// Load configuration from an explicit or discovered file, then apply
  /// overrides and resolve the gateway token from the environment.
  ///
  /// # Errors
  ///
  /// Returns an error if the config file cannot be loaded or an override is
  /// invalid.
  pub fn load(
    config_file: Option<&Path>,
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = if let Some(path) = config_file {
      Self::from_file(path).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to load config from {}: {}",
          path.display(),
          e
        ))
      })?
    } else if let Some(discovered_config) = Self::find_config_file() {
      log::info!(
        "Using discovered config file: {}",
        discovered_config.display()
      );
      Self::from_file(&discovered_config).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to load discovered config from {}: {}",
          discovered_config.display(),
          e
        ))
      })?
    } else {
      Self::default()
    };

    if !config_overrides.is_empty() {
      config.apply_overrides(config_overrides)?;
    }

    config.gateway.resolve_token();

    Ok(config)
  }

  /// Apply configuration overrides from KEY=VALUE strings.
  ///
  /// Nested options use dotted keys, such as `site.name=My Blog` or
  /// `gateway.enable=false`.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  ///
  /// - An override string is not in KEY=VALUE format
  /// - A key is not recognized
  /// - A value cannot be parsed as the expected type
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str
        .split_once('=')
        .ok_or_else(|| ConfigError::OverrideFormat(override_str.clone()))?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Apply a single configuration override by key.
  ///
  /// # Errors
  ///
  /// Returns an error if the key is unknown or the value does not parse.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    if let Some((section, rest)) = key.split_once('.') {
      return match section {
        "site" => self.site.apply_override(rest, value),
        "markdown" => self.markdown.apply_override(rest, value),
        "feeds" => self.feeds.apply_override(rest, value),
        "gateway" => self.gateway.apply_override(rest, value),
        _ => Err(overrides::unknown_key(key)),
      };
    }

    match key {
      "content_dir" => self.content_dir = PathBuf::from(value),
      "posts_dir" => self.posts_dir = overrides::parse_optional_path(value),
      "pages_dir" => self.pages_dir = overrides::parse_optional_path(value),
      "output_dir" => self.output_dir = PathBuf::from(value),
      "data_dir" => self.data_dir = PathBuf::from(value),
      "stylesheet" => self.stylesheet = overrides::parse_optional_path(value),
      "template_dir" => {
        self.template_dir = overrides::parse_optional_path(value);
      },
      "assets_dir" => self.assets_dir = overrides::parse_optional_path(value),
      "cname" => self.cname = overrides::parse_optional_path(value),
      "jobs" => self.jobs = overrides::parse_optional_number(key, value)?,
      _ => return Err(overrides::unknown_key(key)),
    }

    Ok(())
  }

  /// Search for config files in common locations
  #[must_use]
  pub fn find_config_file() -> Option<PathBuf> {
    static RESULT: OnceLock<Option<PathBuf>> = OnceLock::new();
    RESULT
      .get_or_init(|| {
        let config_filenames = [
          "quire.toml",
          "quire.json",
          ".quire.toml",
          ".quire.json",
          ".config/quire.toml",
          ".config/quire.json",
        ];

        let current_dir = std::env::current_dir().ok()?;
        config_filenames
          .iter()
          .map(|filename| current_dir.join(filename))
          .find(|path| path.exists())
      })
      .clone()
  }

  /// Validate all paths specified in the configuration
  ///
  /// # Errors
  ///
  /// Returns an error listing every configured path that does not exist or
  /// has the wrong type.
  pub fn validate_paths(&self) -> Result<(), ConfigError> {
    let mut errors = Vec::new();

    check_dir(&mut errors, "Content directory", &self.content_dir);
    if let Some(ref posts_dir) = self.posts_dir {
      check_dir(&mut errors, "Posts directory", posts_dir);
    }
    if let Some(ref pages_dir) = self.pages_dir {
      check_dir(&mut errors, "Pages directory", pages_dir);
    }
    if let Some(ref stylesheet) = self.stylesheet {
      check_file(&mut errors, "Stylesheet", stylesheet);
    }
    if let Some(ref template_dir) = self.template_dir {
      check_dir(&mut errors, "Template directory", template_dir);
    }
    if let Some(ref assets_dir) = self.assets_dir {
      check_dir(&mut errors, "Assets directory", assets_dir);
    }
    if let Some(ref cname) = self.cname {
      check_file(&mut errors, "CNAME file", cname);
    }

    if errors.is_empty() {
      Ok(())
    } else {
      Err(ConfigError::InvalidPaths(errors))
    }
  }

  /// Generate a default configuration file with commented explanations
  ///
  /// # Errors
  ///
  /// Returns an error if the format is unsupported or the file cannot be
  /// written.
  pub fn generate_default_config(
    format: &str,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let config_content = crate::templates::get_template(format)
      .map_err(|e| ConfigError::Template(e.to_string()))?;

    fs::write(path, config_content).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to write default config to {}: {}",
        path.display(),
        e
      ))
    })?;

    log::info!("Created default configuration file: {}", path.display());
    Ok(())
  }

  /// Export the embedded page templates to a directory for customization.
  ///
  /// Existing files are left alone unless `force` is set.
  ///
  /// # Errors
  ///
  /// Returns an error if the output directory cannot be created or a template
  /// cannot be written.
  pub fn export_templates(
    output_dir: &Path,
    force: bool,
  ) -> Result<(), ConfigError> {
    fs::create_dir_all(output_dir).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to create template directory: {}: {}",
        output_dir.display(),
        e
      ))
    })?;

    let mut templates: Vec<_> =
      Self::get_template_sources().into_iter().collect();
    templates.sort_unstable();

    for (filename, content) in templates {
      let file_path = output_dir.join(filename);

      if file_path.exists() && !force {
        log::warn!(
          "File {} already exists. Use --force to overwrite.",
          file_path.display()
        );
        continue;
      }

      fs::write(&file_path, content).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to write template file: {}: {}",
          file_path.display(),
          e
        ))
      })?;
      log::info!("Exported template: {}", file_path.display());
    }

    Ok(())
  }

  fn get_template_sources() -> HashMap<&'static str, &'static str> {
    quire_templates::all_templates()
  }
}

fn check_dir(errors: &mut Vec<String>, label: &str, path: &Path) {
  if !path.exists() {
    errors.push(format!("{label} does not exist: {}", path.display()));
  } else if !path.is_dir() {
    errors.push(format!("{label} is not a directory: {}", path.display()));
  }
}

fn check_file(errors: &mut Vec<String>, label: &str, path: &Path) {
  if !path.exists() {
    errors.push(format!("{label} does not exist: {}", path.display()));
  } else if !path.is_file() {
    errors.push(format!("{label} is not a file: {}", path.display()));
  }
}
