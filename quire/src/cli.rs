use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quire_config::Config;

/// Command line interface for quire
#[derive(Parser, Debug)]
#[command(author, version, about = "quire: a small static site generator")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`]). Defaults to `build`.
  #[command(subcommand)]
  pub command: Option<Commands>,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,

  /// Path to the configuration file (TOML or JSON). When omitted, quire.toml,
  /// quire.json and their dotted variants are searched for.
  #[arg(short = 'c', long = "config-file")]
  pub config_file: Option<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the quire CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Build the site.
  Build {
    /// Directory holding `posts/` and `pages/`.
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Output directory for the generated site.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of threads to use for parallel processing.
    #[arg(short = 'p', long = "jobs")]
    jobs: Option<usize>,

    /// Skip the gateway dashboard.
    #[arg(long)]
    no_dashboard: bool,
  },

  /// Initialize a new quire configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "quire.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },

  /// Export the default templates and stylesheet for customization.
  ExportTemplates {
    /// Output directory for template files.
    #[arg(short, long, default_value = "templates")]
    output_dir: PathBuf,

    /// Whether to overwrite existing files.
    #[arg(long)]
    force: bool,
  },

  /// Collect gateway data and refresh the dashboard snapshot files only.
  Dashboard,

  /// Serve the output directory for local preview.
  #[cfg(feature = "serve")]
  Serve {
    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Directory to serve. Defaults to the configured output directory.
    #[arg(short, long)]
    dir: Option<PathBuf>,
  },
}

impl Cli {
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }

  /// Apply `build` flags on top of the loaded configuration. Flags take
  /// precedence over the config file and `--config` overrides.
  pub fn apply_build_flags(&self, config: &mut Config) {
    let Some(Commands::Build {
      content_dir,
      output_dir,
      jobs,
      no_dashboard,
    }) = &self.command
    else {
      return;
    };

    if let Some(content_dir) = content_dir {
      config.content_dir.clone_from(content_dir);
    }
    if let Some(output_dir) = output_dir {
      config.output_dir.clone_from(output_dir);
    }
    if jobs.is_some() {
      config.jobs = *jobs;
    }
    if *no_dashboard {
      config.gateway.enable = false;
    }
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]
  use std::path::Path;

  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_no_command_means_build_defaults() {
    let cli = Cli::try_parse_from(["quire"]).unwrap();
    assert!(cli.command.is_none());

    let mut config = Config::default();
    cli.apply_build_flags(&mut config);
    assert_eq!(config, Config::default());
  }

  #[test]
  fn test_build_flags_override_config() {
    let cli = Cli::try_parse_from([
      "quire",
      "--config",
      "site.name=Blog",
      "build",
      "--content-dir",
      "notes",
      "-o",
      "public",
      "-p",
      "2",
      "--no-dashboard",
    ])
    .unwrap();
    assert_eq!(cli.config_overrides, vec!["site.name=Blog"]);

    let mut config = Config::default();
    cli.apply_build_flags(&mut config);
    assert_eq!(config.content_dir, Path::new("notes"));
    assert_eq!(config.output_dir, Path::new("public"));
    assert_eq!(config.jobs, Some(2));
    assert!(!config.gateway.enable);
  }

  #[test]
  fn test_init_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["quire", "init", "-F", "yaml"]).is_err());
  }
}
