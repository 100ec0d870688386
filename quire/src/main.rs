use std::fs;

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};
use quire::{
  cli::{Cli, Commands},
  site,
};
use quire_config::Config;

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match &cli.command {
    Some(Commands::Init {
      output,
      format,
      force,
    }) => {
      if output.exists() && !force {
        bail!(
          "Configuration file already exists: {}. Use --force to overwrite.",
          output.display()
        );
      }

      if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
      {
        fs::create_dir_all(parent).wrap_err_with(|| {
          format!("Failed to create directory: {}", parent.display())
        })?;
        info!("Created directory: {}", parent.display());
      }

      Config::generate_default_config(format, output).wrap_err_with(|| {
        format!("Failed to generate configuration file: {}", output.display())
      })?;

      info!(
        "Configuration file created successfully. Edit it to customize your \
         site."
      );
      Ok(())
    },

    Some(Commands::ExportTemplates { output_dir, force }) => {
      Config::export_templates(output_dir, *force).wrap_err_with(|| {
        format!("Failed to export templates to {}", output_dir.display())
      })
    },

    Some(Commands::Dashboard) => {
      let config = load_config(&cli)?;
      site::update_dashboard_data(&config)?;
      Ok(())
    },

    #[cfg(feature = "serve")]
    Some(Commands::Serve { port, dir }) => {
      let config = load_config(&cli)?;
      let dir = dir.as_deref().unwrap_or(&config.output_dir);
      quire::serve::serve(dir, *port)
    },

    Some(Commands::Build { .. }) | None => {
      let config = load_config(&cli)?;
      config.validate_paths()?;
      site::generate_site(&config)?;
      Ok(())
    },
  }
}

fn load_config(cli: &Cli) -> Result<Config> {
  let mut config =
    Config::load(cli.config_file.as_deref(), &cli.config_overrides)?;
  cli.apply_build_flags(&mut config);
  Ok(config)
}
