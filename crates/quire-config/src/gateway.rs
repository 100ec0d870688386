use std::env;

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, overrides};

/// Connection settings for the metrics gateway behind the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
  /// Whether to collect gateway data and build the dashboard.
  pub enable: bool,

  /// Base URL of the gateway API.
  pub url: String,

  /// Name of the environment variable holding the bearer token.
  pub token_env: String,

  /// Bearer token, resolved from `token_env` when the configuration is
  /// loaded. Never read from or written to config files.
  #[serde(skip)]
  pub token: Option<String>,

  /// Per-request timeout.
  pub timeout_secs: u64,

  /// Cron jobs shown on the dashboard.
  pub max_cron_jobs: usize,

  /// Agents shown on the dashboard.
  pub max_agents: usize,
}

impl Default for GatewayConfig {
  fn default() -> Self {
    Self {
      enable:        true,
      url:           "http://localhost:18789".to_string(),
      token_env:     "OPENCLAW_GATEWAY_TOKEN".to_string(),
      token:         None,
      timeout_secs:  10,
      max_cron_jobs: 5,
      max_agents:    3,
    }
  }
}

impl GatewayConfig {
  /// Read the bearer token from the variable named by `token_env`. An unset
  /// or empty variable leaves the client unauthenticated.
  pub fn resolve_token(&mut self) {
    self.token = env::var(&self.token_env)
      .ok()
      .filter(|token| !token.is_empty());

    if self.token.is_none() {
      log::debug!(
        "{} is not set; gateway requests will be unauthenticated",
        self.token_env
      );
    }
  }

  pub(crate) fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    let full_key = format!("gateway.{key}");
    match key {
      "enable" => self.enable = overrides::parse_bool(&full_key, value)?,
      "url" => value.clone_into(&mut self.url),
      "token_env" => value.clone_into(&mut self.token_env),
      "timeout_secs" => {
        self.timeout_secs = overrides::parse_number(&full_key, value)?;
      },
      "max_cron_jobs" => {
        self.max_cron_jobs = overrides::parse_number(&full_key, value)?;
      },
      "max_agents" => {
        self.max_agents = overrides::parse_number(&full_key, value)?;
      },
      _ => return Err(overrides::unknown_key(&full_key)),
    }
    Ok(())
  }
}
