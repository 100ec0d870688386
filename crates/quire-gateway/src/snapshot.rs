use std::{fs, io, path::Path};

use jiff::{Zoned, tz::TimeZone};
use log::{info, warn};
use quire_config::GatewayConfig;
use serde::{Deserialize, Serialize};

use crate::{
  client::GatewayClient,
  error::FetchError,
  models::{Agent, CronJob, SystemMetrics},
};

/// Data for one dashboard section, with the error that replaced it if the
/// fetch failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section<T> {
  pub data: T,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl<T: Default> Section<T> {
  fn from_result(label: &str, result: Result<T, FetchError>) -> Self {
    match result {
      Ok(data) => Self { data, error: None },
      Err(e) => {
        warn!("Failed to fetch {label}: {e}");
        Self::failed(e.to_string())
      },
    }
  }

  fn failed(error: String) -> Self {
    Self {
      data:  T::default(),
      error: Some(error),
    }
  }
}

/// How many list entries the dashboard keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
  pub max_cron_jobs: usize,
  pub max_agents:    usize,
}

impl From<&GatewayConfig> for Limits {
  fn from(config: &GatewayConfig) -> Self {
    Self {
      max_cron_jobs: config.max_cron_jobs,
      max_agents:    config.max_agents,
    }
  }
}

/// Everything the dashboard shows, as collected at one point in time.
///
/// This is also the layout of `data/metrics.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
  /// UTC wall-clock time of collection, `YYYY-MM-DD HH:MM:SS UTC`.
  pub collected_at: String,
  pub metrics:      Section<SystemMetrics>,
  pub cron_jobs:    Section<Vec<CronJob>>,
  pub agents:       Section<Vec<Agent>>,
}

impl DashboardSnapshot {
  /// A snapshot in which every section failed with `error`.
  #[must_use]
  pub fn unavailable(error: &str) -> Self {
    Self {
      collected_at: now_utc(),
      metrics:      Section::failed(error.to_string()),
      cron_jobs:    Section::failed(error.to_string()),
      agents:       Section::failed(error.to_string()),
    }
  }

  /// Build a client from `config` and collect. A client that cannot be
  /// built yields an [unavailable](Self::unavailable) snapshot.
  #[must_use]
  pub fn collect_from_config(config: &GatewayConfig) -> Self {
    match GatewayClient::new(config) {
      Ok(client) => collect(&client, Limits::from(config)),
      Err(e) => {
        warn!("Gateway client unavailable: {e}");
        Self::unavailable(&e.to_string())
      },
    }
  }

  /// Whether any section failed.
  #[must_use]
  pub const fn has_errors(&self) -> bool {
    self.metrics.error.is_some()
      || self.cron_jobs.error.is_some()
      || self.agents.error.is_some()
  }

  /// Write the snapshot as pretty-printed JSON.
  ///
  /// # Errors
  ///
  /// Returns an error if the parent directory cannot be created or the file
  /// cannot be written.
  pub fn write_json(&self, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
    fs::write(path, json)
  }
}

/// Query every endpoint concurrently and fold the results into a snapshot.
///
/// Never fails: a failed endpoint leaves its section at defaults with the
/// error recorded.
#[must_use]
pub fn collect(client: &GatewayClient, limits: Limits) -> DashboardSnapshot {
  let (metrics, (cron_jobs, agents)) = rayon::join(
    || client.metrics(),
    || rayon::join(|| client.cron_jobs(), || client.agents()),
  );

  let mut snapshot = DashboardSnapshot {
    collected_at: now_utc(),
    metrics:      Section::from_result("metrics", metrics),
    cron_jobs:    Section::from_result("cron jobs", cron_jobs),
    agents:       Section::from_result("agents", agents),
  };
  snapshot.cron_jobs.data.truncate(limits.max_cron_jobs);
  snapshot.agents.data.truncate(limits.max_agents);

  info!(
    "Collected dashboard data: {} cron jobs, {} agents",
    snapshot.cron_jobs.data.len(),
    snapshot.agents.data.len()
  );
  snapshot
}

fn now_utc() -> String {
  Zoned::now()
    .with_time_zone(TimeZone::UTC)
    .strftime("%Y-%m-%d %H:%M:%S UTC")
    .to_string()
}
