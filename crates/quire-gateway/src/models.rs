//! Typed views of the gateway payloads.
//!
//! Every field is optional on the wire. Missing values fall back to
//! `unknown` or zero so a partial payload still renders.
use serde::{Deserialize, Deserializer, Serialize};

fn unknown() -> String {
  "unknown".to_string()
}

/// Accept a string or a number, rendering numbers with their JSON form.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match serde_json::Value::deserialize(deserializer)? {
    serde_json::Value::String(s) => s,
    serde_json::Value::Null => unknown(),
    other => other.to_string(),
  })
}

fn lenient_opt_string<'de, D>(
  deserializer: D,
) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match serde_json::Value::deserialize(deserializer)? {
    serde_json::Value::String(s) => Some(s),
    serde_json::Value::Null => None,
    other => Some(other.to_string()),
  })
}

/// Response of `/api/v1/metrics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemMetrics {
  #[serde(deserialize_with = "lenient_string")]
  pub gateway_status: String,

  #[serde(deserialize_with = "lenient_string")]
  pub build_status: String,

  pub total_sessions: u64,

  pub total_tokens: u64,

  #[serde(deserialize_with = "lenient_string")]
  pub uptime: String,
}

impl Default for SystemMetrics {
  fn default() -> Self {
    Self {
      gateway_status: unknown(),
      build_status:   unknown(),
      total_sessions: 0,
      total_tokens:   0,
      uptime:         unknown(),
    }
  }
}

impl SystemMetrics {
  #[must_use]
  pub fn is_online(&self) -> bool {
    self.gateway_status == "online"
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CronPayload {
  pub kind: Option<String>,
}

/// One entry of `/api/v1/cron/list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CronJob {
  #[serde(deserialize_with = "lenient_string")]
  pub id: String,

  pub name: Option<String>,

  pub state: Option<String>,

  #[serde(
    rename = "nextRunAt",
    deserialize_with = "lenient_opt_string",
    skip_serializing_if = "Option::is_none"
  )]
  pub next_run_at: Option<String>,

  pub payload: CronPayload,
}

impl CronJob {
  /// The job name, or its id when unnamed.
  #[must_use]
  pub fn display_name(&self) -> &str {
    self
      .name
      .as_deref()
      .filter(|name| !name.is_empty())
      .unwrap_or(&self.id)
  }

  #[must_use]
  pub fn is_ok(&self) -> bool {
    self.state.as_deref() == Some("ok")
  }
}

/// One entry of `/api/v1/agents/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Agent {
  #[serde(deserialize_with = "lenient_string")]
  pub id: String,

  #[serde(deserialize_with = "lenient_string")]
  pub model: String,

  #[serde(deserialize_with = "lenient_string")]
  pub state: String,
}

impl Default for Agent {
  fn default() -> Self {
    Self {
      id:    unknown(),
      model: unknown(),
      state: unknown(),
    }
  }
}

impl Agent {
  #[must_use]
  pub fn is_active(&self) -> bool {
    self.state == "active"
  }
}
