//! View model for the dashboard template.
//!
//! Every string is HTML-escaped here, since gateway data is untrusted and the
//! templates insert values as they are.
use html_escape::encode_double_quoted_attribute;
use quire_gateway::{Agent, CronJob, DashboardSnapshot, SystemMetrics};
use serde::Serialize;

const OK_ICON: &str = "✓";
const WARN_ICON: &str = "⚠";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCard {
  pub icon:  &'static str,
  pub title: &'static str,
  pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CronRow {
  pub icon:     &'static str,
  pub name:     String,
  pub next_run: String,
  pub summary:  String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentCard {
  /// CSS modifier class, `active` or `standby`.
  pub class: &'static str,
  pub id:    String,
  pub state: String,
  pub model: String,
}

/// Context of the `dashboard` template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
  pub site_name:     String,
  pub collected_at:  String,
  pub metrics_error: Option<String>,
  pub status_cards:  Vec<StatusCard>,
  pub cron_error:    Option<String>,
  pub cron_jobs:     Vec<CronRow>,
  pub agents_error:  Option<String>,
  pub agents:        Vec<AgentCard>,
}

impl DashboardView {
  #[must_use]
  pub fn new(site_name: &str, snapshot: &DashboardSnapshot) -> Self {
    Self {
      site_name:     escape(site_name),
      collected_at:  escape(&snapshot.collected_at),
      metrics_error: snapshot.metrics.error.as_deref().map(escape),
      status_cards:  status_cards(&snapshot.metrics.data),
      cron_error:    snapshot.cron_jobs.error.as_deref().map(escape),
      cron_jobs:     snapshot.cron_jobs.data.iter().map(cron_row).collect(),
      agents_error:  snapshot.agents.error.as_deref().map(escape),
      agents:        snapshot.agents.data.iter().map(agent_card).collect(),
    }
  }
}

fn status_cards(metrics: &SystemMetrics) -> Vec<StatusCard> {
  let gateway_icon = if metrics.is_online() {
    OK_ICON
  } else {
    WARN_ICON
  };

  vec![
    StatusCard {
      icon:  gateway_icon,
      title: "Gateway",
      value: escape(&metrics.gateway_status),
    },
    StatusCard {
      icon:  OK_ICON,
      title: "Build Status",
      value: escape(&metrics.build_status),
    },
    StatusCard {
      icon:  OK_ICON,
      title: "Total Sessions",
      value: group_thousands(metrics.total_sessions),
    },
    StatusCard {
      icon:  "📊",
      title: "Total Tokens",
      value: group_thousands(metrics.total_tokens),
    },
    StatusCard {
      icon:  "⏱",
      title: "Uptime",
      value: escape(&metrics.uptime),
    },
  ]
}

fn cron_row(job: &CronJob) -> CronRow {
  CronRow {
    icon:     if job.is_ok() { OK_ICON } else { WARN_ICON },
    name:     escape(job.display_name()),
    next_run: escape(job.next_run_at.as_deref().unwrap_or("TBD")),
    summary:  escape(job.payload.kind.as_deref().unwrap_or_default()),
  }
}

fn agent_card(agent: &Agent) -> AgentCard {
  AgentCard {
    class: if agent.is_active() {
      "active"
    } else {
      "standby"
    },
    id:    escape(&agent.id),
    state: escape(&agent.state),
    model: escape(&agent.model),
  }
}

fn escape(text: &str) -> String {
  encode_double_quoted_attribute(text).into_owned()
}

/// `1234567` → `1,234,567`
fn group_thousands(value: u64) -> String {
  let digits = value.to_string();
  let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, digit) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(digit);
  }
  grouped
}
