use std::time::Duration;

use log::debug;
use quire_config::GatewayConfig;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
  error::FetchError,
  models::{Agent, CronJob, SystemMetrics},
};

/// Error bodies longer than this are cut before they land in a report.
const MAX_ERROR_BODY: usize = 512;

/// Gateway API endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
  Metrics,
  CronJobs,
  Agents,
}

impl Endpoint {
  #[must_use]
  pub const fn path(self) -> &'static str {
    match self {
      Self::Metrics => "/api/v1/metrics",
      Self::CronJobs => "/api/v1/cron/list",
      Self::Agents => "/api/v1/agents/list",
    }
  }

  /// Key of the list inside the payload, for list endpoints.
  const fn list_key(self) -> Option<&'static str> {
    match self {
      Self::Metrics => None,
      Self::CronJobs => Some("jobs"),
      Self::Agents => Some("agents"),
    }
  }
}

/// Blocking gateway API client
#[derive(Debug, Clone)]
pub struct GatewayClient {
  http_client: reqwest::blocking::Client,
  base_url:    String,
}

impl GatewayClient {
  /// Build a client from the gateway configuration. The bearer token, when
  /// present, is sent with every request.
  ///
  /// # Errors
  ///
  /// Returns an error if the token is not a valid header value or the HTTP
  /// client cannot be constructed.
  pub fn new(config: &GatewayConfig) -> Result<Self, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(ref token) = config.token {
      let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
      value.set_sensitive(true);
      headers.insert(AUTHORIZATION, value);
    }

    let mut builder = reqwest::blocking::Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .default_headers(headers);
    // A gateway on this machine is never reached through a proxy.
    if is_loopback(&config.url) {
      builder = builder.no_proxy();
    }
    let http_client = builder.build().map_err(FetchError::Client)?;

    Ok(Self {
      http_client,
      base_url: config.url.trim_end_matches('/').to_string(),
    })
  }

  #[must_use]
  pub fn url(&self, endpoint: Endpoint) -> String {
    format!("{}{}", self.base_url, endpoint.path())
  }

  /// Fetch the raw JSON document behind `endpoint`.
  ///
  /// # Errors
  ///
  /// Returns [`FetchError::Network`] when the request cannot be completed,
  /// [`FetchError::Status`] for a non-2xx response and [`FetchError::Json`]
  /// when the body is not JSON.
  pub fn fetch_json(&self, endpoint: Endpoint) -> Result<Value, FetchError> {
    let url = self.url(endpoint);
    debug!("Fetching {url}");

    let response = self.http_client.get(&url).send().map_err(|source| {
      FetchError::Network {
        url: url.clone(),
        source,
      }
    })?;

    let status = response.status();
    if !status.is_success() {
      let mut body = response.text().unwrap_or_default();
      truncate(&mut body, MAX_ERROR_BODY);
      return Err(FetchError::Status {
        status: status.as_u16(),
        url,
        body,
      });
    }

    let text = response.text().map_err(|source| {
      FetchError::Network {
        url: url.clone(),
        source,
      }
    })?;

    serde_json::from_str(&text)
      .map_err(|source| FetchError::Json { url, source })
  }

  /// Fetch `endpoint` and decode its payload.
  ///
  /// The payload may be wrapped in a `{"result": ...}` envelope. List
  /// endpoints accept the list bare or under their `jobs`/`agents` key.
  ///
  /// # Errors
  ///
  /// Returns any error from [`Self::fetch_json`], or [`FetchError::Json`]
  /// when the payload does not have the expected shape.
  pub fn fetch<T: DeserializeOwned>(
    &self,
    endpoint: Endpoint,
  ) -> Result<T, FetchError> {
    let payload = unwrap_envelope(self.fetch_json(endpoint)?);
    let payload = match (endpoint.list_key(), payload) {
      (Some(key), Value::Object(mut map)) => {
        map.remove(key).unwrap_or_else(|| Value::Array(Vec::new()))
      },
      (_, other) => other,
    };

    serde_json::from_value(payload).map_err(|source| {
      FetchError::Json {
        url: self.url(endpoint),
        source,
      }
    })
  }

  /// # Errors
  ///
  /// See [`Self::fetch`].
  pub fn metrics(&self) -> Result<SystemMetrics, FetchError> {
    self.fetch(Endpoint::Metrics)
  }

  /// # Errors
  ///
  /// See [`Self::fetch`].
  pub fn cron_jobs(&self) -> Result<Vec<CronJob>, FetchError> {
    self.fetch(Endpoint::CronJobs)
  }

  /// # Errors
  ///
  /// See [`Self::fetch`].
  pub fn agents(&self) -> Result<Vec<Agent>, FetchError> {
    self.fetch(Endpoint::Agents)
  }
}

fn unwrap_envelope(value: Value) -> Value {
  match value {
    Value::Object(mut map) if map.contains_key("result") => {
      map.remove("result").unwrap_or(Value::Null)
    },
    other => other,
  }
}

fn is_loopback(url: &str) -> bool {
  reqwest::Url::parse(url).is_ok_and(|url| {
    matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"))
  })
}

fn truncate(text: &mut String, max_chars: usize) {
  if let Some((index, _)) = text.char_indices().nth(max_chars) {
    text.truncate(index);
    text.push('…');
  }
}
