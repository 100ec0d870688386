use thiserror::Error;

/// Failure of a single gateway request.
#[derive(Debug, Error)]
pub enum FetchError {
  #[error("Failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("Bearer token is not a valid header value")]
  Token(#[from] reqwest::header::InvalidHeaderValue),

  #[error("Request to {url} failed: {source}")]
  Network {
    url:    String,
    #[source]
    source: reqwest::Error,
  },

  #[error("HTTP {status} from {url}: {body}")]
  Status {
    status: u16,
    url:    String,
    body:   String,
  },

  #[error("Malformed JSON from {url}: {source}")]
  Json {
    url:    String,
    #[source]
    source: serde_json::Error,
  },
}
