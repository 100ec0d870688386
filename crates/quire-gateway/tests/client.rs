#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  clippy::panic,
  reason = "Fine in tests"
)]
use std::{
  io::{Read, Write},
  net::{TcpListener, TcpStream},
  sync::{Arc, Mutex},
  thread,
  time::Duration,
};

use quire_config::GatewayConfig;
use quire_gateway::{
  DashboardSnapshot,
  Endpoint,
  FetchError,
  GatewayClient,
  Limits,
  collect,
};

struct Route {
  path:   &'static str,
  status: u16,
  body:   String,
}

impl Route {
  fn ok(path: &'static str, body: &str) -> Self {
    Self {
      path,
      status: 200,
      body: body.to_string(),
    }
  }
}

/// Minimal HTTP/1.1 server answering canned responses by path. Returns the
/// base URL and the raw requests it received.
fn stub_server(routes: Vec<Route>) -> (String, Arc<Mutex<Vec<String>>>) {
  let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub server");
  let addr = listener.local_addr().expect("stub server address");
  let requests = Arc::new(Mutex::new(Vec::new()));
  let seen = Arc::clone(&requests);

  thread::spawn(move || {
    for stream in listener.incoming() {
      let Ok(stream) = stream else { continue };
      let request = read_request(&stream);
      let path = request
        .split_whitespace()
        .nth(1)
        .unwrap_or_default()
        .to_string();
      seen.lock().unwrap().push(request);

      let (status, body) = routes
        .iter()
        .find(|route| route.path == path)
        .map_or((404, "{}"), |route| (route.status, route.body.as_str()));
      respond(stream, status, body);
    }
  });

  (format!("http://{addr}"), requests)
}

fn read_request(mut stream: &TcpStream) -> String {
  let mut buf = Vec::new();
  let mut chunk = [0_u8; 1024];
  while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
    match stream.read(&mut chunk) {
      Ok(0) | Err(_) => break,
      Ok(n) => buf.extend_from_slice(&chunk[..n]),
    }
  }
  String::from_utf8_lossy(&buf).into_owned()
}

fn respond(mut stream: TcpStream, status: u16, body: &str) {
  let response = format!(
    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: \
     {}\r\nConnection: close\r\n\r\n{body}",
    body.len()
  );
  let _ = stream.write_all(response.as_bytes());
}

fn config_for(url: &str) -> GatewayConfig {
  GatewayConfig {
    url: url.to_string(),
    token: Some("test-token".to_string()),
    timeout_secs: 2,
    ..GatewayConfig::default()
  }
}

#[test]
fn test_fetch_sends_bearer_token() {
  let (url, requests) =
    stub_server(vec![Route::ok("/api/v1/metrics", r#"{"result": {}}"#)]);
  let client = GatewayClient::new(&config_for(&url)).unwrap();

  client.fetch_json(Endpoint::Metrics).unwrap();

  let requests = requests.lock().unwrap();
  let request = requests[0].to_lowercase();
  assert!(request.starts_with("get /api/v1/metrics "));
  assert!(request.contains("authorization: bearer test-token"));
  assert!(request.contains("content-type: application/json"));
}

#[test]
fn test_no_token_sends_no_authorization() {
  let (url, requests) =
    stub_server(vec![Route::ok("/api/v1/metrics", r#"{}"#)]);
  let mut config = config_for(&url);
  config.token = None;

  GatewayClient::new(&config)
    .unwrap()
    .fetch_json(Endpoint::Metrics)
    .unwrap();

  let requests = requests.lock().unwrap();
  assert!(!requests[0].to_lowercase().contains("authorization:"));
}

#[test]
fn test_metrics_inside_envelope() {
  let (url, _) = stub_server(vec![Route::ok(
    "/api/v1/metrics",
    r#"{"result": {"gateway_status": "online", "total_sessions": 12, "total_tokens": 3400, "uptime": "3d"}}"#,
  )]);
  let client = GatewayClient::new(&config_for(&url)).unwrap();

  let metrics = client.metrics().unwrap();
  assert!(metrics.is_online());
  assert_eq!(metrics.total_sessions, 12);
  assert_eq!(metrics.total_tokens, 3400);
  assert_eq!(metrics.uptime, "3d");
  assert_eq!(metrics.build_status, "unknown");
}

#[test]
fn test_lists_wrapped_and_bare() {
  let (url, _) = stub_server(vec![
    Route::ok(
      "/api/v1/cron/list",
      r#"{"result": {"jobs": [{"id": "a", "state": "ok"}, {"id": "b"}]}}"#,
    ),
    Route::ok(
      "/api/v1/agents/list",
      r#"[{"id": "main", "model": "m1", "state": "active"}]"#,
    ),
  ]);
  let client = GatewayClient::new(&config_for(&url)).unwrap();

  let jobs = client.cron_jobs().unwrap();
  assert_eq!(jobs.len(), 2);
  assert!(jobs[0].is_ok());
  assert!(!jobs[1].is_ok());

  let agents = client.agents().unwrap();
  assert_eq!(agents.len(), 1);
  assert_eq!(agents[0].model, "m1");
}

#[test]
fn test_missing_list_key_is_empty() {
  let (url, _) =
    stub_server(vec![Route::ok("/api/v1/cron/list", r#"{"result": {}}"#)]);
  let client = GatewayClient::new(&config_for(&url)).unwrap();
  assert!(client.cron_jobs().unwrap().is_empty());
}

#[test]
fn test_non_success_status() {
  let (url, _) = stub_server(vec![Route {
    path:   "/api/v1/metrics",
    status: 500,
    body:   "internal failure".to_string(),
  }]);
  let client = GatewayClient::new(&config_for(&url)).unwrap();

  match client.fetch_json(Endpoint::Metrics) {
    Err(FetchError::Status { status, url, body }) => {
      assert_eq!(status, 500);
      assert!(url.ends_with("/api/v1/metrics"));
      assert_eq!(body, "internal failure");
    },
    other => panic!("expected status error, got {other:?}"),
  }
}

#[test]
fn test_malformed_json() {
  let (url, _) =
    stub_server(vec![Route::ok("/api/v1/agents/list", "not json at all")]);
  let client = GatewayClient::new(&config_for(&url)).unwrap();

  assert!(matches!(
    client.fetch_json(Endpoint::Agents),
    Err(FetchError::Json { .. })
  ));
}

#[test]
fn test_wrong_shape_is_json_error() {
  let (url, _) = stub_server(vec![Route::ok(
    "/api/v1/agents/list",
    r#"{"agents": "not a list"}"#,
  )]);
  let client = GatewayClient::new(&config_for(&url)).unwrap();

  assert!(matches!(client.agents(), Err(FetchError::Json { .. })));
}

#[test]
fn test_network_failure() {
  let addr = {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
  };
  let config = config_for(&format!("http://{addr}"));
  let client = GatewayClient::new(&config).unwrap();

  assert!(matches!(
    client.fetch_json(Endpoint::Metrics),
    Err(FetchError::Network { .. })
  ));
}

#[test]
fn test_timeout_is_network_error() {
  let listener = TcpListener::bind("127.0.0.1:0").unwrap();
  let addr = listener.local_addr().unwrap();
  thread::spawn(move || {
    // Accept and hold the connection without answering.
    let held: Vec<_> = listener.incoming().take(1).collect();
    thread::sleep(Duration::from_secs(5));
    drop(held);
  });

  let mut config = config_for(&format!("http://{addr}"));
  config.timeout_secs = 1;
  let client = GatewayClient::new(&config).unwrap();

  assert!(matches!(
    client.fetch_json(Endpoint::Metrics),
    Err(FetchError::Network { .. })
  ));
}

#[test]
fn test_collect_caps_lists_and_keeps_going() {
  let jobs: Vec<String> = (0..8)
    .map(|i| format!(r#"{{"id": "job-{i}", "state": "ok"}}"#))
    .collect();
  let agents: Vec<String> = (0..5)
    .map(|i| format!(r#"{{"id": "agent-{i}", "state": "standby"}}"#))
    .collect();

  let (url, _) = stub_server(vec![
    Route {
      path:   "/api/v1/metrics",
      status: 502,
      body:   "bad gateway".to_string(),
    },
    Route::ok(
      "/api/v1/cron/list",
      &format!(r#"{{"result": {{"jobs": [{}]}}}}"#, jobs.join(",")),
    ),
    Route::ok(
      "/api/v1/agents/list",
      &format!(r#"{{"result": {{"agents": [{}]}}}}"#, agents.join(",")),
    ),
  ]);
  let client = GatewayClient::new(&config_for(&url)).unwrap();

  let snapshot = collect(&client, Limits {
    max_cron_jobs: 5,
    max_agents:    3,
  });

  assert!(snapshot.has_errors());
  assert!(
    snapshot
      .metrics
      .error
      .as_deref()
      .is_some_and(|e| e.contains("HTTP 502"))
  );
  assert_eq!(snapshot.metrics.data.gateway_status, "unknown");
  assert_eq!(snapshot.cron_jobs.data.len(), 5);
  assert!(snapshot.cron_jobs.error.is_none());
  assert_eq!(snapshot.agents.data.len(), 3);
  assert_eq!(snapshot.agents.data[2].id, "agent-2");
}

#[test]
fn test_collect_from_config_with_unreachable_gateway() {
  let addr = {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
  };

  let config = config_for(&format!("http://{addr}"));
  let snapshot = DashboardSnapshot::collect_from_config(&config);

  assert!(snapshot.metrics.error.is_some());
  assert!(snapshot.cron_jobs.error.is_some());
  assert!(snapshot.agents.error.is_some());
}
