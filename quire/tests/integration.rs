#![allow(clippy::expect_used, clippy::panic, reason = "Fine in tests")]
use std::{fs, net::TcpListener, path::Path};

use quire::site::{generate_site, update_dashboard_data};
use quire_config::Config;
use tempfile::{TempDir, tempdir};

fn write(path: &Path, content: &str) {
  fs::create_dir_all(path.parent().expect("path has a parent"))
    .expect("Failed to create dir in test");
  fs::write(path, content).expect("Failed to write file in test");
}

fn read(path: &Path) -> String {
  fs::read_to_string(path)
    .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}

/// A content tree with two posts and one page, plus a config pointing at it.
fn site_fixture() -> (TempDir, Config) {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let root = temp_dir.path();

  write(
    &root.join("content/posts/hello.md"),
    "---\ntitle: Hello World\ndate: 2024-01-01\ndescription: The first \
     post\ntags: [intro, meta]\n---\n# Hello\n\nSee [the next \
     one](second.md).\n\n---\n\n```rust\nlet x = 1;\n```",
  );
  write(
    &root.join("content/posts/second.md"),
    "---\ntitle: Second\ndate: 2024-02-01\n---\n- one\n- two",
  );
  write(
    &root.join("content/pages/about.md"),
    "---\ntitle: About\n---\nAbout **me**.",
  );

  let mut config = Config {
    content_dir: root.join("content"),
    output_dir: root.join("build"),
    data_dir: root.join("data"),
    jobs: Some(2),
    ..Default::default()
  };
  config.site.url = "https://example.com".to_string();
  config.gateway.enable = false;

  (temp_dir, config)
}

#[test]
fn test_full_site_build() {
  let (_temp_dir, config) = site_fixture();
  let out = &config.output_dir;

  let summary = generate_site(&config).expect("site builds");
  assert_eq!(summary.pages, 1);
  assert_eq!(summary.posts, 2);
  assert!(!summary.dashboard);

  for file in [
    "index.html",
    "about.html",
    "about.md",
    "blog/index.html",
    "blog/hello.html",
    "blog/hello.md",
    "blog/second.html",
    "blog/second.md",
    "css/style.css",
    "rss.xml",
    "sitemap.xml",
    "llms.txt",
    "robots.txt",
  ] {
    assert!(out.join(file).is_file(), "{file} should be generated");
  }
  assert!(!out.join("dashboard.html").exists());
  assert!(!config.data_dir.exists());

  let hello = read(&out.join("blog/hello.html"));
  assert!(hello.contains("<h1>Hello</h1>"));
  assert!(hello.contains(r#"<a href="second.html">the next one</a>"#));
  assert!(hello.contains("<hr>"));
  assert!(hello.contains("<pre><code>let x = 1;\n</code></pre>"));
  assert!(hello.contains("Mon, 01 Jan 2024"));
  assert!(hello.contains(r#"href="../about.html""#));

  let second = read(&out.join("blog/second.html"));
  assert!(second.contains("<ul><li>one</li><li>two</li></ul>"));

  let about = read(&out.join("about.html"));
  assert!(about.contains("<p>About <strong>me</strong>.</p>"));
  assert_eq!(read(&out.join("about.md")), "About **me**.\n");
}

#[test]
fn test_blog_index_and_feeds_are_newest_first() {
  let (_temp_dir, config) = site_fixture();
  let out = &config.output_dir;
  generate_site(&config).expect("site builds");

  let index = read(&out.join("blog/index.html"));
  let second = index.find("second.html").expect("second is listed");
  let hello = index.find("hello.html").expect("hello is listed");
  assert!(second < hello);

  let rss = read(&out.join("rss.xml"));
  assert!(
    rss.find("blog/second.html").expect("second in feed")
      < rss.find("blog/hello.html").expect("hello in feed")
  );
  assert!(rss.contains("<description>The first post</description>"));

  let sitemap = read(&out.join("sitemap.xml"));
  assert!(sitemap.contains("<loc>https://example.com/about.html</loc>"));
  assert!(!sitemap.contains("dashboard.html"));

  assert_eq!(
    read(&out.join("robots.txt")),
    "User-agent: *\nAllow: /\n\nSitemap: https://example.com/sitemap.xml\n"
  );

  let mirror = read(&out.join("blog/hello.md"));
  assert!(mirror.starts_with(
    "# Hello World\n\n**Date:** 2024-01-01\n**URL:** \
     https://example.com/blog/hello.html\n\n# Hello\n"
  ));
}

#[test]
fn test_index_page_replaces_fallback() {
  let (temp_dir, config) = site_fixture();
  write(
    &temp_dir.path().join("content/pages/index.md"),
    "---\ntitle: Welcome\n---\nHome sweet home.",
  );

  generate_site(&config).expect("site builds");
  let index = read(&config.output_dir.join("index.html"));
  assert!(index.contains("<p>Home sweet home.</p>"));
  assert!(!index.contains("Recent Posts"));
}

#[test]
fn test_site_without_posts() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let root = temp_dir.path();
  write(&root.join("content/pages/about.md"), "Just a page.");

  let mut config = Config {
    content_dir: root.join("content"),
    output_dir: root.join("build"),
    ..Default::default()
  };
  config.gateway.enable = false;

  let summary = generate_site(&config).expect("site builds");
  assert_eq!(summary.posts, 0);
  assert!(config.output_dir.join("index.html").is_file());
  assert!(config.output_dir.join("about.html").is_file());
  assert!(!config.output_dir.join("rss.xml").exists());
  assert!(!config.output_dir.join("blog/index.html").exists());
}

#[test]
fn test_basic_markdown_options() {
  let (_temp_dir, mut config) = site_fixture();
  config.markdown.fenced_code = false;
  config.markdown.horizontal_rules = false;
  config.markdown.rewrite_md_links = false;

  generate_site(&config).expect("site builds");
  let hello = read(&config.output_dir.join("blog/hello.html"));
  assert!(hello.contains(r#"<a href="second.md">the next one</a>"#));
  assert!(!hello.contains("<hr>"));
  assert!(!hello.contains("<pre>"));
}

#[test]
fn test_unreachable_gateway_does_not_fail_build() {
  let addr = {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().expect("local addr")
  };

  let (_temp_dir, mut config) = site_fixture();
  config.gateway.enable = true;
  config.gateway.url = format!("http://{addr}");
  config.gateway.timeout_secs = 2;

  let summary = generate_site(&config).expect("site builds");
  assert!(summary.dashboard);

  let dashboard = read(&config.output_dir.join("dashboard.html"));
  assert!(dashboard.contains("No cron jobs configured"));
  assert!(dashboard.contains("No agents configured"));
  assert!(dashboard.contains("metrics-error"));

  let metrics: serde_json::Value =
    serde_json::from_str(&read(&config.data_dir.join("metrics.json")))
      .expect("metrics.json is JSON");
  assert!(metrics["metrics"]["error"].is_string());
  assert!(config.data_dir.join("dashboard-content.html").is_file());

  let sitemap = read(&config.output_dir.join("sitemap.xml"));
  assert!(sitemap.contains("https://example.com/dashboard.html"));
  let about = read(&config.output_dir.join("about.html"));
  assert!(about.contains(r#"href="dashboard.html""#));
}

#[test]
fn test_dashboard_command_writes_data_only() {
  let addr = {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().expect("local addr")
  };

  let (_temp_dir, mut config) = site_fixture();
  config.gateway.url = format!("http://{addr}");
  config.gateway.timeout_secs = 2;

  let snapshot = update_dashboard_data(&config).expect("dashboard data");
  assert!(snapshot.has_errors());
  assert!(config.data_dir.join("metrics.json").is_file());
  assert!(config.data_dir.join("dashboard-content.html").is_file());
  assert!(!config.output_dir.join("dashboard.html").exists());
}
