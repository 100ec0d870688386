//! Whole-site generation.
use std::fs;

use color_eyre::eyre::{Context, Result};
use log::{info, warn};
use quire_config::Config;
use quire_gateway::DashboardSnapshot;
use quire_html::{
  Entry,
  PageRenderer,
  feeds,
  markdown_mirror,
  sort_newest_first,
};
use quire_markdown::MarkdownRenderer;
use rayon::prelude::*;

use crate::utils::{
  copy_assets,
  load_entries,
  output::{write_file, write_output},
};

/// What a build produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
  pub pages:     usize,
  pub posts:     usize,
  pub dashboard: bool,
}

/// Build the whole site into `config.output_dir`.
///
/// Documents are rendered on a pool of `config.jobs` threads while the
/// dashboard data is collected alongside. A gateway failure only degrades
/// the dashboard; it never fails the build.
///
/// # Errors
///
/// Returns an error if a content file cannot be read, a template fails to
/// render or an output file cannot be written.
pub fn generate_site(config: &Config) -> Result<BuildSummary> {
  info!("Starting site generation...");

  fs::create_dir_all(config.output_dir.join("blog")).wrap_err_with(|| {
    format!(
      "Failed to create output directory: {}",
      config.output_dir.display()
    )
  })?;
  info!("Output directory: {}", config.output_dir.display());

  let thread_count = config.jobs.unwrap_or_else(num_cpus::get);
  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build()
    .wrap_err("Failed to build thread pool")?;

  pool.install(|| build(config))
}

fn build(config: &Config) -> Result<BuildSummary> {
  let (snapshot, documents) = rayon::join(
    || {
      config
        .gateway
        .enable
        .then(|| DashboardSnapshot::collect_from_config(&config.gateway))
    },
    || render_documents(config),
  );
  let (pages, posts) = documents?;

  copy_assets(config)?;
  write_output(config, "robots.txt", &feeds::robots_txt(config))?;

  let renderer = PageRenderer::new(config)?
    .with_pages(&pages)
    .with_dashboard(snapshot.is_some());

  pages.par_iter().try_for_each(|page| {
    write_output(
      config,
      &format!("{}.html", page.slug),
      &renderer.render_page(page)?,
    )?;
    write_output(
      config,
      &format!("{}.md", page.slug),
      &format!("{}\n", page.markdown),
    )
  })?;

  posts.par_iter().try_for_each(|post| {
    write_output(
      config,
      &format!("blog/{}.html", post.slug),
      &renderer.render_post(post)?,
    )?;
    write_output(
      config,
      &format!("blog/{}.md", post.slug),
      &markdown_mirror(config, post),
    )
  })?;

  if posts.is_empty() {
    warn!("No posts found in {}", config.posts_dir().display());
  } else {
    write_output(
      config,
      "blog/index.html",
      &renderer.render_blog_index(&posts)?,
    )?;
    write_output(config, "rss.xml", &feeds::rss(config, &posts))?;
    write_output(
      config,
      "llms.txt",
      &feeds::llms_txt(config, &posts, &pages),
    )?;
    write_output(
      config,
      "sitemap.xml",
      &feeds::sitemap(config, &posts, &pages, snapshot.is_some()),
    )?;
  }

  if !pages.iter().any(|page| page.slug == "index") {
    info!("No index page found, creating fallback index.html");
    write_output(config, "index.html", &renderer.render_home(&posts)?)?;
  }

  if let Some(ref snapshot) = snapshot {
    let content = write_dashboard_data(config, &renderer, snapshot)?;
    write_output(
      config,
      "dashboard.html",
      &renderer.render_dashboard(&content)?,
    )?;
  }

  let summary = BuildSummary {
    pages:     pages.len(),
    posts:     posts.len(),
    dashboard: snapshot.is_some(),
  };
  info!(
    "Site generated: {} pages, {} posts{}",
    summary.pages,
    summary.posts,
    if summary.dashboard { ", dashboard" } else { "" }
  );
  Ok(summary)
}

/// Render pages and posts. Posts come back newest first.
fn render_documents(config: &Config) -> Result<(Vec<Entry>, Vec<Entry>)> {
  let markdown = MarkdownRenderer::new(config.markdown.to_render_options());

  let (pages, posts) = rayon::join(
    || load_entries(&config.pages_dir(), &markdown),
    || load_entries(&config.posts_dir(), &markdown),
  );
  let mut posts = posts?;
  sort_newest_first(&mut posts);

  Ok((pages?, posts))
}

/// Write `data/metrics.json` and `data/dashboard-content.html`, returning the
/// rendered dashboard fragment.
fn write_dashboard_data(
  config: &Config,
  renderer: &PageRenderer<'_>,
  snapshot: &DashboardSnapshot,
) -> Result<String> {
  let metrics_path = config.data_dir.join("metrics.json");
  snapshot.write_json(&metrics_path).wrap_err_with(|| {
    format!("Failed to write {}", metrics_path.display())
  })?;

  let content = renderer.render_dashboard_content(snapshot)?;
  write_file(&config.data_dir.join("dashboard-content.html"), &content)?;
  info!("Dashboard data written to {}", config.data_dir.display());

  Ok(content)
}

/// Collect gateway data and refresh the dashboard snapshot files without
/// building the site.
///
/// # Errors
///
/// Returns an error if the templates cannot be loaded or a snapshot file
/// cannot be written. Gateway failures are recorded in the snapshot.
pub fn update_dashboard_data(config: &Config) -> Result<DashboardSnapshot> {
  let snapshot = DashboardSnapshot::collect_from_config(&config.gateway);
  if snapshot.has_errors() {
    warn!("Dashboard data is incomplete, see metrics.json for details");
  }

  let renderer = PageRenderer::new(config)?.with_dashboard(true);
  write_dashboard_data(config, &renderer, &snapshot)?;
  Ok(snapshot)
}
