use std::{fmt::Write, fs};

use color_eyre::eyre::{Context, Result};
use html_escape::{encode_double_quoted_attribute, encode_text};
use jiff::civil::Date;
use log::debug;
use quire_config::Config;
use quire_gateway::DashboardSnapshot;
use quire_templates as templates;
use serde::Serialize;
use tera::Tera;

use crate::{dashboard::DashboardView, types::Entry};

/// Template names and their embedded defaults. A file named `<name>.html` in
/// the template directory replaces the default.
const TEMPLATES: [(&str, &str); 7] = [
  ("base", templates::BASE_TEMPLATE),
  ("nav", templates::NAV_TEMPLATE),
  ("footer", templates::FOOTER_TEMPLATE),
  ("post", templates::POST_TEMPLATE),
  ("page", templates::PAGE_TEMPLATE),
  ("blog_index", templates::BLOG_INDEX_TEMPLATE),
  ("dashboard", templates::DASHBOARD_TEMPLATE),
];

#[derive(Debug, Clone, Serialize)]
struct NavLink {
  slug:  String,
  title: String,
}

#[derive(Debug, Clone, Serialize)]
struct PostCard {
  slug:        String,
  title:       String,
  date:        String,
  description: String,
}

/// Wraps rendered fragments in complete HTML documents.
///
/// Templates are loaded once in [`PageRenderer::new`]. The renderer is `Sync`
/// and can be shared by the threads rendering posts.
#[derive(Debug)]
pub struct PageRenderer<'a> {
  config:        &'a Config,
  tera:          Tera,
  nav_pages:     Vec<NavLink>,
  has_dashboard: bool,
}

impl<'a> PageRenderer<'a> {
  /// Load every template, preferring overrides from `config.template_dir`.
  ///
  /// # Errors
  ///
  /// Returns an error if an override cannot be read or a template does not
  /// parse.
  pub fn new(config: &'a Config) -> Result<Self> {
    let mut tera = Tera::default();
    // Values are escaped before they reach a context.
    tera.autoescape_on(Vec::new());

    for (name, fallback) in TEMPLATES {
      let content =
        get_template_content(config, &format!("{name}.html"), fallback)?;
      tera
        .add_raw_template(name, &content)
        .wrap_err_with(|| format!("Failed to parse template '{name}'"))?;
    }

    Ok(Self {
      config,
      tera,
      nav_pages: Vec::new(),
      has_dashboard: false,
    })
  }

  /// Link `pages` from the navigation bar. The `index` page is reached
  /// through the Home link instead.
  #[must_use]
  pub fn with_pages(mut self, pages: &[Entry]) -> Self {
    self.nav_pages = pages
      .iter()
      .filter(|page| page.slug != "index")
      .map(|page| {
        NavLink {
          slug:  attr(&page.slug),
          title: text(&page.title),
        }
      })
      .collect();
    self
  }

  /// Link the dashboard from the navigation bar and footer.
  #[must_use]
  pub const fn with_dashboard(mut self, has_dashboard: bool) -> Self {
    self.has_dashboard = has_dashboard;
    self
  }

  /// Render `blog/<slug>.html`.
  ///
  /// # Errors
  ///
  /// Returns an error if a template fails to render.
  pub fn render_post(&self, post: &Entry) -> Result<String> {
    let mut context = tera::Context::new();
    context.insert("date", &text(&format_date(&post.date)));
    context.insert("title", &text(&post.title));
    context.insert(
      "tags",
      &post.tags.iter().map(|tag| text(tag)).collect::<Vec<_>>(),
    );
    context.insert("content", &post.html);
    let content = self.render_template("post", &context)?;

    self.render_document(
      &format!("blog/{}.html", post.slug),
      &post.title,
      &post.description,
      &content,
    )
  }

  /// Render `<slug>.html`.
  ///
  /// # Errors
  ///
  /// Returns an error if a template fails to render.
  pub fn render_page(&self, page: &Entry) -> Result<String> {
    let mut context = tera::Context::new();
    context.insert("title", &text(&page.title));
    context.insert("content", &page.html);
    let content = self.render_template("page", &context)?;

    let description = if page.description.is_empty() {
      &self.config.site.description
    } else {
      &page.description
    };
    self.render_document(
      &format!("{}.html", page.slug),
      &page.title,
      description,
      &content,
    )
  }

  /// Render `blog/index.html`, listing `posts` in the given order.
  ///
  /// # Errors
  ///
  /// Returns an error if a template fails to render.
  pub fn render_blog_index(&self, posts: &[Entry]) -> Result<String> {
    let site = &self.config.site;
    let cards: Vec<PostCard> = posts
      .iter()
      .map(|post| {
        PostCard {
          slug:        attr(&post.slug),
          title:       text(&post.title),
          date:        text(&format_date(&post.date)),
          description: text(&post.description),
        }
      })
      .collect();

    let mut context = tera::Context::new();
    context.insert("tagline", &text(&site.tagline));
    context.insert("posts", &cards);
    let content = self.render_template("blog_index", &context)?;

    self.render_document(
      "blog/index.html",
      "Blog",
      &format!("{} - Blog - {}", site.name, site.tagline),
      &content,
    )
  }

  /// Render a home page for sites without an `index` page: the site name,
  /// its tagline and the most recent posts.
  ///
  /// # Errors
  ///
  /// Returns an error if a template fails to render.
  pub fn render_home(&self, posts: &[Entry]) -> Result<String> {
    let site = &self.config.site;
    let mut content = format!(
      "<header class=\"page-header\">\n  <h1>{}</h1>\n  <p \
       class=\"tagline\">{}</p>\n</header>\n",
      text(&site.name),
      text(&site.tagline)
    );

    if !posts.is_empty() {
      content.push_str(
        "\n<section class=\"posts\">\n  <h2>Recent Posts</h2>\n  <ul \
         class=\"post-list\">\n",
      );
      for post in posts.iter().take(self.config.feeds.rss_items) {
        // Writing to String is infallible
        let _ = writeln!(
          content,
          "    <li><span class=\"post-date\">{}</span> <a \
           href=\"blog/{}.html\">{}</a></li>",
          text(&format_date(&post.date)),
          attr(&post.slug),
          text(&post.title)
        );
      }
      content.push_str(
        "  </ul>\n  <p><a href=\"blog/\">All posts</a></p>\n</section>\n",
      );
    }

    self.render_document("index.html", &site.name, &site.description, &content)
  }

  /// Render the dashboard fragment, the part of `dashboard.html` between
  /// navigation and footer.
  ///
  /// # Errors
  ///
  /// Returns an error if the dashboard template fails to render.
  pub fn render_dashboard_content(
    &self,
    snapshot: &DashboardSnapshot,
  ) -> Result<String> {
    let view = DashboardView::new(&self.config.site.name, snapshot);
    let context = tera::Context::from_serialize(&view)
      .wrap_err("Failed to build dashboard context")?;
    self.render_template("dashboard", &context)
  }

  /// Wrap a dashboard fragment into `dashboard.html`.
  ///
  /// # Errors
  ///
  /// Returns an error if a template fails to render.
  pub fn render_dashboard(&self, content: &str) -> Result<String> {
    self.render_document(
      "dashboard.html",
      "Dashboard",
      &format!("{} - Dashboard", self.config.site.name),
      content,
    )
  }

  /// Wrap `content` in the page shell. `rel_path` is the output path relative
  /// to the site root, using `/` separators.
  fn render_document(
    &self,
    rel_path: &str,
    title: &str,
    description: &str,
    content: &str,
  ) -> Result<String> {
    let site = &self.config.site;
    let root = root_prefix(rel_path);

    let mut context = tera::Context::new();
    context.insert("root", &root);
    context.insert("site_name", &text(&site.name));
    context.insert("has_dashboard", &self.has_dashboard);

    let mut nav = context.clone();
    nav.insert("tagline", &text(&site.tagline));
    nav.insert("pages", &self.nav_pages);
    let nav_html = self.render_template("nav", &nav)?;

    let mut footer = context.clone();
    footer.insert("footer_text", &text(&site.footer_text));
    let footer_html = self.render_template("footer", &footer)?;

    context.insert("title", &text(title));
    context.insert("description", &attr(description));
    context.insert("canonical", &attr(&canonical_url(site.base_url(), rel_path)));
    context.insert("stylesheet_path", &format!("{root}css/style.css"));
    context.insert("nav_html", &nav_html);
    context.insert("footer_html", &footer_html);
    context.insert("content", content);

    debug!("Rendering {rel_path}");
    self.render_template("base", &context)
  }

  fn render_template(
    &self,
    name: &str,
    context: &tera::Context,
  ) -> Result<String> {
    self
      .tera
      .render(name, context)
      .wrap_err_with(|| format!("Failed to render template '{name}'"))
  }
}

/// Read `template_dir/<template_name>` when it exists, else `fallback`.
fn get_template_content(
  config: &Config,
  template_name: &str,
  fallback: &str,
) -> Result<String> {
  if let Some(template_path) = config.get_template_file(template_name)
    && template_path.exists()
  {
    debug!("Using template override {}", template_path.display());
    return fs::read_to_string(&template_path).wrap_err_with(|| {
      format!("Failed to read template file: {}", template_path.display())
    });
  }
  Ok(fallback.to_string())
}

/// `../` once per directory level of `rel_path`.
fn root_prefix(rel_path: &str) -> String {
  "../".repeat(rel_path.matches('/').count())
}

fn canonical_url(base_url: &str, rel_path: &str) -> String {
  if rel_path == "index.html" {
    format!("{base_url}/")
  } else {
    format!("{base_url}/{rel_path}")
  }
}

fn text(value: &str) -> String {
  encode_text(value).into_owned()
}

fn attr(value: &str) -> String {
  encode_double_quoted_attribute(value).into_owned()
}

/// Format a `YYYY-MM-DD` date as `Mon, 01 Jan 2024`. Anything else is
/// returned unchanged.
#[must_use]
pub fn format_date(date: &str) -> String {
  Date::strptime("%Y-%m-%d", date.trim()).map_or_else(
    |_| date.to_string(),
    |parsed| parsed.strftime("%a, %d %b %Y").to_string(),
  )
}

/// Markdown companion of a post, published next to it as `<slug>.md`.
#[must_use]
pub fn markdown_mirror(config: &Config, post: &Entry) -> String {
  format!(
    "# {}\n\n**Date:** {}\n**URL:** {}/blog/{}.html\n\n{}\n",
    post.title,
    post.date,
    config.site.base_url(),
    post.slug,
    post.markdown
  )
}
