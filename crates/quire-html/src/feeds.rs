//! Plain-text site files: RSS, sitemap, `llms.txt` and `robots.txt`.
//!
//! Each function expects posts sorted newest first, as produced by
//! [`crate::sort_newest_first`].
use std::fmt::Write;

use jiff::civil::Date;
use quire_config::Config;

use crate::types::Entry;

/// Escape the five XML special characters.
#[must_use]
pub fn escape_xml(text: &str) -> String {
  let mut escaped = String::with_capacity(text.len());
  for c in text.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&apos;"),
      _ => escaped.push(c),
    }
  }
  escaped
}

/// RFC 2822 date for a `YYYY-MM-DD` string, at midnight UTC.
fn rfc2822_date(date: &str) -> Option<String> {
  Date::strptime("%Y-%m-%d", date.trim())
    .ok()
    .map(|date| date.strftime("%a, %d %b %Y 00:00:00 +0000").to_string())
}

fn post_url(config: &Config, post: &Entry) -> String {
  format!("{}/blog/{}.html", config.site.base_url(), post.slug)
}

/// RSS 2.0 feed of the most recent posts.
#[must_use]
pub fn rss(config: &Config, posts: &[Entry]) -> String {
  let site = &config.site;
  let base = site.base_url();

  let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
  xml.push_str(
    "<rss version=\"2.0\" xmlns:atom=\"http://www.w3.org/2005/Atom\">\n",
  );
  xml.push_str("<channel>\n");
  // Writing to String is infallible
  let _ = writeln!(xml, "  <title>{}</title>", escape_xml(&site.name));
  let _ = writeln!(xml, "  <link>{}/</link>", escape_xml(base));
  let _ = writeln!(
    xml,
    "  <description>{}</description>",
    escape_xml(&site.description)
  );
  xml.push_str("  <language>en-us</language>\n");
  let _ = writeln!(
    xml,
    "  <atom:link href=\"{}/rss.xml\" rel=\"self\" \
     type=\"application/rss+xml\"/>",
    escape_xml(base)
  );

  for post in posts.iter().take(config.feeds.rss_items) {
    let link = escape_xml(&post_url(config, post));
    let description: String = post
      .description
      .chars()
      .take(config.feeds.description_chars)
      .collect();

    xml.push_str("  <item>\n");
    let _ = writeln!(xml, "    <title>{}</title>", escape_xml(&post.title));
    let _ = writeln!(xml, "    <link>{link}</link>");
    let _ = writeln!(xml, "    <guid isPermaLink=\"true\">{link}</guid>");
    let _ = writeln!(
      xml,
      "    <description>{}</description>",
      escape_xml(&description)
    );
    if let Some(pub_date) = rfc2822_date(&post.date) {
      let _ = writeln!(xml, "    <pubDate>{pub_date}</pubDate>");
    }
    xml.push_str("  </item>\n");
  }

  xml.push_str("</channel>\n</rss>\n");
  xml
}

/// Sitemap of every generated page.
#[must_use]
pub fn sitemap(
  config: &Config,
  posts: &[Entry],
  pages: &[Entry],
  dashboard: bool,
) -> String {
  let base = config.site.base_url();
  let mut urls = vec![format!("{base}/")];
  urls.extend(
    pages
      .iter()
      .filter(|page| page.slug != "index")
      .map(|page| format!("{base}/{}.html", page.slug)),
  );
  urls.push(format!("{base}/blog/"));
  urls.extend(posts.iter().map(|post| post_url(config, post)));
  if dashboard {
    urls.push(format!("{base}/dashboard.html"));
  }

  let mut xml = String::from(
    "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset \
     xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
  );
  for url in urls {
    let _ = writeln!(xml, "  <url><loc>{}</loc></url>", escape_xml(&url));
  }
  xml.push_str("</urlset>\n");
  xml
}

/// `llms.txt`: a Markdown overview of the site for language models.
#[must_use]
pub fn llms_txt(config: &Config, posts: &[Entry], pages: &[Entry]) -> String {
  let site = &config.site;
  let base = site.base_url();

  let mut out = format!("# {}\n\n> {}\n\n## Pages\n\n", site.name, site.description);
  let _ = writeln!(out, "- [Blog]({base}/blog/)");
  for page in pages.iter().filter(|page| page.slug != "index") {
    let _ = writeln!(out, "- [{}]({base}/{}.html)", page.title, page.slug);
  }

  out.push_str("\n## Recent Posts\n\n");
  for post in posts.iter().take(config.feeds.llms_items) {
    let _ = writeln!(out, "- [{}]({})", post.title, post_url(config, post));
  }

  out.push_str(
    "\n## For LLMs\n\nAppend .md to any post or page URL to get its \
     Markdown source.\n",
  );
  out
}

#[must_use]
pub fn robots_txt(config: &Config) -> String {
  format!(
    "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
    config.site.base_url()
  )
}
