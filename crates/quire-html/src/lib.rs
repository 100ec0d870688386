//! Turns rendered documents into the files of a quire site: complete HTML
//! pages through tera templates, the dashboard view and the plain-text feeds
//! (RSS, sitemap, `llms.txt`, `robots.txt`).
pub mod dashboard;
pub mod feeds;
pub mod template;
mod types;

pub use crate::{
  dashboard::DashboardView,
  template::{PageRenderer, format_date, markdown_mirror},
  types::{Entry, sort_newest_first},
};
