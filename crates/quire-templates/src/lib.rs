use std::collections::HashMap;

pub const BASE_TEMPLATE: &str = include_str!("../templates/base.html");
pub const NAV_TEMPLATE: &str = include_str!("../templates/nav.html");
pub const FOOTER_TEMPLATE: &str = include_str!("../templates/footer.html");
pub const POST_TEMPLATE: &str = include_str!("../templates/post.html");
pub const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");
pub const BLOG_INDEX_TEMPLATE: &str =
  include_str!("../templates/blog_index.html");
pub const DASHBOARD_TEMPLATE: &str =
  include_str!("../templates/dashboard.html");

pub const DEFAULT_CSS: &str = include_str!("../templates/style.css");

#[must_use]
pub fn all_templates() -> HashMap<&'static str, &'static str> {
  let mut templates = HashMap::new();
  templates.insert("base.html", BASE_TEMPLATE);
  templates.insert("nav.html", NAV_TEMPLATE);
  templates.insert("footer.html", FOOTER_TEMPLATE);
  templates.insert("post.html", POST_TEMPLATE);
  templates.insert("page.html", PAGE_TEMPLATE);
  templates.insert("blog_index.html", BLOG_INDEX_TEMPLATE);
  templates.insert("dashboard.html", DASHBOARD_TEMPLATE);
  templates.insert("style.css", DEFAULT_CSS);
  templates
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_all_templates_are_listed() {
    let templates = all_templates();
    assert_eq!(templates.len(), 8);
    assert_eq!(templates["base.html"], BASE_TEMPLATE);
    assert_eq!(templates["style.css"], DEFAULT_CSS);
  }

  #[test]
  fn test_base_template_slots() {
    for slot in ["{{ nav_html }}", "{{ content }}", "{{ footer_html }}"] {
      assert!(BASE_TEMPLATE.contains(slot), "base.html lacks {slot}");
    }
  }
}
