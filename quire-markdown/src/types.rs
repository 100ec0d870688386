//! Types produced by the front matter parser.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single front matter value.
///
/// `key: value` lines produce a [`MetaValue::Scalar`]; bracketed values such
/// as `tags: [a, b]` produce a [`MetaValue::List`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
  Scalar(String),
  List(Vec<String>),
}

impl MetaValue {
  /// Returns the scalar string, or `None` for lists.
  #[must_use]
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::Scalar(value) => Some(value),
      Self::List(_) => None,
    }
  }

  /// Returns the value as a list. A non-empty scalar reads as a one-element
  /// list, an empty one as no elements.
  #[must_use]
  pub fn to_list(&self) -> Vec<String> {
    match self {
      Self::Scalar(value) if value.is_empty() => Vec::new(),
      Self::Scalar(value) => vec![value.clone()],
      Self::List(items) => items.clone(),
    }
  }
}

impl From<&str> for MetaValue {
  fn from(value: &str) -> Self {
    Self::Scalar(value.to_string())
  }
}

impl From<String> for MetaValue {
  fn from(value: String) -> Self {
    Self::Scalar(value)
  }
}

impl From<Vec<String>> for MetaValue {
  fn from(items: Vec<String>) -> Self {
    Self::List(items)
  }
}

/// Front matter of one document.
///
/// Keys are unique. Iteration follows source order, with a repeated key
/// keeping the position of its first occurrence and the value of its last.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, MetaValue>);

impl Metadata {
  #[must_use]
  pub fn new() -> Self {
    Self(IndexMap::new())
  }

  #[must_use]
  pub fn get(&self, key: &str) -> Option<&MetaValue> {
    self.0.get(key)
  }

  /// Returns the value for `key` if it is a scalar.
  #[must_use]
  pub fn get_str(&self, key: &str) -> Option<&str> {
    self.0.get(key).and_then(MetaValue::as_str)
  }

  /// Returns the value for `key` as a list, empty when the key is absent.
  #[must_use]
  pub fn get_list(&self, key: &str) -> Vec<String> {
    self.0.get(key).map(MetaValue::to_list).unwrap_or_default()
  }

  /// Insert a value, returning the one it replaced.
  pub fn insert(
    &mut self,
    key: impl Into<String>,
    value: impl Into<MetaValue>,
  ) -> Option<MetaValue> {
    self.0.insert(key.into(), value.into())
  }

  #[must_use]
  pub fn contains_key(&self, key: &str) -> bool {
    self.0.contains_key(key)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
    self.0.iter().map(|(key, value)| (key.as_str(), value))
  }

  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }
}

impl FromIterator<(String, MetaValue)> for Metadata {
  fn from_iter<I: IntoIterator<Item = (String, MetaValue)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}
