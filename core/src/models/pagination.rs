// storefront/src/models/pagination.rs

//! The backend's paging envelope, kept verbatim for the UI pagers.

use super::de;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
  #[serde(default)]
  pub first: Option<String>,
  #[serde(default)]
  pub last: Option<String>,
  #[serde(default)]
  pub prev: Option<String>,
  #[serde(default)]
  pub next: Option<String>,
}

/// One pager button descriptor (`« Previous`, `1`, `2`, `Next »`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaLink {
  #[serde(default)]
  pub url: Option<String>,
  pub label: String,
  #[serde(default)]
  pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
  #[serde(deserialize_with = "de::count")]
  pub current_page: u32,
  #[serde(deserialize_with = "de::count")]
  pub last_page: u32,
  #[serde(deserialize_with = "de::count")]
  pub per_page: u32,
  #[serde(deserialize_with = "de::total")]
  pub total: u64,
  #[serde(default, deserialize_with = "de::opt_total")]
  pub from: Option<u64>,
  #[serde(default, deserialize_with = "de::opt_total")]
  pub to: Option<u64>,
  #[serde(default)]
  pub path: Option<String>,
  #[serde(default)]
  pub links: Vec<MetaLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
  pub data: Vec<T>,
  #[serde(default)]
  pub links: PageLinks,
  pub meta: PageMeta,
}

/// What the UI asks for: a 1-based page and a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  pub page: u32,
  pub per_page: u32,
}

impl PageRequest {
  pub fn new(page: u32, per_page: u32) -> Self {
    Self { page, per_page }
  }

  pub fn first(per_page: u32) -> Self {
    Self::new(1, per_page)
  }

  pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
    vec![("page", self.page.to_string()), ("per_page", self.per_page.to_string())]
  }
}

/// Resource responses arrive wrapped as `{"data": ...}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
  pub data: T,
}
