// storefront/src/models/content.rs

//! Editable site content: FAQ, contact details, terms and conditions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
  pub id: u64,
  pub question: String,
  pub answer: String,
  #[serde(default)]
  pub position: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FaqDraft {
  pub question: String,
  pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo {
  pub name: String,
  #[serde(default)]
  pub email: Option<String>,
  #[serde(default)]
  pub phone: Option<String>,
  #[serde(default)]
  pub address: Option<String>,
  #[serde(default)]
  pub whatsapp: Option<String>,
  #[serde(default)]
  pub instagram: Option<String>,
  #[serde(default)]
  pub facebook: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terms {
  pub content: String,
  #[serde(default)]
  pub updated_at: Option<DateTime<Utc>>,
}
