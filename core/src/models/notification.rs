// storefront/src/models/notification.rs

use super::de;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
  pub id: u64,
  pub title: String,
  pub message: String,
  #[serde(default, deserialize_with = "de::flag")]
  pub read: bool,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationDraft {
  pub title: String,
  pub message: String,
}
