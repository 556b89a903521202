// storefront/src/models/user.rs

use super::de;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
  pub id: u64,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub id: u64,
  pub name: String,
  pub email: String,
  #[serde(default)]
  pub role: Option<Role>,
  #[serde(default = "active_by_default", deserialize_with = "de::flag")]
  pub active: bool,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

fn active_by_default() -> bool {
  true
}

/// Body for creating a back-office or customer account.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
  pub name: String,
  pub email: String,
  pub password: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub role_id: Option<u64>,
}

/// Partial update; absent fields are left alone by the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub current_password: Option<String>,
  pub password: String,
  pub password_confirmation: String,
}

impl PasswordChange {
  pub fn matches(&self) -> bool {
    self.password == self.password_confirmation
  }
}
