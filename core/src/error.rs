// storefront/src/error.rs
use anyhow::Error as AnyhowError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
  /// No session token was available, the request never left the client.
  #[error("Unauthorized: no session token available")]
  Unauthorized,

  #[error("API error ({status}): {message}")]
  Api { status: u16, message: String },

  #[error("Transport error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("Malformed response from '{endpoint}'. Source: {source}")]
  Decode {
    endpoint: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Internal error: {0}")]
  Internal(String),
}

impl StoreError {
  /// Status code reported to the UI alongside the message, when there is one.
  pub fn status(&self) -> Option<u16> {
    match self {
      StoreError::Unauthorized => Some(401),
      StoreError::Api { status, .. } => Some(*status),
      StoreError::Transport(e) => e.status().map(|s| s.as_u16()),
      StoreError::Validation(_) => Some(422),
      StoreError::Decode { .. } | StoreError::Config(_) | StoreError::Internal(_) => None,
    }
  }

  /// Collapses the error into the message/status pair rendered inline by the UI.
  pub fn failure(&self) -> ApiFailure {
    let message = match self {
      StoreError::Api { message, .. } | StoreError::Validation(message) => message.clone(),
      other => other.to_string(),
    };
    ApiFailure {
      message,
      status: self.status(),
    }
  }
}

impl From<AnyhowError> for StoreError {
  fn from(err: AnyhowError) -> Self {
    StoreError::Internal(format!("{:#}", err))
  }
}

/// UI-facing failure: what an inline banner shows next to a retry button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiFailure {
  pub message: String,
  pub status: Option<u16>,
}

pub type StoreResult<T, E = StoreError> = std::result::Result<T, E>;
