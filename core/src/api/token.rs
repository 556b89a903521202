// storefront/src/api/token.rs

//! Where the bearer token comes from.

use parking_lot::RwLock;
use percent_encoding::percent_decode_str;
use std::collections::HashMap;

/// Supplies the session token attached to every backend request.
///
/// Returning `None` makes the backend fail the call with
/// `StoreError::Unauthorized` before any network I/O.
pub trait TokenSource: Send + Sync {
  fn bearer_token(&self) -> Option<String>;
}

/// Reads the token from a cookie jar, the way the browser session stores it.
#[derive(Debug)]
pub struct CookieToken {
  cookie_name: String,
  jar: RwLock<HashMap<String, String>>,
}

impl CookieToken {
  pub fn new(cookie_name: impl Into<String>) -> Self {
    Self {
      cookie_name: cookie_name.into(),
      jar: RwLock::new(HashMap::new()),
    }
  }

  /// Seeds the jar from a `Cookie:` header value (`a=1; token=12%7Cabc`).
  ///
  /// Values are percent-decoded, so a Sanctum token stored by the browser as
  /// `12%7Cabc` is sent as `12|abc`.
  pub fn from_header(cookie_name: impl Into<String>, header: &str) -> Self {
    let token = Self::new(cookie_name);
    {
      let mut jar = token.jar.write();
      for pair in header.split(';') {
        if let Some((name, value)) = pair.split_once('=') {
          let value = value.trim().trim_matches('"');
          let value = percent_decode_str(value).decode_utf8_lossy().into_owned();
          jar.insert(name.trim().to_string(), value);
        }
      }
    }
    token
  }

  pub fn cookie_name(&self) -> &str {
    &self.cookie_name
  }

  /// Stores an already decoded cookie value.
  pub fn set_cookie(&self, name: impl Into<String>, value: impl Into<String>) {
    self.jar.write().insert(name.into(), value.into());
  }

  /// Stores the session token after a successful login.
  pub fn sign_in(&self, token: impl Into<String>) {
    let name = self.cookie_name.clone();
    self.set_cookie(name, token);
  }

  pub fn sign_out(&self) {
    self.jar.write().remove(&self.cookie_name);
  }
}

impl TokenSource for CookieToken {
  fn bearer_token(&self) -> Option<String> {
    self
      .jar
      .read()
      .get(&self.cookie_name)
      .filter(|v| !v.is_empty())
      .cloned()
  }
}

/// A fixed token, for CLIs and server-side callers that already hold one.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

impl TokenSource for StaticToken {
  fn bearer_token(&self) -> Option<String> {
    self.0.clone().filter(|v| !v.is_empty())
  }
}
