// storefront/src/config.rs

use crate::error::{StoreError, StoreResult};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_AUTH_COOKIE: &str = "token";
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_PER_PAGE: u32 = 12;

#[derive(Debug, Clone)]
pub struct StoreConfig {
  /// Root of the REST API, e.g. `https://api.example.com/api`.
  pub api_base_url: Url,
  /// Name of the cookie holding the session token.
  pub auth_cookie_name: String,
  /// Quiet period before a typed search term takes effect.
  pub search_debounce: Duration,
  /// Page size used when the UI does not pick one.
  pub default_per_page: u32,
}

impl StoreConfig {
  /// Defaults for everything but the API root, which must be an absolute http(s) URL.
  pub fn new(api_base_url: &str) -> StoreResult<Self> {
    Ok(Self {
      api_base_url: parse_base_url(api_base_url)?,
      auth_cookie_name: DEFAULT_AUTH_COOKIE.to_string(),
      search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
      default_per_page: DEFAULT_PER_PAGE,
    })
  }

  pub fn from_env() -> StoreResult<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| StoreError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let api_base_url = parse_base_url(&get_env("STOREFRONT_API_URL")?)?;
    let auth_cookie_name = get_env("STOREFRONT_AUTH_COOKIE").unwrap_or_else(|_| DEFAULT_AUTH_COOKIE.to_string());
    let debounce_ms = get_env("STOREFRONT_SEARCH_DEBOUNCE_MS")
      .unwrap_or_else(|_| DEFAULT_SEARCH_DEBOUNCE_MS.to_string())
      .parse::<u64>()
      .map_err(|e| StoreError::Config(format!("Invalid STOREFRONT_SEARCH_DEBOUNCE_MS: {}", e)))?;
    let default_per_page = get_env("STOREFRONT_PER_PAGE")
      .unwrap_or_else(|_| DEFAULT_PER_PAGE.to_string())
      .parse::<u32>()
      .map_err(|e| StoreError::Config(format!("Invalid STOREFRONT_PER_PAGE: {}", e)))?;
    if default_per_page == 0 {
      return Err(StoreError::Config("STOREFRONT_PER_PAGE must be at least 1".to_string()));
    }

    tracing::info!(api = %api_base_url, "Storefront configuration loaded.");

    Ok(Self {
      api_base_url,
      auth_cookie_name,
      search_debounce: Duration::from_millis(debounce_ms),
      default_per_page,
    })
  }
}

/// Parses the API root, accepting only http(s) URLs with a host.
pub fn parse_base_url(raw: &str) -> StoreResult<Url> {
  let url = Url::parse(raw.trim()).map_err(|e| StoreError::Config(format!("Invalid API URL '{}': {}", raw, e)))?;
  if !matches!(url.scheme(), "http" | "https") {
    return Err(StoreError::Config(format!(
      "API URL must use http or https, got '{}'",
      url.scheme()
    )));
  }
  if url.host_str().map_or(true, str::is_empty) {
    return Err(StoreError::Config(format!("API URL '{}' has no host", raw)));
  }
  if url.query().is_some() || url.fragment().is_some() {
    return Err(StoreError::Config(format!(
      "API URL '{}' must not carry a query or fragment",
      raw
    )));
  }
  Ok(url)
}
