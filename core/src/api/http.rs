// storefront/src/api/http.rs

//! REST implementation of the backend traits.

use super::query::ProductQuery;
use super::token::TokenSource;
use super::{CartApi, CatalogApi, ContentApi, FavoritesApi, NotificationsApi, OrdersApi, UsersApi};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::models::{
  CartItem, Envelope, FaqDraft, FaqEntry, Favorite, FavoriteList, NewUser, Notification, NotificationDraft, Page,
  PageRequest, PasswordChange, Product, ReportRange, Role, SalesReport, SiteInfo, Terms, Transaction, User,
  UserUpdate,
};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{event, instrument, Level};
use url::Url;

const XLSX: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Talks to the storefront REST API with a bearer token taken from a [`TokenSource`].
#[derive(Clone)]
pub struct HttpBackend {
  client: Client,
  base_url: Url,
  tokens: Arc<dyn TokenSource>,
}

impl HttpBackend {
  pub fn new(base_url: Url, tokens: Arc<dyn TokenSource>) -> Self {
    Self {
      client: Client::new(),
      base_url,
      tokens,
    }
  }

  pub fn from_config(config: &StoreConfig, tokens: Arc<dyn TokenSource>) -> Self {
    Self::new(config.api_base_url.clone(), tokens)
  }

  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  fn request(&self, method: Method, path: &str) -> StoreResult<RequestBuilder> {
    self.request_accepting(method, path, "application/json")
  }

  /// Starts an authorized request. Without a token nothing is sent.
  fn request_accepting(&self, method: Method, path: &str, accept: &'static str) -> StoreResult<RequestBuilder> {
    let token = self.tokens.bearer_token().ok_or_else(|| {
      event!(Level::WARN, path, "No session token available, request not sent.");
      StoreError::Unauthorized
    })?;
    let url = join_url(&self.base_url, path)?;
    Ok(
      self
        .client
        .request(method, url)
        .bearer_auth(token)
        .header(ACCEPT, accept),
    )
  }

  async fn send(&self, builder: RequestBuilder, path: &str) -> StoreResult<Response> {
    let response = builder.send().await.map_err(|e| {
      event!(Level::ERROR, path, error = %e, "Request failed before a response arrived.");
      StoreError::Transport(e)
    })?;
    let status = response.status();
    if status.is_success() {
      event!(Level::DEBUG, path, status = status.as_u16(), "Response received.");
      return Ok(response);
    }
    let body = response.bytes().await.unwrap_or_default();
    let err = api_error(status, &body);
    event!(Level::WARN, path, status = status.as_u16(), error = %err, "Backend returned an error.");
    Err(err)
  }

  async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder, path: &str) -> StoreResult<T> {
    let response = self.send(builder, path).await?;
    let body = response.bytes().await?;
    decode(path, &body)
  }

  async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&'static str, String)]) -> StoreResult<T> {
    let builder = self.request(Method::GET, path)?.query(query);
    self.fetch(builder, path).await
  }

  async fn get_data<T: DeserializeOwned>(&self, path: &str, query: &[(&'static str, String)]) -> StoreResult<T> {
    self.get::<Envelope<T>>(path, query).await.map(|e| e.data)
  }

  async fn write_data<T: DeserializeOwned>(&self, method: Method, path: &str, body: &Value) -> StoreResult<T> {
    let builder = self.request(method, path)?.json(body);
    self.fetch::<Envelope<T>>(builder, path).await.map(|e| e.data)
  }

  async fn execute(&self, method: Method, path: &str, body: Option<&Value>) -> StoreResult<()> {
    let mut builder = self.request(method, path)?;
    if let Some(body) = body {
      builder = builder.json(body);
    }
    self.send(builder, path).await.map(|_| ())
  }
}

/// Appends the segments of `path` to the API root, keeping any prefix like `/api`.
fn join_url(base: &Url, path: &str) -> StoreResult<Url> {
  let mut url = base.clone();
  url
    .path_segments_mut()
    .map_err(|_| StoreError::Config(format!("API URL '{}' cannot take a path", base)))?
    .pop_if_empty()
    .extend(path.split('/').filter(|s| !s.is_empty()));
  Ok(url)
}

fn to_body<T: serde::Serialize>(value: &T) -> StoreResult<Value> {
  serde_json::to_value(value).map_err(|e| StoreError::Internal(format!("Failed to encode request body: {}", e)))
}

/// Parses a response body, failing with `StoreError::Decode` on a schema mismatch.
pub(crate) fn decode<T: DeserializeOwned>(endpoint: &str, body: &[u8]) -> StoreResult<T> {
  serde_json::from_slice(body).map_err(|source| StoreError::Decode {
    endpoint: endpoint.to_string(),
    source,
  })
}

/// Builds the error for a non-2xx response, preferring the backend's own message.
pub(crate) fn api_error(status: StatusCode, body: &[u8]) -> StoreError {
  #[derive(Deserialize)]
  struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
  }

  let message = serde_json::from_slice::<ErrorBody>(body)
    .ok()
    .and_then(|b| b.message.or(b.error))
    .filter(|m| !m.trim().is_empty())
    .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
  StoreError::Api {
    status: status.as_u16(),
    message,
  }
}

#[async_trait]
impl CatalogApi for HttpBackend {
  #[instrument(skip(self), fields(page = query.page.page), err(Display))]
  async fn list_products(&self, query: &ProductQuery) -> StoreResult<Page<Product>> {
    let path = if query.search_term().is_some() { "/products/search" } else { "/products" };
    self.get(path, &query.params()).await
  }
}

#[async_trait]
impl CartApi for HttpBackend {
  #[instrument(skip(self), err(Display))]
  async fn get_cart(&self) -> StoreResult<Vec<CartItem>> {
    self.get_data("/cart", &[]).await
  }

  #[instrument(skip(self), err(Display))]
  async fn add_to_cart(&self, product_id: u64, quantity: u32, unit: Option<&str>) -> StoreResult<()> {
    let body = json!({ "product_id": product_id, "quantity": quantity, "unit": unit });
    self.execute(Method::POST, "/cart/add", Some(&body)).await
  }

  #[instrument(skip(self), err(Display))]
  async fn remove_from_cart(&self, product_id: u64, quantity: u32) -> StoreResult<()> {
    let body = json!({ "product_id": product_id, "quantity": quantity });
    self.execute(Method::POST, "/cart/remove", Some(&body)).await
  }

  #[instrument(skip(self), err(Display))]
  async fn clear_cart(&self) -> StoreResult<()> {
    self.execute(Method::DELETE, "/cart", None).await
  }
}

#[async_trait]
impl FavoritesApi for HttpBackend {
  #[instrument(skip(self), err(Display))]
  async fn list_favorites(&self) -> StoreResult<Vec<FavoriteList>> {
    self.get_data("/favorites", &[]).await
  }

  #[instrument(skip(self), err(Display))]
  async fn create_favorite_list(&self, name: &str) -> StoreResult<FavoriteList> {
    self
      .write_data(Method::POST, "/favorites/lists", &json!({ "name": name }))
      .await
  }

  #[instrument(skip(self), err(Display))]
  async fn rename_favorite_list(&self, list_id: i64, name: &str) -> StoreResult<FavoriteList> {
    let path = format!("/favorites/lists/{}", list_id);
    self.write_data(Method::PUT, &path, &json!({ "name": name })).await
  }

  #[instrument(skip(self), err(Display))]
  async fn delete_favorite_list(&self, list_id: i64) -> StoreResult<()> {
    let path = format!("/favorites/lists/{}", list_id);
    self.execute(Method::DELETE, &path, None).await
  }

  #[instrument(skip(self), err(Display))]
  async fn add_favorite(&self, list_id: i64, product_id: u64) -> StoreResult<Favorite> {
    let path = format!("/favorites/lists/{}/products", list_id);
    self
      .write_data(Method::POST, &path, &json!({ "product_id": product_id }))
      .await
  }

  #[instrument(skip(self), err(Display))]
  async fn remove_favorite(&self, list_id: i64, product_id: u64) -> StoreResult<()> {
    let path = format!("/favorites/lists/{}/products/{}", list_id, product_id);
    self.execute(Method::DELETE, &path, None).await
  }
}

#[async_trait]
impl UsersApi for HttpBackend {
  #[instrument(skip(self), err(Display))]
  async fn list_users(&self, page: PageRequest, search: Option<&str>) -> StoreResult<Page<User>> {
    let mut params = page.query();
    if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
      params.push(("search", term.to_string()));
    }
    self.get("/users", &params).await
  }

  #[instrument(skip(self, user), fields(email = %user.email), err(Display))]
  async fn create_user(&self, user: &NewUser) -> StoreResult<User> {
    self.write_data(Method::POST, "/users", &to_body(user)?).await
  }

  #[instrument(skip(self, update), err(Display))]
  async fn update_user(&self, user_id: u64, update: &UserUpdate) -> StoreResult<User> {
    let path = format!("/users/{}", user_id);
    self.write_data(Method::PUT, &path, &to_body(update)?).await
  }

  #[instrument(skip(self), err(Display))]
  async fn delete_user(&self, user_id: u64) -> StoreResult<()> {
    let path = format!("/users/{}", user_id);
    self.execute(Method::DELETE, &path, None).await
  }

  #[instrument(skip(self), err(Display))]
  async fn assign_role(&self, user_id: u64, role_id: u64) -> StoreResult<User> {
    let path = format!("/users/{}/role", user_id);
    self.write_data(Method::PUT, &path, &json!({ "role_id": role_id })).await
  }

  #[instrument(skip(self, change), err(Display))]
  async fn change_password(&self, user_id: u64, change: &PasswordChange) -> StoreResult<()> {
    let path = format!("/users/{}/password", user_id);
    self.execute(Method::PUT, &path, Some(&to_body(change)?)).await
  }

  #[instrument(skip(self), err(Display))]
  async fn list_roles(&self) -> StoreResult<Vec<Role>> {
    self.get_data("/roles", &[]).await
  }
}

#[async_trait]
impl OrdersApi for HttpBackend {
  #[instrument(skip(self), err(Display))]
  async fn list_transactions(&self, page: PageRequest, range: Option<ReportRange>) -> StoreResult<Page<Transaction>> {
    let mut params = page.query();
    if let Some(range) = range {
      params.extend(range.query());
    }
    self.get("/orders", &params).await
  }

  #[instrument(skip(self), err(Display))]
  async fn sales_report(&self, range: ReportRange) -> StoreResult<SalesReport> {
    self.get_data("/reports/sales", &range.query()).await
  }

  #[instrument(skip(self), err(Display))]
  async fn export_transactions(&self, range: ReportRange) -> StoreResult<Vec<u8>> {
    let path = "/reports/sales/export";
    let builder = self
      .request_accepting(Method::GET, path, XLSX)?
      .query(&range.query());
    let response = self.send(builder, path).await?;
    let bytes = response.bytes().await?;
    event!(Level::INFO, size = bytes.len(), "Export downloaded.");
    Ok(bytes.to_vec())
  }
}

#[async_trait]
impl NotificationsApi for HttpBackend {
  #[instrument(skip(self), err(Display))]
  async fn list_notifications(&self, page: PageRequest) -> StoreResult<Page<Notification>> {
    self.get("/notifications", &page.query()).await
  }

  #[instrument(skip(self, draft), err(Display))]
  async fn create_notification(&self, draft: &NotificationDraft) -> StoreResult<Notification> {
    self.write_data(Method::POST, "/notifications", &to_body(draft)?).await
  }

  #[instrument(skip(self, draft), err(Display))]
  async fn update_notification(&self, notification_id: u64, draft: &NotificationDraft) -> StoreResult<Notification> {
    let path = format!("/notifications/{}", notification_id);
    self.write_data(Method::PUT, &path, &to_body(draft)?).await
  }

  #[instrument(skip(self), err(Display))]
  async fn delete_notification(&self, notification_id: u64) -> StoreResult<()> {
    let path = format!("/notifications/{}", notification_id);
    self.execute(Method::DELETE, &path, None).await
  }

  #[instrument(skip(self), err(Display))]
  async fn mark_notification_read(&self, notification_id: u64) -> StoreResult<()> {
    let path = format!("/notifications/{}/read", notification_id);
    self.execute(Method::PUT, &path, None).await
  }
}

#[async_trait]
impl ContentApi for HttpBackend {
  #[instrument(skip(self), err(Display))]
  async fn list_faq(&self) -> StoreResult<Vec<FaqEntry>> {
    self.get_data("/faq", &[]).await
  }

  #[instrument(skip(self, draft), err(Display))]
  async fn create_faq(&self, draft: &FaqDraft) -> StoreResult<FaqEntry> {
    self.write_data(Method::POST, "/faq", &to_body(draft)?).await
  }

  #[instrument(skip(self, draft), err(Display))]
  async fn update_faq(&self, faq_id: u64, draft: &FaqDraft) -> StoreResult<FaqEntry> {
    let path = format!("/faq/{}", faq_id);
    self.write_data(Method::PUT, &path, &to_body(draft)?).await
  }

  #[instrument(skip(self), err(Display))]
  async fn delete_faq(&self, faq_id: u64) -> StoreResult<()> {
    let path = format!("/faq/{}", faq_id);
    self.execute(Method::DELETE, &path, None).await
  }

  #[instrument(skip(self), err(Display))]
  async fn get_site_info(&self) -> StoreResult<SiteInfo> {
    self.get_data("/site-info", &[]).await
  }

  #[instrument(skip(self, info), err(Display))]
  async fn update_site_info(&self, info: &SiteInfo) -> StoreResult<SiteInfo> {
    self.write_data(Method::PUT, "/site-info", &to_body(info)?).await
  }

  #[instrument(skip(self), err(Display))]
  async fn get_terms(&self) -> StoreResult<Terms> {
    self.get_data("/terms", &[]).await
  }

  #[instrument(skip(self, content), fields(len = content.len()), err(Display))]
  async fn update_terms(&self, content: &str) -> StoreResult<Terms> {
    self
      .write_data(Method::PUT, "/terms", &json!({ "content": content }))
      .await
  }
}
