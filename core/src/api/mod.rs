// storefront/src/api/mod.rs

//! The backend seam.
//!
//! Each resource gets its own async trait so a store only depends on the calls
//! it makes. [`HttpBackend`] implements all of them against the REST API; tests
//! substitute in-memory implementations.

pub mod http;
pub mod query;
pub mod token;

pub use http::HttpBackend;
pub use query::{ProductQuery, SortOrder};
pub use token::{CookieToken, StaticToken, TokenSource};

use crate::error::StoreResult;
use crate::models::{
  CartItem, FaqDraft, FaqEntry, Favorite, FavoriteList, NewUser, Notification, NotificationDraft, Page,
  PageRequest, PasswordChange, Product, ReportRange, Role, SalesReport, SiteInfo, Terms, Transaction, User,
  UserUpdate,
};
use async_trait::async_trait;

#[async_trait]
pub trait CatalogApi: Send + Sync {
  /// Lists one page of products; a search term switches to the search endpoint.
  async fn list_products(&self, query: &ProductQuery) -> StoreResult<Page<Product>>;
}

#[async_trait]
pub trait CartApi: Send + Sync {
  async fn get_cart(&self) -> StoreResult<Vec<CartItem>>;
  async fn add_to_cart(&self, product_id: u64, quantity: u32, unit: Option<&str>) -> StoreResult<()>;
  async fn remove_from_cart(&self, product_id: u64, quantity: u32) -> StoreResult<()>;
  async fn clear_cart(&self) -> StoreResult<()>;
}

#[async_trait]
pub trait FavoritesApi: Send + Sync {
  async fn list_favorites(&self) -> StoreResult<Vec<FavoriteList>>;
  async fn create_favorite_list(&self, name: &str) -> StoreResult<FavoriteList>;
  async fn rename_favorite_list(&self, list_id: i64, name: &str) -> StoreResult<FavoriteList>;
  async fn delete_favorite_list(&self, list_id: i64) -> StoreResult<()>;
  async fn add_favorite(&self, list_id: i64, product_id: u64) -> StoreResult<Favorite>;
  async fn remove_favorite(&self, list_id: i64, product_id: u64) -> StoreResult<()>;
}

#[async_trait]
pub trait UsersApi: Send + Sync {
  async fn list_users(&self, page: PageRequest, search: Option<&str>) -> StoreResult<Page<User>>;
  async fn create_user(&self, user: &NewUser) -> StoreResult<User>;
  async fn update_user(&self, user_id: u64, update: &UserUpdate) -> StoreResult<User>;
  async fn delete_user(&self, user_id: u64) -> StoreResult<()>;
  async fn assign_role(&self, user_id: u64, role_id: u64) -> StoreResult<User>;
  async fn change_password(&self, user_id: u64, change: &PasswordChange) -> StoreResult<()>;
  async fn list_roles(&self) -> StoreResult<Vec<Role>>;
}

#[async_trait]
pub trait OrdersApi: Send + Sync {
  async fn list_transactions(&self, page: PageRequest, range: Option<ReportRange>) -> StoreResult<Page<Transaction>>;
  async fn sales_report(&self, range: ReportRange) -> StoreResult<SalesReport>;
  /// The spreadsheet export, as raw bytes.
  async fn export_transactions(&self, range: ReportRange) -> StoreResult<Vec<u8>>;
}

#[async_trait]
pub trait NotificationsApi: Send + Sync {
  async fn list_notifications(&self, page: PageRequest) -> StoreResult<Page<Notification>>;
  async fn create_notification(&self, draft: &NotificationDraft) -> StoreResult<Notification>;
  async fn update_notification(&self, notification_id: u64, draft: &NotificationDraft) -> StoreResult<Notification>;
  async fn delete_notification(&self, notification_id: u64) -> StoreResult<()>;
  async fn mark_notification_read(&self, notification_id: u64) -> StoreResult<()>;
}

#[async_trait]
pub trait ContentApi: Send + Sync {
  async fn list_faq(&self) -> StoreResult<Vec<FaqEntry>>;
  async fn create_faq(&self, draft: &FaqDraft) -> StoreResult<FaqEntry>;
  async fn update_faq(&self, faq_id: u64, draft: &FaqDraft) -> StoreResult<FaqEntry>;
  async fn delete_faq(&self, faq_id: u64) -> StoreResult<()>;
  async fn get_site_info(&self) -> StoreResult<SiteInfo>;
  async fn update_site_info(&self, info: &SiteInfo) -> StoreResult<SiteInfo>;
  async fn get_terms(&self) -> StoreResult<Terms>;
  async fn update_terms(&self, content: &str) -> StoreResult<Terms>;
}

/// Everything the storefront container needs from one backend.
pub trait Backend: CatalogApi + CartApi + FavoritesApi + UsersApi + OrdersApi + NotificationsApi + ContentApi {}

impl<T> Backend for T where T: CatalogApi + CartApi + FavoritesApi + UsersApi + OrdersApi + NotificationsApi + ContentApi
{}
