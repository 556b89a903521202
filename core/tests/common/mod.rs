// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use storefront::api::{
  CartApi, CatalogApi, ContentApi, FavoritesApi, NotificationsApi, OrdersApi, ProductQuery, UsersApi,
};
use storefront::models::{
  CartItem, DailySales, FaqDraft, FaqEntry, Favorite, FavoriteList, NewUser, Notification, NotificationDraft,
  OrderStatus, Page, PageLinks, PageMeta, PageRequest, PasswordChange, Product, ReportRange, Role, SalesReport,
  SiteInfo, Terms, Transaction, User, UserUpdate,
};
use storefront::{StoreError, StoreResult};
use tokio::sync::Notify;
use tracing::Level;

// --- Fixtures ---

pub fn product(id: u64, name: &str, price: i64) -> Product {
  Product {
    id,
    name: name.to_string(),
    description: None,
    price,
    stock: 10,
    sku: Some(format!("SKU-{}", id)),
    category: None,
    subcategory: None,
    brand: None,
    unit: Some("unidad".to_string()),
    favorite: false,
    image: None,
  }
}

pub fn described(id: u64, name: &str, description: &str) -> Product {
  Product {
    description: Some(description.to_string()),
    ..product(id, name, 1000)
  }
}

pub fn grocery_catalog() -> Vec<Product> {
  vec![
    described(1, "Aceite Maravilla Belmont 1L", "Aceite vegetal de maravilla"),
    described(2, "Arroz G2 Largo Selección Tucapel 1kg", "Arroz grado 2 grano largo"),
    described(3, "Fideos Spaghetti 5 Carozzi 400g", "Pasta de sémola"),
    described(4, "Azúcar Iansa 1kg", "Azúcar granulada blanca"),
    described(5, "Arroz Integral Miraflores 1kg", "Arroz integral grano largo"),
    described(6, "Leche Entera Colun 1L", "Leche larga vida"),
  ]
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn user(id: u64, name: &str) -> User {
  User {
    id,
    name: name.to_string(),
    email: format!("{}@tienda.cl", name.to_lowercase()),
    role: None,
    active: true,
    created_at: None,
  }
}

pub fn notification(id: u64, title: &str, read: bool) -> Notification {
  Notification {
    id,
    title: title.to_string(),
    message: format!("{} message", title),
    read,
    created_at: None,
  }
}

/// Builds the backend's paging envelope for one slice of `items`.
pub fn page_of<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
  let per_page = request.per_page.max(1) as usize;
  let total = items.len();
  let last_page = ((total + per_page - 1) / per_page).max(1) as u32;
  let start = (request.page.saturating_sub(1) as usize) * per_page;
  let data: Vec<T> = items.iter().skip(start).take(per_page).cloned().collect();
  let (from, to) = if data.is_empty() {
    (None, None)
  } else {
    (Some(start as u64 + 1), Some((start + data.len()) as u64))
  };
  Page {
    data,
    links: PageLinks {
      first: Some("/api/items?page=1".to_string()),
      last: Some(format!("/api/items?page={}", last_page)),
      prev: (request.page > 1).then(|| format!("/api/items?page={}", request.page - 1)),
      next: (request.page < last_page).then(|| format!("/api/items?page={}", request.page + 1)),
    },
    meta: PageMeta {
      current_page: request.page,
      last_page,
      per_page: request.per_page,
      total: total as u64,
      from,
      to,
      path: Some("/api/items".to_string()),
      links: Vec::new(),
    },
  }
}

// --- In-memory backend ---

/// A backend whose operations can be made to fail or to wait for the test.
///
/// Operation names match the trait method names (`add_to_cart`, `list_products`...).
#[derive(Default)]
pub struct MockBackend {
  pub catalog: Mutex<Vec<Product>>,
  pub cart: Mutex<Vec<CartItem>>,
  pub favorites: Mutex<Vec<FavoriteList>>,
  pub users: Mutex<Vec<User>>,
  pub roles: Mutex<Vec<Role>>,
  pub transactions: Mutex<Vec<Transaction>>,
  pub notifications: Mutex<Vec<Notification>>,
  pub faq: Mutex<Vec<FaqEntry>>,
  pub site_info: Mutex<SiteInfo>,
  pub terms: Mutex<Option<Terms>>,
  /// Server-side unit price overrides, to tell optimistic math from server truth.
  pub server_prices: Mutex<Vec<(u64, i64)>>,
  pub calls: Mutex<Vec<String>>,
  pub last_product_query: Mutex<Option<ProductQuery>>,
  failing: Mutex<HashSet<String>>,
  gated: Mutex<HashSet<String>>,
  next_id: Mutex<i64>,
  pub seen: Arc<Notify>,
  pub release: Arc<Notify>,
}

impl MockBackend {
  pub fn new() -> Arc<Self> {
    Arc::new(Self {
      next_id: Mutex::new(100),
      ..Default::default()
    })
  }

  pub fn with_catalog(products: Vec<Product>) -> Arc<Self> {
    let backend = Self::new();
    *backend.catalog.lock() = products;
    backend
  }

  pub fn fail(&self, op: &str) {
    self.failing.lock().insert(op.to_string());
  }

  pub fn recover(&self, op: &str) {
    self.failing.lock().remove(op);
  }

  /// Makes `op` signal `seen` on arrival and wait for `release` before answering.
  pub fn gate(&self, op: &str) {
    self.gated.lock().insert(op.to_string());
  }

  pub fn calls_to(&self, op: &str) -> usize {
    self.calls.lock().iter().filter(|c| c.as_str() == op).count()
  }

  fn next_id(&self) -> i64 {
    let mut id = self.next_id.lock();
    *id += 1;
    *id
  }

  async fn enter(&self, op: &str) -> StoreResult<()> {
    self.calls.lock().push(op.to_string());
    let gated = self.gated.lock().contains(op);
    if gated {
      self.seen.notify_one();
      self.release.notified().await;
    }
    if self.failing.lock().contains(op) {
      return Err(StoreError::Api {
        status: 500,
        message: format!("{} failed", op),
      });
    }
    Ok(())
  }

  fn server_price(&self, product: &Product) -> i64 {
    self
      .server_prices
      .lock()
      .iter()
      .find(|(id, _)| *id == product.id)
      .map(|(_, price)| *price)
      .unwrap_or(product.price)
  }

  fn catalog_product(&self, product_id: u64) -> StoreResult<Product> {
    self
      .catalog
      .lock()
      .iter()
      .find(|p| p.id == product_id)
      .cloned()
      .ok_or_else(|| StoreError::Api {
        status: 404,
        message: format!("Product {} not found", product_id),
      })
  }
}

#[async_trait]
impl CatalogApi for MockBackend {
  async fn list_products(&self, query: &ProductQuery) -> StoreResult<Page<Product>> {
    self.enter("list_products").await?;
    *self.last_product_query.lock() = Some(query.clone());
    let catalog = self.catalog.lock().clone();
    let filtered: Vec<Product> = match query.search_term() {
      Some(term) => {
        let term = term.to_lowercase();
        catalog.into_iter().filter(|p| p.name.to_lowercase().contains(&term)).collect()
      }
      None => catalog,
    };
    Ok(page_of(&filtered, query.page))
  }
}

#[async_trait]
impl CartApi for MockBackend {
  async fn get_cart(&self) -> StoreResult<Vec<CartItem>> {
    self.enter("get_cart").await?;
    Ok(self.cart.lock().clone())
  }

  async fn add_to_cart(&self, product_id: u64, quantity: u32, _unit: Option<&str>) -> StoreResult<()> {
    self.enter("add_to_cart").await?;
    let mut product = self.catalog_product(product_id)?;
    product.price = self.server_price(&product);
    let mut cart = self.cart.lock();
    match cart.iter_mut().find(|l| l.product.id == product_id) {
      Some(line) => {
        let quantity = line.quantity + quantity;
        line.product.price = product.price;
        line.set_quantity(quantity);
      }
      None => cart.push(CartItem::new(product, quantity)),
    }
    Ok(())
  }

  async fn remove_from_cart(&self, product_id: u64, quantity: u32) -> StoreResult<()> {
    self.enter("remove_from_cart").await?;
    let mut cart = self.cart.lock();
    if let Some(idx) = cart.iter().position(|l| l.product.id == product_id) {
      if quantity >= cart[idx].quantity {
        cart.remove(idx);
      } else {
        let remaining = cart[idx].quantity - quantity;
        cart[idx].set_quantity(remaining);
      }
    }
    Ok(())
  }

  async fn clear_cart(&self) -> StoreResult<()> {
    self.enter("clear_cart").await?;
    self.cart.lock().clear();
    Ok(())
  }
}

#[async_trait]
impl FavoritesApi for MockBackend {
  async fn list_favorites(&self) -> StoreResult<Vec<FavoriteList>> {
    self.enter("list_favorites").await?;
    Ok(self.favorites.lock().clone())
  }

  async fn create_favorite_list(&self, name: &str) -> StoreResult<FavoriteList> {
    self.enter("create_favorite_list").await?;
    let list = FavoriteList {
      id: self.next_id(),
      name: name.to_string(),
      favorites: Vec::new(),
    };
    self.favorites.lock().push(list.clone());
    Ok(list)
  }

  async fn rename_favorite_list(&self, list_id: i64, name: &str) -> StoreResult<FavoriteList> {
    self.enter("rename_favorite_list").await?;
    let mut lists = self.favorites.lock();
    let list = lists.iter_mut().find(|l| l.id == list_id).ok_or(StoreError::Api {
      status: 404,
      message: "List not found".to_string(),
    })?;
    list.name = name.to_string();
    Ok(list.clone())
  }

  async fn delete_favorite_list(&self, list_id: i64) -> StoreResult<()> {
    self.enter("delete_favorite_list").await?;
    self.favorites.lock().retain(|l| l.id != list_id);
    Ok(())
  }

  async fn add_favorite(&self, list_id: i64, product_id: u64) -> StoreResult<Favorite> {
    self.enter("add_favorite").await?;
    let mut product = self.catalog_product(product_id)?;
    product.favorite = true;
    let favorite = Favorite {
      id: self.next_id(),
      product,
    };
    let mut lists = self.favorites.lock();
    let list = lists.iter_mut().find(|l| l.id == list_id).ok_or(StoreError::Api {
      status: 404,
      message: "List not found".to_string(),
    })?;
    list.favorites.push(favorite.clone());
    Ok(favorite)
  }

  async fn remove_favorite(&self, list_id: i64, product_id: u64) -> StoreResult<()> {
    self.enter("remove_favorite").await?;
    if let Some(list) = self.favorites.lock().iter_mut().find(|l| l.id == list_id) {
      list.favorites.retain(|f| f.product.id != product_id);
    }
    Ok(())
  }
}

#[async_trait]
impl UsersApi for MockBackend {
  async fn list_users(&self, page: PageRequest, search: Option<&str>) -> StoreResult<Page<User>> {
    self.enter("list_users").await?;
    let users: Vec<User> = self
      .users
      .lock()
      .iter()
      .filter(|u| search.map_or(true, |s| u.name.to_lowercase().contains(&s.to_lowercase())))
      .cloned()
      .collect();
    Ok(page_of(&users, page))
  }

  async fn create_user(&self, new_user: &NewUser) -> StoreResult<User> {
    self.enter("create_user").await?;
    let role = new_user
      .role_id
      .and_then(|id| self.roles.lock().iter().find(|r| r.id == id).cloned());
    let created = User {
      id: self.next_id() as u64,
      name: new_user.name.clone(),
      email: new_user.email.clone(),
      role,
      active: true,
      created_at: None,
    };
    self.users.lock().push(created.clone());
    Ok(created)
  }

  async fn update_user(&self, user_id: u64, update: &UserUpdate) -> StoreResult<User> {
    self.enter("update_user").await?;
    let mut users = self.users.lock();
    let user = users.iter_mut().find(|u| u.id == user_id).ok_or(StoreError::Api {
      status: 404,
      message: "User not found".to_string(),
    })?;
    if let Some(name) = &update.name {
      user.name = name.clone();
    }
    if let Some(email) = &update.email {
      user.email = email.clone();
    }
    if let Some(active) = update.active {
      user.active = active;
    }
    Ok(user.clone())
  }

  async fn delete_user(&self, user_id: u64) -> StoreResult<()> {
    self.enter("delete_user").await?;
    self.users.lock().retain(|u| u.id != user_id);
    Ok(())
  }

  async fn assign_role(&self, user_id: u64, role_id: u64) -> StoreResult<User> {
    self.enter("assign_role").await?;
    let role = self.roles.lock().iter().find(|r| r.id == role_id).cloned();
    let mut users = self.users.lock();
    let user = users.iter_mut().find(|u| u.id == user_id).ok_or(StoreError::Api {
      status: 404,
      message: "User not found".to_string(),
    })?;
    user.role = role;
    Ok(user.clone())
  }

  async fn change_password(&self, _user_id: u64, _change: &PasswordChange) -> StoreResult<()> {
    self.enter("change_password").await
  }

  async fn list_roles(&self) -> StoreResult<Vec<Role>> {
    self.enter("list_roles").await?;
    Ok(self.roles.lock().clone())
  }
}

#[async_trait]
impl OrdersApi for MockBackend {
  async fn list_transactions(&self, page: PageRequest, range: Option<ReportRange>) -> StoreResult<Page<Transaction>> {
    self.enter("list_transactions").await?;
    let rows: Vec<Transaction> = self
      .transactions
      .lock()
      .iter()
      .filter(|t| match (range, t.created_at) {
        (Some(r), Some(at)) => {
          let date = at.date_naive();
          r.from <= date && date <= r.to
        }
        _ => true,
      })
      .cloned()
      .collect();
    Ok(page_of(&rows, page))
  }

  async fn sales_report(&self, range: ReportRange) -> StoreResult<SalesReport> {
    self.enter("sales_report").await?;
    let rows = self.transactions.lock().clone();
    let paid: Vec<&Transaction> = rows.iter().filter(|t| t.status != OrderStatus::Cancelled).collect();
    let total_sales: i64 = paid.iter().map(|t| t.total).sum();
    let total_orders = paid.len() as u32;
    Ok(SalesReport {
      total_sales,
      total_orders,
      average_ticket: if total_orders == 0 { 0.0 } else { total_sales as f64 / total_orders as f64 },
      daily: vec![DailySales {
        date: range.from,
        total: total_sales,
        orders: total_orders,
      }],
      top_products: Vec::new(),
    })
  }

  async fn export_transactions(&self, _range: ReportRange) -> StoreResult<Vec<u8>> {
    self.enter("export_transactions").await?;
    // XLSX files are zip archives.
    Ok(b"PK\x03\x04mock-sheet".to_vec())
  }
}

#[async_trait]
impl NotificationsApi for MockBackend {
  async fn list_notifications(&self, page: PageRequest) -> StoreResult<Page<Notification>> {
    self.enter("list_notifications").await?;
    let rows = self.notifications.lock().clone();
    Ok(page_of(&rows, page))
  }

  async fn create_notification(&self, draft: &NotificationDraft) -> StoreResult<Notification> {
    self.enter("create_notification").await?;
    let created = Notification {
      id: self.next_id() as u64,
      title: draft.title.clone(),
      message: draft.message.clone(),
      read: false,
      created_at: None,
    };
    self.notifications.lock().insert(0, created.clone());
    Ok(created)
  }

  async fn update_notification(&self, notification_id: u64, draft: &NotificationDraft) -> StoreResult<Notification> {
    self.enter("update_notification").await?;
    let mut rows = self.notifications.lock();
    let row = rows.iter_mut().find(|n| n.id == notification_id).ok_or(StoreError::Api {
      status: 404,
      message: "Notification not found".to_string(),
    })?;
    row.title = draft.title.clone();
    row.message = draft.message.clone();
    Ok(row.clone())
  }

  async fn delete_notification(&self, notification_id: u64) -> StoreResult<()> {
    self.enter("delete_notification").await?;
    self.notifications.lock().retain(|n| n.id != notification_id);
    Ok(())
  }

  async fn mark_notification_read(&self, notification_id: u64) -> StoreResult<()> {
    self.enter("mark_notification_read").await?;
    if let Some(n) = self.notifications.lock().iter_mut().find(|n| n.id == notification_id) {
      n.read = true;
    }
    Ok(())
  }
}

#[async_trait]
impl ContentApi for MockBackend {
  async fn list_faq(&self) -> StoreResult<Vec<FaqEntry>> {
    self.enter("list_faq").await?;
    Ok(self.faq.lock().clone())
  }

  async fn create_faq(&self, draft: &FaqDraft) -> StoreResult<FaqEntry> {
    self.enter("create_faq").await?;
    let mut faq = self.faq.lock();
    let entry = FaqEntry {
      id: self.next_id() as u64,
      question: draft.question.clone(),
      answer: draft.answer.clone(),
      position: faq.len() as u32 + 1,
    };
    faq.push(entry.clone());
    Ok(entry)
  }

  async fn update_faq(&self, faq_id: u64, draft: &FaqDraft) -> StoreResult<FaqEntry> {
    self.enter("update_faq").await?;
    let mut faq = self.faq.lock();
    let entry = faq.iter_mut().find(|e| e.id == faq_id).ok_or(StoreError::Api {
      status: 404,
      message: "FAQ entry not found".to_string(),
    })?;
    entry.question = draft.question.clone();
    entry.answer = draft.answer.clone();
    Ok(entry.clone())
  }

  async fn delete_faq(&self, faq_id: u64) -> StoreResult<()> {
    self.enter("delete_faq").await?;
    self.faq.lock().retain(|e| e.id != faq_id);
    Ok(())
  }

  async fn get_site_info(&self) -> StoreResult<SiteInfo> {
    self.enter("get_site_info").await?;
    Ok(self.site_info.lock().clone())
  }

  async fn update_site_info(&self, info: &SiteInfo) -> StoreResult<SiteInfo> {
    self.enter("update_site_info").await?;
    *self.site_info.lock() = info.clone();
    Ok(info.clone())
  }

  async fn get_terms(&self) -> StoreResult<Terms> {
    self.enter("get_terms").await?;
    self.terms.lock().clone().ok_or(StoreError::Api {
      status: 404,
      message: "No terms published".to_string(),
    })
  }

  async fn update_terms(&self, content: &str) -> StoreResult<Terms> {
    self.enter("update_terms").await?;
    let terms = Terms {
      content: content.to_string(),
      updated_at: None,
    };
    *self.terms.lock() = Some(terms.clone());
    Ok(terms)
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
