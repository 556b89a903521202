// storefront/src/stores/users.rs

//! Back-office user and role management.

use crate::api::UsersApi;
use crate::error::{StoreError, StoreResult};
use crate::models::{NewUser, PageRequest, PasswordChange, Role, User, UserUpdate};
use crate::pagination::Paginated;
use crate::state::shared::Shared;
use std::sync::Arc;
use tracing::{event, instrument, Level};

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Clone)]
pub struct UsersStore {
  pages: Paginated<User>,
  search: Shared<Option<String>>,
  roles: Shared<Vec<Role>>,
  per_page: u32,
  api: Arc<dyn UsersApi>,
}

impl UsersStore {
  pub fn new(api: Arc<dyn UsersApi>, per_page: u32) -> Self {
    Self {
      pages: Paginated::new(),
      search: Shared::default(),
      roles: Shared::default(),
      per_page,
      api,
    }
  }

  pub fn pages(&self) -> &Paginated<User> {
    &self.pages
  }

  pub fn roles(&self) -> Vec<Role> {
    self.roles.snapshot()
  }

  pub fn search_term(&self) -> Option<String> {
    self.search.snapshot()
  }

  async fn load(&self, request: PageRequest) -> StoreResult<()> {
    let search = self.search_term();
    let api = Arc::clone(&self.api);
    self
      .pages
      .load(request, |req| async move { api.list_users(req, search.as_deref()).await })
      .await
  }

  #[instrument(name = "UsersStore::load_page", skip(self), err(Display))]
  pub async fn load_page(&self, page: u32) -> StoreResult<()> {
    self.load(PageRequest::new(page, self.per_page)).await
  }

  /// Filters by name or email, starting again from the first page.
  #[instrument(name = "UsersStore::search", skip(self), err(Display))]
  pub async fn search(&self, term: &str) -> StoreResult<()> {
    let term = term.trim();
    self.search.replace((!term.is_empty()).then(|| term.to_string()));
    self.load(PageRequest::first(self.per_page)).await
  }

  pub async fn retry(&self) -> StoreResult<()> {
    let search = self.search_term();
    let api = Arc::clone(&self.api);
    self
      .pages
      .retry(|req| async move { api.list_users(req, search.as_deref()).await })
      .await
  }

  /// Reloads the current page after a successful mutation. A failure here is
  /// recorded on the pager but does not undo the mutation's result.
  async fn refresh(&self) {
    let request = self.pages.last_request().unwrap_or(PageRequest::first(self.per_page));
    if let Err(e) = self.load(request).await {
      event!(Level::WARN, error = %e, "User list refresh failed.");
    }
  }

  #[instrument(name = "UsersStore::load_roles", skip(self), err(Display))]
  pub async fn load_roles(&self) -> StoreResult<Vec<Role>> {
    let roles = self.api.list_roles().await?;
    self.roles.replace(roles.clone());
    Ok(roles)
  }

  #[instrument(name = "UsersStore::create", skip(self, user), fields(email = %user.email), err(Display))]
  pub async fn create(&self, user: NewUser) -> StoreResult<User> {
    if user.name.trim().is_empty() {
      return Err(StoreError::Validation("Name is required.".to_string()));
    }
    validate_email(&user.email)?;
    validate_password(&user.password)?;
    let created = self.api.create_user(&user).await?;
    self.refresh().await;
    Ok(created)
  }

  #[instrument(name = "UsersStore::update", skip(self, update), err(Display))]
  pub async fn update(&self, user_id: u64, update: UserUpdate) -> StoreResult<User> {
    if let Some(email) = &update.email {
      validate_email(email)?;
    }
    if update.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
      return Err(StoreError::Validation("Name cannot be empty.".to_string()));
    }
    let updated = self.api.update_user(user_id, &update).await?;
    self.refresh().await;
    Ok(updated)
  }

  #[instrument(name = "UsersStore::delete", skip(self), err(Display))]
  pub async fn delete(&self, user_id: u64) -> StoreResult<()> {
    self.api.delete_user(user_id).await?;
    self.refresh().await;
    Ok(())
  }

  #[instrument(name = "UsersStore::assign_role", skip(self), err(Display))]
  pub async fn assign_role(&self, user_id: u64, role_id: u64) -> StoreResult<User> {
    let known = {
      let roles = self.roles.read();
      roles.is_empty() || roles.iter().any(|r| r.id == role_id)
    };
    if !known {
      return Err(StoreError::Validation(format!("Role {} does not exist.", role_id)));
    }
    let updated = self.api.assign_role(user_id, role_id).await?;
    self.pages.update_items(|users| {
      if let Some(user) = users.iter_mut().find(|u| u.id == user_id) {
        *user = updated.clone();
      }
    });
    Ok(updated)
  }

  #[instrument(name = "UsersStore::change_password", skip(self, change), err(Display))]
  pub async fn change_password(&self, user_id: u64, change: PasswordChange) -> StoreResult<()> {
    if !change.matches() {
      return Err(StoreError::Validation("Passwords do not match.".to_string()));
    }
    validate_password(&change.password)?;
    self.api.change_password(user_id, &change).await
  }
}

fn validate_email(email: &str) -> StoreResult<()> {
  let valid = email
    .split_once('@')
    .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'));
  if valid {
    Ok(())
  } else {
    Err(StoreError::Validation(format!("'{}' is not a valid email address.", email)))
  }
}

fn validate_password(password: &str) -> StoreResult<()> {
  if password.chars().count() < MIN_PASSWORD_LEN {
    return Err(StoreError::Validation(format!(
      "Password must be at least {} characters.",
      MIN_PASSWORD_LEN
    )));
  }
  Ok(())
}
