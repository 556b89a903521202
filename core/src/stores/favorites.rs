// storefront/src/stores/favorites.rs

//! Favorite lists, mutated optimistically with temporary negative ids.

use crate::api::FavoritesApi;
use crate::error::{StoreError, StoreResult};
use crate::models::{Favorite, FavoriteList, Product};
use crate::optimistic::{perform_optimistic, reconcile};
use crate::state::outcome::MutationOutcome;
use crate::state::shared::Shared;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use tracing::{event, instrument, Level};

#[derive(Clone)]
pub struct FavoritesStore {
  lists: Shared<Vec<FavoriteList>>,
  next_temp_id: Arc<AtomicI64>,
  stale: Arc<AtomicBool>,
  api: Arc<dyn FavoritesApi>,
}

impl FavoritesStore {
  pub fn new(api: Arc<dyn FavoritesApi>) -> Self {
    Self {
      lists: Shared::default(),
      next_temp_id: Arc::new(AtomicI64::new(-1)),
      stale: Arc::new(AtomicBool::new(false)),
      api,
    }
  }

  pub fn lists(&self) -> Vec<FavoriteList> {
    self.lists.snapshot()
  }

  pub fn list(&self, list_id: i64) -> Option<FavoriteList> {
    self.lists.read().iter().find(|l| l.id == list_id).cloned()
  }

  /// Whether any list holds `product_id`, for the heart icon on product cards.
  pub fn is_favorite(&self, product_id: u64) -> bool {
    self.lists.read().iter().any(|l| l.contains_product(product_id))
  }

  /// True when the last mutation could not be followed by a refetch, so the
  /// lists may not match the server.
  pub fn is_stale(&self) -> bool {
    self.stale.load(Ordering::Acquire)
  }

  fn temp_id(&self) -> i64 {
    self.next_temp_id.fetch_sub(1, Ordering::Relaxed)
  }

  /// Refuses ids that are unknown or not yet confirmed by the server.
  fn confirmed_list(&self, list_id: i64) -> StoreResult<FavoriteList> {
    let list = self
      .list(list_id)
      .ok_or_else(|| StoreError::Validation(format!("Favorite list {} does not exist.", list_id)))?;
    if list.is_optimistic() {
      return Err(StoreError::Validation(format!(
        "Favorite list '{}' is still being created.",
        list.name
      )));
    }
    Ok(list)
  }

  #[instrument(name = "FavoritesStore::fetch", skip(self), err(Display))]
  pub async fn fetch(&self) -> StoreResult<()> {
    reconcile(&self.lists, "favorites", self.api.list_favorites()).await?;
    self.stale.store(false, Ordering::Release);
    Ok(())
  }

  /// Follows every mutation, confirmed or reverted, with the server's lists.
  ///
  /// A revert restores the whole snapshot taken before the request, which can
  /// undo another mutation the server confirmed meanwhile; the refetch puts
  /// that one back.
  async fn settle<R>(&self, result: StoreResult<R>) -> MutationOutcome {
    let outcome = match result {
      Ok(_) => MutationOutcome::Confirmed,
      Err(e) => MutationOutcome::reverted(e),
    };
    if let Err(e) = self.fetch().await {
      event!(Level::WARN, error = %e, "Favorites refetch failed, lists may be out of date.");
      self.stale.store(true, Ordering::Release);
    }
    outcome
  }

  /// Shows the new list at once under a temporary id; the server's list
  /// replaces it on success, and it disappears on failure.
  #[instrument(name = "FavoritesStore::create_list", skip(self))]
  pub async fn create_list(&self, name: &str) -> MutationOutcome {
    let name = name.trim();
    if name.is_empty() {
      return MutationOutcome::rejected(StoreError::Validation("List name cannot be empty.".to_string()));
    }
    let temp_id = self.temp_id();

    let result = perform_optimistic(
      &self.lists,
      "favorites_create_list",
      |lists| {
        lists.push(FavoriteList {
          id: temp_id,
          name: name.to_string(),
          favorites: Vec::new(),
        })
      },
      self.api.create_favorite_list(name),
      |lists, created: &FavoriteList| {
        if let Some(slot) = lists.iter_mut().find(|l| l.id == temp_id) {
          *slot = created.clone();
        }
      },
    )
    .await;

    if let Ok(created) = &result {
      event!(Level::INFO, temp_id, list_id = created.id, "Favorite list confirmed.");
    }
    self.settle(result).await
  }

  #[instrument(name = "FavoritesStore::rename_list", skip(self))]
  pub async fn rename_list(&self, list_id: i64, name: &str) -> MutationOutcome {
    let name = name.trim();
    if name.is_empty() {
      return MutationOutcome::rejected(StoreError::Validation("List name cannot be empty.".to_string()));
    }
    if let Err(e) = self.confirmed_list(list_id) {
      return MutationOutcome::rejected(e);
    }

    let result = perform_optimistic(
      &self.lists,
      "favorites_rename_list",
      |lists| {
        if let Some(list) = lists.iter_mut().find(|l| l.id == list_id) {
          list.name = name.to_string();
        }
      },
      self.api.rename_favorite_list(list_id, name),
      |lists, renamed: &FavoriteList| {
        if let Some(list) = lists.iter_mut().find(|l| l.id == list_id) {
          *list = renamed.clone();
        }
      },
    )
    .await;
    self.settle(result).await
  }

  #[instrument(name = "FavoritesStore::delete_list", skip(self))]
  pub async fn delete_list(&self, list_id: i64) -> MutationOutcome {
    if let Err(e) = self.confirmed_list(list_id) {
      return MutationOutcome::rejected(e);
    }
    let result = perform_optimistic(
      &self.lists,
      "favorites_delete_list",
      |lists| lists.retain(|l| l.id != list_id),
      self.api.delete_favorite_list(list_id),
      |_, _| {},
    )
    .await;
    self.settle(result).await
  }

  /// Appends `product` to the list under a temporary favorite id.
  #[instrument(name = "FavoritesStore::add_product", skip(self, product), fields(product_id = product.id))]
  pub async fn add_product(&self, list_id: i64, product: &Product) -> MutationOutcome {
    let list = match self.confirmed_list(list_id) {
      Ok(list) => list,
      Err(e) => return MutationOutcome::rejected(e),
    };
    if list.contains_product(product.id) {
      return MutationOutcome::rejected(StoreError::Validation(format!(
        "'{}' is already in '{}'.",
        product.name, list.name
      )));
    }
    let temp_id = self.temp_id();

    let result = perform_optimistic(
      &self.lists,
      "favorites_add_product",
      |lists| {
        if let Some(list) = lists.iter_mut().find(|l| l.id == list_id) {
          let mut product = product.clone();
          product.favorite = true;
          list.favorites.push(Favorite { id: temp_id, product });
        }
      },
      self.api.add_favorite(list_id, product.id),
      |lists, saved: &Favorite| {
        let entry = lists
          .iter_mut()
          .filter(|l| l.id == list_id)
          .flat_map(|l| l.favorites.iter_mut())
          .find(|f| f.id == temp_id);
        if let Some(entry) = entry {
          *entry = saved.clone();
        }
      },
    )
    .await;

    self.settle(result).await
  }

  #[instrument(name = "FavoritesStore::remove_product", skip(self))]
  pub async fn remove_product(&self, list_id: i64, product_id: u64) -> MutationOutcome {
    let list = match self.confirmed_list(list_id) {
      Ok(list) => list,
      Err(e) => return MutationOutcome::rejected(e),
    };
    if !list.contains_product(product_id) {
      return MutationOutcome::rejected(StoreError::Validation(format!(
        "Product {} is not in '{}'.",
        product_id, list.name
      )));
    }

    let result = perform_optimistic(
      &self.lists,
      "favorites_remove_product",
      |lists| {
        if let Some(list) = lists.iter_mut().find(|l| l.id == list_id) {
          list.favorites.retain(|f| f.product.id != product_id);
        }
      },
      self.api.remove_favorite(list_id, product_id),
      |_, _| {},
    )
    .await;
    self.settle(result).await
  }
}
