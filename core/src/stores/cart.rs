// storefront/src/stores/cart.rs

//! The shopping cart slice and its optimistic add/remove actions.

use crate::api::CartApi;
use crate::error::{StoreError, StoreResult};
use crate::models::{CartItem, Product};
use crate::optimistic::{perform_optimistic, reconcile};
use crate::state::outcome::MutationOutcome;
use crate::state::shared::Shared;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// Adds `quantity` units of `product` to `items`.
///
/// Increments the existing line for the same product id, otherwise appends a
/// new line. Subtotals are recomputed as price × quantity.
pub fn apply_add(items: &mut Vec<CartItem>, product: &Product, quantity: u32, unit: Option<&str>) {
  match items.iter_mut().find(|line| line.product_id() == product.id) {
    Some(line) => {
      let new_quantity = line.quantity.saturating_add(quantity);
      line.set_quantity(new_quantity);
    }
    None => {
      let mut product = product.clone();
      if let Some(unit) = unit {
        product.unit = Some(unit.to_string());
      }
      items.push(CartItem::new(product, quantity));
    }
  }
}

/// Removes up to `quantity` units of `product_id`. A line that reaches zero is
/// dropped entirely; quantities never go negative.
pub fn apply_remove(items: &mut Vec<CartItem>, product_id: u64, quantity: u32) {
  if let Some(idx) = items.iter().position(|line| line.product_id() == product_id) {
    let line = &mut items[idx];
    if quantity >= line.quantity {
      items.remove(idx);
    } else {
      let remaining = line.quantity - quantity;
      line.set_quantity(remaining);
    }
  }
}

#[derive(Clone)]
pub struct CartStore {
  items: Shared<Vec<CartItem>>,
  stale: Arc<AtomicBool>,
  api: Arc<dyn CartApi>,
}

impl CartStore {
  pub fn new(api: Arc<dyn CartApi>) -> Self {
    Self {
      items: Shared::default(),
      stale: Arc::new(AtomicBool::new(false)),
      api,
    }
  }

  pub fn items(&self) -> Vec<CartItem> {
    self.items.snapshot()
  }

  pub fn line(&self, product_id: u64) -> Option<CartItem> {
    self.items.read().iter().find(|l| l.product_id() == product_id).cloned()
  }

  pub fn total(&self) -> i64 {
    self.items.read().iter().map(|l| l.subtotal).sum()
  }

  /// Units across all lines, for the header badge.
  pub fn item_count(&self) -> u32 {
    self.items.read().iter().map(|l| l.quantity).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.items.read().is_empty()
  }

  /// True when a confirmed mutation could not be followed by a refetch, so the
  /// local lines are the optimistic estimate rather than server state.
  pub fn is_stale(&self) -> bool {
    self.stale.load(Ordering::Acquire)
  }

  /// Loads the authoritative cart.
  #[instrument(name = "CartStore::fetch", skip(self), err(Display))]
  pub async fn fetch(&self) -> StoreResult<()> {
    reconcile(&self.items, "cart", self.api.get_cart()).await?;
    self.stale.store(false, Ordering::Release);
    Ok(())
  }

  #[instrument(name = "CartStore::add_product_optimistic", skip(self, product), fields(price = product.price))]
  pub async fn add_product_optimistic(
    &self,
    product_id: u64,
    quantity: u32,
    unit: Option<&str>,
    product: &Product,
  ) -> MutationOutcome {
    if quantity == 0 {
      return MutationOutcome::rejected(StoreError::Validation("Quantity must be a positive number.".to_string()));
    }
    if product.id != product_id {
      return MutationOutcome::rejected(StoreError::Validation(format!(
        "Product {} does not match id {}.",
        product.id, product_id
      )));
    }

    let result = perform_optimistic(
      &self.items,
      "cart_add",
      |items| apply_add(items, product, quantity, unit),
      self.api.add_to_cart(product_id, quantity, unit),
      |_, _| {},
    )
    .await;
    self.settle(result).await
  }

  #[instrument(name = "CartStore::remove_product_optimistic", skip(self, item), fields(product_id = item.product_id()))]
  pub async fn remove_product_optimistic(&self, item: &CartItem, quantity: u32) -> MutationOutcome {
    if quantity == 0 {
      return MutationOutcome::rejected(StoreError::Validation("Quantity must be a positive number.".to_string()));
    }
    let product_id = item.product_id();
    let Some(held) = self.line(product_id).map(|l| l.quantity) else {
      return MutationOutcome::rejected(StoreError::Validation(format!(
        "Product {} is not in the cart.",
        product_id
      )));
    };
    let quantity = quantity.min(held);

    let result = perform_optimistic(
      &self.items,
      "cart_remove",
      |items| apply_remove(items, product_id, quantity),
      self.api.remove_from_cart(product_id, quantity),
      |_, _| {},
    )
    .await;
    self.settle(result).await
  }

  /// Empties the cart, restoring it if the server refuses.
  #[instrument(name = "CartStore::clear", skip(self))]
  pub async fn clear(&self) -> MutationOutcome {
    let result = perform_optimistic(&self.items, "cart_clear", Vec::clear, self.api.clear_cart(), |_, _| {}).await;
    self.settle(result).await
  }

  /// Follows a confirmed mutation with the authoritative cart.
  async fn settle(&self, result: StoreResult<()>) -> MutationOutcome {
    if let Err(e) = result {
      return MutationOutcome::reverted(e);
    }
    match reconcile(&self.items, "cart", self.api.get_cart()).await {
      Ok(()) => self.stale.store(false, Ordering::Release),
      Err(e) => {
        event!(Level::WARN, error = %e, "Cart refetch failed, keeping optimistic lines.");
        self.stale.store(true, Ordering::Release);
      }
    }
    MutationOutcome::Confirmed
  }
}
