// storefront/src/models/cart_item.rs

use super::de;
use super::product::Product;
use serde::{Deserialize, Serialize};

/// One cart line: the product plus how many units the shopper holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
  #[serde(flatten)]
  pub product: Product,
  #[serde(deserialize_with = "de::count")]
  pub quantity: u32,
  #[serde(deserialize_with = "de::amount")]
  pub subtotal: i64,
}

impl CartItem {
  /// Builds a line with the locally derived subtotal.
  pub fn new(product: Product, quantity: u32) -> Self {
    let subtotal = line_subtotal(product.price, quantity);
    Self {
      product,
      quantity,
      subtotal,
    }
  }

  pub fn product_id(&self) -> u64 {
    self.product.id
  }

  /// Sets the quantity and recomputes the subtotal from the unit price.
  pub fn set_quantity(&mut self, quantity: u32) {
    self.quantity = quantity;
    self.subtotal = line_subtotal(self.product.price, quantity);
  }
}

pub fn line_subtotal(price: i64, quantity: u32) -> i64 {
  price.saturating_mul(i64::from(quantity))
}
