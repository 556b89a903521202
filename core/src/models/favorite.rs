// storefront/src/models/favorite.rs

use super::product::Product;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
  pub id: i64,
  pub product: Product,
}

/// A named, ordered list of favorite products.
///
/// Negative ids mark lists and entries the server has not confirmed yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteList {
  pub id: i64,
  pub name: String,
  #[serde(default)]
  pub favorites: Vec<Favorite>,
}

impl FavoriteList {
  pub fn is_optimistic(&self) -> bool {
    self.id < 0
  }

  pub fn contains_product(&self, product_id: u64) -> bool {
    self.favorites.iter().any(|f| f.product.id == product_id)
  }
}
