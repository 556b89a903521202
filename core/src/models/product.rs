// storefront/src/models/product.rs

use super::de;
use serde::{Deserialize, Serialize};

/// A named reference to a catalog taxonomy entry (category, subcategory, brand).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
  pub id: u64,
  pub name: String,
}

/// A catalog product as the backend returns it.
///
/// Read-only from the client's point of view: changes arrive through a refetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: u64,
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(deserialize_with = "de::price")]
  pub price: i64,
  #[serde(default, deserialize_with = "de::int")]
  pub stock: i64,
  #[serde(default)]
  pub sku: Option<String>,
  #[serde(default)]
  pub category: Option<Reference>,
  #[serde(default)]
  pub subcategory: Option<Reference>,
  #[serde(default)]
  pub brand: Option<Reference>,
  #[serde(default)]
  pub unit: Option<String>,
  #[serde(default, deserialize_with = "de::flag")]
  pub favorite: bool,
  #[serde(default)]
  pub image: Option<String>,
}

impl Product {
  pub fn in_stock(&self) -> bool {
    self.stock > 0
  }
}
