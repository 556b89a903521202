// storefront/src/models/order.rs

use super::de;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Paid,
  Shipped,
  Delivered,
  Cancelled,
  #[serde(other)]
  Unknown,
}

/// One row of the sales dashboard's transaction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
  pub id: u64,
  #[serde(default)]
  pub code: Option<String>,
  #[serde(default)]
  pub customer: Option<String>,
  #[serde(deserialize_with = "de::amount")]
  pub total: i64,
  pub status: OrderStatus,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySales {
  pub date: NaiveDate,
  #[serde(deserialize_with = "de::amount")]
  pub total: i64,
  #[serde(deserialize_with = "de::count")]
  pub orders: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
  pub product_id: u64,
  pub name: String,
  #[serde(deserialize_with = "de::count")]
  pub quantity: u32,
  #[serde(deserialize_with = "de::amount")]
  pub total: i64,
}

/// Aggregate figures for the sales dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
  #[serde(deserialize_with = "de::amount")]
  pub total_sales: i64,
  #[serde(deserialize_with = "de::count")]
  pub total_orders: u32,
  #[serde(deserialize_with = "de::decimal")]
  pub average_ticket: f64,
  #[serde(default)]
  pub daily: Vec<DailySales>,
  #[serde(default)]
  pub top_products: Vec<TopProduct>,
}

/// Inclusive date range for reports and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
  pub from: NaiveDate,
  pub to: NaiveDate,
}

impl ReportRange {
  /// Returns `None` when `from` falls after `to`.
  pub fn new(from: NaiveDate, to: NaiveDate) -> Option<Self> {
    (from <= to).then_some(Self { from, to })
  }

  pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
    vec![
      ("from", self.from.format("%Y-%m-%d").to_string()),
      ("to", self.to.format("%Y-%m-%d").to_string()),
    ]
  }
}
