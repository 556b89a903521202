// storefront/src/stores/orders.rs

//! Sales dashboard: transaction list, aggregate report and spreadsheet export.

use crate::api::OrdersApi;
use crate::error::StoreResult;
use crate::models::{PageRequest, ReportRange, SalesReport, Transaction};
use crate::pagination::Paginated;
use crate::state::shared::Shared;
use std::sync::Arc;
use tracing::instrument;

#[derive(Clone)]
pub struct OrdersStore {
  pages: Paginated<Transaction>,
  range: Shared<Option<ReportRange>>,
  report: Shared<Option<SalesReport>>,
  per_page: u32,
  api: Arc<dyn OrdersApi>,
}

impl OrdersStore {
  pub fn new(api: Arc<dyn OrdersApi>, per_page: u32) -> Self {
    Self {
      pages: Paginated::new(),
      range: Shared::default(),
      report: Shared::default(),
      per_page,
      api,
    }
  }

  pub fn pages(&self) -> &Paginated<Transaction> {
    &self.pages
  }

  pub fn range(&self) -> Option<ReportRange> {
    *self.range.read()
  }

  pub fn report(&self) -> Option<SalesReport> {
    self.report.snapshot()
  }

  async fn load(&self, request: PageRequest) -> StoreResult<()> {
    let range = self.range();
    let api = Arc::clone(&self.api);
    self
      .pages
      .load(request, |req| async move { api.list_transactions(req, range).await })
      .await
  }

  #[instrument(name = "OrdersStore::load_page", skip(self), err(Display))]
  pub async fn load_page(&self, page: u32) -> StoreResult<()> {
    self.load(PageRequest::new(page, self.per_page)).await
  }

  /// Narrows the transaction list to `range` (or clears it) from the first page.
  #[instrument(name = "OrdersStore::set_range", skip(self), err(Display))]
  pub async fn set_range(&self, range: Option<ReportRange>) -> StoreResult<()> {
    self.range.replace(range);
    self.load(PageRequest::first(self.per_page)).await
  }

  pub async fn retry(&self) -> StoreResult<()> {
    let range = self.range();
    let api = Arc::clone(&self.api);
    self
      .pages
      .retry(|req| async move { api.list_transactions(req, range).await })
      .await
  }

  /// Loads the aggregate report; the previous report stays on failure.
  #[instrument(name = "OrdersStore::load_report", skip(self), err(Display))]
  pub async fn load_report(&self, range: ReportRange) -> StoreResult<SalesReport> {
    let report = self.api.sales_report(range).await?;
    self.report.replace(Some(report.clone()));
    Ok(report)
  }

  /// Downloads the spreadsheet export for `range`.
  #[instrument(name = "OrdersStore::export_transactions", skip(self), err(Display))]
  pub async fn export_transactions(&self, range: ReportRange) -> StoreResult<Vec<u8>> {
    self.api.export_transactions(range).await
  }
}
