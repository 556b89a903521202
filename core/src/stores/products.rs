// storefront/src/stores/products.rs

//! Catalog pages, filters and client-side search over the cached page.

use super::filters::FilterState;
use crate::api::CatalogApi;
use crate::error::{StoreError, StoreResult};
use crate::models::{PageRequest, Product};
use crate::pagination::Paginated;
use crate::search::{filter_and_rank_with, SearchWeights};
use crate::state::shared::Shared;
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// Ranked results for the term currently typed in the search box.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults {
  pub term: String,
  pub products: Vec<Product>,
}

#[derive(Clone)]
pub struct ProductsStore {
  pages: Paginated<Product>,
  filters: Shared<FilterState>,
  /// Filters of the last load that failed, until a retry or another load succeeds.
  pending: Shared<Option<FilterState>>,
  results: Shared<Option<SearchResults>>,
  weights: Arc<SearchWeights>,
  api: Arc<dyn CatalogApi>,
}

impl ProductsStore {
  pub fn new(api: Arc<dyn CatalogApi>, per_page: u32) -> Self {
    Self::with_weights(api, per_page, SearchWeights::default())
  }

  pub fn with_weights(api: Arc<dyn CatalogApi>, per_page: u32, weights: SearchWeights) -> Self {
    Self {
      pages: Paginated::new(),
      filters: Shared::new(FilterState::new(per_page)),
      pending: Shared::default(),
      results: Shared::default(),
      weights: Arc::new(weights),
      api,
    }
  }

  pub fn pages(&self) -> &Paginated<Product> {
    &self.pages
  }

  pub fn filters(&self) -> FilterState {
    self.filters.snapshot()
  }

  pub fn search_results(&self) -> Option<SearchResults> {
    self.results.snapshot()
  }

  /// What the product grid renders: ranked results while a term is active,
  /// otherwise the loaded page.
  pub fn visible(&self) -> Vec<Product> {
    match &*self.results.read() {
      Some(results) => results.products.clone(),
      None => self.pages.items(),
    }
  }

  pub fn product(&self, product_id: u64) -> Option<Product> {
    self.pages.items().into_iter().find(|p| p.id == product_id)
  }

  /// Loads with `filters` and commits them only once the page arrived.
  async fn load(&self, filters: FilterState) -> StoreResult<()> {
    let query = filters.to_query();
    let api = Arc::clone(&self.api);
    let result = self
      .pages
      .load(filters.page_request(), |_| async move { api.list_products(&query).await })
      .await;
    self.settle(filters, result)
  }

  fn settle(&self, filters: FilterState, result: StoreResult<()>) -> StoreResult<()> {
    match result {
      Ok(()) => {
        self.filters.replace(filters);
        self.pending.replace(None);
        self.results.replace(None);
        Ok(())
      }
      Err(StoreError::Validation(message)) => Err(StoreError::Validation(message)),
      Err(e) => {
        self.pending.replace(Some(filters));
        Err(e)
      }
    }
  }

  /// Loads `page` with the current filters.
  #[instrument(name = "ProductsStore::load_page", skip(self), err(Display))]
  pub async fn load_page(&self, page: u32) -> StoreResult<()> {
    let filters = FilterState { page, ..self.filters() };
    self.load(filters).await
  }

  /// Replaces the filters and jumps back to the first page. The previous
  /// filters stay in effect if the load fails.
  #[instrument(name = "ProductsStore::apply_filters", skip(self), err(Display))]
  pub async fn apply_filters(&self, filters: FilterState) -> StoreResult<()> {
    self.load(FilterState { page: 1, ..filters }).await
  }

  /// Server-side search; resets to the first page.
  pub async fn search_remote(&self, term: &str) -> StoreResult<()> {
    let filters = self.filters().with_search(term);
    self.apply_filters(filters).await
  }

  /// Re-issues the last page request after an inline error, with the filters
  /// that request was made for.
  #[instrument(name = "ProductsStore::retry", skip(self), err(Display))]
  pub async fn retry(&self) -> StoreResult<()> {
    let filters = self.pending.snapshot().unwrap_or_else(|| self.filters());
    let query = filters.to_query();
    let api = Arc::clone(&self.api);
    let result = self
      .pages
      .retry(|request: PageRequest| async move {
        let mut query = query;
        query.page = request;
        api.list_products(&query).await
      })
      .await;
    let page = self.pages.last_request().map_or(filters.page, |r| r.page);
    self.settle(FilterState { page, ..filters }, result)
  }

  /// Ranks the cached page against `term` without a server round-trip and
  /// makes the result the visible list. An empty term clears the search.
  #[instrument(name = "ProductsStore::search_local", skip(self))]
  pub fn search_local(&self, term: &str) -> Vec<Product> {
    if term.trim().is_empty() {
      self.results.replace(None);
      return self.pages.items();
    }
    let ranked = filter_and_rank_with(&self.pages.items(), term, &self.weights);
    event!(Level::DEBUG, matches = ranked.len(), "Local search ranked.");
    self.results.replace(Some(SearchResults {
      term: term.to_string(),
      products: ranked.clone(),
    }));
    ranked
  }

  pub fn clear_search(&self) {
    self.results.replace(None);
  }
}
