// storefront/src/pagination.rs

//! Paged list state shared by every list screen.

use crate::error::{ApiFailure, StoreError, StoreResult};
use crate::models::{Page, PageLinks, PageMeta, PageRequest};
use crate::state::shared::Shared;
use std::future::Future;
use tracing::{event, instrument, Level};

/// What a pager renders: the current page's rows plus the backend's meta and links.
#[derive(Debug, Clone)]
pub struct PageState<T> {
  pub items: Vec<T>,
  pub meta: Option<PageMeta>,
  pub links: Option<PageLinks>,
  pub loading: bool,
  pub error: Option<ApiFailure>,
  pub last_request: Option<PageRequest>,
}

impl<T> Default for PageState<T> {
  fn default() -> Self {
    Self {
      items: Vec::new(),
      meta: None,
      links: None,
      loading: false,
      error: None,
      last_request: None,
    }
  }
}

/// A paged list backed by a fetch function supplied per call.
///
/// A failed load keeps the previously loaded page and records the failure for
/// an inline message; nothing is retried automatically.
#[derive(Debug)]
pub struct Paginated<T: Send + Sync + 'static> {
  state: Shared<PageState<T>>,
}

impl<T: Send + Sync + 'static> Clone for Paginated<T> {
  fn clone(&self) -> Self {
    Self {
      state: self.state.clone(),
    }
  }
}

impl<T: Send + Sync + 'static> Default for Paginated<T> {
  fn default() -> Self {
    Self {
      state: Shared::new(PageState::default()),
    }
  }
}

impl<T: Clone + Send + Sync + 'static> Paginated<T> {
  pub fn new() -> Self {
    Self::default()
  }

  pub(crate) fn slot(&self) -> &Shared<PageState<T>> {
    &self.state
  }

  pub fn state(&self) -> PageState<T> {
    self.state.snapshot()
  }

  pub fn items(&self) -> Vec<T> {
    self.state.read().items.clone()
  }

  pub fn meta(&self) -> Option<PageMeta> {
    self.state.read().meta.clone()
  }

  pub fn current_page(&self) -> Option<u32> {
    self.state.read().meta.as_ref().map(|m| m.current_page)
  }

  pub fn last_page(&self) -> Option<u32> {
    self.state.read().meta.as_ref().map(|m| m.last_page)
  }

  pub fn is_loading(&self) -> bool {
    self.state.read().loading
  }

  pub fn error(&self) -> Option<ApiFailure> {
    self.state.read().error.clone()
  }

  pub fn last_request(&self) -> Option<PageRequest> {
    self.state.read().last_request
  }

  /// Edits the loaded rows in place (e.g. flipping a read flag).
  pub fn update_items<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> R {
    self.state.update(|s| f(&mut s.items))
  }

  /// Fetches `request` and stores the returned page verbatim.
  #[instrument(name = "Paginated::load", skip_all, fields(page = request.page, per_page = request.per_page), err(Display))]
  pub async fn load<F, Fut>(&self, request: PageRequest, fetch: F) -> StoreResult<()>
  where
    F: FnOnce(PageRequest) -> Fut,
    Fut: Future<Output = StoreResult<Page<T>>>,
  {
    if request.page == 0 || request.per_page == 0 {
      return Err(StoreError::Validation("Page and page size start at 1.".to_string()));
    }

    self.state.update(|s| {
      s.loading = true;
      s.last_request = Some(request);
    });

    match fetch(request).await {
      Ok(page) => {
        event!(
          Level::DEBUG,
          rows = page.data.len(),
          current_page = page.meta.current_page,
          last_page = page.meta.last_page,
          "Page stored."
        );
        self.state.update(|s| {
          s.items = page.data;
          s.meta = Some(page.meta);
          s.links = Some(page.links);
          s.loading = false;
          s.error = None;
        });
        Ok(())
      }
      Err(e) => {
        event!(Level::WARN, error = %e, "Page load failed, keeping previous rows.");
        self.state.update(|s| {
          s.loading = false;
          s.error = Some(e.failure());
        });
        Err(e)
      }
    }
  }

  /// Re-issues the last request, for the inline "retry" button.
  pub async fn retry<F, Fut>(&self, fetch: F) -> StoreResult<()>
  where
    F: FnOnce(PageRequest) -> Fut,
    Fut: Future<Output = StoreResult<Page<T>>>,
  {
    let request = self
      .last_request()
      .ok_or_else(|| StoreError::Validation("Nothing to retry: no page was requested yet.".to_string()))?;
    self.load(request, fetch).await
  }

  /// Reloads whatever page is showing, or `fallback` if nothing was loaded.
  pub async fn refresh<F, Fut>(&self, fallback: PageRequest, fetch: F) -> StoreResult<()>
  where
    F: FnOnce(PageRequest) -> Fut,
    Fut: Future<Output = StoreResult<Page<T>>>,
  {
    let request = self.last_request().unwrap_or(fallback);
    self.load(request, fetch).await
  }
}
