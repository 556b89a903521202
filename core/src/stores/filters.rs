// storefront/src/stores/filters.rs

use crate::api::{ProductQuery, SortOrder};
use crate::models::PageRequest;

/// Catalog filters as the sidebar and search box set them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
  pub search: Option<String>,
  pub category_id: Option<u64>,
  pub subcategory_id: Option<u64>,
  pub brand_id: Option<u64>,
  pub sort: SortOrder,
  pub page: u32,
  pub per_page: u32,
}

impl FilterState {
  pub fn new(per_page: u32) -> Self {
    Self {
      search: None,
      category_id: None,
      subcategory_id: None,
      brand_id: None,
      sort: SortOrder::default(),
      page: 1,
      per_page,
    }
  }

  pub fn with_category(mut self, category_id: u64) -> Self {
    // A subcategory belongs to one category; picking another category drops it.
    if self.category_id != Some(category_id) {
      self.subcategory_id = None;
    }
    self.category_id = Some(category_id);
    self
  }

  pub fn with_subcategory(mut self, subcategory_id: u64) -> Self {
    self.subcategory_id = Some(subcategory_id);
    self
  }

  pub fn with_brand(mut self, brand_id: u64) -> Self {
    self.brand_id = Some(brand_id);
    self
  }

  pub fn with_sort(mut self, sort: SortOrder) -> Self {
    self.sort = sort;
    self
  }

  pub fn with_search(mut self, term: impl Into<String>) -> Self {
    let term = term.into();
    self.search = (!term.trim().is_empty()).then_some(term);
    self
  }

  /// True when anything narrows the catalog beyond paging.
  pub fn is_filtered(&self) -> bool {
    self.search.is_some() || self.category_id.is_some() || self.subcategory_id.is_some() || self.brand_id.is_some()
  }

  /// Drops every filter but keeps the page size.
  pub fn cleared(&self) -> Self {
    Self::new(self.per_page)
  }

  pub fn page_request(&self) -> PageRequest {
    PageRequest::new(self.page, self.per_page)
  }

  pub fn to_query(&self) -> ProductQuery {
    ProductQuery {
      page: self.page_request(),
      search: self.search.clone(),
      category_id: self.category_id,
      subcategory_id: self.subcategory_id,
      brand_id: self.brand_id,
      sort: self.sort,
    }
  }
}
