// storefront/src/api/query.rs

use crate::models::PageRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
  #[default]
  Relevance,
  PriceAsc,
  PriceDesc,
  NameAsc,
  NameDesc,
  Newest,
}

impl SortOrder {
  /// Value of the backend's `sort` parameter; `None` leaves the server default.
  pub fn as_param(&self) -> Option<&'static str> {
    match self {
      SortOrder::Relevance => None,
      SortOrder::PriceAsc => Some("price_asc"),
      SortOrder::PriceDesc => Some("price_desc"),
      SortOrder::NameAsc => Some("name_asc"),
      SortOrder::NameDesc => Some("name_desc"),
      SortOrder::Newest => Some("newest"),
    }
  }
}

/// A catalog listing request: which page, and which slice of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
  pub page: PageRequest,
  pub search: Option<String>,
  pub category_id: Option<u64>,
  pub subcategory_id: Option<u64>,
  pub brand_id: Option<u64>,
  pub sort: SortOrder,
}

impl ProductQuery {
  pub fn page(page: PageRequest) -> Self {
    Self {
      page,
      search: None,
      category_id: None,
      subcategory_id: None,
      brand_id: None,
      sort: SortOrder::default(),
    }
  }

  /// The trimmed search term, if one is set and non-empty.
  pub fn search_term(&self) -> Option<&str> {
    self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
  }

  pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
    let mut params = self.page.query();
    if let Some(term) = self.search_term() {
      params.push(("q", term.to_string()));
    }
    if let Some(id) = self.category_id {
      params.push(("category_id", id.to_string()));
    }
    if let Some(id) = self.subcategory_id {
      params.push(("subcategory_id", id.to_string()));
    }
    if let Some(id) = self.brand_id {
      params.push(("brand_id", id.to_string()));
    }
    if let Some(sort) = self.sort.as_param() {
      params.push(("sort", sort.to_string()));
    }
    params
  }
}
