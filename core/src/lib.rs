// storefront/src/lib.rs

//! Storefront: client-side application state for an e-commerce storefront and
//! its back-office.
//!
//! The crate keeps the state a UI renders (catalog pages, cart, favorite lists,
//! users, sales, notifications, site content) and orchestrates the REST calls
//! that change it:
//!  - An explicit [`Storefront`] container instead of a global store.
//!  - Optimistic cart, favorites and read-flag mutations with exact snapshot rollback.
//!  - Client-side fuzzy ranking of the cached catalog page.
//!  - Paged lists that keep the previous page when a load fails.
//!  - Validated payloads: malformed responses fail with a typed error at the boundary.
//!  - Bearer tokens read from a cookie; no token means no request.

pub mod api;
pub mod config;
pub mod debounce;
pub mod error;
pub mod models;
pub mod optimistic;
pub mod pagination;
pub mod search;
pub mod state;
pub mod storefront;
pub mod stores;

// --- Re-exports for the Public API ---

pub use crate::api::{CookieToken, HttpBackend, ProductQuery, SortOrder, StaticToken, TokenSource};
pub use crate::config::StoreConfig;
pub use crate::debounce::Debouncer;
pub use crate::error::{ApiFailure, StoreError, StoreResult};
pub use crate::optimistic::perform_optimistic;
pub use crate::pagination::{PageState, Paginated};
pub use crate::search::{filter_and_rank_products, filter_and_rank_with, SearchWeights};
pub use crate::state::outcome::MutationOutcome;
pub use crate::state::shared::Shared;
pub use crate::storefront::Storefront;
pub use crate::stores::{
  CartStore, ContentStore, FavoritesStore, FilterState, NotificationsStore, OrdersStore, ProductsStore, UsersStore,
};
