// storefront/src/storefront.rs

//! The application-state container handed to UI code.

use crate::api::{Backend, HttpBackend, TokenSource};
use crate::config::StoreConfig;
use crate::debounce::Debouncer;
use crate::error::StoreResult;
use crate::stores::{
  CartStore, ContentStore, FavoritesStore, NotificationsStore, OrdersStore, ProductsStore, UsersStore,
};
use std::sync::Arc;
use tracing::{event, instrument, Level};

/// Every slice of client state, built once and passed to whoever renders it.
///
/// Cloning is cheap and shares the slices.
#[derive(Clone)]
pub struct Storefront {
  pub products: ProductsStore,
  pub cart: CartStore,
  pub favorites: FavoritesStore,
  pub users: UsersStore,
  pub orders: OrdersStore,
  pub notifications: NotificationsStore,
  pub content: ContentStore,
  config: Arc<StoreConfig>,
}

impl Storefront {
  pub fn new<B: Backend + 'static>(backend: Arc<B>, config: StoreConfig) -> Self {
    let per_page = config.default_per_page;
    event!(Level::DEBUG, per_page, "Building storefront state.");
    Self {
      products: ProductsStore::new(backend.clone(), per_page),
      cart: CartStore::new(backend.clone()),
      favorites: FavoritesStore::new(backend.clone()),
      users: UsersStore::new(backend.clone(), per_page),
      orders: OrdersStore::new(backend.clone(), per_page),
      notifications: NotificationsStore::new(backend.clone(), per_page),
      content: ContentStore::new(backend),
      config: Arc::new(config),
    }
  }

  /// Builds the container on top of the REST backend.
  pub fn connect(config: StoreConfig, tokens: Arc<dyn TokenSource>) -> Self {
    let backend = Arc::new(HttpBackend::from_config(&config, tokens));
    Self::new(backend, config)
  }

  pub fn config(&self) -> &StoreConfig {
    &self.config
  }

  /// A debouncer for the search box: the term left after the quiet period
  /// ranks the cached catalog page.
  pub fn debounced_search(&self) -> Debouncer<String> {
    let products = self.products.clone();
    Debouncer::spawn(self.config.search_debounce, move |term: String| {
      let products = products.clone();
      async move {
        products.search_local(&term);
      }
    })
  }

  /// Loads what the storefront landing page shows: the first catalog page,
  /// the cart and the favorite lists. Each slice records its own outcome; the
  /// first error is returned.
  #[instrument(name = "Storefront::bootstrap", skip(self), err(Display))]
  pub async fn bootstrap(&self) -> StoreResult<()> {
    let (products, cart, favorites) =
      tokio::join!(self.products.load_page(1), self.cart.fetch(), self.favorites.fetch());
    products.and(cart).and(favorites)
  }
}
