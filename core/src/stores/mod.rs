// storefront/src/stores/mod.rs

//! One store per slice of the application state.

pub mod cart;
pub mod content;
pub mod favorites;
pub mod filters;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod users;

pub use cart::CartStore;
pub use content::ContentStore;
pub use favorites::FavoritesStore;
pub use filters::FilterState;
pub use notifications::NotificationsStore;
pub use orders::OrdersStore;
pub use products::{ProductsStore, SearchResults};
pub use users::UsersStore;
