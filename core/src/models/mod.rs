// storefront/src/models/mod.rs

//! Typed payloads exchanged with the backend.
//!
//! Everything here is validated while deserializing, so a malformed response
//! fails at the network boundary with `StoreError::Decode`.

pub mod cart_item;
pub mod content;
pub(crate) mod de;
pub mod favorite;
pub mod notification;
pub mod order;
pub mod pagination;
pub mod product;
pub mod user;

pub use cart_item::CartItem;
pub use content::{FaqDraft, FaqEntry, SiteInfo, Terms};
pub use favorite::{Favorite, FavoriteList};
pub use notification::{Notification, NotificationDraft};
pub use order::{DailySales, OrderStatus, ReportRange, SalesReport, TopProduct, Transaction};
pub use pagination::{Envelope, MetaLink, Page, PageLinks, PageMeta, PageRequest};
pub use product::{Product, Reference};
pub use user::{NewUser, PasswordChange, Role, User, UserUpdate};
