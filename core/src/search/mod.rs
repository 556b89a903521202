// storefront/src/search/mod.rs

//! Client-side fuzzy ranking over cached products.

pub mod distance;
pub mod normalize;
pub mod rank;

pub use normalize::normalize;
pub use rank::{filter_and_rank_products, filter_and_rank_with, score_product, SearchQuery, SearchWeights};
