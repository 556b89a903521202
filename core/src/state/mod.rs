// storefront/src/state/mod.rs

//! Slice handles and mutation outcomes shared by every store.

pub mod outcome;
pub mod shared;
