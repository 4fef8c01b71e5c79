//! Product Variants

mod repository;
pub mod service;

use quarry::variants::Variant;

pub use service::*;

/// A variant together with its owning product's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantListing {
    pub variant: Variant,
    pub product_name: String,
}
