//! Catalog Domain Concerns

pub mod collections;
pub mod errors;
pub mod gallery;
mod paging;
pub mod products;
pub mod variants;

pub use errors::CatalogServiceError;
