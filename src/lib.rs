//! Quarry
//!
//! Catalog model, page protocol and browsing state for a stone and marble export
//! catalog: collections hold products, products hold variants, variants hold up
//! to three images. Only products with at least one imaged variant are shown to
//! the public.

pub mod active;
pub mod collections;
pub mod entity;
pub mod gallery;
pub mod ids;
pub mod lightbox;
pub mod pagination;
pub mod prelude;
pub mod products;
pub mod selection;
pub mod store;
pub mod validation;
pub mod variants;
