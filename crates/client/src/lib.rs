//! Quarry catalog client
//!
//! Talks to the Quarry JSON API, keeps the public catalog in a local store and
//! drives browsing and admin edits on top of it.

pub mod admin;
pub mod api;
pub mod browser;
pub mod config;
mod loader;
pub mod session;
