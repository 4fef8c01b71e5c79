//! Client configuration

use std::time::Duration;

use clap::Args;

use crate::{
    api::{ApiError, HttpCatalogApi},
    session::Session,
};

/// Where the catalog API lives and how to talk to it.
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    /// Catalog API base URL
    #[arg(long, env = "QUARRY_API_BASE", default_value = "http://localhost:8698")]
    pub api_base: String,

    /// Admin bearer token for write commands
    #[arg(long, env = "QUARRY_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = "QUARRY_TIMEOUT_SECONDS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..=300)
    )]
    pub timeout_seconds: u64,

    /// Items per page when loading the catalog
    #[arg(
        long,
        env = "QUARRY_PAGE_SIZE",
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    pub page_size: u32,
}

impl ClientConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Session built from a configured token, if any.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.token.as_deref().map(Session::from_token)
    }

    /// Build the HTTP API client.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn api(&self) -> Result<HttpCatalogApi, ApiError> {
        HttpCatalogApi::new(&self.api_base, self.timeout())
    }
}
