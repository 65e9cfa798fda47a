//! One-shot startup fetch that seeds the list from a remote comment API.

use futures::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Endpoint used when no other is configured
pub const DEFAULT_SEED_URL: &str = "https://jsonplaceholder.typicode.com/comments?_limit=10";

/// A remote record; only the identifier and display name are read
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRecord {
    /// Identifier assigned by the remote source
    pub id: u64,
    /// Display name, used as the item text
    pub name: String,
}

/// Errors that can occur while fetching seed records
#[derive(Debug, Error)]
pub enum SeedError {
    /// Network unreachable, DNS failure, connection reset and the like
    #[error("request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success status
    #[error("unexpected response status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The body was not a list of records
    #[error("response parsing failed: {0}")]
    Parse(String),
}

/// Where seed records come from
///
/// Injected through the environment so tests can substitute a stub.
pub trait SeedSource: Send + Sync {
    /// Fetch the records once
    fn fetch(&self) -> BoxFuture<'static, Result<Vec<SeedRecord>, SeedError>>;
}

/// Fetches records with a single unauthenticated `GET`
///
/// No retry and no timeout of its own; whatever the transport does applies.
#[derive(Clone, Debug)]
pub struct HttpSeedSource {
    client: Client,
    url: String,
}

impl HttpSeedSource {
    /// Create a source for `url`
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// The endpoint this source reads from
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Issue the request and decode the body
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] for transport failures, non-success statuses, or
    /// bodies that do not decode into records.
    pub async fn fetch_records(&self) -> Result<Vec<SeedRecord>, SeedError> {
        tracing::info!(url = %self.url, "Fetching seed records");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SeedError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SeedError::Status {
                status: status.as_u16(),
            });
        }

        let records = response
            .json::<Vec<SeedRecord>>()
            .await
            .map_err(|e| SeedError::Parse(e.to_string()))?;

        tracing::info!(count = records.len(), "Seed records fetched");
        Ok(records)
    }
}

impl SeedSource for HttpSeedSource {
    fn fetch(&self) -> BoxFuture<'static, Result<Vec<SeedRecord>, SeedError>> {
        let source = self.clone();
        Box::pin(async move { source.fetch_records().await })
    }
}
