//! Provider implementations for movie catalog access.

use async_trait::async_trait;

use crate::errors::CatalogError;
use crate::types::{MovieDetails, TitleMatch};

pub mod demo;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod omdb;

pub use demo::DemoProvider;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockProvider;
pub use omdb::OmdbProvider;

/// Trait for movie catalog providers.
///
/// Implementations back the search widget through different sources
/// (the OMDb HTTP API, canned demo data, mock providers for testing).
#[async_trait]
pub trait CatalogProvider: Send + Sync + std::fmt::Debug {
    /// Search the catalog for titles matching a free-text query.
    ///
    /// Returns all matches the provider reports, in provider order. A query
    /// with no matches is an empty list, not an error.
    ///
    /// # Errors
    /// - `CatalogError::SearchFailed` - Provider rejected the search
    /// - `CatalogError::NetworkError` - Network connectivity issues
    /// - `CatalogError::ParseError` - Malformed provider response
    async fn search_titles(&self, query: &str) -> Result<Vec<TitleMatch>, CatalogError>;

    /// Fetch the full record for one catalog id.
    ///
    /// # Errors
    /// - `CatalogError::DetailFetchFailed` - Lookup failed or id unknown
    /// - `CatalogError::NetworkError` - Network connectivity issues
    /// - `CatalogError::ParseError` - Malformed provider response
    async fn title_details(&self, imdb_id: &str) -> Result<MovieDetails, CatalogError>;
}
