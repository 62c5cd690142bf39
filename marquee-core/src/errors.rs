//! Error types for movie catalog operations.

use thiserror::Error;

/// Errors that can occur while talking to a movie catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Title search failed for the specified query.
    #[error("Search failed for query '{query}': {reason}")]
    SearchFailed {
        /// The search query that failed
        query: String,
        /// The reason for the failure
        reason: String,
    },

    /// Detail lookup failed for the specified catalog id.
    #[error("Detail fetch failed for '{imdb_id}': {reason}")]
    DetailFetchFailed {
        /// The catalog id whose lookup failed
        imdb_id: String,
        /// The reason for the failure
        reason: String,
    },

    /// Network communication error.
    #[error("Network error: {reason}")]
    NetworkError {
        /// The reason for the network error
        reason: String,
    },

    /// Failed to parse a catalog response.
    #[error("Parse error: {reason}")]
    ParseError {
        /// The reason for the parse error
        reason: String,
    },

    /// Catalog provider returned an error or is misconfigured.
    #[error("Provider error: {reason}")]
    ProviderError {
        /// The reason for the provider error
        reason: String,
    },
}
