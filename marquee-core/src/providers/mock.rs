//! Mock provider implementation for testing.
//!
//! Records every request it receives and can be scripted to fail, letting
//! tests assert on request counts and failure handling without a network.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::CatalogProvider;
use crate::errors::CatalogError;
use crate::types::{MovieDetails, TitleMatch};

/// Scriptable catalog for tests.
///
/// Serves a fixed library of generated titles, counts search and detail
/// requests, and can be told to fail either path. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    inner: Arc<MockState>,
}

#[derive(Debug, Default)]
struct MockState {
    library: Mutex<Vec<MovieDetails>>,
    search_queries: Mutex<Vec<String>>,
    detail_requests: Mutex<Vec<String>>,
    fail_searches: Mutex<bool>,
    fail_details_for: Mutex<Option<String>>,
    response_delay: Mutex<Option<Duration>>,
}

impl MockProvider {
    /// Creates a mock with an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock whose library holds `count` generated titles, all
    /// matching any search query, ids "tt0000001".. in order.
    pub fn with_library(count: usize) -> Self {
        let provider = Self::new();
        let mut library = provider.inner.library.lock().unwrap();
        for index in 1..=count {
            library.push(MovieDetails {
                imdb_id: format!("tt{index:07}"),
                title: format!("Test Movie {index}"),
                year: Some(2000 + index as u16),
                genre: Some("Drama".to_string()),
                director: Some("Test Director".to_string()),
                plot: Some(format!("Plot of test movie {index}.")),
                poster_url: None,
            });
        }
        drop(library);
        provider
    }

    /// Adds one record to the library.
    pub fn push_title(&self, details: MovieDetails) {
        self.inner.library.lock().unwrap().push(details);
    }

    /// All searches fail with `CatalogError::SearchFailed` from now on.
    pub fn fail_searches(&self) {
        *self.inner.fail_searches.lock().unwrap() = true;
    }

    /// Searches succeed again.
    pub fn unfail_searches(&self) {
        *self.inner.fail_searches.lock().unwrap() = false;
    }

    /// Detail lookups for `imdb_id` fail from now on.
    pub fn fail_details_for(&self, imdb_id: &str) {
        *self.inner.fail_details_for.lock().unwrap() = Some(imdb_id.to_string());
    }

    /// Delay every response by `delay` (virtual time under a paused clock).
    pub fn delay_responses(&self, delay: Duration) {
        *self.inner.response_delay.lock().unwrap() = Some(delay);
    }

    /// Search queries received so far, in order.
    pub fn search_queries(&self) -> Vec<String> {
        self.inner.search_queries.lock().unwrap().clone()
    }

    /// Detail-request ids received so far, in order.
    pub fn detail_requests(&self) -> Vec<String> {
        self.inner.detail_requests.lock().unwrap().clone()
    }

    async fn apply_delay(&self) {
        let delay = *self.inner.response_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl CatalogProvider for MockProvider {
    async fn search_titles(&self, query: &str) -> Result<Vec<TitleMatch>, CatalogError> {
        self.inner
            .search_queries
            .lock()
            .unwrap()
            .push(query.to_string());
        self.apply_delay().await;

        if *self.inner.fail_searches.lock().unwrap() {
            return Err(CatalogError::SearchFailed {
                query: query.to_string(),
                reason: "scripted failure".to_string(),
            });
        }

        Ok(self
            .inner
            .library
            .lock()
            .unwrap()
            .iter()
            .map(|movie| TitleMatch {
                imdb_id: movie.imdb_id.clone(),
                title: movie.title.clone(),
                year: movie.year,
            })
            .collect())
    }

    async fn title_details(&self, imdb_id: &str) -> Result<MovieDetails, CatalogError> {
        self.inner
            .detail_requests
            .lock()
            .unwrap()
            .push(imdb_id.to_string());
        self.apply_delay().await;

        if self.inner.fail_details_for.lock().unwrap().as_deref() == Some(imdb_id) {
            return Err(CatalogError::DetailFetchFailed {
                imdb_id: imdb_id.to_string(),
                reason: "scripted failure".to_string(),
            });
        }

        self.inner
            .library
            .lock()
            .unwrap()
            .iter()
            .find(|movie| movie.imdb_id == imdb_id)
            .cloned()
            .ok_or_else(|| CatalogError::DetailFetchFailed {
                imdb_id: imdb_id.to_string(),
                reason: "not in mock library".to_string(),
            })
    }
}
