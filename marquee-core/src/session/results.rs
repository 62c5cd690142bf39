//! Results controller: the committed-query fetch cycle.

use std::sync::Arc;

use futures::future::try_join_all;
use tokio::sync::mpsc;

use super::SessionEvent;
use crate::errors::CatalogError;
use crate::providers::CatalogProvider;
use crate::types::MovieDetails;

/// How many search matches are expanded into detail lookups per cycle.
pub const DETAIL_FETCH_CAP: usize = 12;

/// Owns the movie list and the loading/error flags.
///
/// One fetch cycle runs per committed-query change: a title search, then a
/// concurrent detail lookup per match (capped at [`DETAIL_FETCH_CAP`]),
/// joined with fail-fast semantics. Cycles are tagged with a generation so
/// a settlement from a superseded cycle applies nothing.
#[derive(Debug)]
pub struct ResultsController {
    committed: Option<String>,
    movies: Vec<MovieDetails>,
    loading: bool,
    error: bool,
    generation: u64,
    catalog: Arc<dyn CatalogProvider>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl ResultsController {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            committed: None,
            movies: Vec::new(),
            loading: false,
            error: false,
            generation: 0,
            catalog,
            events,
        }
    }

    /// Movie cards from the most recent successful cycle.
    pub fn movies(&self) -> &[MovieDetails] {
        &self.movies
    }

    /// Whether a fetch cycle is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the last settled cycle failed.
    pub fn has_error(&self) -> bool {
        self.error
    }

    /// The query driving the current movie list.
    pub fn committed_query(&self) -> Option<&str> {
        self.committed.as_deref()
    }

    /// Commits a query and starts a fetch cycle for it.
    ///
    /// Committing the text already committed is a no-op; cycles run only
    /// when the committed query changes.
    pub fn commit(&mut self, query: String) {
        if self.committed.as_deref() == Some(query.as_str()) {
            return;
        }
        self.committed = Some(query);
        self.start_cycle();
    }

    /// Applies a settled cycle outcome.
    ///
    /// Settlements from superseded generations are discarded wholesale:
    /// they touch neither the movie list nor the flags.
    pub(crate) fn apply_settlement(
        &mut self,
        generation: u64,
        outcome: Result<Vec<MovieDetails>, CatalogError>,
    ) {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "discarding stale cycle");
            return;
        }

        self.loading = false;
        match outcome {
            Ok(movies) => {
                self.movies = movies;
            }
            Err(error) => {
                tracing::warn!("fetch cycle failed: {error}");
                self.error = true;
            }
        }
    }

    fn start_cycle(&mut self) {
        self.generation += 1;
        self.loading = true;
        self.error = false;

        let generation = self.generation;
        let catalog = self.catalog.clone();
        let events = self.events.clone();
        let query = self
            .committed
            .clone()
            .unwrap_or_default();

        tracing::info!(%query, generation, "starting fetch cycle");
        tokio::spawn(async move {
            let outcome = fetch_movie_batch(catalog.as_ref(), &query, DETAIL_FETCH_CAP).await;
            let _ = events.send(SessionEvent::CycleSettled {
                generation,
                outcome,
            });
        });
    }
}

/// Runs one fetch cycle: title search, then a concurrent detail lookup per
/// match, capped at `cap`.
///
/// Details come back in match order. The join is fail-fast: the first
/// failing lookup fails the whole batch.
///
/// # Errors
/// - `CatalogError` - The search or any detail lookup failed
pub async fn fetch_movie_batch(
    catalog: &dyn CatalogProvider,
    query: &str,
    cap: usize,
) -> Result<Vec<MovieDetails>, CatalogError> {
    let matches = catalog.search_titles(query).await?;

    let lookups = matches
        .iter()
        .take(cap)
        .map(|entry| catalog.title_details(&entry.imdb_id));

    try_join_all(lookups).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockProvider;

    fn controller(
        catalog: MockProvider,
    ) -> (
        ResultsController,
        mpsc::UnboundedReceiver<SessionEvent>,
    ) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (ResultsController::new(Arc::new(catalog), sender), receiver)
    }

    async fn settle_once(
        controller: &mut ResultsController,
        receiver: &mut mpsc::UnboundedReceiver<SessionEvent>,
    ) {
        match receiver.recv().await.expect("event channel open") {
            SessionEvent::CycleSettled {
                generation,
                outcome,
            } => controller.apply_settlement(generation, outcome),
            other => panic!("expected CycleSettled, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_cycle_issues_one_search_and_capped_details() {
        let catalog = MockProvider::with_library(20);
        let (mut controller, mut events) = controller(catalog.clone());

        controller.commit("mission impossible".to_string());
        assert!(controller.is_loading());
        settle_once(&mut controller, &mut events).await;

        assert_eq!(catalog.search_queries(), vec!["mission impossible"]);
        assert_eq!(catalog.detail_requests().len(), DETAIL_FETCH_CAP);
        assert_eq!(controller.movies().len(), DETAIL_FETCH_CAP);
        assert!(!controller.is_loading());
        assert!(!controller.has_error());
    }

    #[tokio::test]
    async fn test_movies_preserve_match_order() {
        let catalog = MockProvider::with_library(5);
        let (mut controller, mut events) = controller(catalog.clone());

        controller.commit("anything".to_string());
        settle_once(&mut controller, &mut events).await;

        let ids: Vec<&str> = controller
            .movies()
            .iter()
            .map(|movie| movie.imdb_id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec!["tt0000001", "tt0000002", "tt0000003", "tt0000004", "tt0000005"]
        );
    }

    #[tokio::test]
    async fn test_failed_search_sets_error_and_keeps_movies() {
        let catalog = MockProvider::with_library(2);
        let (mut controller, mut events) = controller(catalog.clone());

        controller.commit("first".to_string());
        settle_once(&mut controller, &mut events).await;
        assert_eq!(controller.movies().len(), 2);

        catalog.fail_searches();
        controller.commit("second".to_string());
        assert!(controller.is_loading());
        assert!(!controller.has_error());
        settle_once(&mut controller, &mut events).await;

        assert!(controller.has_error());
        assert!(!controller.is_loading());
        // Stale data stays visible alongside the error banner.
        assert_eq!(controller.movies().len(), 2);
    }

    #[tokio::test]
    async fn test_one_failing_detail_fails_the_cycle() {
        let catalog = MockProvider::with_library(4);
        catalog.fail_details_for("tt0000003");
        let (mut controller, mut events) = controller(catalog.clone());

        controller.commit("anything".to_string());
        settle_once(&mut controller, &mut events).await;

        assert!(controller.has_error());
        assert!(controller.movies().is_empty());
    }

    #[tokio::test]
    async fn test_empty_match_list_is_success_with_no_cards() {
        let catalog = MockProvider::new();
        let (mut controller, mut events) = controller(catalog.clone());

        controller.commit("nothing matches".to_string());
        settle_once(&mut controller, &mut events).await;

        assert!(!controller.has_error());
        assert!(controller.movies().is_empty());
        assert!(catalog.detail_requests().is_empty());
    }

    #[tokio::test]
    async fn test_recommit_same_query_is_noop() {
        let catalog = MockProvider::with_library(1);
        let (mut controller, mut events) = controller(catalog.clone());

        controller.commit("batman".to_string());
        settle_once(&mut controller, &mut events).await;
        controller.commit("batman".to_string());

        assert!(!controller.is_loading());
        assert_eq!(catalog.search_queries().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_generation_settlement_is_discarded() {
        let catalog = MockProvider::with_library(3);
        let (mut controller, mut events) = controller(catalog.clone());

        controller.commit("first".to_string());
        // Supersede the first cycle before its settlement is applied.
        controller.commit("second".to_string());

        settle_once(&mut controller, &mut events).await;
        settle_once(&mut controller, &mut events).await;

        // Only the second cycle's settlement counted.
        assert!(!controller.is_loading());
        assert!(!controller.has_error());
        assert_eq!(controller.movies().len(), 3);
    }

    #[tokio::test]
    async fn test_stale_failure_does_not_clear_newer_loading() {
        let catalog = MockProvider::with_library(1);
        let (mut controller, _events) = controller(catalog.clone());

        controller.commit("first".to_string());
        controller.commit("second".to_string());

        // A failure report from the superseded first cycle arrives while the
        // second is still in flight; it must not touch the flags.
        controller.apply_settlement(
            1,
            Err(CatalogError::SearchFailed {
                query: "first".to_string(),
                reason: "late failure".to_string(),
            }),
        );

        assert!(controller.is_loading());
        assert!(!controller.has_error());
    }
}
