//! Fetch-cycle request accounting and failure handling.
//!
//! Verifies the committed-query pipeline end-to-end: one search request per
//! committed query, at most twelve detail requests, order preservation, and
//! the loading/error flag contract.

use std::sync::Arc;
use std::time::Duration;

use marquee_core::providers::MockProvider;
use marquee_core::{DETAIL_FETCH_CAP, SearchConfig, SearchSession, fetch_movie_batch};

async fn settle(session: &mut SearchSession) {
    while session.is_loading() {
        let event = session.next_event().await.expect("event channel open");
        session.apply_event(event);
    }
}

#[tokio::test(start_paused = true)]
async fn test_seed_query_issues_one_search_and_at_most_twelve_details() {
    let catalog = MockProvider::with_library(20);
    let mut session = SearchSession::new(Arc::new(catalog.clone()), SearchConfig::default());

    assert!(session.is_loading());
    settle(&mut session).await;

    assert_eq!(catalog.search_queries(), vec!["mission impossible"]);
    assert_eq!(catalog.detail_requests().len(), DETAIL_FETCH_CAP);
    assert_eq!(session.movies().len(), DETAIL_FETCH_CAP);
    assert!(!session.is_loading());
    assert!(!session.has_error());
}

#[tokio::test(start_paused = true)]
async fn test_fewer_matches_mean_fewer_detail_requests() {
    let catalog = MockProvider::with_library(4);
    let mut session = SearchSession::new(Arc::new(catalog.clone()), SearchConfig::default());
    settle(&mut session).await;

    assert_eq!(catalog.detail_requests().len(), 4);
    assert_eq!(session.movies().len(), 4);

    // Movies come back in match order.
    let ids: Vec<&str> = session
        .movies()
        .iter()
        .map(|movie| movie.imdb_id.as_str())
        .collect();
    assert_eq!(ids, vec!["tt0000001", "tt0000002", "tt0000003", "tt0000004"]);
}

#[tokio::test(start_paused = true)]
async fn test_failed_search_leaves_movies_untouched_and_sets_error() {
    let catalog = MockProvider::with_library(2);
    let mut session = SearchSession::new(Arc::new(catalog.clone()), SearchConfig::default());
    settle(&mut session).await;
    assert_eq!(session.movies().len(), 2);

    catalog.fail_searches();
    session.input_changed("broken");
    session.submit();

    assert!(session.is_loading());
    settle(&mut session).await;

    assert!(session.has_error());
    assert_eq!(session.movies().len(), 2);
    assert_eq!(session.committed_query(), Some("broken"));
}

#[tokio::test(start_paused = true)]
async fn test_one_failing_detail_fails_the_whole_cycle() {
    let catalog = MockProvider::with_library(6);
    catalog.fail_details_for("tt0000004");
    let mut session = SearchSession::new(Arc::new(catalog.clone()), SearchConfig::default());
    settle(&mut session).await;

    assert!(session.has_error());
    assert!(session.movies().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_loading_flag_spans_exactly_one_cycle() {
    let catalog = MockProvider::with_library(1);
    let mut session = SearchSession::new(Arc::new(catalog.clone()), SearchConfig::default());

    // True from commit until settlement...
    assert!(session.is_loading());
    settle(&mut session).await;
    // ...false at rest...
    assert!(!session.is_loading());

    // ...and true again for the next cycle, success or failure.
    catalog.fail_searches();
    session.input_changed("anything");
    session.submit();
    assert!(session.is_loading());
    settle(&mut session).await;
    assert!(!session.is_loading());
}

#[tokio::test(start_paused = true)]
async fn test_detail_lookups_fan_out_concurrently() {
    let catalog = MockProvider::with_library(DETAIL_FETCH_CAP);
    catalog.delay_responses(Duration::from_millis(100));

    let start = tokio::time::Instant::now();
    let movies = fetch_movie_batch(&catalog, "anything", DETAIL_FETCH_CAP)
        .await
        .expect("batch succeeds");

    assert_eq!(movies.len(), DETAIL_FETCH_CAP);
    // One search wave plus one concurrent detail wave: two delay periods,
    // not thirteen sequential ones.
    assert!(start.elapsed() < Duration::from_millis(350));
}

#[tokio::test(start_paused = true)]
async fn test_empty_search_results_render_as_empty_success() {
    let catalog = MockProvider::new();
    let mut session = SearchSession::new(Arc::new(catalog.clone()), SearchConfig::default());
    settle(&mut session).await;

    assert!(session.movies().is_empty());
    assert!(!session.has_error());
    assert!(catalog.detail_requests().is_empty());
}
