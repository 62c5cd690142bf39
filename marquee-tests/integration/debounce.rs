//! Debounce timing: one lookup per quiet interval, cancellation on retype.

use std::sync::Arc;
use std::time::Duration;

use marquee_core::providers::MockProvider;
use marquee_core::{SearchConfig, SearchSession, SessionEvent};

async fn settled_session(catalog: MockProvider) -> SearchSession {
    let mut session = SearchSession::new(Arc::new(catalog), SearchConfig::default());
    while session.is_loading() {
        let event = session.next_event().await.expect("event channel open");
        session.apply_event(event);
    }
    session
}

#[tokio::test(start_paused = true)]
async fn test_quiet_interval_triggers_exactly_one_lookup_for_final_text() {
    let catalog = MockProvider::with_library(3);
    let mut session = settled_session(catalog.clone()).await;

    session.input_changed("bat");
    let event = session.next_event().await.expect("suggestion event");
    assert!(matches!(event, SessionEvent::SuggestionsReady(_)));
    session.apply_event(event);

    // Exactly one suggestion request beyond the seed cycle's search.
    assert_eq!(catalog.search_queries(), vec!["mission impossible", "bat"]);
    assert_eq!(session.suggestions().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_retyping_within_the_window_cancels_the_pending_lookup() {
    let catalog = MockProvider::with_library(1);
    let mut session = settled_session(catalog.clone()).await;

    session.input_changed("b");
    tokio::time::advance(Duration::from_millis(300)).await;
    session.input_changed("ba");
    tokio::time::advance(Duration::from_millis(300)).await;
    session.input_changed("bat");

    // 600ms elapsed in total, but no single quiet interval reached 500ms,
    // so nothing has been looked up yet.
    assert_eq!(catalog.search_queries().len(), 1);

    let event = session.next_event().await.expect("suggestion event");
    session.apply_event(event);
    assert_eq!(catalog.search_queries(), vec!["mission impossible", "bat"]);
}

#[tokio::test(start_paused = true)]
async fn test_whitespace_only_input_schedules_no_lookup() {
    let catalog = MockProvider::with_library(1);
    let mut session = settled_session(catalog.clone()).await;

    session.input_changed("  ");
    tokio::time::advance(Duration::from_millis(700)).await;
    tokio::task::yield_now().await;

    assert_eq!(catalog.search_queries().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_submission_cancels_the_pending_lookup() {
    let catalog = MockProvider::with_library(1);
    let mut session = settled_session(catalog.clone()).await;

    session.input_changed("batman");
    session.submit();
    while session.is_loading() {
        let event = session.next_event().await.expect("event channel open");
        session.apply_event(event);
    }
    tokio::time::advance(Duration::from_millis(700)).await;
    tokio::task::yield_now().await;

    // The submission's fetch cycle searched; the debounced suggestion
    // lookup for "batman" never did.
    assert_eq!(
        catalog.search_queries(),
        vec!["mission impossible", "batman"]
    );
}
