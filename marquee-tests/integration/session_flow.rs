//! Interactive submission flows: suggestion selection and re-commits.

use std::sync::Arc;

use marquee_core::providers::MockProvider;
use marquee_core::types::MovieDetails;
use marquee_core::{SearchConfig, SearchSession};

fn batman_catalog() -> MockProvider {
    let catalog = MockProvider::new();
    catalog.push_title(MovieDetails {
        imdb_id: "tt0096895".to_string(),
        title: "Batman".to_string(),
        year: Some(1989),
        genre: Some("Action, Adventure".to_string()),
        director: Some("Tim Burton".to_string()),
        plot: Some("The Dark Knight of Gotham City begins his war on crime.".to_string()),
        poster_url: None,
    });
    catalog.push_title(MovieDetails {
        imdb_id: "tt0372784".to_string(),
        title: "Batman Begins".to_string(),
        year: Some(2005),
        genre: Some("Action, Crime, Drama".to_string()),
        director: Some("Christopher Nolan".to_string()),
        plot: Some("After witnessing his parents' death, Bruce learns the art of fighting.".to_string()),
        poster_url: None,
    });
    catalog
}

async fn settle(session: &mut SearchSession) {
    while session.is_loading() {
        let event = session.next_event().await.expect("event channel open");
        session.apply_event(event);
    }
}

#[tokio::test(start_paused = true)]
async fn test_clicking_a_suggestion_commits_its_title_and_starts_a_cycle() {
    let catalog = batman_catalog();
    let mut session = SearchSession::new(Arc::new(catalog.clone()), SearchConfig::default());
    settle(&mut session).await;

    // Type "bat", wait out the debounce.
    session.input_changed("bat");
    let event = session.next_event().await.expect("suggestion event");
    session.apply_event(event);
    assert_eq!(session.suggestions().len(), 2);
    assert_eq!(session.suggestions()[0].title, "Batman");

    // Click the "Batman" suggestion.
    session.select_suggestion(0);
    assert_eq!(session.committed_query(), Some("Batman"));
    assert!(session.suggestions().is_empty());
    assert!(session.is_loading());
    settle(&mut session).await;

    assert_eq!(
        catalog.search_queries(),
        vec!["mission impossible", "bat", "Batman"]
    );
    assert_eq!(session.movies().len(), 2);
    assert!(!session.has_error());
}

#[tokio::test(start_paused = true)]
async fn test_submitting_typed_text_trims_it_first() {
    let catalog = batman_catalog();
    let mut session = SearchSession::new(Arc::new(catalog.clone()), SearchConfig::default());
    settle(&mut session).await;

    session.input_changed("  batman  ");
    session.submit();
    assert_eq!(session.committed_query(), Some("batman"));
    settle(&mut session).await;

    assert!(catalog.search_queries().contains(&"batman".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_superseding_commit_discards_the_stale_cycle() {
    let catalog = batman_catalog();
    let mut session = SearchSession::new(Arc::new(catalog.clone()), SearchConfig::default());
    settle(&mut session).await;

    catalog.fail_searches();
    session.input_changed("doomed");
    session.submit();
    catalog.unfail_searches();
    session.input_changed("batman");
    session.submit();

    // Both cycles settle; whichever order their reports arrive in, only the
    // second cycle's outcome may apply.
    settle(&mut session).await;
    while let Some(event) = session.try_next_event() {
        session.apply_event(event);
    }

    assert!(!session.has_error());
    assert!(!session.is_loading());
    assert_eq!(session.committed_query(), Some("batman"));
    assert_eq!(session.movies().len(), 2);
}
