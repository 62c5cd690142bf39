//! Search input controller: typed text, debounce, suggestions.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::SessionEvent;
use crate::providers::CatalogProvider;
use crate::types::TitleMatch;

/// Owns the in-progress search text and the suggestion dropdown state.
///
/// Every keystroke replaces the pending debounce task: a lookup is issued
/// only after the configured quiet interval passes with no further input.
/// Lookup failures are absorbed silently (suggestions cleared, no
/// user-visible error).
#[derive(Debug)]
pub struct SearchController {
    query: String,
    suggestions: Vec<TitleMatch>,
    debounce: Duration,
    pending_lookup: Option<JoinHandle<()>>,
    catalog: Arc<dyn CatalogProvider>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl SearchController {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        debounce: Duration,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            query: String::new(),
            suggestions: Vec::new(),
            debounce,
            pending_lookup: None,
            catalog,
            events,
        }
    }

    /// The text currently in the input field.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current suggestion list.
    pub fn suggestions(&self) -> &[TitleMatch] {
        &self.suggestions
    }

    /// Records the new input text and reschedules the debounced lookup.
    ///
    /// The previous pending lookup is aborted whether or not it has fired;
    /// whitespace-only text schedules nothing.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.cancel_pending();

        if self.query.trim().is_empty() {
            return;
        }

        let query = self.query.clone();
        let catalog = self.catalog.clone();
        let events = self.events.clone();
        let delay = self.debounce;

        self.pending_lookup = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let suggestions = match catalog.search_titles(&query).await {
                Ok(matches) => matches,
                Err(error) => {
                    tracing::debug!(%query, "suggestion lookup failed: {error}");
                    Vec::new()
                }
            };

            let _ = events.send(SessionEvent::SuggestionsReady(suggestions));
        }));
    }

    /// Replaces the suggestion list wholesale with a settled lookup result.
    pub(crate) fn apply_suggestions(&mut self, suggestions: Vec<TitleMatch>) {
        self.suggestions = suggestions;
    }

    /// Resolves a submission to the query to commit.
    ///
    /// `chosen` is the clicked suggestion's title, if any; otherwise the
    /// trimmed input text is committed, even when empty. Clears suggestions
    /// and cancels any pending lookup so the dropdown stays cleared.
    pub fn take_submission(&mut self, chosen: Option<String>) -> String {
        self.cancel_pending();
        self.suggestions.clear();
        chosen.unwrap_or_else(|| self.query.trim().to_string())
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_lookup.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockProvider;

    fn controller(
        catalog: MockProvider,
    ) -> (
        SearchController,
        mpsc::UnboundedReceiver<SessionEvent>,
    ) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let controller = SearchController::new(
            Arc::new(catalog),
            Duration::from_millis(500),
            sender,
        );
        (controller, receiver)
    }

    async fn next_suggestions(
        receiver: &mut mpsc::UnboundedReceiver<SessionEvent>,
    ) -> Vec<TitleMatch> {
        match receiver.recv().await.expect("event channel open") {
            SessionEvent::SuggestionsReady(suggestions) => suggestions,
            other => panic!("expected SuggestionsReady, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiet_interval_triggers_one_lookup() {
        let catalog = MockProvider::with_library(2);
        let (mut controller, mut events) = controller(catalog.clone());

        controller.set_query("bat");
        let suggestions = next_suggestions(&mut events).await;

        assert_eq!(catalog.search_queries(), vec!["bat"]);
        assert_eq!(suggestions.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystroke_within_window_cancels_pending_lookup() {
        let catalog = MockProvider::with_library(1);
        let (mut controller, mut events) = controller(catalog.clone());

        controller.set_query("b");
        tokio::time::advance(Duration::from_millis(200)).await;
        controller.set_query("ba");
        tokio::time::advance(Duration::from_millis(400)).await;
        controller.set_query("bat");

        let suggestions = next_suggestions(&mut events).await;
        controller.apply_suggestions(suggestions);

        // Only the final typed string reached the catalog.
        assert_eq!(catalog.search_queries(), vec!["bat"]);
        assert_eq!(controller.suggestions().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_input_schedules_nothing() {
        let catalog = MockProvider::with_library(1);
        let (mut controller, _events) = controller(catalog.clone());

        controller.set_query("   ");
        tokio::time::advance(Duration::from_millis(600)).await;
        tokio::task::yield_now().await;

        assert!(catalog.search_queries().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_failure_clears_suggestions_silently() {
        let catalog = MockProvider::with_library(1);
        let (mut controller, mut events) = controller(catalog.clone());

        controller.set_query("bat");
        controller.apply_suggestions(next_suggestions(&mut events).await);
        assert!(!controller.suggestions().is_empty());

        catalog.fail_searches();
        controller.set_query("batm");
        controller.apply_suggestions(next_suggestions(&mut events).await);

        assert!(controller.suggestions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submission_prefers_chosen_title_over_input() {
        let catalog = MockProvider::with_library(1);
        let (mut controller, _events) = controller(catalog);

        controller.set_query("  bat  ");
        assert_eq!(
            controller.take_submission(Some("Batman".to_string())),
            "Batman"
        );
        assert_eq!(controller.take_submission(None), "bat");
        assert!(controller.suggestions().is_empty());
    }
}
