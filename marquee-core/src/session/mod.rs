//! Interactive search session: controllers, events, and the fetch pipeline.
//!
//! A session owns two controllers. [`SearchController`] tracks the text the
//! user is typing and debounces suggestion lookups; [`ResultsController`]
//! runs one fetch cycle per committed query, fanning detail lookups out over
//! the first matches. Background work runs as spawned tasks that report back
//! over a channel, and the owning event loop applies those reports between
//! frames.

mod results;
mod search;

use std::sync::Arc;

use tokio::sync::mpsc;

pub use results::{DETAIL_FETCH_CAP, ResultsController, fetch_movie_batch};
pub use search::SearchController;

use crate::config::SearchConfig;
use crate::errors::CatalogError;
use crate::providers::CatalogProvider;
use crate::types::{MovieDetails, TitleMatch};

/// Report from a background task to the session's event loop.
#[derive(Debug)]
pub enum SessionEvent {
    /// A debounced suggestion lookup settled; the list replaces the current
    /// suggestions wholesale (empty on lookup failure).
    SuggestionsReady(Vec<TitleMatch>),
    /// A fetch cycle settled.
    CycleSettled {
        /// Cycle generation; stale generations are discarded.
        generation: u64,
        /// The fetched batch, or the error that ended the cycle.
        outcome: Result<Vec<MovieDetails>, CatalogError>,
    },
}

/// One interactive search session over a movie catalog.
///
/// Wires both controllers to a shared event channel and seeds the initial
/// fetch cycle. The owner drives it by forwarding input (`input_changed`,
/// `submit`, `select_suggestion`) and pumping events (`try_next_event` /
/// `next_event` into `apply_event`).
#[derive(Debug)]
pub struct SearchSession {
    search: SearchController,
    results: ResultsController,
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

impl SearchSession {
    /// Creates a session and commits the configured seed query.
    pub fn new(catalog: Arc<dyn CatalogProvider>, config: SearchConfig) -> Self {
        let (sender, events) = mpsc::unbounded_channel();
        let search = SearchController::new(catalog.clone(), config.debounce, sender.clone());
        let mut results = ResultsController::new(catalog, sender);
        results.commit(config.seed_query);

        Self {
            search,
            results,
            events,
        }
    }

    /// The text currently in the input field.
    pub fn query(&self) -> &str {
        self.search.query()
    }

    /// Current suggestion list.
    pub fn suggestions(&self) -> &[TitleMatch] {
        self.search.suggestions()
    }

    /// Movie cards from the most recent successful cycle.
    pub fn movies(&self) -> &[MovieDetails] {
        self.results.movies()
    }

    /// Whether a fetch cycle is in flight.
    pub fn is_loading(&self) -> bool {
        self.results.is_loading()
    }

    /// Whether the last settled cycle failed.
    pub fn has_error(&self) -> bool {
        self.results.has_error()
    }

    /// The query driving the current movie list.
    pub fn committed_query(&self) -> Option<&str> {
        self.results.committed_query()
    }

    /// Records a keystroke: updates the input text and reschedules the
    /// debounced suggestion lookup.
    pub fn input_changed(&mut self, text: impl Into<String>) {
        self.search.set_query(text);
    }

    /// Submits the trimmed input text as the committed query.
    pub fn submit(&mut self) {
        let committed = self.search.take_submission(None);
        self.results.commit(committed);
    }

    /// Submits the title of the suggestion at `index`; out-of-range indexes
    /// are ignored.
    pub fn select_suggestion(&mut self, index: usize) {
        let Some(chosen) = self.search.suggestions().get(index).map(|m| m.title.clone()) else {
            return;
        };
        let committed = self.search.take_submission(Some(chosen));
        self.results.commit(committed);
    }

    /// Applies one settled background report to controller state.
    pub fn apply_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SuggestionsReady(suggestions) => {
                self.search.apply_suggestions(suggestions);
            }
            SessionEvent::CycleSettled {
                generation,
                outcome,
            } => {
                self.results.apply_settlement(generation, outcome);
            }
        }
    }

    /// Non-blocking event pump for tick-driven UIs.
    pub fn try_next_event(&mut self) -> Option<SessionEvent> {
        self.events.try_recv().ok()
    }

    /// Awaits the next background report.
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.recv().await
    }
}
