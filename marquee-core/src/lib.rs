//! Marquee Core - movie catalog search and session management
//!
//! This crate provides the building blocks of the Marquee search widget:
//! catalog providers (OMDb, demo, mock), the debounced search and
//! fetch-cycle controllers, configuration, and tracing setup.

pub mod config;
pub mod errors;
pub mod providers;
pub mod session;
pub mod tracing_setup;
pub mod types;

// Re-export main types for convenient access
pub use config::{MarqueeConfig, OmdbConfig, SearchConfig};
pub use errors::CatalogError;
pub use providers::{CatalogProvider, DemoProvider, OmdbProvider};
pub use session::{
    DETAIL_FETCH_CAP, ResultsController, SearchController, SearchSession, SessionEvent,
    fetch_movie_batch,
};
pub use types::{MovieDetails, TitleMatch};

/// Errors that can bubble up from any Marquee subsystem.
#[derive(Debug, thiserror::Error)]
pub enum MarqueeError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MarqueeError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            MarqueeError::Catalog(_) => {
                "Something went wrong. Please try again later.".to_string()
            }
            MarqueeError::Io(_) => "Terminal or file system error occurred".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarqueeError>;
