//! CLI command implementations

use std::sync::Arc;

use clap::Subcommand;
use marquee_core::Result;
use marquee_core::config::MarqueeConfig;
use marquee_core::providers::{CatalogProvider, DemoProvider, OmdbProvider};
use marquee_core::session::{DETAIL_FETCH_CAP, SearchSession, fetch_movie_batch};
use marquee_core::types::MovieDetails;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive search TUI (default)
    Browse {
        /// Query committed on startup instead of the default seed
        query: Option<String>,
    },
    /// Run one fetch cycle for a query and print the movie cards
    Search {
        /// Title text to search for
        query: String,
    },
    /// Print suggestion matches for in-progress input text
    Suggest {
        /// Input text to look up
        text: String,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Browse { query: None }
    }
}

impl Commands {
    /// Whether this command runs the full-screen TUI.
    pub fn takes_terminal(&self) -> bool {
        matches!(self, Commands::Browse { .. })
    }
}

/// Handle the CLI command
///
/// # Errors
/// Returns appropriate error based on the command that fails
pub async fn handle_command(
    command: Commands,
    demo: bool,
    api_key: Option<String>,
) -> Result<()> {
    let mut config = MarqueeConfig::from_env();
    if let Some(api_key) = api_key {
        config.omdb.api_key = api_key;
    }

    let catalog: Arc<dyn CatalogProvider> = if demo {
        tracing::info!("using demo catalog");
        Arc::new(DemoProvider::new())
    } else {
        Arc::new(OmdbProvider::new(&config.omdb)?)
    };

    match command {
        Commands::Browse { query } => browse(catalog, config, query).await,
        Commands::Search { query } => search(catalog, &query).await,
        Commands::Suggest { text } => suggest(catalog, &text).await,
    }
}

/// Launch the interactive TUI session.
async fn browse(
    catalog: Arc<dyn CatalogProvider>,
    mut config: MarqueeConfig,
    query: Option<String>,
) -> Result<()> {
    if let Some(query) = query {
        config.search.seed_query = query;
    }

    let session = SearchSession::new(catalog, config.search);
    marquee_tui::run(session).await
}

/// Run one fetch cycle and print the batch.
async fn search(catalog: Arc<dyn CatalogProvider>, query: &str) -> Result<()> {
    let movies = fetch_movie_batch(catalog.as_ref(), query, DETAIL_FETCH_CAP).await?;

    if movies.is_empty() {
        println!("No movies found for '{query}'");
        return Ok(());
    }

    println!("Found {} movie(s) for '{query}':\n", movies.len());
    for movie in &movies {
        print_card(movie);
    }

    Ok(())
}

/// Print suggestion matches for input text.
async fn suggest(catalog: Arc<dyn CatalogProvider>, text: &str) -> Result<()> {
    let matches = catalog.search_titles(text).await?;

    if matches.is_empty() {
        println!("No suggestions for '{text}'");
        return Ok(());
    }

    for entry in &matches {
        println!("{}  [{}]", entry.display_label(), entry.imdb_id);
    }

    Ok(())
}

fn print_card(movie: &MovieDetails) {
    match movie.year {
        Some(year) => println!("{} ({year})", movie.title),
        None => println!("{}", movie.title),
    }
    if let Some(genre) = &movie.genre {
        println!("  Genre:    {genre}");
    }
    if let Some(director) = &movie.director {
        println!("  Director: {director}");
    }
    if let Some(plot) = &movie.plot {
        println!("  Plot:     {plot}");
    }
    if let Some(poster) = &movie.poster_url {
        println!("  Poster:   {poster}");
    }
    println!();
}
