//! Demo provider implementation for development and testing.

use async_trait::async_trait;

use super::CatalogProvider;
use crate::errors::CatalogError;
use crate::types::{MovieDetails, TitleMatch};

/// Demo provider for development and testing.
///
/// Returns realistic canned data for UI development without external API
/// calls. The canned catalog covers the default seed query plus a handful
/// of well-known titles, so the full search workflow can be exercised
/// offline.
#[derive(Debug)]
pub struct DemoProvider {
    catalog: Vec<MovieDetails>,
}

impl Default for DemoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoProvider {
    pub fn new() -> Self {
        Self {
            catalog: canned_catalog(),
        }
    }
}

/// Lowercase and strip punctuation so "mission impossible" still hits
/// "Mission: Impossible".
fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

#[async_trait]
impl CatalogProvider for DemoProvider {
    async fn search_titles(&self, query: &str) -> Result<Vec<TitleMatch>, CatalogError> {
        let needle = normalize(query.trim());
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .catalog
            .iter()
            .filter(|movie| normalize(&movie.title).contains(&needle))
            .map(|movie| TitleMatch {
                imdb_id: movie.imdb_id.clone(),
                title: movie.title.clone(),
                year: movie.year,
            })
            .collect())
    }

    async fn title_details(&self, imdb_id: &str) -> Result<MovieDetails, CatalogError> {
        self.catalog
            .iter()
            .find(|movie| movie.imdb_id == imdb_id)
            .cloned()
            .ok_or_else(|| CatalogError::DetailFetchFailed {
                imdb_id: imdb_id.to_string(),
                reason: "Not in demo catalog".to_string(),
            })
    }
}

/// Canned records mirroring the shape of real OMDb lookups.
fn canned_catalog() -> Vec<MovieDetails> {
    vec![
        MovieDetails {
            imdb_id: "tt0117060".to_string(),
            title: "Mission: Impossible".to_string(),
            year: Some(1996),
            genre: Some("Action, Adventure, Thriller".to_string()),
            director: Some("Brian De Palma".to_string()),
            plot: Some(
                "An American agent, under false suspicion of disloyalty, must discover and \
                 expose the real spy without the help of his organization."
                    .to_string(),
            ),
            poster_url: Some(
                "https://m.media-amazon.com/images/M/MV5BMTc3NjI2MjU0Nl5BMl5BanBnXkFtZTgwNDk3ODYxMTE@._V1_SX300.jpg"
                    .to_string(),
            ),
        },
        MovieDetails {
            imdb_id: "tt4912910".to_string(),
            title: "Mission: Impossible - Fallout".to_string(),
            year: Some(2018),
            genre: Some("Action, Adventure, Thriller".to_string()),
            director: Some("Christopher McQuarrie".to_string()),
            plot: Some(
                "Ethan Hunt and his IMF team race against time after a mission gone wrong."
                    .to_string(),
            ),
            poster_url: Some(
                "https://m.media-amazon.com/images/M/MV5BNjRlZmM0ODktY2RjNS00ZDdjLWJhZGYtNDljNWZkMGM5MTg0XkEyXkFqcGdeQXVyNjAwMjI5MDk@._V1_SX300.jpg"
                    .to_string(),
            ),
        },
        MovieDetails {
            imdb_id: "tt0096895".to_string(),
            title: "Batman".to_string(),
            year: Some(1989),
            genre: Some("Action, Adventure".to_string()),
            director: Some("Tim Burton".to_string()),
            plot: Some(
                "The Dark Knight of Gotham City begins his war on crime with his first major \
                 enemy being Jack Napier, a criminal who becomes the clownishly homicidal Joker."
                    .to_string(),
            ),
            poster_url: Some(
                "https://m.media-amazon.com/images/M/MV5BZGZmOWFlMWItNjE4NS00OTIzLWE1ZjEtNjQ5MzA3OTk5ZDdlXkEyXkFqcGdeQXVyNjk1Njg5NTA@._V1_SX300.jpg"
                    .to_string(),
            ),
        },
        MovieDetails {
            imdb_id: "tt0816692".to_string(),
            title: "Interstellar".to_string(),
            year: Some(2014),
            genre: Some("Adventure, Drama, Sci-Fi".to_string()),
            director: Some("Christopher Nolan".to_string()),
            plot: Some(
                "A team of explorers travel through a wormhole in space in an attempt to \
                 ensure humanity's survival."
                    .to_string(),
            ),
            poster_url: Some(
                "https://m.media-amazon.com/images/M/MV5BZjdkOTU3MDktN2IxOS00OGEyLWFmMjktY2FiMmZkNWIyODZiXkEyXkFqcGdeQXVyMTMxODk2OTU@._V1_SX300.jpg"
                    .to_string(),
            ),
        },
        MovieDetails {
            imdb_id: "tt0133093".to_string(),
            title: "The Matrix".to_string(),
            year: Some(1999),
            genre: Some("Action, Sci-Fi".to_string()),
            director: Some("Lana Wachowski, Lilly Wachowski".to_string()),
            plot: Some(
                "A computer hacker learns from mysterious rebels about the true nature of his \
                 reality and his role in the war against its controllers."
                    .to_string(),
            ),
            poster_url: Some(
                "https://m.media-amazon.com/images/M/MV5BNzQzOTk3OTAtNDQ0Zi00ZTVkLWI0MTEtMDllZjNkYzNjNTc4L2ltYWdlXkEyXkFqcGdeQXVyNjU0OTQ0OTY@._V1_SX300.jpg"
                    .to_string(),
            ),
        },
        MovieDetails {
            imdb_id: "tt1375666".to_string(),
            title: "Inception".to_string(),
            year: Some(2010),
            genre: Some("Action, Adventure, Sci-Fi".to_string()),
            director: Some("Christopher Nolan".to_string()),
            plot: Some(
                "A thief who steals corporate secrets through dream-sharing technology is \
                 given the inverse task of planting an idea into the mind of a C.E.O."
                    .to_string(),
            ),
            poster_url: Some(
                "https://m.media-amazon.com/images/M/MV5BMjAxMzY3NjcxNF5BMl5BanBnXkFtZTcwNTI5OTM0Mw@@._V1_SX300.jpg"
                    .to_string(),
            ),
        },
        // Poster deliberately absent to exercise the placeholder path.
        MovieDetails {
            imdb_id: "tt0060009".to_string(),
            title: "Mission: Impossible".to_string(),
            year: Some(1966),
            genre: Some("Action, Adventure, Thriller".to_string()),
            director: None,
            plot: Some(
                "An elite covert operations unit carries out highly sensitive missions \
                 subject to official denial in the event of failure, death or capture."
                    .to_string(),
            ),
            poster_url: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_search_covers_seed_query() {
        let provider = DemoProvider::new();
        let matches = provider.search_titles("mission impossible").await.unwrap();
        assert!(matches.len() >= 2);

        let matches = provider.search_titles("BATMAN").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Batman");
    }

    #[tokio::test]
    async fn test_demo_search_empty_query_matches_nothing() {
        let provider = DemoProvider::new();
        assert!(provider.search_titles("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_demo_details_by_id() {
        let provider = DemoProvider::new();
        let details = provider.title_details("tt0096895").await.unwrap();

        assert_eq!(details.title, "Batman");
        assert_eq!(details.year, Some(1989));
    }

    #[tokio::test]
    async fn test_demo_details_unknown_id_fails() {
        let provider = DemoProvider::new();
        assert!(provider.title_details("tt9999999").await.is_err());
    }
}
