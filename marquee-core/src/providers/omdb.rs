//! OMDb API catalog provider for production use.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::CatalogProvider;
use crate::config::OmdbConfig;
use crate::errors::CatalogError;
use crate::types::{MovieDetails, TitleMatch, filter_sentinel, parse_year};

/// OMDb catalog provider.
///
/// Talks to the two OMDb endpoint shapes: search-by-title (`?s=`) returning
/// a list of lightweight matches, and lookup-by-id (`?i=`) returning the
/// full record for one title. The access key travels as a query parameter
/// on every request.
#[derive(Debug, Clone)]
pub struct OmdbProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Response from the OMDb search endpoint.
///
/// `Search` is absent when the query matched nothing; OMDb then reports
/// `"Response": "False"` with an `Error` message on HTTP 200.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search")]
    search: Option<Vec<OmdbSearchEntry>>,
    #[serde(rename = "totalResults")]
    total_results: Option<String>,
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// One entry of the OMDb search list.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OmdbSearchEntry {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Type")]
    media_type: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

/// Response from the OMDb lookup-by-id endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OmdbTitleResponse {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Plot")]
    plot: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    #[serde(rename = "Response")]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl OmdbProvider {
    /// Create an OMDb provider from endpoint configuration.
    ///
    /// # Errors
    /// - `CatalogError::ProviderError` - HTTP client construction failed
    pub fn new(config: &OmdbConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| CatalogError::ProviderError {
                reason: format!("HTTP client construction failed: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Map a search response into title matches.
    ///
    /// A body without a `Search` array (no matches, unrecognized query)
    /// maps to an empty list rather than an error.
    fn map_search_response(page: OmdbSearchResponse) -> Vec<TitleMatch> {
        page.search
            .unwrap_or_default()
            .into_iter()
            .map(|entry| TitleMatch {
                imdb_id: entry.imdb_id,
                title: entry.title,
                year: entry.year.as_deref().and_then(parse_year),
            })
            .collect()
    }

    /// Map a lookup-by-id response into a movie record.
    fn map_title_response(
        imdb_id: &str,
        record: OmdbTitleResponse,
    ) -> Result<MovieDetails, CatalogError> {
        if record.response.as_deref() == Some("False") {
            return Err(CatalogError::DetailFetchFailed {
                imdb_id: imdb_id.to_string(),
                reason: record.error.unwrap_or_else(|| "Unknown error".to_string()),
            });
        }

        Ok(MovieDetails {
            imdb_id: record.imdb_id.unwrap_or_else(|| imdb_id.to_string()),
            title: record.title.unwrap_or_else(|| "Unknown".to_string()),
            year: record.year.as_deref().and_then(parse_year),
            genre: filter_sentinel(record.genre),
            director: filter_sentinel(record.director),
            plot: filter_sentinel(record.plot),
            poster_url: filter_sentinel(record.poster),
        })
    }
}

#[async_trait]
impl CatalogProvider for OmdbProvider {
    async fn search_titles(&self, query: &str) -> Result<Vec<TitleMatch>, CatalogError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("s", query), ("apikey", &self.api_key)])
            .send()
            .await
            .map_err(|e| CatalogError::NetworkError {
                reason: format!("HTTP request failed: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(CatalogError::SearchFailed {
                query: query.to_string(),
                reason: format!("OMDb HTTP {}", response.status()),
            });
        }

        let page: OmdbSearchResponse =
            response
                .json()
                .await
                .map_err(|e| CatalogError::ParseError {
                    reason: format!("JSON parsing failed: {e}"),
                })?;

        Ok(Self::map_search_response(page))
    }

    async fn title_details(&self, imdb_id: &str) -> Result<MovieDetails, CatalogError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("i", imdb_id), ("apikey", &self.api_key)])
            .send()
            .await
            .map_err(|e| CatalogError::NetworkError {
                reason: format!("HTTP request failed: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(CatalogError::DetailFetchFailed {
                imdb_id: imdb_id.to_string(),
                reason: format!("OMDb HTTP {}", response.status()),
            });
        }

        let record: OmdbTitleResponse =
            response
                .json()
                .await
                .map_err(|e| CatalogError::ParseError {
                    reason: format!("JSON parsing failed: {e}"),
                })?;

        Self::map_title_response(imdb_id, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_search_response_with_matches() {
        let body = r#"{
            "Search": [
                {"Title": "Batman", "Year": "1989", "imdbID": "tt0096895", "Type": "movie", "Poster": "https://example.com/batman.jpg"},
                {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Type": "movie", "Poster": "N/A"}
            ],
            "totalResults": "2",
            "Response": "True"
        }"#;
        let page: OmdbSearchResponse = serde_json::from_str(body).unwrap();
        let matches = OmdbProvider::map_search_response(page);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].imdb_id, "tt0096895");
        assert_eq!(matches[0].title, "Batman");
        assert_eq!(matches[0].year, Some(1989));
        assert_eq!(matches[1].year, Some(2005));
    }

    #[test]
    fn test_map_search_response_without_matches_is_empty() {
        let body = r#"{"Response": "False", "Error": "Movie not found!"}"#;
        let page: OmdbSearchResponse = serde_json::from_str(body).unwrap();
        assert!(OmdbProvider::map_search_response(page).is_empty());
    }

    #[test]
    fn test_map_title_response_filters_sentinels() {
        let body = r#"{
            "Title": "Mission: Impossible",
            "Year": "1996",
            "Genre": "Action, Adventure, Thriller",
            "Director": "Brian De Palma",
            "Plot": "An American agent, under false suspicion of disloyalty, must discover and expose the real spy.",
            "Poster": "N/A",
            "imdbID": "tt0117060",
            "Response": "True"
        }"#;
        let record: OmdbTitleResponse = serde_json::from_str(body).unwrap();
        let details = OmdbProvider::map_title_response("tt0117060", record).unwrap();

        assert_eq!(details.title, "Mission: Impossible");
        assert_eq!(details.year, Some(1996));
        assert_eq!(details.director.as_deref(), Some("Brian De Palma"));
        assert_eq!(details.poster_url, None);
    }

    #[test]
    fn test_map_title_response_series_year_range() {
        let body = r#"{
            "Title": "Mission: Impossible",
            "Year": "1966-1973",
            "Response": "True"
        }"#;
        let record: OmdbTitleResponse = serde_json::from_str(body).unwrap();
        let details = OmdbProvider::map_title_response("tt0060009", record).unwrap();

        assert_eq!(details.year, Some(1966));
        // Id absent from the body falls back to the requested one.
        assert_eq!(details.imdb_id, "tt0060009");
    }

    #[test]
    fn test_map_title_response_provider_failure() {
        let body = r#"{"Response": "False", "Error": "Incorrect IMDb ID."}"#;
        let record: OmdbTitleResponse = serde_json::from_str(body).unwrap();
        let result = OmdbProvider::map_title_response("tt0000000", record);

        match result {
            Err(CatalogError::DetailFetchFailed { imdb_id, reason }) => {
                assert_eq!(imdb_id, "tt0000000");
                assert_eq!(reason, "Incorrect IMDb ID.");
            }
            other => panic!("expected DetailFetchFailed, got {other:?}"),
        }
    }
}
