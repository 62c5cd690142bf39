//! Data types for movie catalog search.

use serde::{Deserialize, Serialize};

/// Lightweight title match returned by a catalog search.
///
/// These populate the suggestion dropdown and seed the detail fan-out;
/// the full record is fetched separately per match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleMatch {
    /// Catalog identifier (IMDb id, e.g. "tt0133093")
    pub imdb_id: String,
    /// Display title
    pub title: String,
    /// Release year, if the catalog reported one
    pub year: Option<u16>,
}

impl TitleMatch {
    /// Format as "Title (Year)" for list display.
    pub fn display_label(&self) -> String {
        match self.year {
            Some(year) => format!("{} ({year})", self.title),
            None => self.title.clone(),
        }
    }
}

/// Full movie record rendered as one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    /// Catalog identifier (IMDb id)
    pub imdb_id: String,
    /// Display title
    pub title: String,
    /// Release year
    pub year: Option<u16>,
    /// Genre classification (comma separated)
    pub genre: Option<String>,
    /// Director name
    pub director: Option<String>,
    /// Plot summary
    pub plot: Option<String>,
    /// URL to poster image; `None` when the catalog has no artwork
    pub poster_url: Option<String>,
}

/// Parse a catalog year field into a numeric year.
///
/// Handles plain years ("1999") as well as the range forms catalogs use
/// for series ("2019-2021", "2019–") by taking the leading digits.
pub(crate) fn parse_year(raw: &str) -> Option<u16> {
    let digits: String = raw.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Map the catalog's "N/A" absence sentinel to `None`.
pub(crate) fn filter_sentinel(value: Option<String>) -> Option<String> {
    value.filter(|v| v != "N/A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_year_plain_and_ranges() {
        assert_eq!(parse_year("1999"), Some(1999));
        assert_eq!(parse_year("2019-2021"), Some(2019));
        assert_eq!(parse_year("2019–"), Some(2019));
        assert_eq!(parse_year("N/A"), None);
        assert_eq!(parse_year(""), None);
    }

    #[test]
    fn test_filter_sentinel() {
        assert_eq!(filter_sentinel(Some("Action".to_string())), Some("Action".to_string()));
        assert_eq!(filter_sentinel(Some("N/A".to_string())), None);
        assert_eq!(filter_sentinel(None), None);
    }

    #[test]
    fn test_display_label() {
        let with_year = TitleMatch {
            imdb_id: "tt0096895".to_string(),
            title: "Batman".to_string(),
            year: Some(1989),
        };
        assert_eq!(with_year.display_label(), "Batman (1989)");

        let without_year = TitleMatch {
            imdb_id: "tt0000000".to_string(),
            title: "Batman".to_string(),
            year: None,
        };
        assert_eq!(without_year.display_label(), "Batman");
    }
}
