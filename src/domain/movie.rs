//! Movie domain model and detail formatting.
//!
//! Movies come from the TMDB search endpoint. Most fields are optional in
//! practice, so the detail helpers here supply the fallbacks the detail modal
//! shows when data is missing.

use crate::domain::ItemId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Base URL for full-size TMDB images.
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/original";

/// A movie search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: ItemId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl Movie {
    /// Full URL of the backdrop image, if the movie has one.
    ///
    /// # Examples
    ///
    /// ```
    /// # use notehub::domain::{ItemId, Movie};
    /// let movie = Movie {
    ///     id: ItemId::from(1),
    ///     title: String::new(),
    ///     overview: String::new(),
    ///     poster_path: None,
    ///     backdrop_path: Some("/bd.jpg".to_string()),
    ///     release_date: None,
    ///     vote_average: None,
    /// };
    /// assert_eq!(movie.image_url().as_deref(), Some("https://image.tmdb.org/t/p/original/bd.jpg"));
    /// ```
    #[must_use]
    pub fn image_url(&self) -> Option<String> {
        self.backdrop_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{IMAGE_BASE_URL}{path}"))
    }

    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "No title available"
        } else {
            &self.title
        }
    }

    #[must_use]
    pub fn display_overview(&self) -> &str {
        let overview = self.overview.trim();
        if overview.is_empty() {
            "No overview available."
        } else {
            overview
        }
    }

    /// Release date as `DD Mon YYYY`, or `"Unknown"`.
    ///
    /// Accepts plain dates and RFC 3339 timestamps; anything else is unknown.
    #[must_use]
    pub fn formatted_release_date(&self) -> String {
        self.release_date
            .as_deref()
            .and_then(|raw| {
                let date_part = raw.get(..10).unwrap_or(raw);
                NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
            })
            .map_or_else(
                || "Unknown".to_string(),
                |date| date.format("%d %b %Y").to_string(),
            )
    }

    #[must_use]
    pub fn rating_text(&self) -> String {
        self.vote_average
            .map_or_else(|| "No rating".to_string(), |vote| format!("{vote}/10"))
    }
}
