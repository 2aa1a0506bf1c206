//! Movie data types shared by the API client, the favorites store and the views.
//!
//! Summaries and details keep the OMDb field names on the wire so the same
//! types deserialize API responses and the persisted favorites blob.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MarqueeError, Result};

/// Results per page returned by the remote API.
pub const PAGE_SIZE: u32 = 10;

/// Sentinel the API uses for missing values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Image shown in place of a missing poster.
pub const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/300x450?text=No+Image";

/// Number of pages needed to show `total_results` items.
pub fn total_pages(total_results: u32) -> u32 {
    total_results.div_ceil(PAGE_SIZE)
}

/// Type filter accepted by the search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Series,
    Episode,
}

pub const VALID_MEDIA_TYPES: &[&str] = &["movie", "series", "episode"];

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
            MediaType::Episode => "episode",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = MarqueeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(MediaType::Movie),
            "series" => Ok(MediaType::Series),
            "episode" => Ok(MediaType::Episode),
            _ => Err(MarqueeError::InvalidMediaType(s.to_string())),
        }
    }
}

/// One card in a result grid, and one entry of the favorites set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default, with = "na")]
    pub poster: Option<String>,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl MovieSummary {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: String::new(),
            poster: None,
            kind: None,
        }
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = Some(poster.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Poster URL, or the placeholder image when the API has none.
    pub fn poster_or_placeholder(&self) -> &str {
        self.poster
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(POSTER_PLACEHOLDER)
    }
}

/// Full record for the detail view, fetched lazily per id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieDetail {
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Rated", default, with = "na")]
    pub rated: Option<String>,
    #[serde(rename = "Released", default, with = "na")]
    pub released: Option<String>,
    #[serde(rename = "Runtime", default, with = "na")]
    pub runtime: Option<String>,
    #[serde(rename = "Genre", default, with = "na")]
    pub genre: Option<String>,
    #[serde(rename = "Director", default, with = "na")]
    pub director: Option<String>,
    #[serde(rename = "Actors", default, with = "na")]
    pub actors: Option<String>,
    #[serde(rename = "Plot", default, with = "na")]
    pub plot: Option<String>,
    #[serde(rename = "Language", default, with = "na")]
    pub language: Option<String>,
    #[serde(rename = "Country", default, with = "na")]
    pub country: Option<String>,
    #[serde(rename = "Poster", default, with = "na")]
    pub poster: Option<String>,
    #[serde(rename = "imdbRating", default, with = "na")]
    pub rating: Option<String>,
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl MovieDetail {
    /// The summary fields of this detail, as stored in favorites.
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
            poster: self.poster.clone(),
            kind: self.kind.clone(),
        }
    }

    pub fn poster_or_placeholder(&self) -> &str {
        self.poster
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(POSTER_PLACEHOLDER)
    }
}

/// One page of search results plus pagination metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchPage {
    pub items: Vec<MovieSummary>,
    pub page: u32,
    pub total_results: u32,
}

impl SearchPage {
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_results)
    }
}

/// Maps the API's `"N/A"` sentinel to `None` and back.
pub(crate) mod na {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::NOT_AVAILABLE;

    pub fn serialize<S: Serializer>(
        value: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(NOT_AVAILABLE))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|v| v != NOT_AVAILABLE))
    }
}
