//! OMDb search client.
//!
//! The [`MovieApi`] trait is the seam between the views and the network:
//! [`OmdbClient`] talks HTTP, tests drive the views with fakes.

pub mod client;
mod wire;

use std::future::Future;

use serde::Serialize;

use crate::error::Result;
use crate::movie::{MediaType, MovieDetail, SearchPage};

pub use client::OmdbClient;

/// Message shown when the API answers `Response: "False"` without an `Error`.
pub const NO_RESULTS_MESSAGE: &str = "No movies found";

/// Parameters of one search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    pub term: String,
    pub media_type: Option<MediaType>,
    pub year: Option<u16>,
    /// 1-based page number
    pub page: u32,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            media_type: None,
            year: None,
            page: 1,
        }
    }

    pub fn with_type(mut self, media_type: Option<MediaType>) -> Self {
        self.media_type = media_type;
        self
    }

    pub fn with_year(mut self, year: Option<u16>) -> Self {
        self.year = year;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// An empty query never reaches the network.
    pub fn is_empty(&self) -> bool {
        self.term.trim().is_empty()
    }

    /// Query-string parameters, excluding the API key.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("s", self.term.trim().to_string()),
            ("page", self.page.to_string()),
        ];
        if let Some(media_type) = self.media_type {
            params.push(("type", media_type.to_string()));
        }
        if let Some(year) = self.year {
            params.push(("y", year.to_string()));
        }
        params
    }
}

/// Outcome of a search the API answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResponse {
    /// `Response: "True"`
    Found(SearchPage),
    /// `Response: "False"`, carrying the API's error text verbatim
    NotFound(String),
}

/// Common interface for movie metadata providers
pub trait MovieApi: Send + Sync {
    /// Run one search request. Transport failures are errors; an answered
    /// "no results" is `Ok(SearchResponse::NotFound)`.
    fn search(&self, query: &SearchQuery)
    -> impl Future<Output = Result<SearchResponse>> + Send;

    /// Fetch the full record for one id. An answered failure is
    /// [`MarqueeError::Api`](crate::error::MarqueeError::Api).
    fn detail(&self, id: &str) -> impl Future<Output = Result<MovieDetail>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_with_all_filters() {
        let query = SearchQuery::new("batman")
            .with_type(Some(MediaType::Movie))
            .with_year(Some(2022))
            .with_page(2);

        let params = query.params();
        assert!(params.contains(&("s", "batman".to_string())));
        assert!(params.contains(&("type", "movie".to_string())));
        assert!(params.contains(&("y", "2022".to_string())));
        assert!(params.contains(&("page", "2".to_string())));
    }

    #[test]
    fn test_params_without_filters() {
        let params = SearchQuery::new("alien").params();
        assert_eq!(
            params,
            vec![("s", "alien".to_string()), ("page", "1".to_string())]
        );
    }

    #[test]
    fn test_empty_query() {
        assert!(SearchQuery::new("").is_empty());
        assert!(SearchQuery::new("   ").is_empty());
        assert!(!SearchQuery::new("up").is_empty());
    }

    #[test]
    fn test_page_is_at_least_one() {
        assert_eq!(SearchQuery::new("x").with_page(0).page, 1);
    }
}
