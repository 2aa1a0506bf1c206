//! Startup default load: a themed query for the current year, then one fixed
//! fallback query if the first finds nothing. Two attempts at most, no delay.

use crate::movie::SearchPage;
use crate::omdb::{MovieApi, SearchQuery, SearchResponse};

use super::Generation;

pub const THEME_TERM: &str = "movie";
pub const FALLBACK_TERM: &str = "avengers";
pub const DEFAULT_LOAD_ERROR_MESSAGE: &str = "Could not load default movies";

/// A dispatched default load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultLoad {
    pub generation: Generation,
    pub year: i16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultOutcome {
    /// One of the two queries produced results
    Found { query: SearchQuery, page: SearchPage },
    /// Neither query found anything; the view stays empty without a message
    Empty,
    /// A request failed in transport
    Failed,
}

/// The themed query and its fallback, in the order they are tried.
pub fn default_queries(year: i16) -> [SearchQuery; 2] {
    let themed = SearchQuery::new(THEME_TERM).with_year(u16::try_from(year).ok());
    [themed, SearchQuery::new(FALLBACK_TERM)]
}

/// Run the fallback chain against `api`.
pub async fn run_default_load<A: MovieApi>(api: &A, year: i16) -> DefaultOutcome {
    for query in default_queries(year) {
        match api.search(&query).await {
            Ok(SearchResponse::Found(page)) => return DefaultOutcome::Found { query, page },
            Ok(SearchResponse::NotFound(message)) => {
                tracing::debug!(term = %query.term, %message, "default query found nothing");
            }
            Err(e) => {
                tracing::warn!(error = %e, term = %query.term, "default load failed");
                return DefaultOutcome::Failed;
            }
        }
    }
    DefaultOutcome::Empty
}
