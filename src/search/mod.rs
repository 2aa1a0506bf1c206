//! Search session state.
//!
//! A [`SearchSession`] owns the view state of the search home: the current
//! filters, the page being shown and any message. Requests are split into
//! `dispatch` (issue a generation, no I/O) and `apply` (fold a completion back
//! in), so callers can run the network call outside any lock and completions
//! may arrive in any order. Only the latest generation is ever applied.

mod default_load;

use crate::error::Result;
use crate::movie::{MediaType, MovieSummary, SearchPage, total_pages};
use crate::omdb::{MovieApi, SearchQuery, SearchResponse};

pub use default_load::{
    DEFAULT_LOAD_ERROR_MESSAGE, DefaultLoad, DefaultOutcome, FALLBACK_TERM, THEME_TERM,
    default_queries, run_default_load,
};

/// Message shown for a search that never got an answer from the API.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Try again!";

/// Monotonic request sequence number.
pub type Generation = u64;

/// A search that has been dispatched but not yet applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub generation: Generation,
    pub query: SearchQuery,
}

#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    term: String,
    media_type: Option<MediaType>,
    year: Option<u16>,

    items: Vec<MovieSummary>,
    page: u32,
    total_results: u32,
    /// Query that produced the page on screen; paging re-runs it.
    shown: Option<SearchQuery>,

    error: Option<String>,
    loading: bool,
    latest: Generation,
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            page: 1,
            ..Self::default()
        }
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub fn set_media_type(&mut self, media_type: Option<MediaType>) {
        self.media_type = media_type;
    }

    pub fn set_year(&mut self, year: Option<u16>) {
        self.year = year;
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn media_type(&self) -> Option<MediaType> {
        self.media_type
    }

    pub fn year(&self) -> Option<u16> {
        self.year
    }

    pub fn items(&self) -> &[MovieSummary] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_results(&self) -> u32 {
        self.total_results
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_results)
    }

    /// Pagination controls are only shown with more than one page.
    pub fn has_pagination(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn latest_generation(&self) -> Generation {
        self.latest
    }

    /// The page on screen as a standalone value.
    pub fn to_page(&self) -> SearchPage {
        SearchPage {
            items: self.items.clone(),
            page: self.page,
            total_results: self.total_results,
        }
    }

    /// Build the query for the current filters at `page`.
    pub fn query_for(&self, page: u32) -> SearchQuery {
        SearchQuery::new(self.term.trim())
            .with_type(self.media_type)
            .with_year(self.year)
            .with_page(page)
    }

    fn next_generation(&mut self) -> Generation {
        self.latest += 1;
        self.loading = true;
        self.latest
    }

    /// Start a search with the current filters. Returns `None` (and changes
    /// nothing) when the search term is empty.
    pub fn dispatch(&mut self, page: u32) -> Option<PendingSearch> {
        let query = self.query_for(page);
        self.dispatch_query(query)
    }

    pub fn dispatch_query(&mut self, query: SearchQuery) -> Option<PendingSearch> {
        if query.is_empty() {
            return None;
        }

        self.error = None;
        let generation = self.next_generation();
        tracing::debug!(generation, term = %query.term, page = query.page, "search dispatched");
        Some(PendingSearch { generation, query })
    }

    /// Re-run the query on screen one page further on. `None` on the last page.
    pub fn dispatch_next(&mut self) -> Option<PendingSearch> {
        if self.page >= self.total_pages() {
            return None;
        }
        let query = self.shown.clone()?.with_page(self.page + 1);
        self.dispatch_query(query)
    }

    /// Re-run the query on screen one page back. `None` on the first page.
    pub fn dispatch_prev(&mut self) -> Option<PendingSearch> {
        if self.page <= 1 {
            return None;
        }
        let query = self.shown.clone()?.with_page(self.page - 1);
        self.dispatch_query(query)
    }

    /// Jump to `page` of the query on screen, or of the current filters when
    /// nothing has been shown yet. `None` past the last page.
    pub fn dispatch_page(&mut self, page: u32) -> Option<PendingSearch> {
        let query = match &self.shown {
            Some(_) if page > self.total_pages() => {
                tracing::debug!(page, total = self.total_pages(), "page out of range");
                return None;
            }
            Some(shown) => shown.clone().with_page(page),
            None => self.query_for(page),
        };
        self.dispatch_query(query)
    }

    fn is_stale(&self, generation: Generation) -> bool {
        if generation != self.latest {
            tracing::debug!(
                generation,
                latest = self.latest,
                "dropping stale completion"
            );
            return true;
        }
        false
    }

    /// Fold a completed search into the session. Returns false, leaving the
    /// session untouched, when a newer search has been dispatched since.
    pub fn apply(&mut self, pending: &PendingSearch, outcome: Result<SearchResponse>) -> bool {
        if self.is_stale(pending.generation) {
            return false;
        }
        self.loading = false;

        match outcome {
            Ok(SearchResponse::Found(page)) => {
                self.items = page.items;
                self.total_results = page.total_results;
                self.page = pending.query.page;
                self.shown = Some(pending.query.clone());
                self.error = None;
            }
            Ok(SearchResponse::NotFound(message)) => {
                self.error = Some(message);
                self.items.clear();
            }
            Err(e) => {
                tracing::warn!(error = %e, term = %pending.query.term, "search failed");
                self.error = Some(NETWORK_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    /// Start the startup default load.
    pub fn dispatch_default(&mut self, year: i16) -> DefaultLoad {
        let generation = self.next_generation();
        DefaultLoad { generation, year }
    }

    /// Fold a finished default load into the session, under the same
    /// generation rule as [`apply`](Self::apply).
    pub fn apply_default(&mut self, load: &DefaultLoad, outcome: DefaultOutcome) -> bool {
        if self.is_stale(load.generation) {
            return false;
        }
        self.loading = false;

        match outcome {
            DefaultOutcome::Found { query, page } => {
                self.items = page.items;
                self.total_results = page.total_results;
                self.page = 1;
                self.shown = Some(query);
            }
            DefaultOutcome::Empty => {}
            DefaultOutcome::Failed => {
                self.error = Some(DEFAULT_LOAD_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    /// Dispatch, await and apply in one go. For one-shot callers that have
    /// nothing else to do while the request is in flight.
    pub async fn search_now<A: MovieApi>(&mut self, api: &A, page: u32) -> bool {
        let Some(pending) = self.dispatch(page) else {
            return false;
        };
        let outcome = api.search(&pending.query).await;
        self.apply(&pending, outcome)
    }
}
