//! Scripted [`MovieApi`] for unit tests.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::{MarqueeError, Result};
use crate::movie::{MovieDetail, MovieSummary, SearchPage};
use crate::omdb::{MovieApi, SearchQuery, SearchResponse};

#[derive(Debug, Clone)]
pub(crate) enum Scripted<T> {
    Ok(T),
    ApiError(String),
    NetworkDown,
}

#[derive(Default)]
pub(crate) struct FakeApi {
    searches: Mutex<HashMap<String, Scripted<(Vec<MovieSummary>, u32)>>>,
    details: Mutex<HashMap<String, Scripted<MovieDetail>>>,
    pub requests: Mutex<Vec<SearchQuery>>,
    pub detail_requests: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(self, term: &str, items: Vec<MovieSummary>, total: u32) -> Self {
        self.searches
            .lock()
            .insert(term.to_string(), Scripted::Ok((items, total)));
        self
    }

    pub fn with_not_found(self, term: &str, message: &str) -> Self {
        self.searches
            .lock()
            .insert(term.to_string(), Scripted::ApiError(message.to_string()));
        self
    }

    pub fn with_network_down(self, term: &str) -> Self {
        self.searches
            .lock()
            .insert(term.to_string(), Scripted::NetworkDown);
        self
    }

    pub fn with_detail(self, detail: MovieDetail) -> Self {
        self.details
            .lock()
            .insert(detail.id.clone(), Scripted::Ok(detail));
        self
    }

    /// Answer `id` with a record whose own id may be spelled differently.
    pub fn with_detail_for(self, id: &str, detail: MovieDetail) -> Self {
        self.details
            .lock()
            .insert(id.to_string(), Scripted::Ok(detail));
        self
    }

    pub fn with_detail_error(self, id: &str, message: &str) -> Self {
        self.details
            .lock()
            .insert(id.to_string(), Scripted::ApiError(message.to_string()));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl MovieApi for FakeApi {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        self.requests.lock().push(query.clone());

        let scripted = self.searches.lock().get(query.term.trim()).cloned();
        match scripted {
            Some(Scripted::Ok((items, total_results))) => Ok(SearchResponse::Found(SearchPage {
                items,
                page: query.page,
                total_results,
            })),
            Some(Scripted::ApiError(message)) => Ok(SearchResponse::NotFound(message)),
            Some(Scripted::NetworkDown) => Err(MarqueeError::Status(503)),
            None => Ok(SearchResponse::NotFound("Movie not found!".to_string())),
        }
    }

    async fn detail(&self, id: &str) -> Result<MovieDetail> {
        self.detail_requests.lock().push(id.to_string());

        let scripted = self.details.lock().get(id).cloned();
        match scripted {
            Some(Scripted::Ok(detail)) => Ok(detail),
            Some(Scripted::ApiError(message)) => Err(MarqueeError::Api(message)),
            Some(Scripted::NetworkDown) | None => Err(MarqueeError::Status(503)),
        }
    }
}

pub(crate) fn movie(id: &str, title: &str, year: &str) -> MovieSummary {
    MovieSummary::new(id, title)
        .with_year(year)
        .with_kind("movie")
}

pub(crate) fn movies(count: usize) -> Vec<MovieSummary> {
    (0..count)
        .map(|i| movie(&format!("tt{:07}", i + 1), &format!("Movie {}", i + 1), "2022"))
        .collect()
}

pub(crate) fn detail(id: &str, title: &str) -> MovieDetail {
    MovieDetail {
        id: id.to_string(),
        title: title.to_string(),
        year: "1994".to_string(),
        rated: Some("R".to_string()),
        released: None,
        runtime: Some("142 min".to_string()),
        genre: Some("Drama".to_string()),
        director: Some("Frank Darabont".to_string()),
        actors: Some("Tim Robbins, Morgan Freeman".to_string()),
        plot: Some("Two imprisoned men bond over a number of years.".to_string()),
        language: None,
        country: None,
        poster: None,
        rating: Some("9.3".to_string()),
        kind: Some("movie".to_string()),
    }
}
