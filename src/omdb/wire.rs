//! Raw OMDb response bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{MarqueeError, Result};
use crate::movie::{MovieDetail, MovieSummary, SearchPage};

use super::{NO_RESULTS_MESSAGE, SearchResponse};

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<MovieSummary>,
    #[serde(rename = "totalResults", default)]
    total_results: Option<String>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

fn is_true(flag: &str) -> bool {
    flag.eq_ignore_ascii_case("true")
}

fn error_text(error: Option<String>) -> String {
    error
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| NO_RESULTS_MESSAGE.to_string())
}

/// Interpret a search body for the given requested page.
pub(super) fn parse_search(body: Value, page: u32) -> Result<SearchResponse> {
    let envelope: SearchEnvelope = serde_json::from_value(body)?;

    if !is_true(&envelope.response) {
        return Ok(SearchResponse::NotFound(error_text(envelope.error)));
    }

    let total_results = envelope
        .total_results
        .as_deref()
        .and_then(|t| t.trim().parse::<u32>().ok())
        .unwrap_or(0);

    Ok(SearchResponse::Found(SearchPage {
        items: envelope.search,
        page,
        total_results,
    }))
}

/// Interpret a detail body; an answered failure becomes `MarqueeError::Api`.
pub(super) fn parse_detail(body: Value) -> Result<MovieDetail> {
    let flag = body.get("Response").and_then(Value::as_str).unwrap_or("");
    if !is_true(flag) {
        let error = body
            .get("Error")
            .and_then(Value::as_str)
            .map(str::to_string);
        return Err(MarqueeError::Api(
            error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| "Movie not found".to_string()),
        ));
    }

    Ok(serde_json::from_value(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_search_found() {
        let body = json!({
            "Search": [
                {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784", "Type": "movie", "Poster": "N/A"},
                {"Title": "The Batman", "Year": "2022", "imdbID": "tt1877830", "Type": "movie", "Poster": "https://img/b.jpg"}
            ],
            "totalResults": "23",
            "Response": "True"
        });

        let SearchResponse::Found(page) = parse_search(body, 2).unwrap() else {
            panic!("expected results");
        };
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_results, 23);
        assert_eq!(page.total_pages(), 3);
        assert!(page.items.len() as u32 <= page.total_results);
    }

    #[test]
    fn test_parse_search_not_found_is_verbatim() {
        let body = json!({"Response": "False", "Error": "Movie not found!"});
        assert_eq!(
            parse_search(body, 1).unwrap(),
            SearchResponse::NotFound("Movie not found!".to_string())
        );
    }

    #[test]
    fn test_parse_search_not_found_without_error_text() {
        let body = json!({"Response": "False"});
        assert_eq!(
            parse_search(body, 1).unwrap(),
            SearchResponse::NotFound(NO_RESULTS_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_parse_search_bad_total_counts_as_zero() {
        let body = json!({"Search": [], "totalResults": "lots", "Response": "True"});
        let SearchResponse::Found(page) = parse_search(body, 1).unwrap() else {
            panic!("expected results");
        };
        assert_eq!(page.total_results, 0);
    }

    #[test]
    fn test_parse_search_malformed_item_is_error() {
        let body = json!({"Search": [{"Year": "2005"}], "totalResults": "1", "Response": "True"});
        assert!(parse_search(body, 1).unwrap_err().is_transport());
    }

    #[test]
    fn test_parse_detail_ok() {
        let body = json!({
            "Title": "The Shawshank Redemption", "Year": "1994",
            "Genre": "Drama", "Director": "Frank Darabont",
            "Actors": "Tim Robbins, Morgan Freeman", "Plot": "Hope.",
            "imdbRating": "9.3", "imdbID": "tt0111161", "Poster": "N/A",
            "Response": "True"
        });
        let detail = parse_detail(body).unwrap();
        assert_eq!(detail.title, "The Shawshank Redemption");
        assert_eq!(detail.director.as_deref(), Some("Frank Darabont"));
        assert_eq!(detail.poster, None);
    }

    #[test]
    fn test_parse_detail_error() {
        let body = json!({"Response": "False", "Error": "Incorrect IMDb ID."});
        let err = parse_detail(body).unwrap_err();
        assert!(matches!(err, MarqueeError::Api(ref m) if m == "Incorrect IMDb ID."));
    }
}
