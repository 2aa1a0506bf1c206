//! Fuzzy filtering of the favorites listing.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::movie::MovieSummary;

/// A favorite with its fuzzy match score
#[derive(Debug, Clone)]
pub struct FilteredFavorite {
    pub movie: MovieSummary,
    pub score: i64,
}

/// Filter favorites by a fuzzy query over title, year and id, best match
/// first. An empty query keeps every favorite in stored order.
pub fn filter_favorites(favorites: &[MovieSummary], query: &str) -> Vec<FilteredFavorite> {
    let query = query.trim();
    if query.is_empty() {
        return favorites
            .iter()
            .map(|movie| FilteredFavorite {
                movie: movie.clone(),
                score: 0,
            })
            .collect();
    }

    let matcher = SkimMatcherV2::default().smart_case();

    let mut matches: Vec<FilteredFavorite> = favorites
        .iter()
        .filter_map(|movie| {
            let search_text = format!("{} {} {}", movie.title, movie.year, movie.id);
            matcher
                .fuzzy_match(&search_text, query)
                .map(|score| FilteredFavorite {
                    movie: movie.clone(),
                    score,
                })
        })
        .collect();

    // Stable sort keeps stored order among equal scores
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches
}
