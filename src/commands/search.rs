use serde_json::json;

use super::{CommandOutput, client, page_json};
use crate::error::{MarqueeError, Result};
use crate::favorites::FavoritesStore;
use crate::movie::MediaType;
use crate::omdb::{MovieApi, SearchQuery};
use crate::search::SearchSession;
use crate::view::render_home;

/// Options for the search command
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub terms: Vec<String>,
    pub media_type: Option<MediaType>,
    pub year: Option<u16>,
    pub page: u32,
}

impl SearchOptions {
    fn query(&self) -> SearchQuery {
        SearchQuery::new(self.terms.join(" ").trim())
            .with_type(self.media_type)
            .with_year(self.year)
            .with_page(self.page)
    }
}

/// Run one search through a fresh session. Transport failures are returned
/// as errors; an API "not found" lands in the session's error line.
async fn run_search<A: MovieApi>(api: &A, options: &SearchOptions) -> Result<SearchSession> {
    let mut session = SearchSession::new();
    session.set_term(options.terms.join(" "));
    session.set_media_type(options.media_type);
    session.set_year(options.year);

    let pending = session
        .dispatch_query(options.query())
        .ok_or_else(|| MarqueeError::InvalidInput("search query cannot be empty".to_string()))?;

    let response = api.search(&pending.query).await?;
    session.apply(&pending, Ok(response));
    Ok(session)
}

/// Search the catalogue and print one page of results
pub async fn cmd_search(options: SearchOptions, output_json: bool) -> Result<()> {
    let api = client()?;
    let favorites = FavoritesStore::open_default();
    let session = run_search(&api, &options).await?;

    let is_favorite = |id: &str| favorites.is_favorite(id);
    let mut value = page_json(&session.to_page(), is_favorite);
    value["query"] = json!(options.query());
    value["error"] = json!(session.error());

    CommandOutput::new(value)
        .with_text(render_home(&session, is_favorite))
        .print(output_json)
}
