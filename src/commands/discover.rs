use jiff::Zoned;
use serde_json::json;

use super::{CommandOutput, client, page_json};
use crate::error::{MarqueeError, Result};
use crate::favorites::FavoritesStore;
use crate::omdb::MovieApi;
use crate::search::{DEFAULT_LOAD_ERROR_MESSAGE, SearchSession, run_default_load};
use crate::view::render_home;

/// Current calendar year in the local time zone
pub(crate) fn current_year() -> i16 {
    Zoned::now().year()
}

/// Run the default load into a fresh session. A transport failure is an error.
pub(crate) async fn load_default<A: MovieApi>(api: &A, year: i16) -> Result<SearchSession> {
    let mut session = SearchSession::new();
    let load = session.dispatch_default(year);
    let outcome = run_default_load(api, year).await;
    session.apply_default(&load, outcome);

    if session.error() == Some(DEFAULT_LOAD_ERROR_MESSAGE) {
        return Err(MarqueeError::Other(DEFAULT_LOAD_ERROR_MESSAGE.to_string()));
    }
    Ok(session)
}

/// Show what the home view shows before anything is searched
pub async fn cmd_discover(output_json: bool) -> Result<()> {
    let api = client()?;
    let favorites = FavoritesStore::open_default();
    let session = load_default(&api, current_year()).await?;

    let is_favorite = |id: &str| favorites.is_favorite(id);
    let mut value = page_json(&session.to_page(), is_favorite);
    value["year"] = json!(current_year());

    CommandOutput::new(value)
        .with_text(render_home(&session, is_favorite))
        .print(output_json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{FALLBACK_TERM, THEME_TERM};
    use crate::testing::{FakeApi, movies};

    #[tokio::test]
    async fn test_load_default_uses_fallback() {
        let api = FakeApi::new().with_results(FALLBACK_TERM, movies(10), 120);
        let session = load_default(&api, 2026).await.unwrap();
        assert_eq!(session.items().len(), 10);
        assert_eq!(session.total_pages(), 12);
        assert_eq!(api.request_count(), 2);
    }

    #[tokio::test]
    async fn test_load_default_failure_is_error() {
        let api = FakeApi::new().with_network_down(THEME_TERM);
        let err = load_default(&api, 2026).await.unwrap_err();
        assert_eq!(err.to_string(), DEFAULT_LOAD_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_load_default_empty_is_ok() {
        let api = FakeApi::new();
        let session = load_default(&api, 2026).await.unwrap();
        assert!(session.items().is_empty());
        assert_eq!(session.error(), None);
    }
}
