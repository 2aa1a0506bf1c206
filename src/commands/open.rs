use serde_json::json;

use super::discover::{current_year, load_default};
use super::{CommandOutput, client, page_json, summary_json};
use crate::detail::fetch_detail;
use crate::error::Result;
use crate::favorites::FavoritesStore;
use crate::route::Route;
use crate::view::{render_detail, render_favorites, render_home};

/// Render a route once, the way the shell would show it on arrival
pub async fn cmd_open(route: &str, output_json: bool) -> Result<()> {
    let route = Route::parse(route)?;
    let favorites = FavoritesStore::open_default();
    let is_favorite = |id: &str| favorites.is_favorite(id);

    let output = match &route {
        Route::Home => {
            let session = load_default(&client()?, current_year()).await?;
            CommandOutput::new(page_json(&session.to_page(), is_favorite))
                .with_text(render_home(&session, is_favorite))
        }
        Route::Favorites => {
            let listed = favorites.list();
            let items: Vec<_> = listed.iter().map(|m| summary_json(m, true)).collect();
            CommandOutput::new(json!(items)).with_text(render_favorites(&listed))
        }
        Route::Movie(id) => {
            let state = fetch_detail(&client()?, id).await;
            CommandOutput::new(serde_json::to_value(&state)?)
                .with_text(render_detail(&state, is_favorite))
        }
    };

    output.print(output_json)
}
