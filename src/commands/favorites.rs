use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, client, summary_json};
use crate::error::{MarqueeError, Result};
use crate::favorites::{FavoritesStore, Toggled};
use crate::movie::MovieSummary;
use crate::omdb::MovieApi;
use crate::view::render_favorites;

/// Toggle by id. A movie that is not yet a favorite is looked up first so the
/// stored summary carries its title, year and poster.
pub(crate) async fn toggle_by_id<A: MovieApi>(
    api: &A,
    favorites: &FavoritesStore,
    id: &str,
) -> Result<(Toggled, MovieSummary)> {
    let movie = match favorites.get(id) {
        Some(existing) => existing,
        None => api.detail(id).await?.summary(),
    };
    let toggled = favorites.toggle(&movie)?;
    Ok((toggled, movie))
}

/// List favorites, optionally fuzzy filtered
pub fn cmd_fav_ls(filter: Option<&str>, output_json: bool) -> Result<()> {
    let favorites = FavoritesStore::open_default();
    let listed: Vec<MovieSummary> = match filter {
        Some(pattern) => favorites
            .filter(pattern)
            .into_iter()
            .map(|f| f.movie)
            .collect(),
        None => favorites.list(),
    };

    let items: Vec<_> = listed.iter().map(|m| summary_json(m, true)).collect();
    CommandOutput::new(json!(items))
        .with_text(render_favorites(&listed))
        .print(output_json)
}

/// Add or remove a favorite
pub async fn cmd_fav_toggle(id: &str, output_json: bool) -> Result<()> {
    let favorites = FavoritesStore::open_default();
    // Removal needs no client
    let (toggled, movie) = match favorites.get(id) {
        Some(movie) => (favorites.toggle(&movie)?, movie),
        None => toggle_by_id(&client()?, &favorites, id).await?,
    };

    let added = toggled == Toggled::Added;
    let verb = if added { "Added" } else { "Removed" };
    let text = format!(
        "{verb} {} ({}) {} favorites",
        movie.title.cyan(),
        movie.id,
        if added { "to" } else { "from" }
    );

    CommandOutput::new(json!({
        "action": "fav_toggle",
        "id": movie.id,
        "title": movie.title,
        "favorite": added,
    }))
    .with_text(text)
    .print(output_json)
}

/// Remove a favorite by id
pub fn cmd_fav_rm(id: &str, output_json: bool) -> Result<()> {
    let favorites = FavoritesStore::open_default();
    if !favorites.remove(id)? {
        return Err(MarqueeError::NotFavorite(id.to_string()));
    }

    CommandOutput::new(json!({
        "action": "fav_rm",
        "id": id,
        "success": true,
    }))
    .with_text(format!("Removed {} from favorites", id.cyan()))
    .print(output_json)
}

/// Report whether an id is a favorite
pub fn cmd_fav_check(id: &str, output_json: bool) -> Result<()> {
    let favorites = FavoritesStore::open_default();
    let favorite = favorites.is_favorite(id);

    CommandOutput::new(json!({
        "id": id,
        "favorite": favorite,
    }))
    .with_text(favorite.to_string())
    .print(output_json)
}
