use std::sync::Arc;

use super::client;
use super::discover::current_year;
use crate::error::Result;
use crate::favorites::FavoritesStore;

/// Start the interactive shell on the search home
pub async fn cmd_shell() -> Result<()> {
    let api = Arc::new(client()?);
    crate::shell::run(api, FavoritesStore::open_default(), current_year()).await
}
