pub mod cli;
pub mod commands;
pub mod config;
pub mod detail;
pub mod error;
pub mod favorites;
pub mod logging;
pub mod movie;
pub mod omdb;
pub mod paths;
pub mod route;
pub mod search;
pub mod shell;
pub mod view;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use detail::{DetailState, fetch_detail};
pub use error::{MarqueeError, Result};
pub use favorites::{FavoritesStore, FileStore, KeyValueStore, MemoryStore, Toggled};
pub use movie::{MediaType, MovieDetail, MovieSummary, SearchPage};
pub use omdb::{MovieApi, OmdbClient, SearchQuery, SearchResponse};
pub use route::Route;
pub use search::SearchSession;
