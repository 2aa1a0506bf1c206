//! One-shot subcommands.
//!
//! Each command loads what it needs (config, API client, favorites), does its
//! work and prints either a human rendering or JSON.

mod config;
mod discover;
mod favorites;
mod open;
mod search;
mod shell;
mod show;

pub use config::{cmd_config_get, cmd_config_set, cmd_config_show};
pub use discover::cmd_discover;
pub use favorites::{cmd_fav_check, cmd_fav_ls, cmd_fav_rm, cmd_fav_toggle};
pub use open::cmd_open;
pub use search::{SearchOptions, cmd_search};
pub use shell::cmd_shell;
pub use show::cmd_show;

use serde_json::{Value, json};

use crate::config::Config;
use crate::error::Result;
use crate::movie::{MovieSummary, SearchPage};
use crate::omdb::OmdbClient;

/// Output of a command in both renderings
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print JSON when asked, else the text (falling back to JSON if there is none).
    pub fn print(self, output_json: bool) -> Result<()> {
        match self.text {
            Some(text) if !output_json => {
                println!("{}", text.trim_end());
                Ok(())
            }
            _ => print_json(&self.json),
        }
    }
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Client built from the on-disk config and environment.
fn client() -> Result<OmdbClient> {
    let config = Config::load()?;
    OmdbClient::from_config(&config)
}

fn summary_json(movie: &MovieSummary, favorite: bool) -> Value {
    json!({
        "id": movie.id,
        "title": movie.title,
        "year": movie.year,
        "type": movie.kind,
        "poster": movie.poster_or_placeholder(),
        "favorite": favorite,
    })
}

fn page_json(page: &SearchPage, is_favorite: impl Fn(&str) -> bool) -> Value {
    let items: Vec<Value> = page
        .items
        .iter()
        .map(|m| summary_json(m, is_favorite(&m.id)))
        .collect();

    json!({
        "page": page.page,
        "total_results": page.total_results,
        "total_pages": page.total_pages(),
        "items": items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::movie;

    #[test]
    fn test_summary_json_uses_placeholder() {
        let value = summary_json(&movie("tt1", "Alien", "1979"), true);
        assert_eq!(value["id"], "tt1");
        assert_eq!(value["type"], "movie");
        assert_eq!(value["favorite"], true);
        assert_eq!(value["poster"], crate::movie::POSTER_PLACEHOLDER);
    }

    #[test]
    fn test_page_json() {
        let page = SearchPage {
            items: vec![movie("tt1", "Alien", "1979"), movie("tt2", "Aliens", "1986")],
            page: 2,
            total_results: 23,
        };
        let value = page_json(&page, |id| id == "tt2");
        assert_eq!(value["page"], 2);
        assert_eq!(value["total_pages"], 3);
        assert_eq!(value["items"][0]["favorite"], false);
        assert_eq!(value["items"][1]["favorite"], true);
    }
}
