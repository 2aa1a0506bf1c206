//! Text rendering of the search home, favorites list and detail view.

use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::detail::DetailState;
use crate::movie::{MovieDetail, MovieSummary, NOT_AVAILABLE};
use crate::search::SearchSession;

pub const LOADING_TEXT: &str = "Loading...";
pub const NO_FAVORITES_TEXT: &str = "No favorite movies yet!";

const FAVORITE_BADGE: &str = "♥";
const NOT_FAVORITE_BADGE: &str = "♡";

/// A card in the results grid
#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Fav")]
    favorite: &'static str,
}

/// A row in the favorites list
#[derive(Tabled)]
struct FavoriteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Year")]
    year: String,
}

/// Result cards with 1-based indexes and a favorite badge per card.
pub fn render_cards(items: &[MovieSummary], is_favorite: impl Fn(&str) -> bool) -> String {
    let rows: Vec<CardRow> = items
        .iter()
        .enumerate()
        .map(|(i, movie)| CardRow {
            index: i + 1,
            id: movie.id.clone(),
            title: movie.title.clone(),
            year: movie.year.clone(),
            kind: movie.kind.clone().unwrap_or_default(),
            favorite: if is_favorite(&movie.id) {
                FAVORITE_BADGE
            } else {
                NOT_FAVORITE_BADGE
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// `Page N of M`, or nothing when everything fits on one page.
pub fn render_pagination(page: u32, total_pages: u32) -> Option<String> {
    if total_pages <= 1 {
        return None;
    }

    let prev = if page > 1 { "◀ prev" } else { "      " };
    let next = if page < total_pages { "next ▶" } else { "" };
    Some(format!("{prev}  Page {page} of {total_pages}  {next}").trim_end().to_string())
}

fn render_filters(session: &SearchSession) -> String {
    let term = if session.term().trim().is_empty() {
        "(none)".to_string()
    } else {
        format!("\"{}\"", session.term().trim())
    };
    let kind = session
        .media_type()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "all".to_string());
    let year = session
        .year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| "any".to_string());

    format!("Search: {term}  type: {kind}  year: {year}")
}

/// The search home: filters, status line, cards and pagination.
pub fn render_home(session: &SearchSession, is_favorite: impl Fn(&str) -> bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", render_filters(session).dimmed()));

    if session.is_loading() {
        out.push_str(&format!("{LOADING_TEXT}\n"));
    }
    if let Some(error) = session.error() {
        out.push_str(&format!("{}\n", error.red()));
    }

    if !session.items().is_empty() {
        out.push_str(&render_cards(session.items(), is_favorite));
        out.push('\n');
    }

    if let Some(pagination) = render_pagination(session.page(), session.total_pages()) {
        out.push_str(&format!("{pagination}\n"));
    }

    out
}

/// The saved list.
pub fn render_favorites(favorites: &[MovieSummary]) -> String {
    let heading = format!("Favorite Movies ({})", favorites.len());
    let mut out = format!("{}\n", heading.cyan().bold());

    if favorites.is_empty() {
        out.push_str(NO_FAVORITES_TEXT);
        out.push('\n');
        return out;
    }

    let rows: Vec<FavoriteRow> = favorites
        .iter()
        .map(|movie| FavoriteRow {
            id: movie.id.clone(),
            title: movie.title.clone(),
            year: movie.year.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    out.push_str(&table.to_string());
    out.push('\n');
    out
}

fn field(label: &str, value: Option<&str>) -> String {
    format!("{}: {}\n", label.bold(), value.unwrap_or(NOT_AVAILABLE))
}

fn render_loaded(detail: &MovieDetail, favorite: bool) -> String {
    let badge = if favorite {
        format!("  {FAVORITE_BADGE} favorite")
    } else {
        String::new()
    };

    let mut out = format!(
        "{} ({}){}\n\n",
        detail.title.cyan().bold(),
        detail.year,
        badge
    );
    out.push_str(&field("Genre", detail.genre.as_deref()));
    out.push_str(&field("Director", detail.director.as_deref()));
    out.push_str(&field("Actors", detail.actors.as_deref()));
    out.push_str(&field("Plot", detail.plot.as_deref()));
    out.push_str(&field(
        "IMDB Rating",
        detail.rating.as_ref().map(|r| format!("⭐ {r}")).as_deref(),
    ));
    if detail.rated.is_some() || detail.runtime.is_some() {
        out.push_str(&field("Rated", detail.rated.as_deref()));
        out.push_str(&field("Runtime", detail.runtime.as_deref()));
    }
    if detail.released.is_some() {
        out.push_str(&field("Released", detail.released.as_deref()));
    }
    if detail.language.is_some() || detail.country.is_some() {
        out.push_str(&field("Language", detail.language.as_deref()));
        out.push_str(&field("Country", detail.country.as_deref()));
    }
    out.push_str(&field("Poster", Some(detail.poster_or_placeholder())));
    out
}

/// The detail view for any state of a fetch.
pub fn render_detail(state: &DetailState, is_favorite: impl Fn(&str) -> bool) -> String {
    match state {
        DetailState::Idle => String::new(),
        DetailState::Loading { .. } => format!("{LOADING_TEXT}\n"),
        DetailState::Loaded { detail } => render_loaded(detail, is_favorite(&detail.id)),
        DetailState::Failed { id, message } => {
            format!("{}\n", format!("Could not load {id}: {message}").red())
        }
    }
}
