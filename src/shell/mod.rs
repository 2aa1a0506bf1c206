//! Interactive shell.
//!
//! One task owns all view state and reacts to three kinds of event: input
//! lines, completed requests and favorites changes. Requests run on spawned
//! tasks and report back over a channel, so input is never blocked. Nothing
//! is cancelled; a search completion older than the latest dispatch is dropped
//! by the session, and a detail completion is dropped once the view has moved
//! to another route.

mod command;

use std::io::Write;
use std::sync::Arc;

use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

pub use command::{HELP_TEXT, ShellCommand, Target, parse_command};

use crate::detail::{DetailState, fetch_detail};
use crate::error::Result;
use crate::favorites::{FavoritesStore, Toggled};
use crate::movie::{MovieDetail, MovieSummary};
use crate::omdb::{MovieApi, SearchResponse};
use crate::route::Route;
use crate::search::{DefaultLoad, DefaultOutcome, PendingSearch, SearchSession, run_default_load};
use crate::view::{render_detail, render_favorites, render_home};

const PROMPT: &str = "marquee> ";

/// A finished background request
#[derive(Debug)]
pub enum AppEvent {
    Searched {
        pending: PendingSearch,
        outcome: Result<SearchResponse>,
    },
    DefaultLoaded {
        load: DefaultLoad,
        outcome: DefaultOutcome,
    },
    /// Detail for the id that was requested, which the API may spell differently
    DetailLoaded { id: String, state: DetailState },
    /// Detail fetched to favorite a movie that was not on screen
    FavoriteLookup {
        id: String,
        outcome: Result<MovieDetail>,
    },
}

/// Whether the loop keeps going after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App<A> {
    api: Arc<A>,
    favorites: FavoritesStore,
    session: SearchSession,
    route: Route,
    detail: DetailState,
    notice: Option<String>,
    events: mpsc::UnboundedSender<AppEvent>,
}

impl<A: MovieApi + 'static> App<A> {
    /// Create the app and the receiving end of its event channel.
    pub fn new(api: Arc<A>, favorites: FavoritesStore) -> (Self, mpsc::UnboundedReceiver<AppEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let app = Self {
            api,
            favorites,
            session: SearchSession::new(),
            route: Route::Home,
            detail: DetailState::Idle,
            notice: None,
            events,
        };
        (app, rx)
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn detail(&self) -> &DetailState {
        &self.detail
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Kick off the startup default load for `year`.
    pub fn start(&mut self, year: i16) {
        let load = self.session.dispatch_default(year);
        let api = Arc::clone(&self.api);
        let tx = self.events.clone();
        tokio::spawn(async move {
            let outcome = run_default_load(api.as_ref(), year).await;
            let _ = tx.send(AppEvent::DefaultLoaded { load, outcome });
        });
    }

    fn spawn_search(&self, pending: PendingSearch) {
        let api = Arc::clone(&self.api);
        let tx = self.events.clone();
        tokio::spawn(async move {
            let outcome = api.search(&pending.query).await;
            let _ = tx.send(AppEvent::Searched { pending, outcome });
        });
    }

    fn spawn_detail(&self, id: String) {
        let api = Arc::clone(&self.api);
        let tx = self.events.clone();
        tokio::spawn(async move {
            let state = fetch_detail(api.as_ref(), &id).await;
            let _ = tx.send(AppEvent::DetailLoaded { id, state });
        });
    }

    fn spawn_favorite_lookup(&self, id: String) {
        let api = Arc::clone(&self.api);
        let tx = self.events.clone();
        tokio::spawn(async move {
            let outcome = api.detail(&id).await;
            let _ = tx.send(AppEvent::FavoriteLookup { id, outcome });
        });
    }

    /// Switch views. Arriving at a movie route always starts a fresh fetch.
    pub fn navigate(&mut self, route: Route) {
        if let Route::Movie(id) = &route {
            self.detail = DetailState::loading(id.clone());
            self.spawn_detail(id.clone());
        }
        tracing::debug!(%route, "navigate");
        self.route = route;
    }

    fn resolve(&self, target: &Target) -> Option<MovieSummary> {
        match target {
            Target::Index(n) => n
                .checked_sub(1)
                .and_then(|i| self.session.items().get(i))
                .cloned(),
            Target::Id(id) => self
                .session
                .items()
                .iter()
                .find(|m| &m.id == id)
                .cloned()
                .or_else(|| self.favorites.get(id))
                .or_else(|| {
                    self.detail
                        .detail()
                        .filter(|d| &d.id == id)
                        .map(MovieDetail::summary)
                }),
        }
    }

    fn toggle(&mut self, movie: &MovieSummary) {
        self.notice = Some(match self.favorites.toggle(movie) {
            Ok(Toggled::Added) => format!("Added {} to favorites", movie.title),
            Ok(Toggled::Removed) => format!("Removed {} from favorites", movie.title),
            Err(e) => format!("Could not save favorites: {e}"),
        });
    }

    /// Apply one parsed command.
    pub fn handle_command(&mut self, command: ShellCommand) -> Flow {
        match command {
            ShellCommand::Search(term) => {
                self.session.set_term(term);
                if let Some(pending) = self.session.dispatch(1) {
                    self.spawn_search(pending);
                }
                self.route = Route::Home;
            }
            ShellCommand::SetType(media_type) => {
                self.session.set_media_type(media_type);
                self.notice = Some(format!(
                    "type: {}",
                    media_type.map_or("all", |t| t.as_str())
                ));
            }
            ShellCommand::SetYear(year) => {
                self.session.set_year(year);
                self.notice = Some(format!(
                    "year: {}",
                    year.map_or_else(|| "any".to_string(), |y| y.to_string())
                ));
            }
            ShellCommand::Next => match self.session.dispatch_next() {
                Some(pending) => self.spawn_search(pending),
                None => self.notice = Some("Already on the last page".to_string()),
            },
            ShellCommand::Prev => match self.session.dispatch_prev() {
                Some(pending) => self.spawn_search(pending),
                None => self.notice = Some("Already on the first page".to_string()),
            },
            ShellCommand::Page(page) => match self.session.dispatch_page(page) {
                Some(pending) => self.spawn_search(pending),
                None => self.notice = Some(format!("No page {page}")),
            },
            ShellCommand::ToggleFavorite(target) => match self.resolve(&target) {
                Some(movie) => self.toggle(&movie),
                None => match target {
                    Target::Id(id) => self.spawn_favorite_lookup(id),
                    Target::Index(n) => self.notice = Some(format!("No card {n}")),
                },
            },
            ShellCommand::Show(target) => {
                let id = match target {
                    Target::Index(n) => self.resolve(&Target::Index(n)).map(|m| m.id),
                    Target::Id(id) => Some(id),
                };
                match id {
                    Some(id) => self.navigate(Route::Movie(id)),
                    None => self.notice = Some("No such card".to_string()),
                }
            }
            ShellCommand::Remove(id) => {
                self.notice = Some(match self.favorites.remove(&id) {
                    Ok(true) => format!("Removed {id} from favorites"),
                    Ok(false) => format!("{id} is not a favorite"),
                    Err(e) => format!("Could not save favorites: {e}"),
                });
            }
            ShellCommand::Go(route) => self.navigate(route),
            ShellCommand::Help => self.notice = Some(HELP_TEXT.to_string()),
            ShellCommand::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Parse and apply one line of input. Parse errors become the notice.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        match parse_command(line) {
            Ok(Some(command)) => self.handle_command(command),
            Ok(None) => Flow::Continue,
            Err(e) => {
                self.notice = Some(format!("{}", e.to_string().red()));
                Flow::Continue
            }
        }
    }

    /// Fold a finished request into the view state.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Searched { pending, outcome } => {
                self.session.apply(&pending, outcome);
            }
            AppEvent::DefaultLoaded { load, outcome } => {
                self.session.apply_default(&load, outcome);
            }
            AppEvent::DetailLoaded { id, state } => {
                let current = matches!(&self.route, Route::Movie(route_id) if *route_id == id);
                if current {
                    self.detail = state;
                } else {
                    tracing::debug!(%id, route = %self.route, "dropping detail for a route no longer shown");
                }
            }
            AppEvent::FavoriteLookup { id, outcome } => match outcome {
                Ok(detail) => self.toggle(&detail.summary()),
                Err(e) => self.notice = Some(format!("Could not favorite {id}: {e}")),
            },
        }
    }

    /// The current view, followed by any one-off notice.
    pub fn render(&mut self) -> String {
        let is_favorite = |id: &str| self.favorites.is_favorite(id);
        let mut out = format!("{}\n", format!("[{}]", self.route).dimmed());
        out.push_str(&match &self.route {
            Route::Home => render_home(&self.session, is_favorite),
            Route::Favorites => render_favorites(&self.favorites.list()),
            Route::Movie(_) => render_detail(&self.detail, is_favorite),
        });
        if let Some(notice) = self.notice.take() {
            out.push_str(&format!("{notice}\n"));
        }
        out
    }
}

fn draw(text: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "{text}{PROMPT}");
    let _ = stdout.flush();
}

/// Run the shell until `quit` or end of input.
pub async fn run<A: MovieApi + 'static>(api: Arc<A>, favorites: FavoritesStore, year: i16) -> Result<()> {
    let mut changes = favorites.subscribe();
    let (mut app, mut events) = App::new(api, favorites);
    app.start(year);

    // Raw bytes so a line that is not UTF-8 is decoded lossily instead of
    // ending the session. A partial read stays in `buf` across select rounds.
    let mut input = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();
    draw(&app.render());

    loop {
        tokio::select! {
            read = input.read_until(b'\n', &mut buf) => match read {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf).into_owned();
                    buf.clear();
                    if app.handle_line(&line) == Flow::Quit {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stdin closed");
                    break;
                }
            },
            Some(event) = events.recv() => app.handle_event(event),
            Ok(()) = changes.changed() => {}
        }

        // Our own redraw covers any favorites change made so far
        changes.borrow_and_update();
        draw(&app.render());
    }

    println!();
    Ok(())
}
