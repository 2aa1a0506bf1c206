use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;

use crate::movie::{MediaType, VALID_MEDIA_TYPES};

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Search OMDb and keep a list of favorite movies")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search movies, series and episodes by title
    #[command(visible_alias = "s")]
    Search {
        /// Search terms
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Restrict to a type: movie, series, episode (case-insensitive)
        #[arg(short = 't', long = "type", value_parser = parse_media_type)]
        media_type: Option<MediaType>,

        /// Restrict to a release year
        #[arg(short, long)]
        year: Option<u16>,

        /// Result page, 10 results per page
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the default listing: this year's "movie" titles, else a fixed fallback
    Discover {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display the full record for an IMDb id
    Show {
        /// IMDb id (e.g. tt0111161)
        #[arg(value_parser = parse_movie_id)]
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage favorites
    Fav {
        #[command(subcommand)]
        action: FavAction,
    },

    /// Render a view by route: /, /favorites or /movie/<id>
    Open {
        /// Route to render
        route: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive shell
    Shell,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate for
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum FavAction {
    /// List favorites
    Ls {
        /// Fuzzy filter over title, year and id
        #[arg(short, long)]
        filter: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a movie to favorites, or remove it if already there
    Toggle {
        #[arg(value_parser = parse_movie_id)]
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a favorite
    Rm {
        #[arg(value_parser = parse_movie_id)]
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print whether an id is a favorite
    Check {
        #[arg(value_parser = parse_movie_id)]
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (omdb.api_key, api.url, api.timeout, log.level)
        key: String,
        /// Value to set
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get a configuration value
    Get {
        /// Configuration key (omdb.api_key, api.url, api.timeout, log.level)
        key: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    /// Execute the command
    pub async fn run(self) -> crate::error::Result<()> {
        use crate::commands::{
            SearchOptions, cmd_config_get, cmd_config_set, cmd_config_show, cmd_discover,
            cmd_fav_check, cmd_fav_ls, cmd_fav_rm, cmd_fav_toggle, cmd_open, cmd_search,
            cmd_shell, cmd_show,
        };

        match self {
            Commands::Search {
                query,
                media_type,
                year,
                page,
                json,
            } => {
                let options = SearchOptions {
                    terms: query,
                    media_type,
                    year,
                    page,
                };
                cmd_search(options, json).await
            }
            Commands::Discover { json } => cmd_discover(json).await,
            Commands::Show { id, json } => cmd_show(&id, json).await,

            Commands::Fav { action } => match action {
                FavAction::Ls { filter, json } => cmd_fav_ls(filter.as_deref(), json),
                FavAction::Toggle { id, json } => cmd_fav_toggle(&id, json).await,
                FavAction::Rm { id, json } => cmd_fav_rm(&id, json),
                FavAction::Check { id, json } => cmd_fav_check(&id, json),
            },

            Commands::Open { route, json } => cmd_open(&route, json).await,
            Commands::Shell => cmd_shell().await,

            Commands::Config { action } => match action {
                ConfigAction::Show { json } => cmd_config_show(json),
                ConfigAction::Set { key, value, json } => cmd_config_set(&key, &value, json),
                ConfigAction::Get { key, json } => cmd_config_get(&key, json),
            },

            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

fn parse_with_validation<T, F>(
    s: &str,
    parser: F,
    field_name: &str,
    valid_values: &[&str],
) -> Result<T, String>
where
    F: FnOnce(&str) -> Result<T, String>,
{
    parser(s).map_err(|_| {
        format!(
            "Invalid {}. Must be one of: {}",
            field_name,
            valid_values.join(", ")
        )
    })
}

fn parse_media_type(s: &str) -> Result<MediaType, String> {
    parse_with_validation(
        s,
        |v| v.parse().map_err(|_| String::new()),
        "type",
        VALID_MEDIA_TYPES,
    )
}

fn parse_movie_id(s: &str) -> Result<String, String> {
    let id = s.trim();
    if id.is_empty() {
        return Err("ID cannot be empty".to_string());
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!(
            "Invalid ID '{id}'. IDs contain only letters and digits (e.g. tt0111161)"
        ));
    }
    Ok(id.to_string())
}

/// Generate shell completions
pub fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "marquee", &mut io::stdout());
}
