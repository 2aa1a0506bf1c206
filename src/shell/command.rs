//! Shell input parsing.

use crate::error::{MarqueeError, Result};
use crate::movie::MediaType;
use crate::route::Route;

pub const HELP_TEXT: &str = "\
Commands:
  search <terms>        search (alias: s)
  type <movie|series|episode|all>
  year <yyyy|any>
  next | prev           page through results (aliases: n, p)
  page <n>              jump to a page of the results shown
  fav <n|id>            toggle a favorite by card number or id (alias: f)
  show <n|id>           open a movie's detail (alias: d)
  rm <id>               remove a favorite
  favs | home           switch view
  go <route>            open /, /favorites or /movie/<id>
  help | quit";

/// A card number on the home view or a raw id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Index(usize),
    Id(String),
}

impl Target {
    fn parse(arg: &str) -> Self {
        match arg.parse::<usize>() {
            Ok(n) => Target::Index(n),
            Err(_) => Target::Id(arg.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    SetType(Option<MediaType>),
    SetYear(Option<u16>),
    Next,
    Prev,
    Page(u32),
    ToggleFavorite(Target),
    Show(Target),
    Remove(String),
    Go(Route),
    Help,
    Quit,
}

fn require<'a>(arg: &'a str, usage: &str) -> Result<&'a str> {
    if arg.is_empty() {
        return Err(MarqueeError::InvalidInput(format!("usage: {usage}")));
    }
    Ok(arg)
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, arg) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "search" | "s" => ShellCommand::Search(arg.to_string()),
        "type" | "t" => {
            let arg = require(arg, "type <movie|series|episode|all>")?;
            if arg.eq_ignore_ascii_case("all") {
                ShellCommand::SetType(None)
            } else {
                ShellCommand::SetType(Some(arg.parse()?))
            }
        }
        "year" | "y" => {
            let arg = require(arg, "year <yyyy|any>")?;
            if arg.eq_ignore_ascii_case("any") {
                ShellCommand::SetYear(None)
            } else {
                let year = arg.parse::<u16>().map_err(|_| {
                    MarqueeError::InvalidInput(format!("invalid year '{arg}'"))
                })?;
                ShellCommand::SetYear(Some(year))
            }
        }
        "next" | "n" => ShellCommand::Next,
        "prev" | "p" => ShellCommand::Prev,
        "page" => {
            let arg = require(arg, "page <n>")?;
            let page = arg
                .parse::<u32>()
                .ok()
                .filter(|p| *p > 0)
                .ok_or_else(|| MarqueeError::InvalidInput(format!("invalid page '{arg}'")))?;
            ShellCommand::Page(page)
        }
        "fav" | "f" => ShellCommand::ToggleFavorite(Target::parse(require(arg, "fav <n|id>")?)),
        "show" | "d" => ShellCommand::Show(Target::parse(require(arg, "show <n|id>")?)),
        "rm" => ShellCommand::Remove(require(arg, "rm <id>")?.to_string()),
        "favs" | "favorites" => ShellCommand::Go(Route::Favorites),
        "home" => ShellCommand::Go(Route::Home),
        "go" | "open" => ShellCommand::Go(Route::parse(require(arg, "go <route>")?)?),
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => {
            return Err(MarqueeError::InvalidInput(format!(
                "unknown command '{other}', type 'help' for a list"
            )));
        }
    };

    Ok(Some(command))
}
