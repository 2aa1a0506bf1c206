use std::fmt;
use std::str::FromStr;

use crate::error::{MarqueeError, Result};

/// A view address: `/`, `/favorites` or `/movie/:id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Favorites,
    Movie(String),
}

impl Route {
    pub fn parse(s: &str) -> Result<Self> {
        let path = s.trim();
        let trimmed = path.trim_end_matches('/');

        if trimmed.is_empty() {
            return Ok(Route::Home);
        }
        if trimmed == "/favorites" {
            return Ok(Route::Favorites);
        }
        if let Some(id) = trimmed.strip_prefix("/movie/") {
            if id.is_empty() || id.contains('/') {
                return Err(MarqueeError::InvalidRoute(
                    s.to_string(),
                    "expected /movie/<id>".to_string(),
                ));
            }
            return Ok(Route::Movie(id.to_string()));
        }

        Err(MarqueeError::InvalidRoute(
            s.to_string(),
            "expected /, /favorites or /movie/<id>".to_string(),
        ))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Favorites => write!(f, "/favorites"),
            Route::Movie(id) => write!(f, "/movie/{id}"),
        }
    }
}

impl FromStr for Route {
    type Err = MarqueeError;

    fn from_str(s: &str) -> Result<Self> {
        Route::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/").unwrap(), Route::Home);
        assert_eq!(Route::parse("").unwrap(), Route::Home);
        assert_eq!(Route::parse("/favorites").unwrap(), Route::Favorites);
        assert_eq!(Route::parse("/favorites/").unwrap(), Route::Favorites);
        assert_eq!(
            Route::parse("/movie/tt0111161").unwrap(),
            Route::Movie("tt0111161".to_string())
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Route::parse("/movie/").is_err());
        assert!(Route::parse("/movie/tt1/extra").is_err());
        assert!(Route::parse("/settings").is_err());
        assert!(Route::parse("favorites").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for route in [
            Route::Home,
            Route::Favorites,
            Route::Movie("tt0372784".to_string()),
        ] {
            assert_eq!(Route::parse(&route.to_string()).unwrap(), route);
        }
    }
}
