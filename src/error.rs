use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarqueeError {
    #[error("movie '{0}' is not in favorites")]
    NotFavorite(String),

    #[error("invalid route '{0}': {1}")]
    InvalidRoute(String, String),

    #[error("invalid media type '{0}', expected one of: movie, series, episode")]
    InvalidMediaType(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    /// Application-level failure reported by the remote API (`Response: "False"`).
    #[error("{0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Other(String),
}

impl MarqueeError {
    /// True for failures of the transport itself rather than answers from the API.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            MarqueeError::Http(_)
                | MarqueeError::Status(_)
                | MarqueeError::Json(_)
                | MarqueeError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MarqueeError>;
