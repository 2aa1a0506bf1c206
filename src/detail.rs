//! Detail view state.
//!
//! Every fetch ends in either `Loaded` or `Failed`; a failed fetch never
//! leaves the view stuck in `Loading`.

use serde::Serialize;

use crate::movie::MovieDetail;
use crate::omdb::MovieApi;

/// Shown when the detail request never got an answer.
pub const DETAIL_NETWORK_ERROR_MESSAGE: &str = "Could not load movie details. Try again!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailState {
    Idle,
    Loading { id: String },
    Loaded { detail: MovieDetail },
    Failed { id: String, message: String },
}

impl DetailState {
    pub fn loading(id: impl Into<String>) -> Self {
        DetailState::Loading { id: id.into() }
    }

    /// Id this state belongs to, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            DetailState::Idle => None,
            DetailState::Loading { id } | DetailState::Failed { id, .. } => Some(id),
            DetailState::Loaded { detail } => Some(&detail.id),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DetailState::Loading { .. })
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        match self {
            DetailState::Loaded { detail } => Some(detail),
            _ => None,
        }
    }
}

/// Fetch one record and settle it into a terminal state.
pub async fn fetch_detail<A: MovieApi>(api: &A, id: &str) -> DetailState {
    match api.detail(id).await {
        Ok(detail) => DetailState::Loaded { detail },
        Err(e) if e.is_transport() => {
            tracing::warn!(error = %e, %id, "detail fetch failed");
            DetailState::Failed {
                id: id.to_string(),
                message: DETAIL_NETWORK_ERROR_MESSAGE.to_string(),
            }
        }
        Err(e) => DetailState::Failed {
            id: id.to_string(),
            message: e.to_string(),
        },
    }
}
