use super::{CommandOutput, client};
use crate::detail::{DetailState, fetch_detail};
use crate::error::{MarqueeError, Result};
use crate::favorites::FavoritesStore;
use crate::view::render_detail;

/// Show the full record for one id
pub async fn cmd_show(id: &str, output_json: bool) -> Result<()> {
    let api = client()?;
    let favorites = FavoritesStore::open_default();

    let state = fetch_detail(&api, id).await;
    let detail = match &state {
        DetailState::Loaded { detail } => detail,
        DetailState::Failed { message, .. } => return Err(MarqueeError::Api(message.clone())),
        DetailState::Idle | DetailState::Loading { .. } => {
            return Err(MarqueeError::Other(format!("no detail for {id}")));
        }
    };

    let mut value = serde_json::to_value(detail)?;
    value["favorite"] = serde_json::json!(favorites.is_favorite(&detail.id));

    CommandOutput::new(value)
        .with_text(render_detail(&state, |id| favorites.is_favorite(id)))
        .print(output_json)
}
