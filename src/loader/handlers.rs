use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

use super::services;

/// Runs both seed loads as one batch. Errors surface as 500 with the
/// message in the body and nothing persisted; a re-run over loaded data
/// reports zero additions.
#[instrument(skip(state))]
pub async fn load_data(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let (spells_added, feats_added) =
        services::load_all(&state.db, &state.config.spells_file, &state.config.feats_file)
            .await?;

    Ok(Json(json!({
        "message": "Data loaded successfully",
        "spells_added": spells_added,
        "feats_added": feats_added,
    })))
}
