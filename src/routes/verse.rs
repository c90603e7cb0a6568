use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{errors::ApiError, models::bible_verse::VerseLookupRequest, AppState};

/// POST /verse/lookup — resolve a free-form reference into a corrected
/// reference plus display-ready fragments. No store write happens here; the
/// admin reviews the populated form and saves separately. Fail-closed.
pub async fn lookup_verse(
    State(state): State<AppState>,
    Json(body): Json<VerseLookupRequest>,
) -> Result<Json<Value>, ApiError> {
    let lookup = state.ai.lookup_verse(&body.reference).await?;
    Ok(Json(json!({
        "type": "success",
        "correctedReference": lookup.corrected_reference,
        "text": lookup.text,
    })))
}
