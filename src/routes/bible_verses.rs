use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    models::bible_verse::SaveBibleVerseRequest,
    services::{content::ContentService, metrics::ADMIN_ACTIONS_COUNTER},
    validation,
    AppState,
};

pub async fn list_bible_verses(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let rows = ContentService::list_bible_verses(&state.db).await?;
    Ok(Json(serde_json::to_value(rows).map_err(anyhow::Error::from)?))
}

pub async fn save_bible_verse(
    State(state): State<AppState>,
    Json(body): Json<SaveBibleVerseRequest>,
) -> Result<Json<Value>, ApiError> {
    validation::validate_bible_verse(&body)?;

    let verdict = state
        .ai
        .check_content(&format!("{}: {}", body.reference, body.text.join(" ")))
        .await;
    if !verdict.is_appropriate {
        return Err(ApiError::ContentRejected {
            field: "text".into(),
            reason: verdict
                .reason
                .unwrap_or_else(|| "This verse was flagged as inappropriate.".into()),
        });
    }

    let updated = body.id.is_some();
    let row = ContentService::save_bible_verse(&state.db, &body).await?;
    ADMIN_ACTIONS_COUNTER
        .with_label_values(&["save_bible_verse", "success"])
        .inc();
    Ok(Json(json!({
        "type": "success",
        "message": format!("Bible verse {} successfully!", if updated { "updated" } else { "added" }),
        "data": row,
    })))
}

pub async fn delete_bible_verse(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    ContentService::delete_bible_verse(&state.db, id).await?;
    ADMIN_ACTIONS_COUNTER
        .with_label_values(&["delete_bible_verse", "success"])
        .inc();
    Ok(Json(json!({ "type": "success", "message": "Bible verse deleted." })))
}
