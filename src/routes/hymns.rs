use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    models::hymn::SaveHymnRequest,
    services::{content::ContentService, metrics::ADMIN_ACTIONS_COUNTER},
    validation,
    AppState,
};

pub async fn list_hymns(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let rows = ContentService::list_hymns(&state.db).await?;
    Ok(Json(serde_json::to_value(rows).map_err(anyhow::Error::from)?))
}

pub async fn save_hymn(
    State(state): State<AppState>,
    Json(body): Json<SaveHymnRequest>,
) -> Result<Json<Value>, ApiError> {
    validation::validate_hymn(&body)?;

    let verdict = state
        .ai
        .check_content(&format!("{}: {}", body.title, body.lyrics.join(" ")))
        .await;
    if !verdict.is_appropriate {
        return Err(ApiError::ContentRejected {
            field: "lyrics".into(),
            reason: verdict
                .reason
                .unwrap_or_else(|| "This hymn was flagged as inappropriate.".into()),
        });
    }

    let updated = body.id.is_some();
    let row = ContentService::save_hymn(&state.db, &body).await?;
    ADMIN_ACTIONS_COUNTER
        .with_label_values(&["save_hymn", "success"])
        .inc();
    Ok(Json(json!({
        "type": "success",
        "message": format!("Hymn {} successfully!", if updated { "updated" } else { "added" }),
        "data": row,
    })))
}

pub async fn delete_hymn(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    ContentService::delete_hymn(&state.db, id).await?;
    ADMIN_ACTIONS_COUNTER
        .with_label_values(&["delete_hymn", "success"])
        .inc();
    Ok(Json(json!({ "type": "success", "message": "Hymn deleted." })))
}
