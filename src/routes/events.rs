use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    models::event::SaveEventRequest,
    services::{content::ContentService, metrics::ADMIN_ACTIONS_COUNTER},
    validation,
    AppState,
};

pub async fn list_events(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let rows = ContentService::list_events(&state.db).await?;
    Ok(Json(serde_json::to_value(rows).map_err(anyhow::Error::from)?))
}

/// POST /events — events carry no free-prose text, so they skip the content
/// filter (matching the admin surface contract).
pub async fn save_event(
    State(state): State<AppState>,
    Json(body): Json<SaveEventRequest>,
) -> Result<Json<Value>, ApiError> {
    validation::validate_event(&body)?;

    let updated = body.id.is_some();
    let row = ContentService::save_event(&state.db, &body).await?;
    ADMIN_ACTIONS_COUNTER
        .with_label_values(&["save_event", "success"])
        .inc();
    Ok(Json(json!({
        "type": "success",
        "message": format!("Event {} successfully!", if updated { "updated" } else { "saved" }),
        "data": row,
    })))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    ContentService::delete_event(&state.db, id).await?;
    ADMIN_ACTIONS_COUNTER
        .with_label_values(&["delete_event", "success"])
        .inc();
    Ok(Json(json!({ "type": "success", "message": "Event deleted." })))
}
