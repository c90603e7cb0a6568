use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    errors::ApiError,
    models::announcement::SaveAnnouncementRequest,
    services::{content::ContentService, metrics::ADMIN_ACTIONS_COUNTER},
    validation,
    AppState,
};

pub async fn list_announcements(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let rows = ContentService::list_announcements(&state.db).await?;
    Ok(Json(serde_json::to_value(rows).map_err(anyhow::Error::from)?))
}

/// POST /announcements — insert without an id, update with one. The title and
/// content are screened together, as "title: content".
pub async fn save_announcement(
    State(state): State<AppState>,
    Json(body): Json<SaveAnnouncementRequest>,
) -> Result<Json<Value>, ApiError> {
    validation::validate_announcement(&body)?;

    let verdict = state
        .ai
        .check_content(&format!("{}: {}", body.title, body.content))
        .await;
    if !verdict.is_appropriate {
        return Err(ApiError::ContentRejected {
            field: "content".into(),
            reason: verdict
                .reason
                .unwrap_or_else(|| "This announcement was flagged as inappropriate.".into()),
        });
    }

    let updated = body.id.is_some();
    let row = ContentService::save_announcement(&state.db, &body).await?;
    ADMIN_ACTIONS_COUNTER
        .with_label_values(&["save_announcement", "success"])
        .inc();
    Ok(Json(json!({
        "type": "success",
        "message": format!("Announcement {} successfully!", if updated { "updated" } else { "added" }),
        "data": row,
    })))
}

pub async fn delete_announcement(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    ContentService::delete_announcement(&state.db, id).await?;
    ADMIN_ACTIONS_COUNTER
        .with_label_values(&["delete_announcement", "success"])
        .inc();
    Ok(Json(json!({ "type": "success", "message": "Announcement deleted." })))
}
