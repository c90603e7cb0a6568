//! Singleton documents: welcome message, what's-next, closing message.
//! Updates validate, screen through the content filter (fail-open), then
//! upsert — a rejected or invalid message performs no write.

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{
    errors::ApiError,
    models::content::{UpdateMessageRequest, UpdateWelcomeRequest},
    services::{content::ContentService, metrics::ADMIN_ACTIONS_COUNTER},
    validation,
    AppState,
};

pub async fn get_welcome(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let welcome = ContentService::get_welcome(&state.db).await?;
    Ok(Json(serde_json::to_value(welcome).unwrap_or(Value::Null)))
}

pub async fn update_welcome(
    State(state): State<AppState>,
    Json(body): Json<UpdateWelcomeRequest>,
) -> Result<Json<Value>, ApiError> {
    validation::validate_welcome(&body)?;

    let verdict = state.ai.check_content(&body.message).await;
    if !verdict.is_appropriate {
        return Err(ApiError::ContentRejected {
            field: "message".into(),
            reason: verdict
                .reason
                .unwrap_or_else(|| "This message was flagged as inappropriate.".into()),
        });
    }

    let welcome =
        ContentService::upsert_welcome(&state.db, &body.message, body.subtitle.as_deref()).await?;
    ADMIN_ACTIONS_COUNTER
        .with_label_values(&["update_welcome", "success"])
        .inc();
    Ok(Json(json!({
        "type": "success",
        "message": "Welcome message updated successfully!",
        "data": welcome,
    })))
}

pub async fn get_whats_next(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let next = ContentService::get_whats_next(&state.db).await?;
    Ok(Json(serde_json::to_value(next).unwrap_or(Value::Null)))
}

pub async fn update_whats_next(
    State(state): State<AppState>,
    Json(body): Json<UpdateMessageRequest>,
) -> Result<Json<Value>, ApiError> {
    validation::validate_short_message(&body)?;

    let verdict = state.ai.check_content(&body.message).await;
    if !verdict.is_appropriate {
        return Err(ApiError::ContentRejected {
            field: "message".into(),
            reason: verdict
                .reason
                .unwrap_or_else(|| "This message was flagged as inappropriate.".into()),
        });
    }

    let next = ContentService::upsert_whats_next(&state.db, &body.message).await?;
    ADMIN_ACTIONS_COUNTER
        .with_label_values(&["update_whats_next", "success"])
        .inc();
    Ok(Json(json!({
        "type": "success",
        "message": "What's next message updated successfully!",
        "data": next,
    })))
}

pub async fn get_closing(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let closing = ContentService::get_closing(&state.db).await?;
    Ok(Json(serde_json::to_value(closing).unwrap_or(Value::Null)))
}

pub async fn update_closing(
    State(state): State<AppState>,
    Json(body): Json<UpdateMessageRequest>,
) -> Result<Json<Value>, ApiError> {
    validation::validate_short_message(&body)?;

    let verdict = state.ai.check_content(&body.message).await;
    if !verdict.is_appropriate {
        return Err(ApiError::ContentRejected {
            field: "message".into(),
            reason: verdict
                .reason
                .unwrap_or_else(|| "This message was flagged as inappropriate.".into()),
        });
    }

    let closing = ContentService::upsert_closing(&state.db, &body.message).await?;
    ADMIN_ACTIONS_COUNTER
        .with_label_values(&["update_closing", "success"])
        .inc();
    Ok(Json(json!({
        "type": "success",
        "message": "Closing message updated successfully!",
        "data": closing,
    })))
}
