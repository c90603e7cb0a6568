//! Admin control surface for the live pointer. Every committed transition is
//! published on the Redis live channel; a failed write publishes nothing and
//! surfaces the error to the caller.

use axum::{extract::State, Json};
use redis::AsyncCommands;
use serde_json::{json, Value};

use crate::{
    errors::ApiError,
    models::live::{AdvanceRequest, LiveDisplay, SetLiveDisplayRequest},
    services::{
        live::{LiveService, LIVE_CHANNEL},
        metrics::LIVE_TRANSITIONS_COUNTER,
    },
    AppState,
};

pub async fn get_current(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let live = LiveService::get(&state.db).await?;
    Ok(Json(live_json(&live)))
}

pub async fn set_live_display(
    State(state): State<AppState>,
    Json(body): Json<SetLiveDisplayRequest>,
) -> Result<Json<Value>, ApiError> {
    let live = LiveService::display(&state.db, &body).await?;
    publish(&state, &live).await;
    LIVE_TRANSITIONS_COUNTER.with_label_values(&["display"]).inc();
    Ok(Json(json!({
        "type": "success",
        "message": "Display sent.",
        "data": live_json(&live),
    })))
}

pub async fn advance(
    State(state): State<AppState>,
    Json(body): Json<AdvanceRequest>,
) -> Result<Json<Value>, ApiError> {
    let live = LiveService::advance(&state.db, body.direction).await?;
    publish(&state, &live).await;
    LIVE_TRANSITIONS_COUNTER.with_label_values(&["advance"]).inc();
    Ok(Json(json!({
        "type": "success",
        "message": format!("Now showing part {}.", live.part_index.unwrap_or(0) + 1),
        "data": live_json(&live),
    })))
}

pub async fn stop_live_display(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let live = LiveService::stop(&state.db).await?;
    publish(&state, &live).await;
    LIVE_TRANSITIONS_COUNTER.with_label_values(&["stop"]).inc();
    Ok(Json(json!({
        "type": "success",
        "message": "Display stopped.",
        "data": live_json(&live),
    })))
}

fn live_json(live: &LiveDisplay) -> Value {
    let mut value = serde_json::to_value(live).unwrap_or(Value::Null);
    if let Value::Object(map) = &mut value {
        map.insert("key".into(), Value::String(live.key()));
    }
    value
}

/// Fan the committed pointer state out to display clients. Publish failures
/// only degrade freshness — clients re-sync on reconnect — so they are
/// logged, not surfaced.
async fn publish(state: &AppState, live: &LiveDisplay) {
    let payload = match serde_json::to_string(live) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!("failed to serialize live state: {e}");
            return;
        }
    };
    let mut redis = state.redis.clone();
    if let Err(e) = redis.publish::<_, _, ()>(LIVE_CHANNEL, payload).await {
        tracing::warn!("failed to publish live update: {e}");
    }
}
