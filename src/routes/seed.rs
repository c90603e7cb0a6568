use axum::{extract::State, Json};
use redis::AsyncCommands;
use serde_json::{json, Value};

use crate::{
    errors::ApiError,
    services::{live::{LiveService, LIVE_CHANNEL}, seed},
    AppState,
};

/// POST /seed — load the sample parish content. Resets the live pointer, so
/// connected screens are told to fall back to the rotation.
pub async fn seed_database(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    seed::seed_all(&state.db).await.map_err(ApiError::Internal)?;

    let live = LiveService::get(&state.db).await?;
    if let Ok(payload) = serde_json::to_string(&live) {
        let mut redis = state.redis.clone();
        if let Err(e) = redis.publish::<_, _, ()>(LIVE_CHANNEL, payload).await {
            tracing::warn!("failed to publish live reset after seed: {e}");
        }
    }

    Ok(Json(json!({
        "type": "success",
        "message": "Database seeded with sample content.",
    })))
}
