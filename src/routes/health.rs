use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

/// GET /health — a display deployment is only healthy when both the content
/// store and the Redis fan-out channel are reachable; a screen connected to
/// an instance without Redis would never hear live transitions.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let db = sqlx::query("SELECT 1")
        .execute(&state.db)
        .await
        .map(|_| ())
        .map_err(|e| e.to_string());

    let mut redis = state.redis.clone();
    let pubsub = redis::cmd("PING")
        .query_async::<String>(&mut redis)
        .await
        .map(|_| ())
        .map_err(|e| e.to_string());

    health_response(db, pubsub)
}

fn health_response(
    db: Result<(), String>,
    pubsub: Result<(), String>,
) -> (StatusCode, Json<Value>) {
    let status = if db.is_ok() && pubsub.is_ok() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let component = |r: &Result<(), String>| match r {
        Ok(()) => Value::String("connected".into()),
        Err(e) => Value::String(e.clone()),
    };
    let body = json!({
        "status": if status == StatusCode::OK { "ok" } else { "error" },
        "db": component(&db),
        "pubsub": component(&pubsub),
    });
    (status, Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn healthy_only_when_both_store_and_fanout_are_up() {
        let (status, body) = health_response(Ok(()), Ok(()));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.0["status"], "ok");
        assert_eq!(body.0["pubsub"], "connected");
    }

    #[test]
    fn unreachable_fanout_is_not_reported_healthy() {
        let (status, body) = health_response(Ok(()), Err("connection refused".into()));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.0["status"], "error");
        assert_eq!(body.0["db"], "connected");
        assert_eq!(body.0["pubsub"], "connection refused");
    }

    #[test]
    fn unreachable_store_is_not_reported_healthy() {
        let (status, body) = health_response(Err("pool timed out".into()), Ok(()));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.0["db"], "pool timed out");
    }
}
