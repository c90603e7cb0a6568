//! Display-client subscription. Each connected screen holds one Redis
//! pub/sub subscription to the live channel; pointer states arrive in commit
//! order and each carries its render key, so a duplicated push renders as a
//! no-op. Dropping the socket drops the subscription.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    models::live::LiveDisplay,
    services::{live::{LiveService, LIVE_CHANNEL}, metrics::DISPLAY_CLIENTS_GAUGE},
    AppState,
};

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| async move {
        info!("Display client connected");
        DISPLAY_CLIENTS_GAUGE.inc();
        handle_socket(socket, state).await;
        DISPLAY_CLIENTS_GAUGE.dec();
        info!("Display client disconnected");
    })
}

fn live_update_message(live: &LiveDisplay) -> String {
    json!({
        "type": "live_update",
        "key": live.key(),
        "payload": live,
    })
    .to_string()
}

/// Envelope for a channel payload, or `None` when the payload is not a
/// pointer state. Screens only understand `live_update` frames, so anything
/// else on the channel is dropped rather than relayed.
fn forwardable(payload: &str) -> Option<String> {
    match serde_json::from_str::<LiveDisplay>(payload) {
        Ok(live) => Some(live_update_message(&live)),
        Err(_) => None,
    }
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();

    // Dedicated pub/sub connection for this client.
    let mut pubsub = match state.redis_client.get_async_pubsub().await {
        Ok(c) => c,
        Err(e) => {
            error!("Redis pubsub error: {}", e);
            return;
        }
    };
    if let Err(e) = pubsub.subscribe(LIVE_CHANNEL).await {
        error!("Redis subscribe error: {}", e);
        return;
    }

    // Send the current pointer state first so a reconnecting screen never
    // shows stale content while waiting for the next transition.
    match LiveService::get(&state.db).await {
        Ok(live) => {
            if sender
                .send(Message::Text(live_update_message(&live).into()))
                .await
                .is_err()
            {
                return;
            }
        }
        Err(e) => {
            error!("Failed to load live state for new client: {}", e);
            return;
        }
    }

    // Redis Pub/Sub → WebSocket
    let mut redis_task = tokio::spawn(async move {
        let mut pubsub_stream = pubsub.on_message();
        while let Some(msg) = pubsub_stream.next().await {
            let payload: String = match msg.get_payload() {
                Ok(p) => p,
                Err(_) => continue,
            };
            let ws_msg = match forwardable(&payload) {
                Some(m) => m,
                None => {
                    warn!("Dropping malformed message on {}: {}", LIVE_CHANNEL, payload);
                    continue;
                }
            };
            if sender.send(Message::Text(ws_msg.into())).await.is_err() {
                break;
            }
        }
    });

    // Display clients are read-only subscribers; we only watch for close.
    let mut client_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Close(_) => break,
                Message::Ping(_) => {}
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = (&mut redis_task) => client_task.abort(),
        _ = (&mut client_task) => redis_task.abort(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::models::live::LiveItemType;

    #[test]
    fn pointer_states_are_wrapped_in_a_live_update_frame() {
        let live = LiveDisplay {
            item_type: LiveItemType::Hymn,
            item_id: None,
            snapshot: None,
            part_index: Some(1),
            part_count: Some(3),
            updated_at: Utc::now(),
        };
        let payload = serde_json::to_string(&live).unwrap();
        let frame = forwardable(&payload).unwrap();
        assert!(frame.contains("\"live_update\""));
        assert!(frame.contains(&live.key()));
    }

    #[test]
    fn malformed_channel_payloads_are_not_relayed() {
        assert_eq!(forwardable("not json"), None);
        assert_eq!(forwardable("{\"type\":\"bogus\"}"), None);
    }
}
