//! Singleton documents: welcome message, what's-next, closing message.
//! Each lives in its own one-row table keyed 'main' and is upserted,
//! never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row key used by every singleton table.
pub const SINGLETON_ID: &str = "main";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WelcomeMessage {
    pub id: String,
    pub message: String,
    pub subtitle: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WhatsNext {
    pub id: String,
    pub message: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ClosingMessage {
    pub id: String,
    pub message: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateWelcomeRequest {
    pub message: String,
    pub subtitle: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMessageRequest {
    pub message: String,
}
