use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Announcement {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Save request — `id` present means update, absent means insert.
#[derive(Debug, Deserialize)]
pub struct SaveAnnouncementRequest {
    pub id: Option<Uuid>,
    pub title: String,
    pub content: String,
}
