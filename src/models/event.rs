use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    /// ISO date, YYYY-MM-DD
    pub date: String,
    /// HH:MM
    pub time: String,
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct SaveEventRequest {
    pub id: Option<Uuid>,
    pub name: String,
    pub date: String,
    pub time: String,
    pub location: String,
}
