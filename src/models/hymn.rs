use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Hymn {
    pub id: Uuid,
    pub title: String,
    /// One entry per displayable verse.
    pub lyrics: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveHymnRequest {
    pub id: Option<Uuid>,
    pub title: String,
    pub lyrics: Vec<String>,
}
