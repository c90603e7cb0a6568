use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BibleVerse {
    pub id: Uuid,
    pub reference: String,
    /// One entry per display-ready fragment (one verse of a range, or a
    /// short phrase of a single verse).
    #[sqlx(rename = "text_parts")]
    pub text: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveBibleVerseRequest {
    pub id: Option<Uuid>,
    pub reference: String,
    pub text: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerseLookupRequest {
    pub reference: String,
}
