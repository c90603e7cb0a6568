//! The live pointer: which content item is currently on air.
//!
//! `LiveItemType` is the one tagged union every write site and the display
//! resolver match on exhaustively — the type strings are the original
//! kebab-case names and are what goes over the wire and into the store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LiveItemType {
    Welcome,
    Announcements,
    Events,
    Hymn,
    BibleVerse,
    WhatsNext,
    Closing,
    None,
}

impl LiveItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiveItemType::Welcome => "welcome",
            LiveItemType::Announcements => "announcements",
            LiveItemType::Events => "events",
            LiveItemType::Hymn => "hymn",
            LiveItemType::BibleVerse => "bible-verse",
            LiveItemType::WhatsNext => "whats-next",
            LiveItemType::Closing => "closing",
            LiveItemType::None => "none",
        }
    }
}

impl fmt::Display for LiveItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LiveItemType {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "welcome" => LiveItemType::Welcome,
            "announcements" => LiveItemType::Announcements,
            "events" => LiveItemType::Events,
            "hymn" => LiveItemType::Hymn,
            "bible-verse" => LiveItemType::BibleVerse,
            "whats-next" => LiveItemType::WhatsNext,
            "closing" => LiveItemType::Closing,
            "none" => LiveItemType::None,
            other => {
                return Err(ApiError::InvalidState(format!(
                    "Unknown live item type: {other}"
                )))
            }
        })
    }
}

/// Current state of the live pointer. Exactly one exists; `item_type = None`
/// means "no override, show the default rotation".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveDisplay {
    pub item_type: LiveItemType,
    pub item_id: Option<Uuid>,
    /// The shown item, denormalized at display time.
    pub snapshot: Option<serde_json::Value>,
    /// Meaningful only for multi-part hymn/bible-verse content;
    /// always `0 <= part_index < part_count`.
    pub part_index: Option<i32>,
    pub part_count: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

impl LiveDisplay {
    /// Composite render key. Two pushes with the same key render identically,
    /// so a duplicated or replayed push is a visual no-op.
    pub fn key(&self) -> String {
        match self.item_type {
            LiveItemType::None => "none".to_string(),
            ty => format!(
                "{}:{}:{}",
                ty,
                self.item_id.map(|id| id.to_string()).unwrap_or_default(),
                self.part_index.unwrap_or(0)
            ),
        }
    }

    pub fn is_multi_part(&self) -> bool {
        self.part_count.map(|n| n >= 2).unwrap_or(false)
    }
}

/// Raw live row as stored; converted at the service edge so the rest of the
/// code only ever sees the typed enum.
#[derive(Debug, FromRow)]
pub struct LiveDisplayRow {
    pub item_type: String,
    pub item_id: Option<Uuid>,
    pub snapshot: Option<serde_json::Value>,
    pub part_index: Option<i32>,
    pub part_count: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<LiveDisplayRow> for LiveDisplay {
    type Error = ApiError;

    fn try_from(row: LiveDisplayRow) -> Result<Self, Self::Error> {
        Ok(LiveDisplay {
            item_type: row.item_type.parse()?,
            item_id: row.item_id,
            snapshot: row.snapshot,
            part_index: row.part_index,
            part_count: row.part_count,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    #[serde(alias = "prev")]
    Previous,
}

#[derive(Debug, Deserialize)]
pub struct SetLiveDisplayRequest {
    #[serde(rename = "type")]
    pub item_type: LiveItemType,
    pub id: Option<Uuid>,
    pub part_index: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct AdvanceRequest {
    pub direction: Direction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_strings_round_trip() {
        let all = [
            LiveItemType::Welcome,
            LiveItemType::Announcements,
            LiveItemType::Events,
            LiveItemType::Hymn,
            LiveItemType::BibleVerse,
            LiveItemType::WhatsNext,
            LiveItemType::Closing,
            LiveItemType::None,
        ];
        for ty in all {
            assert_eq!(ty.as_str().parse::<LiveItemType>().unwrap(), ty);
        }
        // Serde uses the same kebab-case names as the store.
        assert_eq!(
            serde_json::to_string(&LiveItemType::BibleVerse).unwrap(),
            "\"bible-verse\""
        );
        assert_eq!(
            serde_json::to_string(&LiveItemType::WhatsNext).unwrap(),
            "\"whats-next\""
        );
    }

    #[test]
    fn render_key_is_composite_of_type_ref_and_part() {
        let id = Uuid::new_v4();
        let live = LiveDisplay {
            item_type: LiveItemType::Hymn,
            item_id: Some(id),
            snapshot: None,
            part_index: Some(1),
            part_count: Some(3),
            updated_at: Utc::now(),
        };
        assert_eq!(live.key(), format!("hymn:{id}:1"));

        let stopped = LiveDisplay {
            item_type: LiveItemType::None,
            item_id: None,
            snapshot: None,
            part_index: None,
            part_count: None,
            updated_at: Utc::now(),
        };
        assert_eq!(stopped.key(), "none");
    }

    #[test]
    fn direction_accepts_original_prev_alias() {
        let d: Direction = serde_json::from_str("\"prev\"").unwrap();
        assert_eq!(d, Direction::Previous);
        let d: Direction = serde_json::from_str("\"previous\"").unwrap();
        assert_eq!(d, Direction::Previous);
    }
}
