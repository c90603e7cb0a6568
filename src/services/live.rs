//! Live pointer protocol: display / advance / stop over the single
//! `live_display` row, with Redis fan-out to subscribed display clients.
//!
//! Writes are plain single-row updates — last write wins across concurrent
//! admins, per-write atomicity is the correctness bar. `advance` computes the
//! new part index from the row itself under a row lock, so rapid successive
//! advances can never wrap from a stale base.

use sqlx::PgPool;

use crate::errors::ApiError;
use crate::models::live::{Direction, LiveDisplay, LiveDisplayRow, LiveItemType, SetLiveDisplayRequest};
use crate::services::content::ContentService;

/// Redis pub/sub channel carrying every committed pointer state, in commit order.
pub const LIVE_CHANNEL: &str = "live:current";

const LIVE_COLS: &str = "item_type, item_id, snapshot, part_index, part_count, updated_at";

/// Wrapping part-index step. `count` must be >= 1.
pub fn next_part_index(current: i32, count: i32, direction: Direction) -> i32 {
    match direction {
        Direction::Next => (current + 1).rem_euclid(count),
        Direction::Previous => (current - 1).rem_euclid(count),
    }
}

/// Starting index for a newly displayed item, wrapped into range. A row whose
/// parts array is empty (possible only through out-of-band writes, validation
/// requires at least one part) carries no index at all.
pub fn initial_part_index(requested: Option<i32>, part_count: i32) -> Option<i32> {
    if part_count < 1 {
        return None;
    }
    Some(requested.unwrap_or(0).rem_euclid(part_count))
}

pub struct LiveService;

impl LiveService {
    pub async fn get(pool: &PgPool) -> Result<LiveDisplay, ApiError> {
        let row = sqlx::query_as::<_, LiveDisplayRow>(&format!(
            "SELECT {LIVE_COLS} FROM live_display WHERE id = 'current'"
        ))
        .fetch_one(pool)
        .await?;
        row.try_into()
    }

    /// Point the display at an item. The item is resolved now and denormalized
    /// into the row so display clients never need a second fetch. Repeating
    /// the same call leaves the same observable state.
    pub async fn display(pool: &PgPool, req: &SetLiveDisplayRequest) -> Result<LiveDisplay, ApiError> {
        let (snapshot, part_count) = Self::resolve_snapshot(pool, req).await?;

        let part_index = part_count.and_then(|n| initial_part_index(req.part_index, n));

        let row = sqlx::query_as::<_, LiveDisplayRow>(&format!(
            "UPDATE live_display
             SET item_type = $1, item_id = $2, snapshot = $3,
                 part_index = $4, part_count = $5, updated_at = NOW()
             WHERE id = 'current'
             RETURNING {LIVE_COLS}"
        ))
        .bind(req.item_type.as_str())
        .bind(req.id)
        .bind(&snapshot)
        .bind(part_index)
        .bind(part_count)
        .fetch_one(pool)
        .await?;
        row.try_into()
    }

    /// Step the part index of the live multi-part item, wrapping modulo the
    /// part count. Rejected with `InvalidState` when nothing is live or the
    /// live item has no multiple parts — no write happens in that case.
    pub async fn advance(pool: &PgPool, direction: Direction) -> Result<LiveDisplay, ApiError> {
        let mut tx = pool.begin().await.map_err(anyhow::Error::from)?;

        let row = sqlx::query_as::<_, LiveDisplayRow>(&format!(
            "SELECT {LIVE_COLS} FROM live_display WHERE id = 'current' FOR UPDATE"
        ))
        .fetch_one(&mut *tx)
        .await?;
        let live: LiveDisplay = row.try_into()?;

        if live.item_type == LiveItemType::None {
            return Err(ApiError::InvalidState(
                "Nothing is currently live.".into(),
            ));
        }
        let (Some(index), Some(count)) = (live.part_index, live.part_count) else {
            return Err(ApiError::InvalidState(
                "The live item has no parts to advance.".into(),
            ));
        };
        if count < 2 {
            return Err(ApiError::InvalidState(
                "The live item has only one part.".into(),
            ));
        }

        let new_index = next_part_index(index, count, direction);

        let row = sqlx::query_as::<_, LiveDisplayRow>(&format!(
            "UPDATE live_display SET part_index = $1, updated_at = NOW()
             WHERE id = 'current'
             RETURNING {LIVE_COLS}"
        ))
        .bind(new_index)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await.map_err(anyhow::Error::from)?;
        row.try_into()
    }

    /// Clear the pointer; display clients fall back to the default rotation.
    pub async fn stop(pool: &PgPool) -> Result<LiveDisplay, ApiError> {
        let row = sqlx::query_as::<_, LiveDisplayRow>(&format!(
            "UPDATE live_display
             SET item_type = 'none', item_id = NULL, snapshot = NULL,
                 part_index = NULL, part_count = NULL, updated_at = NOW()
             WHERE id = 'current'
             RETURNING {LIVE_COLS}"
        ))
        .fetch_one(pool)
        .await?;
        row.try_into()
    }

    /// Denormalize the referenced item. Multi-part types also report their
    /// part count; everything else carries no index.
    async fn resolve_snapshot(
        pool: &PgPool,
        req: &SetLiveDisplayRequest,
    ) -> Result<(Option<serde_json::Value>, Option<i32>), ApiError> {
        match req.item_type {
            LiveItemType::None => Err(ApiError::InvalidState(
                "Use stop to clear the display.".into(),
            )),
            LiveItemType::Welcome => {
                let welcome = ContentService::get_welcome(pool)
                    .await?
                    .ok_or_else(|| ApiError::NotFound("Welcome message".into()))?;
                Ok((Some(serde_json::to_value(welcome).map_err(anyhow::Error::from)?), None))
            }
            LiveItemType::Announcements => {
                let list = ContentService::list_announcements(pool).await?;
                Ok((Some(serde_json::to_value(list).map_err(anyhow::Error::from)?), None))
            }
            LiveItemType::Events => {
                let list = ContentService::list_events(pool).await?;
                Ok((Some(serde_json::to_value(list).map_err(anyhow::Error::from)?), None))
            }
            LiveItemType::Hymn => {
                let id = req.id.ok_or_else(|| {
                    ApiError::InvalidState("A hymn id is required.".into())
                })?;
                let hymn = ContentService::get_hymn(pool, id).await?;
                let count = hymn.lyrics.len() as i32;
                Ok((Some(serde_json::to_value(hymn).map_err(anyhow::Error::from)?), Some(count)))
            }
            LiveItemType::BibleVerse => {
                let id = req.id.ok_or_else(|| {
                    ApiError::InvalidState("A bible verse id is required.".into())
                })?;
                let verse = ContentService::get_bible_verse(pool, id).await?;
                let count = verse.text.len() as i32;
                Ok((Some(serde_json::to_value(verse).map_err(anyhow::Error::from)?), Some(count)))
            }
            LiveItemType::WhatsNext => {
                let next = ContentService::get_whats_next(pool)
                    .await?
                    .ok_or_else(|| ApiError::NotFound("What's next message".into()))?;
                Ok((Some(serde_json::to_value(next).map_err(anyhow::Error::from)?), None))
            }
            LiveItemType::Closing => {
                let closing = ContentService::get_closing(pool)
                    .await?
                    .ok_or_else(|| ApiError::NotFound("Closing message".into()))?;
                Ok((Some(serde_json::to_value(closing).map_err(anyhow::Error::from)?), None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advancing_part_count_times_returns_to_start() {
        for count in [2, 3, 5] {
            let mut index = 0;
            for _ in 0..count {
                index = next_part_index(index, count, Direction::Next);
            }
            assert_eq!(index, 0, "cyclic law failed for count {count}");
        }
    }

    #[test]
    fn previous_is_the_inverse_of_next() {
        for count in [2, 3, 7] {
            for start in 0..count {
                let forward = next_part_index(start, count, Direction::Next);
                assert_eq!(next_part_index(forward, count, Direction::Previous), start);
            }
        }
    }

    #[test]
    fn two_verse_hymn_wraps_after_two_advances() {
        // display('hymn') then advance('next') twice on a 2-verse hymn: 0 → 1 → 0
        let first = next_part_index(0, 2, Direction::Next);
        assert_eq!(first, 1);
        assert_eq!(next_part_index(first, 2, Direction::Next), 0);
    }

    #[test]
    fn previous_from_zero_wraps_to_last() {
        assert_eq!(next_part_index(0, 4, Direction::Previous), 3);
    }

    #[test]
    fn initial_index_wraps_into_range() {
        assert_eq!(initial_part_index(None, 3), Some(0));
        assert_eq!(initial_part_index(Some(1), 3), Some(1));
        assert_eq!(initial_part_index(Some(5), 3), Some(2));
        assert_eq!(initial_part_index(Some(-1), 3), Some(2));
    }

    #[test]
    fn empty_parts_array_yields_no_index() {
        // Reachable only via out-of-band writes; must degrade, not panic.
        assert_eq!(initial_part_index(None, 0), None);
        assert_eq!(initial_part_index(Some(2), 0), None);
    }
}
