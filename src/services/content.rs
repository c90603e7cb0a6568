use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::models::announcement::{Announcement, SaveAnnouncementRequest};
use crate::models::bible_verse::{BibleVerse, SaveBibleVerseRequest};
use crate::models::content::{ClosingMessage, WelcomeMessage, WhatsNext, SINGLETON_ID};
use crate::models::event::{Event, SaveEventRequest};
use crate::models::hymn::{Hymn, SaveHymnRequest};
use crate::services::display::ContentBundle;

const VERSE_COLS: &str = "id, reference, text_parts";

pub struct ContentService;

impl ContentService {
    // ── Singletons ──────────────────────────────────────────────────────────

    pub async fn get_welcome(pool: &PgPool) -> Result<Option<WelcomeMessage>, ApiError> {
        let row = sqlx::query_as::<_, WelcomeMessage>(
            "SELECT * FROM welcome_message WHERE id = $1",
        )
        .bind(SINGLETON_ID)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub async fn upsert_welcome(
        pool: &PgPool,
        message: &str,
        subtitle: Option<&str>,
    ) -> Result<WelcomeMessage, ApiError> {
        let row = sqlx::query_as::<_, WelcomeMessage>(
            "INSERT INTO welcome_message (id, message, subtitle, updated_at)
             VALUES ($1, $2, $3, NOW())
             ON CONFLICT (id) DO UPDATE
                 SET message = EXCLUDED.message,
                     subtitle = EXCLUDED.subtitle,
                     updated_at = NOW()
             RETURNING *",
        )
        .bind(SINGLETON_ID)
        .bind(message)
        .bind(subtitle)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn get_whats_next(pool: &PgPool) -> Result<Option<WhatsNext>, ApiError> {
        let row = sqlx::query_as::<_, WhatsNext>("SELECT * FROM whats_next WHERE id = $1")
            .bind(SINGLETON_ID)
            .fetch_optional(pool)
            .await?;
        Ok(row)
    }

    pub async fn upsert_whats_next(pool: &PgPool, message: &str) -> Result<WhatsNext, ApiError> {
        let row = sqlx::query_as::<_, WhatsNext>(
            "INSERT INTO whats_next (id, message, updated_at)
             VALUES ($1, $2, NOW())
             ON CONFLICT (id) DO UPDATE
                 SET message = EXCLUDED.message, updated_at = NOW()
             RETURNING *",
        )
        .bind(SINGLETON_ID)
        .bind(message)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn get_closing(pool: &PgPool) -> Result<Option<ClosingMessage>, ApiError> {
        let row = sqlx::query_as::<_, ClosingMessage>(
            "SELECT * FROM closing_message WHERE id = $1",
        )
        .bind(SINGLETON_ID)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub async fn upsert_closing(pool: &PgPool, message: &str) -> Result<ClosingMessage, ApiError> {
        let row = sqlx::query_as::<_, ClosingMessage>(
            "INSERT INTO closing_message (id, message, updated_at)
             VALUES ($1, $2, NOW())
             ON CONFLICT (id) DO UPDATE
                 SET message = EXCLUDED.message, updated_at = NOW()
             RETURNING *",
        )
        .bind(SINGLETON_ID)
        .bind(message)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    // ── Announcements ───────────────────────────────────────────────────────

    pub async fn list_announcements(pool: &PgPool) -> Result<Vec<Announcement>, ApiError> {
        let rows = sqlx::query_as::<_, Announcement>(
            "SELECT * FROM announcements ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn save_announcement(
        pool: &PgPool,
        req: &SaveAnnouncementRequest,
    ) -> Result<Announcement, ApiError> {
        let row = match req.id {
            Some(id) => sqlx::query_as::<_, Announcement>(
                "UPDATE announcements SET title = $2, content = $3 WHERE id = $1 RETURNING *",
            )
            .bind(id)
            .bind(&req.title)
            .bind(&req.content)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("Announcement".into()))?,
            None => sqlx::query_as::<_, Announcement>(
                "INSERT INTO announcements (id, title, content) VALUES ($1, $2, $3) RETURNING *",
            )
            .bind(Uuid::new_v4())
            .bind(&req.title)
            .bind(&req.content)
            .fetch_one(pool)
            .await?,
        };
        Ok(row)
    }

    pub async fn delete_announcement(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Announcement".into()));
        }
        Ok(())
    }

    // ── Events ──────────────────────────────────────────────────────────────

    pub async fn list_events(pool: &PgPool) -> Result<Vec<Event>, ApiError> {
        let rows = sqlx::query_as::<_, Event>("SELECT * FROM events ORDER BY date ASC, time ASC")
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn save_event(pool: &PgPool, req: &SaveEventRequest) -> Result<Event, ApiError> {
        let row = match req.id {
            Some(id) => sqlx::query_as::<_, Event>(
                "UPDATE events SET name = $2, date = $3, time = $4, location = $5
                 WHERE id = $1 RETURNING *",
            )
            .bind(id)
            .bind(&req.name)
            .bind(&req.date)
            .bind(&req.time)
            .bind(&req.location)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("Event".into()))?,
            None => sqlx::query_as::<_, Event>(
                "INSERT INTO events (id, name, date, time, location)
                 VALUES ($1, $2, $3, $4, $5) RETURNING *",
            )
            .bind(Uuid::new_v4())
            .bind(&req.name)
            .bind(&req.date)
            .bind(&req.time)
            .bind(&req.location)
            .fetch_one(pool)
            .await?,
        };
        Ok(row)
    }

    pub async fn delete_event(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Event".into()));
        }
        Ok(())
    }

    // ── Hymns ───────────────────────────────────────────────────────────────

    pub async fn list_hymns(pool: &PgPool) -> Result<Vec<Hymn>, ApiError> {
        let rows = sqlx::query_as::<_, Hymn>("SELECT * FROM hymns ORDER BY title ASC")
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn get_hymn(pool: &PgPool, id: Uuid) -> Result<Hymn, ApiError> {
        sqlx::query_as::<_, Hymn>("SELECT * FROM hymns WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("Hymn".into()))
    }

    pub async fn save_hymn(pool: &PgPool, req: &SaveHymnRequest) -> Result<Hymn, ApiError> {
        let row = match req.id {
            Some(id) => sqlx::query_as::<_, Hymn>(
                "UPDATE hymns SET title = $2, lyrics = $3 WHERE id = $1 RETURNING *",
            )
            .bind(id)
            .bind(&req.title)
            .bind(&req.lyrics)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("Hymn".into()))?,
            None => sqlx::query_as::<_, Hymn>(
                "INSERT INTO hymns (id, title, lyrics) VALUES ($1, $2, $3) RETURNING *",
            )
            .bind(Uuid::new_v4())
            .bind(&req.title)
            .bind(&req.lyrics)
            .fetch_one(pool)
            .await?,
        };
        Ok(row)
    }

    pub async fn delete_hymn(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM hymns WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Hymn".into()));
        }
        Ok(())
    }

    // ── Bible verses ────────────────────────────────────────────────────────

    pub async fn list_bible_verses(pool: &PgPool) -> Result<Vec<BibleVerse>, ApiError> {
        let rows = sqlx::query_as::<_, BibleVerse>(&format!(
            "SELECT {VERSE_COLS} FROM bible_verses ORDER BY reference ASC"
        ))
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_bible_verse(pool: &PgPool, id: Uuid) -> Result<BibleVerse, ApiError> {
        sqlx::query_as::<_, BibleVerse>(&format!(
            "SELECT {VERSE_COLS} FROM bible_verses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Bible verse".into()))
    }

    pub async fn save_bible_verse(
        pool: &PgPool,
        req: &SaveBibleVerseRequest,
    ) -> Result<BibleVerse, ApiError> {
        let row = match req.id {
            Some(id) => sqlx::query_as::<_, BibleVerse>(&format!(
                "UPDATE bible_verses SET reference = $2, text_parts = $3
                 WHERE id = $1 RETURNING {VERSE_COLS}"
            ))
            .bind(id)
            .bind(&req.reference)
            .bind(&req.text)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("Bible verse".into()))?,
            None => sqlx::query_as::<_, BibleVerse>(&format!(
                "INSERT INTO bible_verses (id, reference, text_parts)
                 VALUES ($1, $2, $3) RETURNING {VERSE_COLS}"
            ))
            .bind(Uuid::new_v4())
            .bind(&req.reference)
            .bind(&req.text)
            .fetch_one(pool)
            .await?,
        };
        Ok(row)
    }

    pub async fn delete_bible_verse(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM bible_verses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Bible verse".into()));
        }
        Ok(())
    }

    /// Everything the display needs in one fetch.
    pub async fn bundle(pool: &PgPool) -> Result<ContentBundle, ApiError> {
        Ok(ContentBundle {
            welcome: Self::get_welcome(pool).await?,
            announcements: Self::list_announcements(pool).await?,
            events: Self::list_events(pool).await?,
            hymns: Self::list_hymns(pool).await?,
            bible_verses: Self::list_bible_verses(pool).await?,
            whats_next: Self::get_whats_next(pool).await?,
            closing: Self::get_closing(pool).await?,
        })
    }
}
