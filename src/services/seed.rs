//! Sample parish content, loaded by `POST /seed` and the `seed` binary.
//! Clears the collections, upserts the singletons and resets the live
//! pointer, so reseeding always lands in the same state.

use sqlx::PgPool;
use uuid::Uuid;

use crate::services::content::ContentService;
use crate::services::live::LiveService;

pub async fn seed_all(pool: &PgPool) -> anyhow::Result<()> {
    for table in ["announcements", "events", "hymns", "bible_verses"] {
        sqlx::query(&format!("DELETE FROM {table}")).execute(pool).await?;
    }

    ContentService::upsert_welcome(
        pool,
        "Welcome To Church",
        Some("We Are Glad To Have You Here"),
    )
    .await?;
    ContentService::upsert_whats_next(pool, "Up next: Sermon by Pastor John").await?;
    ContentService::upsert_closing(pool, "Service has ended. God bless!").await?;

    let announcements = [
        ("Sunday Service", "Join us for our weekly Sunday service at 10:00 AM."),
        ("Bake Sale", "Support our youth group by buying some delicious baked goods after the service."),
    ];
    for (title, content) in announcements {
        sqlx::query("INSERT INTO announcements (id, title, content) VALUES ($1, $2, $3)")
            .bind(Uuid::new_v4())
            .bind(title)
            .bind(content)
            .execute(pool)
            .await?;
    }

    let events = [
        ("Youth Group Meeting", "2024-08-15", "18:00", "Parish Hall"),
        ("Charity Drive", "2024-08-20", "09:00", "Church Parking Lot"),
    ];
    for (name, date, time, location) in events {
        sqlx::query("INSERT INTO events (id, name, date, time, location) VALUES ($1, $2, $3, $4, $5)")
            .bind(Uuid::new_v4())
            .bind(name)
            .bind(date)
            .bind(time)
            .bind(location)
            .execute(pool)
            .await?;
    }

    let hymns: [(&str, &[&str]); 2] = [
        (
            "Amazing Grace",
            &[
                "Amazing grace! How sweet the sound,",
                "That saved a wretch like me.",
            ],
        ),
        (
            "How Great Thou Art",
            &[
                "O Lord my God, when I in awesome wonder,",
                "Consider all the worlds Thy Hands have made;",
            ],
        ),
    ];
    for (title, lyrics) in hymns {
        let lyrics: Vec<String> = lyrics.iter().map(|s| s.to_string()).collect();
        sqlx::query("INSERT INTO hymns (id, title, lyrics) VALUES ($1, $2, $3)")
            .bind(Uuid::new_v4())
            .bind(title)
            .bind(&lyrics)
            .execute(pool)
            .await?;
    }

    let verse_text = vec![
        "For God so loved the world, that he gave his only Son, that whoever believes in him should not perish but have eternal life.".to_string(),
    ];
    sqlx::query("INSERT INTO bible_verses (id, reference, text_parts) VALUES ($1, $2, $3)")
        .bind(Uuid::new_v4())
        .bind("John 3:16")
        .bind(&verse_text)
        .execute(pool)
        .await?;

    LiveService::stop(pool).await?;

    tracing::info!("Seeded sample parish content");
    Ok(())
}
