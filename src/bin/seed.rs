//! Seed script — loads the sample parish content set:
//! - Welcome message + subtitle
//! - 2 announcements, 2 events
//! - 2 hymns (multi-verse), 1 bible verse
//! - What's-next and closing messages
//! - Live pointer reset to 'none'
//!
//! Usage:
//!   DATABASE_URL=... ./seed

use anyhow::{Context, Result};
use std::env;

use parish_screen_api::{db, services::seed::seed_all};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL required")?;

    println!("=== Seed Parish Content ===");

    let pool = db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    seed_all(&pool).await.context("Failed to seed content")?;

    println!("Done.");
    Ok(())
}
