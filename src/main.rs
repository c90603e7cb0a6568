use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use redis::Client as RedisClient;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parish_screen_api::{config::Config, db, routes, services::ai::AiService, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let config = Arc::new(config);

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;
    info!("Database connected and migrations applied");

    let redis_client = RedisClient::open(config.redis_url.as_str())?;
    let redis_conn = redis_client.get_multiplexed_async_connection().await?;
    info!("Redis connected");

    let ai = Arc::new(AiService::new(&config));
    if config.gemini_api_key.is_some() {
        info!("Gemini configured — content filter and verse lookup enabled");
    } else {
        info!("Gemini not configured — content filter skipped, verse lookup disabled");
    }

    let state = AppState {
        db: pool,
        redis: redis_conn,
        redis_client: redis_client.clone(),
        config: config.clone(),
        ai,
    };

    // CORS: the admin UI origin plus localhost for development.
    let base_url = config.app_base_url.clone();
    let cors_origin = AllowOrigin::predicate(move |origin: &HeaderValue, _| {
        let o = match origin.to_str() {
            Ok(s) => s,
            Err(_) => return false,
        };
        if o.starts_with("http://localhost") || o.starts_with("http://127.0.0.1") {
            return true;
        }
        o == base_url
    });

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]))
        .allow_origin(cors_origin);

    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::metrics_handler))
        // Singleton content
        .route("/content/welcome", get(routes::content::get_welcome).put(routes::content::update_welcome))
        .route("/content/whats-next", get(routes::content::get_whats_next).put(routes::content::update_whats_next))
        .route("/content/closing", get(routes::content::get_closing).put(routes::content::update_closing))
        // Collections
        .route("/announcements", get(routes::announcements::list_announcements).post(routes::announcements::save_announcement))
        .route("/announcements/{id}", delete(routes::announcements::delete_announcement))
        .route("/events", get(routes::events::list_events).post(routes::events::save_event))
        .route("/events/{id}", delete(routes::events::delete_event))
        .route("/hymns", get(routes::hymns::list_hymns).post(routes::hymns::save_hymn))
        .route("/hymns/{id}", delete(routes::hymns::delete_hymn))
        .route("/bible-verses", get(routes::bible_verses::list_bible_verses).post(routes::bible_verses::save_bible_verse))
        .route("/bible-verses/{id}", delete(routes::bible_verses::delete_bible_verse))
        // Live pointer
        .route("/live/current", get(routes::live::get_current))
        .route("/live/display", post(routes::live::set_live_display))
        .route("/live/advance", post(routes::live::advance))
        .route("/live/stop", post(routes::live::stop_live_display))
        // Display clients
        .route("/display", get(routes::display::get_display))
        .route("/ws", get(routes::websocket::ws_handler))
        // Verse lookup + seed
        .route("/verse/lookup", post(routes::verse::lookup_verse))
        .route("/seed", post(routes::seed::seed_database))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("parish-screen API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
