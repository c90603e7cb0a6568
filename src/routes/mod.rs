pub mod announcements;
pub mod bible_verses;
pub mod content;
pub mod display;
pub mod events;
pub mod health;
pub mod hymns;
pub mod live;
pub mod metrics;
pub mod seed;
pub mod verse;
pub mod websocket;
