pub mod ai;
pub mod content;
pub mod display;
pub mod live;
pub mod metrics;
pub mod seed;
