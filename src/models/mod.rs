pub mod announcement;
pub mod bible_verse;
pub mod content;
pub mod event;
pub mod hymn;
pub mod live;
