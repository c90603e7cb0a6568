//! Turn a live-pointer snapshot plus the fetched content into a renderable
//! payload. Resolution is a pure function — no I/O, no writes.

use serde::Serialize;

use crate::models::announcement::Announcement;
use crate::models::bible_verse::BibleVerse;
use crate::models::content::{ClosingMessage, WelcomeMessage, WhatsNext};
use crate::models::event::Event;
use crate::models::hymn::Hymn;
use crate::models::live::{LiveDisplay, LiveItemType};

/// Dwell per rotation slide when no admin override is active.
pub const SLIDE_DWELL_SECS: u64 = 10;
/// Dwell per hymn verse / verse fragment during auto-rotation.
pub const FRAGMENT_DWELL_SECS: u64 = 5;

/// All content the display can show, fetched in one pass.
#[derive(Debug, Clone, Default)]
pub struct ContentBundle {
    pub welcome: Option<WelcomeMessage>,
    pub announcements: Vec<Announcement>,
    pub events: Vec<Event>,
    pub hymns: Vec<Hymn>,
    pub bible_verses: Vec<BibleVerse>,
    pub whats_next: Option<WhatsNext>,
    pub closing: Option<ClosingMessage>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum Slide {
    Welcome(WelcomeMessage),
    Announcements(Vec<Announcement>),
    Events(Vec<Event>),
    Hymn(Hymn),
    BibleVerse(BibleVerse),
    WhatsNext(WhatsNext),
    Closing(ClosingMessage),
}

impl Slide {
    pub fn item_type(&self) -> LiveItemType {
        match self {
            Slide::Welcome(_) => LiveItemType::Welcome,
            Slide::Announcements(_) => LiveItemType::Announcements,
            Slide::Events(_) => LiveItemType::Events,
            Slide::Hymn(_) => LiveItemType::Hymn,
            Slide::BibleVerse(_) => LiveItemType::BibleVerse,
            Slide::WhatsNext(_) => LiveItemType::WhatsNext,
            Slide::Closing(_) => LiveItemType::Closing,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DisplayPayload {
    /// Default carousel over all non-empty content; clients cycle on the
    /// dwell times themselves.
    Rotation {
        slides: Vec<Slide>,
        dwell_secs: u64,
        fragment_dwell_secs: u64,
    },
    /// Admin override: exactly one item, autoplay suppressed. Rendering the
    /// same `key` twice must be a visual no-op.
    Live {
        slide: Slide,
        part_index: Option<i32>,
        key: String,
    },
}

/// Resolve the pointer against the bundle. A pointer whose snapshot cannot be
/// decoded (e.g. written by an older build) degrades to the rotation.
pub fn resolve(live: &LiveDisplay, bundle: &ContentBundle) -> DisplayPayload {
    if live.item_type == LiveItemType::None {
        return rotation(bundle);
    }
    match live_slide(live) {
        Some(slide) => DisplayPayload::Live {
            slide,
            part_index: live.part_index,
            key: live.key(),
        },
        None => rotation(bundle),
    }
}

fn live_slide(live: &LiveDisplay) -> Option<Slide> {
    let snapshot = live.snapshot.clone()?;
    let slide = match live.item_type {
        LiveItemType::Welcome => Slide::Welcome(serde_json::from_value(snapshot).ok()?),
        LiveItemType::Announcements => {
            Slide::Announcements(serde_json::from_value(snapshot).ok()?)
        }
        LiveItemType::Events => Slide::Events(serde_json::from_value(snapshot).ok()?),
        LiveItemType::Hymn => Slide::Hymn(serde_json::from_value(snapshot).ok()?),
        LiveItemType::BibleVerse => Slide::BibleVerse(serde_json::from_value(snapshot).ok()?),
        LiveItemType::WhatsNext => Slide::WhatsNext(serde_json::from_value(snapshot).ok()?),
        LiveItemType::Closing => Slide::Closing(serde_json::from_value(snapshot).ok()?),
        LiveItemType::None => return None,
    };
    Some(slide)
}

/// Fixed order: welcome → announcements → events → each hymn → each bible
/// verse → what's-next → closing. Empty collections and absent singletons
/// contribute no slide.
pub fn rotation(bundle: &ContentBundle) -> DisplayPayload {
    let mut slides = Vec::new();
    if let Some(welcome) = &bundle.welcome {
        slides.push(Slide::Welcome(welcome.clone()));
    }
    if !bundle.announcements.is_empty() {
        slides.push(Slide::Announcements(bundle.announcements.clone()));
    }
    if !bundle.events.is_empty() {
        slides.push(Slide::Events(bundle.events.clone()));
    }
    for hymn in &bundle.hymns {
        slides.push(Slide::Hymn(hymn.clone()));
    }
    for verse in &bundle.bible_verses {
        slides.push(Slide::BibleVerse(verse.clone()));
    }
    if let Some(next) = &bundle.whats_next {
        slides.push(Slide::WhatsNext(next.clone()));
    }
    if let Some(closing) = &bundle.closing {
        slides.push(Slide::Closing(closing.clone()));
    }
    DisplayPayload::Rotation {
        slides,
        dwell_secs: SLIDE_DWELL_SECS,
        fragment_dwell_secs: FRAGMENT_DWELL_SECS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn bundle() -> ContentBundle {
        ContentBundle {
            welcome: Some(WelcomeMessage {
                id: "main".into(),
                message: "Welcome To Church".into(),
                subtitle: Some("We Are Glad To Have You Here".into()),
                updated_at: Utc::now(),
            }),
            announcements: vec![Announcement {
                id: Uuid::new_v4(),
                title: "Bake Sale".into(),
                content: "Join us Sunday at 10am for the annual bake sale.".into(),
                created_at: Utc::now(),
            }],
            events: vec![Event {
                id: Uuid::new_v4(),
                name: "Youth Group Meeting".into(),
                date: "2024-08-15".into(),
                time: "18:00".into(),
                location: "Parish Hall".into(),
            }],
            hymns: vec![
                Hymn {
                    id: Uuid::new_v4(),
                    title: "Amazing Grace".into(),
                    lyrics: vec![
                        "Amazing grace! How sweet the sound,".into(),
                        "That saved a wretch like me.".into(),
                    ],
                },
                Hymn {
                    id: Uuid::new_v4(),
                    title: "How Great Thou Art".into(),
                    lyrics: vec!["O Lord my God, when I in awesome wonder,".into()],
                },
            ],
            bible_verses: vec![BibleVerse {
                id: Uuid::new_v4(),
                reference: "John 3:16".into(),
                text: vec!["For God so loved the world.".into()],
            }],
            whats_next: Some(WhatsNext {
                id: "main".into(),
                message: "Up next: Sermon by Pastor John".into(),
                updated_at: Utc::now(),
            }),
            closing: Some(ClosingMessage {
                id: "main".into(),
                message: "Service has ended. God bless!".into(),
                updated_at: Utc::now(),
            }),
        }
    }

    fn stopped() -> LiveDisplay {
        LiveDisplay {
            item_type: LiveItemType::None,
            item_id: None,
            snapshot: None,
            part_index: None,
            part_count: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn stopped_pointer_resolves_to_rotation_in_fixed_order() {
        let payload = resolve(&stopped(), &bundle());
        let DisplayPayload::Rotation { slides, dwell_secs, fragment_dwell_secs } = payload else {
            panic!("expected rotation");
        };
        let order: Vec<LiveItemType> = slides.iter().map(|s| s.item_type()).collect();
        assert_eq!(
            order,
            [
                LiveItemType::Welcome,
                LiveItemType::Announcements,
                LiveItemType::Events,
                LiveItemType::Hymn,
                LiveItemType::Hymn,
                LiveItemType::BibleVerse,
                LiveItemType::WhatsNext,
                LiveItemType::Closing,
            ]
        );
        assert_eq!(dwell_secs, 10);
        assert_eq!(fragment_dwell_secs, 5);
    }

    #[test]
    fn empty_content_contributes_no_slides() {
        let payload = rotation(&ContentBundle::default());
        let DisplayPayload::Rotation { slides, .. } = payload else {
            panic!("expected rotation");
        };
        assert!(slides.is_empty());
    }

    #[test]
    fn live_hymn_resolves_to_the_single_item_with_its_part() {
        let b = bundle();
        let hymn = b.hymns[0].clone();
        let live = LiveDisplay {
            item_type: LiveItemType::Hymn,
            item_id: Some(hymn.id),
            snapshot: Some(serde_json::to_value(&hymn).unwrap()),
            part_index: Some(1),
            part_count: Some(2),
            updated_at: Utc::now(),
        };
        let DisplayPayload::Live { slide, part_index, key } = resolve(&live, &b) else {
            panic!("expected live payload");
        };
        assert_eq!(part_index, Some(1));
        assert_eq!(key, format!("hymn:{}:1", hymn.id));
        match slide {
            Slide::Hymn(h) => assert_eq!(h.title, "Amazing Grace"),
            other => panic!("expected hymn slide, got {other:?}"),
        }
    }

    #[test]
    fn corrupt_snapshot_degrades_to_rotation() {
        let b = bundle();
        let live = LiveDisplay {
            item_type: LiveItemType::Hymn,
            item_id: Some(Uuid::new_v4()),
            snapshot: Some(serde_json::json!({ "not": "a hymn" })),
            part_index: Some(0),
            part_count: Some(2),
            updated_at: Utc::now(),
        };
        assert!(matches!(resolve(&live, &b), DisplayPayload::Rotation { .. }));
    }

    #[test]
    fn resolving_the_same_pointer_twice_yields_the_same_key() {
        let b = bundle();
        let verse = b.bible_verses[0].clone();
        let live = LiveDisplay {
            item_type: LiveItemType::BibleVerse,
            item_id: Some(verse.id),
            snapshot: Some(serde_json::to_value(&verse).unwrap()),
            part_index: Some(0),
            part_count: Some(1),
            updated_at: Utc::now(),
        };
        let key_of = |payload: DisplayPayload| match payload {
            DisplayPayload::Live { key, .. } => key,
            _ => panic!("expected live payload"),
        };
        assert_eq!(key_of(resolve(&live, &b)), key_of(resolve(&live, &b)));
    }
}
