//! Field-level validation for every admin save action. Violations are
//! collected into a `FieldErrors` map and returned, never thrown; a save
//! with any violation performs no write.

use crate::errors::{ApiError, FieldErrors};
use crate::models::announcement::SaveAnnouncementRequest;
use crate::models::bible_verse::SaveBibleVerseRequest;
use crate::models::content::{UpdateMessageRequest, UpdateWelcomeRequest};
use crate::models::event::SaveEventRequest;
use crate::models::hymn::SaveHymnRequest;

fn push(errors: &mut FieldErrors, field: &str, message: &str) {
    errors
        .entry(field.to_string())
        .or_default()
        .push(message.to_string());
}

fn check(errors: &mut FieldErrors) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(std::mem::take(errors)))
    }
}

pub fn validate_welcome(req: &UpdateWelcomeRequest) -> Result<(), ApiError> {
    let mut errors = FieldErrors::new();
    let len = req.message.chars().count();
    if len < 10 {
        push(&mut errors, "message", "Message must be at least 10 characters long.");
    } else if len > 200 {
        push(&mut errors, "message", "Message must be 200 characters or less.");
    }
    if let Some(subtitle) = &req.subtitle {
        if subtitle.chars().count() > 100 {
            push(&mut errors, "subtitle", "Subtitle must be 100 characters or less.");
        }
    }
    check(&mut errors)
}

pub fn validate_announcement(req: &SaveAnnouncementRequest) -> Result<(), ApiError> {
    let mut errors = FieldErrors::new();
    let title_len = req.title.chars().count();
    if title_len < 3 {
        push(&mut errors, "title", "Title is too short.");
    } else if title_len > 100 {
        push(&mut errors, "title", "Title is too long.");
    }
    let content_len = req.content.chars().count();
    if content_len < 10 {
        push(&mut errors, "content", "Content is too short.");
    } else if content_len > 500 {
        push(&mut errors, "content", "Content is too long.");
    }
    check(&mut errors)
}

pub fn validate_event(req: &SaveEventRequest) -> Result<(), ApiError> {
    let mut errors = FieldErrors::new();
    let name_len = req.name.chars().count();
    if name_len < 3 {
        push(&mut errors, "name", "Event name is too short.");
    } else if name_len > 100 {
        push(&mut errors, "name", "Event name is too long.");
    }
    if req.date.is_empty() {
        push(&mut errors, "date", "Date is required.");
    }
    if req.time.is_empty() {
        push(&mut errors, "time", "Time is required.");
    }
    let loc_len = req.location.chars().count();
    if loc_len < 3 {
        push(&mut errors, "location", "Location is too short.");
    } else if loc_len > 100 {
        push(&mut errors, "location", "Location is too long.");
    }
    check(&mut errors)
}

pub fn validate_hymn(req: &SaveHymnRequest) -> Result<(), ApiError> {
    let mut errors = FieldErrors::new();
    let title_len = req.title.chars().count();
    if title_len < 3 {
        push(&mut errors, "title", "Title is too short.");
    } else if title_len > 150 {
        push(&mut errors, "title", "Title is too long.");
    }
    if req.lyrics.is_empty() {
        push(&mut errors, "lyrics", "At least one verse is required.");
    } else if req.lyrics.iter().any(|line| line.trim().is_empty()) {
        push(&mut errors, "lyrics", "Each verse must have text.");
    }
    check(&mut errors)
}

pub fn validate_bible_verse(req: &SaveBibleVerseRequest) -> Result<(), ApiError> {
    let mut errors = FieldErrors::new();
    let ref_len = req.reference.chars().count();
    if ref_len < 3 {
        push(&mut errors, "reference", "Reference is too short.");
    } else if ref_len > 100 {
        push(&mut errors, "reference", "Reference is too long.");
    }
    let text_len: usize = req.text.iter().map(|part| part.chars().count()).sum();
    if text_len < 10 {
        push(&mut errors, "text", "Verse text is too short.");
    } else if text_len > 1000 {
        push(&mut errors, "text", "Verse text is too long.");
    }
    check(&mut errors)
}

/// Shared rule for the what's-next and closing messages.
pub fn validate_short_message(req: &UpdateMessageRequest) -> Result<(), ApiError> {
    let mut errors = FieldErrors::new();
    let len = req.message.chars().count();
    if len < 5 {
        push(&mut errors, "message", "Message must be at least 5 characters long.");
    } else if len > 200 {
        push(&mut errors, "message", "Message must be 200 characters or less.");
    }
    check(&mut errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(err: ApiError) -> Vec<String> {
        match err {
            ApiError::Validation(map) => map.keys().cloned().collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn welcome_message_bounds() {
        let ok = UpdateWelcomeRequest {
            message: "Welcome To Church".into(),
            subtitle: Some("We Are Glad To Have You Here".into()),
        };
        assert!(validate_welcome(&ok).is_ok());

        let short = UpdateWelcomeRequest { message: "Hi there".into(), subtitle: None };
        assert_eq!(fields(validate_welcome(&short).unwrap_err()), ["message"]);

        let long = UpdateWelcomeRequest { message: "x".repeat(201), subtitle: None };
        assert_eq!(fields(validate_welcome(&long).unwrap_err()), ["message"]);

        // Boundary values are accepted.
        let min = UpdateWelcomeRequest { message: "x".repeat(10), subtitle: Some("y".repeat(100)) };
        assert!(validate_welcome(&min).is_ok());
    }

    #[test]
    fn announcement_names_every_violating_field() {
        let bad = SaveAnnouncementRequest {
            id: None,
            title: "ab".into(),
            content: "too short".into(),
        };
        assert_eq!(
            fields(validate_announcement(&bad).unwrap_err()),
            ["content", "title"]
        );
    }

    #[test]
    fn event_requires_date_and_time() {
        let bad = SaveEventRequest {
            id: None,
            name: "Charity Drive".into(),
            date: "".into(),
            time: "".into(),
            location: "Church Parking Lot".into(),
        };
        assert_eq!(fields(validate_event(&bad).unwrap_err()), ["date", "time"]);
    }

    #[test]
    fn hymn_rejects_empty_and_blank_verses() {
        let empty = SaveHymnRequest { id: None, title: "Amazing Grace".into(), lyrics: vec![] };
        assert_eq!(fields(validate_hymn(&empty).unwrap_err()), ["lyrics"]);

        let blank = SaveHymnRequest {
            id: None,
            title: "Amazing Grace".into(),
            lyrics: vec!["Amazing grace! How sweet the sound,".into(), "   ".into()],
        };
        assert_eq!(fields(validate_hymn(&blank).unwrap_err()), ["lyrics"]);
    }

    #[test]
    fn bible_verse_text_length_spans_all_parts() {
        let ok = SaveBibleVerseRequest {
            id: None,
            reference: "John 3:16".into(),
            text: vec!["For God so loved the world,".into(), "that he gave his only Son.".into()],
        };
        assert!(validate_bible_verse(&ok).is_ok());

        let short = SaveBibleVerseRequest {
            id: None,
            reference: "John 3:16".into(),
            text: vec!["For".into(), "God".into()],
        };
        assert_eq!(fields(validate_bible_verse(&short).unwrap_err()), ["text"]);
    }

    #[test]
    fn short_message_bounds() {
        let ok = UpdateMessageRequest { message: "Up next: Sermon by Pastor John".into() };
        assert!(validate_short_message(&ok).is_ok());

        let short = UpdateMessageRequest { message: "Hiya".into() };
        assert_eq!(fields(validate_short_message(&short).unwrap_err()), ["message"]);
    }
}
