//! Hosted-AI collaborators: the content filter and the verse lookup, both
//! thin schema-validated wrappers over the Gemini `generateContent` REST API
//! (JSON mode). Failure handling is an explicit per-call-site policy:
//! the filter fails open, the verse lookup fails closed.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::Config;
use crate::errors::ApiError;
use crate::services::metrics;

pub const PARISH_GUIDELINES: &str = "Content must be family-friendly, respectful, and \
relevant to church activities. No profanity, hate speech, or political content is allowed. \
Keep messages positive and welcoming.";

/// What to do when the external call fails for any reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Proceed with a safe default; never block the caller.
    Open,
    /// Surface the failure; there is no safe default.
    Closed,
}

pub const CONTENT_FILTER_POLICY: FailurePolicy = FailurePolicy::Open;
pub const VERSE_LOOKUP_POLICY: FailurePolicy = FailurePolicy::Closed;

const VERSE_LOOKUP_FAILED: &str =
    "Failed to fetch verse text. Please check the reference and try again.";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterVerdict {
    pub is_appropriate: bool,
    pub reason: Option<String>,
    pub corrected_message: Option<String>,
}

impl FilterVerdict {
    /// The fail-open default: treat the content as appropriate, unmodified.
    pub fn appropriate() -> Self {
        Self {
            is_appropriate: true,
            reason: None,
            corrected_message: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseLookup {
    pub corrected_reference: String,
    /// One fragment per verse of a range; short display-sized phrases for a
    /// single verse.
    pub text: Vec<String>,
}

pub struct AiService {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl AiService {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
        }
    }

    /// Screen free text against the parish guidelines. Fail-open: any
    /// transport, provider, or parse failure logs a warning and lets the
    /// save proceed with the original text.
    pub async fn check_content(&self, message: &str) -> FilterVerdict {
        debug_assert_eq!(CONTENT_FILTER_POLICY, FailurePolicy::Open);
        match self.filter_inappropriate_content(message).await {
            Ok(verdict) => {
                metrics::AI_CALLS_COUNTER
                    .with_label_values(&["content_filter", "ok"])
                    .inc();
                verdict
            }
            Err(e) => {
                metrics::AI_CALLS_COUNTER
                    .with_label_values(&["content_filter", "error"])
                    .inc();
                tracing::warn!("content filter failed, proceeding fail-open: {e:#}");
                FilterVerdict::appropriate()
            }
        }
    }

    async fn filter_inappropriate_content(&self, message: &str) -> anyhow::Result<FilterVerdict> {
        let prompt = format!(
            "You are an AI content filter and proofreader that checks if a message is \
appropriate and grammatically correct based on the parish guidelines.\n\n\
Parish Guidelines: {PARISH_GUIDELINES}\n\n\
Message: {message}\n\n\
1. Based on the parish guidelines, determine if the message is appropriate. Set \
\"isAppropriate\" to true or false; when false, also populate \"reason\".\n\
2. Review the message for spelling or grammar errors and populate \
\"correctedMessage\" with the proofread version (the original message if no \
corrections are needed).\n\n\
Respond with a single JSON object with keys \"isAppropriate\", \"reason\" and \
\"correctedMessage\"."
        );
        self.generate(&prompt).await
    }

    /// Resolve a free-form, possibly misspelled scripture reference into a
    /// normalized reference plus display-ready fragments. Fail-closed: every
    /// failure surfaces an explicit user-facing error and nothing is saved.
    pub async fn lookup_verse(&self, reference: &str) -> Result<VerseLookup, ApiError> {
        debug_assert_eq!(VERSE_LOOKUP_POLICY, FailurePolicy::Closed);
        let prompt = format!(
            "You are a Bible expert. The user will provide a Bible verse reference, which \
may be misspelled or poorly formatted.\n\
1. Determine the correct book, chapter and verse(s) and standardize the format \
(e.g. \"jon 3 16\" becomes \"John 3:16\"); put it in \"correctedReference\".\n\
2. Fetch the full text for the corrected reference from the King James Version (KJV).\n\
3. Put the text in \"text\" as an array of strings: one string per verse for a \
range of verses; for a single verse, split it into short, meaningful phrases \
suitable for displaying on a screen one at a time.\n\
Do not include the verse reference in the output text itself.\n\n\
Verse Reference Provided: {reference}\n\n\
Respond with a single JSON object with keys \"correctedReference\" and \"text\"."
        );
        match self.generate::<VerseLookup>(&prompt).await {
            Ok(lookup) => {
                metrics::AI_CALLS_COUNTER
                    .with_label_values(&["verse_lookup", "ok"])
                    .inc();
                Ok(lookup)
            }
            Err(e) => {
                metrics::AI_CALLS_COUNTER
                    .with_label_values(&["verse_lookup", "error"])
                    .inc();
                tracing::warn!("verse lookup failed for {reference:?}: {e:#}");
                Err(ApiError::ExternalService(VERSE_LOOKUP_FAILED.into()))
            }
        }
    }

    async fn generate<T: DeserializeOwned>(&self, prompt: &str) -> anyhow::Result<T> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("GEMINI_API_KEY not configured"))?;

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, api_key
        );
        let payload = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "application/json" }
        });

        let response = self.client.post(&url).json(&payload).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini error {status}: {text}");
        }

        let body: Value = response.json().await?;
        parse_generate_response(&body)
    }
}

/// Extract the model's JSON answer out of the `generateContent` envelope.
fn parse_generate_response<T: DeserializeOwned>(body: &Value) -> anyhow::Result<T> {
    let text = body
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow::anyhow!("malformed generateContent response: {body}"))?;
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(answer: &str) -> Value {
        json!({
            "candidates": [{
                "content": { "parts": [{ "text": answer }] }
            }]
        })
    }

    #[test]
    fn parses_filter_verdict_from_model_envelope() {
        let body = envelope(
            r#"{"isAppropriate": false, "reason": "Contains political content.", "correctedMessage": "Vote for..."}"#,
        );
        let verdict: FilterVerdict = parse_generate_response(&body).unwrap();
        assert!(!verdict.is_appropriate);
        assert_eq!(verdict.reason.as_deref(), Some("Contains political content."));
    }

    #[test]
    fn parses_verse_lookup_with_corrected_reference() {
        let body = envelope(
            r#"{"correctedReference": "John 3:16", "text": ["For God so loved the world, that he gave his only Son, that whoever believes in him should not perish but have eternal life."]}"#,
        );
        let lookup: VerseLookup = parse_generate_response(&body).unwrap();
        assert_eq!(lookup.corrected_reference, "John 3:16");
        assert_eq!(lookup.text.len(), 1);
    }

    #[test]
    fn malformed_envelope_is_an_error() {
        let body = json!({ "candidates": [] });
        assert!(parse_generate_response::<FilterVerdict>(&body).is_err());
    }

    #[test]
    fn policies_are_open_for_filter_and_closed_for_lookup() {
        assert_eq!(CONTENT_FILTER_POLICY, FailurePolicy::Open);
        assert_eq!(VERSE_LOOKUP_POLICY, FailurePolicy::Closed);
    }

    #[tokio::test]
    async fn unconfigured_filter_fails_open() {
        let config = Config {
            database_url: "postgres://unused".into(),
            redis_url: "redis://unused".into(),
            host: "127.0.0.1".into(),
            port: 0,
            app_base_url: "http://localhost".into(),
            gemini_api_key: None,
            gemini_model: "gemini-2.0-flash".into(),
        };
        let ai = AiService::new(&config);
        let verdict = ai.check_content("Join us Sunday at 10am for the annual bake sale.").await;
        assert!(verdict.is_appropriate);
        assert!(verdict.reason.is_none());
    }

    #[tokio::test]
    async fn unconfigured_lookup_fails_closed() {
        let config = Config {
            database_url: "postgres://unused".into(),
            redis_url: "redis://unused".into(),
            host: "127.0.0.1".into(),
            port: 0,
            app_base_url: "http://localhost".into(),
            gemini_api_key: None,
            gemini_model: "gemini-2.0-flash".into(),
        };
        let ai = AiService::new(&config);
        match ai.lookup_verse("jon 3 16").await {
            Err(ApiError::ExternalService(msg)) => {
                assert!(msg.contains("check the reference"));
            }
            other => panic!("expected fail-closed error, got {other:?}"),
        }
    }
}
