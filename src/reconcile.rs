//! Turns the free-form text a language model sends back into a validated
//! sentiment/explanation pair.
//!
//! The model is asked for a bare JSON object but often wraps it in prose or a
//! markdown fence. A fenced ```` ```json ```` block wins when present,
//! otherwise the span from the first `{` to the last `}` is used.
use crate::models::review::Sentiment;
use leptos::logging::log;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("no JSON object found in model reply")]
    NoJsonFound,
    #[error("extracted JSON is malformed: {source}")]
    MalformedJson {
        span: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("model reply has an invalid shape: {0}")]
    InvalidShape(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub sentiment: Sentiment,
    pub explanation: String,
}

fn fenced_json_block() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("fenced JSON pattern is valid")
    })
}

/// Finds the candidate JSON span in `text` without parsing it.
pub fn extract_json_span(text: &str) -> Option<&str> {
    if let Some(captures) = fenced_json_block().captures(text) {
        if let Some(inner) = captures.get(1) {
            return Some(inner.as_str());
        }
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

pub fn reconcile(raw_text: &str) -> Result<Reconciled, ReconcileError> {
    let span = extract_json_span(raw_text).ok_or(ReconcileError::NoJsonFound)?;

    let value: Value = serde_json::from_str(span).map_err(|source| {
        log!("[RECONCILE] Failed to parse extracted JSON: {}", span);
        ReconcileError::MalformedJson {
            span: span.to_string(),
            source,
        }
    })?;

    let object = value
        .as_object()
        .ok_or_else(|| ReconcileError::InvalidShape("reply is not a JSON object".into()))?;

    let sentiment = match object.get("sentiment") {
        Some(Value::String(label)) => label
            .parse::<Sentiment>()
            .map_err(|err| ReconcileError::InvalidShape(err.to_string()))?,
        Some(_) => return Err(ReconcileError::InvalidShape("`sentiment` is not a string".into())),
        None => return Err(ReconcileError::InvalidShape("`sentiment` is missing".into())),
    };

    let explanation = match object.get("explanation") {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        Some(Value::String(_)) => {
            return Err(ReconcileError::InvalidShape("`explanation` is empty".into()))
        }
        Some(_) => {
            return Err(ReconcileError::InvalidShape("`explanation` is not a string".into()))
        }
        None => return Err(ReconcileError::InvalidShape("`explanation` is missing".into())),
    };

    Ok(Reconciled {
        sentiment,
        explanation,
    })
}
