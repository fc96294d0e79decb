//! One review in, one stored analysis out.
//!
//! validate → prompt → single completion call → reconcile → append.
//! Nothing is written unless every earlier step succeeded.
use crate::completion::{CompletionError, CompletionService};
use crate::db::{ReviewStore, StoreError};
use crate::models::review::SentimentRecord;
use crate::prompt::build_prompt;
use crate::reconcile::{reconcile, ReconcileError};
use actix_web::http::StatusCode;
use leptos::logging::{error, log};
use serde_json::Value;
use thiserror::Error;

pub const MIN_REVIEW_CHARS: usize = 10;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("review text must be a string of at least 10 characters")]
    Validation,
    #[error("completion service failed: {0}")]
    Upstream(#[source] CompletionError),
    #[error("completion service declined: {0}")]
    UpstreamDeclined(String),
    #[error("completion reply could not be reconciled: {0}")]
    UpstreamFormat(#[from] ReconcileError),
    #[error("failed to store review: {0}")]
    Persistence(#[from] StoreError),
}

impl From<CompletionError> for AnalyzeError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Declined(reason) => AnalyzeError::UpstreamDeclined(reason),
            other => AnalyzeError::Upstream(other),
        }
    }
}

impl AnalyzeError {
    pub fn status(&self) -> StatusCode {
        match self {
            AnalyzeError::Validation => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to send to the caller. Never includes model output or causes.
    pub fn public_message(&self) -> &'static str {
        match self {
            AnalyzeError::Validation => "Review text must be at least 10 characters long.",
            AnalyzeError::UpstreamDeclined(_) => "The AI declined to analyze this review.",
            AnalyzeError::UpstreamFormat(ReconcileError::NoJsonFound) => {
                "The AI failed to generate a valid response."
            }
            AnalyzeError::UpstreamFormat(ReconcileError::MalformedJson { .. }) => {
                "The AI response format was unreadable."
            }
            AnalyzeError::UpstreamFormat(ReconcileError::InvalidShape(_)) => {
                "The AI response was missing required fields."
            }
            AnalyzeError::Upstream(_) | AnalyzeError::Persistence(_) => {
                "An internal server error occurred."
            }
        }
    }
}

/// Accepts only a string whose trimmed form has at least [`MIN_REVIEW_CHARS`]
/// characters, and returns it trimmed.
pub fn validate_review(review: Option<&Value>) -> Result<String, AnalyzeError> {
    match review {
        Some(Value::String(text)) if text.trim().chars().count() >= MIN_REVIEW_CHARS => {
            Ok(text.trim().to_string())
        }
        _ => Err(AnalyzeError::Validation),
    }
}

pub async fn analyze_review(
    review: Option<&Value>,
    completion: &dyn CompletionService,
    store: &dyn ReviewStore,
) -> Result<SentimentRecord, AnalyzeError> {
    let review = validate_review(review)?;
    let prompt = build_prompt(&review);

    let raw_reply = completion.complete(&prompt).await?;
    log!("[API] Raw AI response text: {}", raw_reply);

    let reconciled = reconcile(&raw_reply).map_err(|err| {
        error!("[API] Rejected AI response ({}): {}", err, raw_reply);
        err
    })?;

    let record = store
        .append(&review, reconciled.sentiment, &reconciled.explanation)
        .await?;
    Ok(record)
}
