// src/models/review.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The three categories a review can be classified into.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sentiment category: {0:?}")]
pub struct UnknownSentiment(pub String);

// Exact match only: no case folding, no trimming, no synonyms.
impl FromStr for Sentiment {
    type Err = UnknownSentiment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sentiment::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownSentiment(s.to_string()))
    }
}

/// A stored analysis. Created once, never updated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SentimentRecord {
    pub id: String,              // Assigned by the store
    pub text: String,            // Trimmed review text
    pub sentiment: Sentiment,
    pub explanation: String,     // One-sentence justification from the model
    pub created_at: DateTime<Utc>,
}

/// Body accepted by `POST /api/analyze`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AnalyzeRequest {
    pub review: String,
}

/// Body returned by `POST /api/analyze` on success.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub sentiment: Sentiment,
    pub explanation: String,
    pub review_text: String,
    pub id: String,
}

impl From<&SentimentRecord> for AnalysisResponse {
    fn from(record: &SentimentRecord) -> Self {
        AnalysisResponse {
            sentiment: record.sentiment,
            explanation: record.explanation.clone(),
            review_text: record.text.clone(),
            id: record.id.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}
