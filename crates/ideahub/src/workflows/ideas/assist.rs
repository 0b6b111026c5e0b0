use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Idea, RatingDimension};

/// Assistant failure. Callers treat any failure as "no suggestion
/// available" and continue; the primary workflow never blocks on it.
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    #[error("assistant unavailable: {0}")]
    Unavailable(String),
    #[error("assistant returned malformed output")]
    Malformed,
}

/// Draft evaluation proposed by the assistant. Advisory only: a manager must
/// review, adjust, and submit through the rating ledger for it to count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSuggestion {
    pub scores: BTreeMap<String, u8>,
    pub comment: String,
}

/// Outbound port to the generative evaluation collaborator.
pub trait EvaluationAssistant: Send + Sync {
    fn suggest(
        &self,
        idea: &Idea,
        dimensions: &[RatingDimension],
    ) -> Result<RatingSuggestion, AssistError>;
}

/// Outbound port to the content-analysis collaborator. Call sites fall back
/// to the original text on failure.
pub trait ContentAssistant: Send + Sync {
    fn enhance(&self, text: &str) -> Result<String, AssistError>;
}
