use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::SummaryId;

/// Characters of the source text kept when deriving a summary topic.
const TOPIC_PREFIX_CHARS: usize = 50;

/// A saved pair of short and detailed summaries. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub id: SummaryId,
    pub topic: String,
    pub short_summary: String,
    pub detailed_summary: String,
    pub created_at: DateTime<Utc>,
}

impl Summary {
    /// Build a summary whose topic is derived from the summarized text.
    #[must_use]
    pub fn from_source(
        source: &str,
        short_summary: impl Into<String>,
        detailed_summary: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: SummaryId::generate(),
            topic: topic_from_source(source),
            short_summary: short_summary.into(),
            detailed_summary: detailed_summary.into(),
            created_at,
        }
    }
}

/// First 50 characters of the source followed by an ellipsis.
#[must_use]
pub fn topic_from_source(source: &str) -> String {
    let mut topic: String = source.chars().take(TOPIC_PREFIX_CHARS).collect();
    topic.push_str("...");
    topic
}
