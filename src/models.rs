use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One normalized feed item. Produced only by the parser; every field is a
/// non-empty string by the time a value exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Headline {
    pub title: String,
    pub link: String,
    pub published_at: String,
    pub source: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopHeadlinesResponse {
    pub headlines: Vec<Headline>,
    #[serde(rename = "totalCount")]
    pub total_count: usize,
}

/// Envelope for JSON exports. `filter_applied` is omitted entirely when the
/// query was unfiltered.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportDocument {
    pub export_date: String,
    pub total_items: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_applied: Option<String>,
    pub headlines: Vec<Headline>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub environment: String,
    pub timestamp: DateTime<Utc>,
}
