use serde::{Deserialize, Serialize};

/// Column order of the summary table written to the sink
pub const SUMMARY_HEADER: [&str; 4] = ["hour", "number_of_likes", "number_of_shares", "author"];

/// Statistics for every post published in one hour of the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySummary {
    pub hour: u32,

    #[serde(rename = "number_of_likes")]
    pub avg_likes: f64,

    #[serde(rename = "number_of_shares")]
    pub avg_shares: f64,

    /// Most frequent author; `None` only for an empty group
    #[serde(rename = "author")]
    pub dominant_author: Option<String>,

    /// Number of records folded into this row (not written to the sink)
    #[serde(skip)]
    pub records: usize,
}
