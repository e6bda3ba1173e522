use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input pattern of the `date_time` column (day/month/year hour:minute)
pub const DATE_TIME_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Text written into missing or blank text cells
pub const PLACEHOLDER_TEXT: &str = "Unknown";

/// Parse a `date_time` cell with [`DATE_TIME_FORMAT`].
///
/// Surrounding whitespace is ignored; anything else must match exactly.
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), DATE_TIME_FORMAT).ok()
}

/// Languages a repaired record may carry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::Es, Language::Fr, Language::De];

    /// Exact, case-sensitive match against the allowed codes
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            "fr" => Some(Self::Fr),
            "de" => Some(Self::De),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::De => "de",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One post as read from the source, before repair.
///
/// Every cell may be missing. Likes and shares stay floating point so that
/// non-integral input remains visible to validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: Option<i64>,
    pub author: Option<String>,
    pub content: Option<String>,
    pub date_time: Option<String>,
    pub language: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub number_of_likes: Option<f64>,
    pub number_of_shares: Option<f64>,
}

impl RawRecord {
    /// True when any cell is missing
    pub fn has_missing(&self) -> bool {
        self.id.is_none()
            || self.author.is_none()
            || self.content.is_none()
            || self.date_time.is_none()
            || self.language.is_none()
            || self.latitude.is_none()
            || self.longitude.is_none()
            || self.number_of_likes.is_none()
            || self.number_of_shares.is_none()
    }
}

/// One post after repair; every invariant of the schema holds
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: i64,
    pub author: String,
    pub content: String,
    pub date_time: NaiveDateTime,
    pub language: Language,
    pub latitude: f64,
    pub longitude: f64,
    pub number_of_likes: u64,
    pub number_of_shares: u64,
}

impl From<Record> for RawRecord {
    fn from(record: Record) -> Self {
        Self {
            id: Some(record.id),
            author: Some(record.author),
            content: Some(record.content),
            date_time: Some(record.date_time.format(DATE_TIME_FORMAT).to_string()),
            language: Some(record.language.as_str().to_string()),
            latitude: Some(record.latitude),
            longitude: Some(record.longitude),
            number_of_likes: Some(record.number_of_likes as f64),
            number_of_shares: Some(record.number_of_shares as f64),
        }
    }
}
