use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a single app as reported by a marketplace.
///
/// Both stores describe apps with different field names (`appId` vs numeric `id`,
/// `minInstalls` vs `reviews`, `genreId` vs `primaryGenreId`, ...). Deserialization accepts
/// either shape and normalizes it into this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAppRecord", rename_all = "camelCase")]
pub struct AppRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub summary: Option<String>,
    pub free: bool,
    #[serde(rename = "minInstalls")]
    pub installs: Option<u64>,
    pub reviews: Option<u64>,
    pub score: Option<f64>,
    pub updated: Option<DateTime<Utc>>,
    #[serde(rename = "genreId")]
    pub genre: Option<String>,
}

impl AppRecord {
    /// Create a free app record with the given id and title and no other data.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            summary: None,
            free: true,
            installs: None,
            reviews: None,
            score: None,
            updated: None,
            genre: None,
        }
    }

    /// Whether the record carries the full app detail rather than a search summary.
    #[must_use]
    pub const fn has_detail(&self) -> bool {
        !self.description.is_empty()
    }
}

/// Identifiers arrive either as strings (Google Play package names) or numbers (App Store ids).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Identifier {
    Text(String),
    Number(u64),
}

impl Identifier {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Update timestamps arrive as epoch milliseconds or as date strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Timestamp {
    Millis(f64),
    Text(String),
}

impl Timestamp {
    #[expect(clippy::cast_possible_truncation, reason = "epoch milliseconds fit comfortably in i64")]
    fn into_datetime(self) -> Option<DateTime<Utc>> {
        match self {
            Self::Millis(millis) => DateTime::from_timestamp_millis(millis as i64),
            Self::Text(text) => parse_date_text(&text),
        }
    }
}

fn parse_date_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }

    // Google Play used to report dates such as "March 3, 2017"
    ["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAppRecord {
    #[serde(default)]
    app_id: Option<Identifier>,
    #[serde(default)]
    id: Option<Identifier>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    free: Option<bool>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    min_installs: Option<u64>,
    #[serde(default)]
    reviews: Option<u64>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    updated: Option<Timestamp>,
    #[serde(default)]
    genre_id: Option<Identifier>,
    #[serde(default)]
    primary_genre_id: Option<Identifier>,
}

impl From<RawAppRecord> for AppRecord {
    fn from(raw: RawAppRecord) -> Self {
        let free = raw.free.unwrap_or_else(|| raw.price.is_none_or(|price| price == 0.0));

        Self {
            id: raw.app_id.or(raw.id).map(Identifier::into_string).unwrap_or_default(),
            title: raw.title,
            description: raw.description,
            summary: raw.summary.filter(|summary| !summary.is_empty()),
            free,
            installs: raw.min_installs,
            reviews: raw.reviews,
            score: raw.score,
            updated: raw.updated.and_then(Timestamp::into_datetime),
            genre: raw.genre_id.or(raw.primary_genre_id).map(Identifier::into_string),
        }
    }
}
