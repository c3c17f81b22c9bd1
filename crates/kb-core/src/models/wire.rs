//! Lenient field decoders for the shapes the board service actually emits.

use crate::Priority;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

const NAIVE_DATE_TIME_FORMATS: [&str; 3] =
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a timestamp in any of the forms the service accepts.
///
/// Naive values carry no offset on the wire and are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "null" {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|parsed| parsed.and_utc())
}

pub(crate) fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() || raw.trim() == "null" => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("unrecognized timestamp: {raw}"))),
    }
}

pub(crate) fn required_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_timestamp(deserializer)?.ok_or_else(|| D::Error::custom("missing timestamp"))
}

/// Tags arrive as an array, null, a JSON-encoded array string, or a
/// comma-separated string.
pub(crate) fn tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        List(Vec<String>),
        Text(String),
    }

    Ok(match Option::<Wire>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Wire::List(tags)) => tags,
        Some(Wire::Text(text)) => split_tags(&text),
    })
}

fn split_tags(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() || text == "{}" {
        return Vec::new();
    }

    if let Ok(tags) = serde_json::from_str::<Vec<String>>(text) {
        return tags;
    }

    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

/// Order endpoints take priority names in upper case
pub(crate) fn upper_priority<S>(priority: &Priority, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&priority.as_str().to_uppercase())
}

pub(crate) fn upper_priority_opt<S>(
    priority: &Option<Priority>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match priority {
        Some(priority) => upper_priority(priority, serializer),
        None => serializer.serialize_none(),
    }
}

/// Order tags are stored as one comma-separated string, null when empty
pub(crate) fn joined_tags<S>(tags: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if tags.is_empty() {
        serializer.serialize_none()
    } else {
        serializer.serialize_str(&tags.join(","))
    }
}

pub(crate) fn default_true() -> bool {
    true
}
