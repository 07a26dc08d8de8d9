use chrono::{DateTime, SecondsFormat, Utc};

/// Fixed-width UTC RFC 3339 text, so stored timestamps sort lexically by time.
#[must_use]
pub fn format_rfc3339(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    Ok(DateTime::parse_from_rfc3339(value)?.with_timezone(&Utc))
}
