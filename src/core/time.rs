use time::{format_description::well_known::Rfc3339, Duration, OffsetDateTime};

pub(crate) fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

pub(crate) fn format_rfc3339(value: OffsetDateTime) -> String {
    value.format(&Rfc3339).unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

pub(crate) fn rfc3339_now() -> String {
    format_rfc3339(now_utc())
}

/// Timestamp a fixed number of minutes in the past, for seeded activity entries.
pub(crate) fn rfc3339_minutes_ago(minutes: i64) -> String {
    format_rfc3339(now_utc() - Duration::minutes(minutes))
}

/// Calendar date (UTC) used in generated report headers.
pub(crate) fn date_today() -> String {
    now_utc().date().to_string()
}
