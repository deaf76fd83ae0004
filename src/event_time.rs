use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::error::ParseError;

// The grid quotes Eastern time. The offset is fixed (EST) and does not follow
// daylight saving; downstream consumers rely on this exact shift.
const SITE_UTC_OFFSET_HOURS: i64 = 5;
const SITE_ZONE_MARKER: &str = "ET";
const SITE_DATE_FORMAT: &str = "%m/%d/%Y";
const SITE_DATETIME_FORMAT: &str = "%m/%d/%Y %I:%M %p";
const UTC_OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S+00:00";

/// Convert a grid time such as `7:05 PM ET (04/12/2024)` or `7:05 PM ET` into
/// `YYYY-MM-DDTHH:MM:SS+00:00`. A time without a date is taken to fall on
/// `reference_date`.
pub fn normalize_event_time(raw: &str, reference_date: NaiveDate) -> Result<String, ParseError> {
    let site_local = parse_site_local(raw, reference_date).ok_or_else(|| ParseError::EventTime {
        raw: raw.to_string(),
    })?;
    let utc = site_local - Duration::hours(SITE_UTC_OFFSET_HOURS);
    Ok(utc.format(UTC_OUTPUT_FORMAT).to_string())
}

/// Calendar date on the site's clock for a given instant.
pub fn site_today(now: DateTime<Utc>) -> NaiveDate {
    (now - Duration::hours(SITE_UTC_OFFSET_HOURS)).date_naive()
}

fn parse_site_local(raw: &str, reference_date: NaiveDate) -> Option<NaiveDateTime> {
    let cleaned = raw.replace(SITE_ZONE_MARKER, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    let combined = match cleaned.split_once('(') {
        Some((time_part, date_part)) if date_part.contains(')') => {
            let date_part = date_part.trim().trim_end_matches(')').trim();
            format!("{date_part} {}", time_part.trim())
        }
        Some(_) => return None,
        None => format!("{} {cleaned}", reference_date.format(SITE_DATE_FORMAT)),
    };

    NaiveDateTime::parse_from_str(&combined, SITE_DATETIME_FORMAT).ok()
}
