use crate::locale::Locale;
use chrono::{DateTime, TimeZone};

pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_DAY: i64 = 86_400_000;

/// Buckets the age of `timestamp` relative to `now`.
///
/// `hours = floor(diff / 1h)` and `days = floor(diff / 24h)`:
/// under one hour is "just now", under 24 hours is "N hours ago", under
/// seven days is "N days ago", anything older is a short absolute date in
/// the time zone of `timestamp`. Timestamps in the future count as "just now".
pub fn relative_date<Tz: TimeZone>(
    timestamp: &DateTime<Tz>,
    now: &DateTime<Tz>,
    locale: Locale,
) -> String {
    let diff_ms = now.timestamp_millis() - timestamp.timestamp_millis();
    let hours = diff_ms.div_euclid(MS_PER_HOUR);
    let days = diff_ms.div_euclid(MS_PER_DAY);

    if hours < 1 {
        locale.just_now().to_string()
    } else if hours < 24 {
        locale.hours_ago(hours)
    } else if days < 7 {
        locale.days_ago(days)
    } else {
        locale.short_date(timestamp.date_naive())
    }
}
