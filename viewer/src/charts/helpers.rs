use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses a bar date into epoch seconds. Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`,
/// `YYYY-MM-DDTHH:MM:SS`, plain `YYYY-MM-DD`, and epoch milliseconds.
pub fn parse_bar_time(date: &str) -> Option<i64> {
    let date = date.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(date) {
        return Some(datetime.timestamp());
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(date, format) {
            return Some(datetime.and_utc().timestamp());
        }
    }

    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return day
            .and_hms_opt(0, 0, 0)
            .map(|datetime| datetime.and_utc().timestamp());
    }

    date.parse::<i64>().ok().map(|millis| millis / 1000)
}

/// Padded `(min, max)` range, never empty.
pub fn padded_range(min: f64, max: f64, ratio: f64, fallback: f64) -> (f64, f64) {
    let span = max - min;
    let pad = if span > 0.0 { span * ratio } else { fallback };
    (min - pad, max + pad)
}
