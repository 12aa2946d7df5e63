//! Lenient date parsing for `--after`/`--before` filters.
//!
//! Accepts the common written forms of a date or datetime and interprets them
//! as UTC. Numeric day/month orderings are only accepted when the order can be
//! told from the values themselves.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DateParseError {
    #[error("empty date")]
    Empty,
    #[error("ambiguous date {0:?}: day and month order cannot be determined")]
    Ambiguous(String),
    #[error("unrecognized date format {0:?}")]
    Unrecognized(String),
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y.%m.%d %H:%M:%S",
    "%Y.%m.%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%d %B, %Y",
];

pub fn parse_datetime(raw: &str) -> Result<DateTime<Utc>, DateParseError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(DateParseError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if s.bytes().all(|b| b.is_ascii_digit()) {
        return parse_all_digits(s);
    }

    if let Some(date) = parse_numeric_day_month(s)? {
        return Ok(midnight(date));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(naive.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(midnight(date));
        }
    }

    Err(DateParseError::Unrecognized(s.to_string()))
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

// 8 digits is yyyymmdd, 10 digits is unix seconds.
fn parse_all_digits(s: &str) -> Result<DateTime<Utc>, DateParseError> {
    let unrecognized = || DateParseError::Unrecognized(s.to_string());
    match s.len() {
        8 => NaiveDate::parse_from_str(s, "%Y%m%d")
            .map(midnight)
            .map_err(|_| unrecognized()),
        10 => {
            let secs: i64 = s.parse().map_err(|_| unrecognized())?;
            Utc.timestamp_opt(secs, 0).single().ok_or_else(unrecognized)
        }
        _ => Err(unrecognized()),
    }
}

// `a/b/yyyy` where either a or b is the month.
fn parse_numeric_day_month(s: &str) -> Result<Option<NaiveDate>, DateParseError> {
    let parts: Vec<&str> = s.split('/').collect();
    let [a, b, y] = parts[..] else {
        return Ok(None);
    };
    let numeric = |p: &str| !p.is_empty() && p.len() <= 2 && p.bytes().all(|c| c.is_ascii_digit());
    if !numeric(a) || !numeric(b) || y.len() != 4 || !y.bytes().all(|c| c.is_ascii_digit()) {
        return Ok(None);
    }
    let unrecognized = || DateParseError::Unrecognized(s.to_string());
    let (a, b, y): (u32, u32, i32) = (
        a.parse().map_err(|_| unrecognized())?,
        b.parse().map_err(|_| unrecognized())?,
        y.parse().map_err(|_| unrecognized())?,
    );

    let (month, day) = match (a <= 12, b <= 12) {
        (true, true) if a == b => (a, b),
        (true, true) => return Err(DateParseError::Ambiguous(s.to_string())),
        (true, false) => (a, b),
        (false, true) => (b, a),
        (false, false) => return Err(unrecognized()),
    };
    NaiveDate::from_ymd_opt(y, month, day)
        .map(Some)
        .ok_or_else(unrecognized)
}
