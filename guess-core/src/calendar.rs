use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The UTC calendar day a timestamp belongs to. Puzzles roll over at midnight UTC.
pub fn puzzle_date(now: DateTime<Utc>) -> NaiveDate {
    now.date_naive()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date_key(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}

pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date - Duration::days(1)
}
