//! Calendar bucketing for time entry aggregation.
//!
//! All bucketing happens on the calendar date of the instant interpreted in
//! UTC. Never on a client or server wall clock, and never by slicing a
//! formatted date string. Two instants on the same UTC calendar day always
//! produce the same day key, regardless of time of day or the offset they
//! were submitted with.
//!
//! Every period is a half-open interval `[start, end)`: an instant exactly
//! equal to `end` belongs to the next period. That rule is what makes the
//! buckets gap-free and double-count-free at week/month/year boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;
use time::{Date, Duration, Month, OffsetDateTime, UtcOffset, Weekday};

/// Bucket size for aggregation. Weeks are ISO-8601, Monday through Sunday.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Granularity {
    Day,
    Week,
    Month,
    Year,
}

/// Canonical identifier of one bucket, e.g. `2025-04-13`, `2025-W16`,
/// `2025-04`, `2025`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodKey(String);

impl PeriodKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One calendar bucket in the fixed UTC reference time zone.
///
/// Derived on every read, never persisted. Membership is tested by instant
/// comparison against the half-open `[start, end)` interval, never by string
/// equality on a formatted date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub key: PeriodKey,
    pub label: String,
    #[serde(with = "time::serde::rfc3339")]
    pub start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end: OffsetDateTime,
}

impl Period {
    /// The period of the given granularity containing `instant`.
    pub fn covering(instant: OffsetDateTime, granularity: Granularity) -> Self {
        let date = instant.to_offset(UtcOffset::UTC).date();

        match granularity {
            Granularity::Day => Self::day(date),
            Granularity::Week => Self::week(date),
            Granularity::Month => Self::month(date),
            Granularity::Year => Self::year(date),
        }
    }

    /// The canonical key for `instant` at the given granularity.
    pub fn key_for(instant: OffsetDateTime, granularity: Granularity) -> PeriodKey {
        Self::covering(instant, granularity).key
    }

    /// The last `count` contiguous periods of the given granularity ending at
    /// (and including) the period that contains `reference`. Oldest first.
    ///
    /// This is the common report shape: "the last N weeks/months/years".
    pub fn last_n(reference: OffsetDateTime, granularity: Granularity, count: usize) -> Vec<Self> {
        let mut periods = Vec::with_capacity(count);
        let mut current = Self::covering(reference, granularity);

        for _ in 0..count {
            let previous_instant = current.start - Duration::seconds(1);
            periods.push(current);
            current = Self::covering(previous_instant, granularity);
        }

        periods.reverse();
        periods
    }

    /// Half-open membership test: `start <= instant < end`.
    ///
    /// `OffsetDateTime` comparison is instant-based, so entries submitted
    /// with a non-UTC offset land in the right bucket.
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        self.start <= instant && instant < self.end
    }

    fn day(date: Date) -> Self {
        let next = date + Duration::days(1);
        let key = format_date(date);

        Self {
            label: key.clone(),
            key: PeriodKey(key),
            start: midnight_utc(date),
            end: midnight_utc(next),
        }
    }

    fn week(date: Date) -> Self {
        let (iso_year, iso_week, _) = date.to_iso_week_date();
        let monday = Date::from_iso_week_date(iso_year, iso_week, Weekday::Monday)
            .expect("week number came from to_iso_week_date");

        Self {
            key: PeriodKey(format!("{iso_year:04}-W{iso_week:02}")),
            label: format!("Week {iso_week}, {iso_year}"),
            start: midnight_utc(monday),
            end: midnight_utc(monday + Duration::weeks(1)),
        }
    }

    fn month(date: Date) -> Self {
        let first = first_of_month(date.year(), date.month());
        let next = match date.month() {
            Month::December => first_of_month(date.year() + 1, Month::January),
            other => first_of_month(date.year(), other.next()),
        };

        Self {
            key: PeriodKey(format!("{:04}-{:02}", date.year(), u8::from(date.month()))),
            label: format!("{} {}", month_name(date.month()), date.year()),
            start: midnight_utc(first),
            end: midnight_utc(next),
        }
    }

    fn year(date: Date) -> Self {
        Self {
            key: PeriodKey(format!("{:04}", date.year())),
            label: format!("{}", date.year()),
            start: midnight_utc(first_of_month(date.year(), Month::January)),
            end: midnight_utc(first_of_month(date.year() + 1, Month::January)),
        }
    }
}

fn midnight_utc(date: Date) -> OffsetDateTime {
    date.midnight().assume_utc()
}

fn first_of_month(year: i32, month: Month) -> Date {
    Date::from_calendar_date(year, month, 1).expect("day 1 is valid in every month")
}

fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}
