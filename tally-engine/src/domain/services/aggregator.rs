use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::models::{DimensionKey, Granularity, Period, PeriodKey, TimeEntry};

/// Grouping dimension for report aggregation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum Dimension {
    /// One row per engineer.
    Engineer,
    /// One row per booking code.
    BookingCode,
    /// A single project-wide pseudo-row.
    Project,
}

impl Dimension {
    pub fn key_of(&self, entry: &TimeEntry) -> DimensionKey {
        match self {
            Dimension::Engineer => DimensionKey::new(entry.user_id.as_str()),
            Dimension::BookingCode => DimensionKey::new(entry.booking_code_id.to_string()),
            Dimension::Project => DimensionKey::new("project"),
        }
    }
}

/// Sums of minutes keyed by (dimension, period).
pub type AggregateMap = HashMap<(DimensionKey, PeriodKey), i64>;

/// Group entries by dimension and calendar period, summing minutes.
///
/// Buckets on each entry's work `date`, never `created_at`. Deterministic
/// and side-effect free for a given entry set and granularity.
pub fn aggregate(
    entries: &[TimeEntry],
    dimension: Dimension,
    granularity: Granularity,
) -> AggregateMap {
    aggregate_by(entries, granularity, |entry| dimension.key_of(entry))
}

/// `aggregate` with an arbitrary dimension key extractor.
///
/// Validated entries never carry non-positive minutes, but legacy rows might;
/// they are summed as-is rather than silently dropped, since silent data loss
/// is worse than an odd total.
pub fn aggregate_by<F>(entries: &[TimeEntry], granularity: Granularity, key_fn: F) -> AggregateMap
where
    F: Fn(&TimeEntry) -> DimensionKey,
{
    let mut totals = AggregateMap::new();

    for entry in entries {
        let period_key = Period::key_for(entry.date, granularity);
        *totals.entry((key_fn(entry), period_key)).or_insert(0) += i64::from(entry.minutes);
    }

    totals
}
