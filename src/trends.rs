//! Temporal analytics over the record store: best month, busiest weekday, and
//! quarter-over-quarter growth.
//!
//! Unlike the grouping reports, which compare raw date prefixes, these analyses parse each
//! record's date as a civil calendar date. A record whose date does not parse is skipped with
//! a warning rather than poisoning the whole analysis.

use crate::model::{SaleRecord, SaleStore};
use crate::report::{sales_by_month, GroupTotal};
use crate::Result;
use anyhow::bail;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Weekday bucket labels, indexed 0=Sunday through 6=Saturday.
const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// The weekday with the most sale records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayCount {
    pub weekday: String,
    pub count: u32,
}

/// The outcome of a quarterly growth query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum QuarterGrowth {
    /// Both windows had data; `percent` is `(current - previous) / previous * 100`.
    Rate {
        current: f64,
        previous: f64,
        percent: f64,
    },
    /// The previous quarter summed to exactly zero, so the rate is undefined.
    InsufficientData { current: f64 },
}

/// The month with the highest summed effective total, or `None` when the store holds no
/// records. Ties break toward the first month to reach the maximum, in group order.
pub fn best_month(store: &SaleStore) -> Option<GroupTotal> {
    let mut best: Option<GroupTotal> = None;
    for group in sales_by_month(store) {
        if best.as_ref().map_or(true, |b| group.total > b.total) {
            best = Some(group);
        }
    }
    best
}

/// Tallies records into seven weekday buckets and reports the fullest one. Ties break toward
/// the lower weekday index (Sunday first). `None` when no record has a parseable date.
pub fn busiest_weekday(store: &SaleStore) -> Option<WeekdayCount> {
    let mut tally = [0u32; 7];
    for record in store.iter() {
        let Some(date) = parse_date(record) else {
            continue;
        };
        tally[date.weekday().num_days_from_sunday() as usize] += 1;
    }
    if tally.iter().all(|&count| count == 0) {
        return None;
    }
    let mut best = 0;
    for (ix, &count) in tally.iter().enumerate() {
        if count > tally[best] {
            best = ix;
        }
    }
    Some(WeekdayCount {
        weekday: WEEKDAY_NAMES[best].to_string(),
        count: tally[best],
    })
}

/// Compares quarter `quarter` of `year` against the immediately preceding quarter.
///
/// For the first quarter the preceding window is October through December of the previous
/// year. A previous-quarter sum of exactly zero yields [`QuarterGrowth::InsufficientData`],
/// never a division by zero.
///
/// # Errors
///
/// Returns an error if `quarter` is outside `1..=4`.
pub fn quarterly_growth(store: &SaleStore, quarter: u32, year: i32) -> Result<QuarterGrowth> {
    if !(1..=4).contains(&quarter) {
        bail!("The quarter must be between 1 and 4, got {quarter}");
    }
    let current_months = (3 * (quarter - 1) + 1)..=(3 * quarter);
    let (previous_year, previous_months) = if quarter > 1 {
        (year, (3 * (quarter - 2) + 1)..=(3 * (quarter - 1)))
    } else {
        (year - 1, 10..=12)
    };

    let mut current = 0.0;
    let mut previous = 0.0;
    for record in store.iter() {
        let Some(date) = parse_date(record) else {
            continue;
        };
        if date.year() == year && current_months.contains(&date.month()) {
            current += record.effective_total();
        } else if date.year() == previous_year && previous_months.contains(&date.month()) {
            previous += record.effective_total();
        }
    }

    if previous == 0.0 {
        Ok(QuarterGrowth::InsufficientData { current })
    } else {
        Ok(QuarterGrowth::Rate {
            current,
            previous,
            percent: (current - previous) / previous * 100.0,
        })
    }
}

fn parse_date(record: &SaleRecord) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(record.date(), DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(
                "Skipping record {}: the date '{}' is not a valid calendar date: {e}",
                record.id(),
                record.date()
            );
            None
        }
    }
}
