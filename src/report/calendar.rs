use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::ops::RangeInclusive;

use crate::models::IncomeRecord;

/// One calendar day's derived view: the running total plus the
/// display line of every record on that day, in store order.
#[derive(Debug, Clone, Default)]
pub(crate) struct DayBucket {
    pub(crate) total: Decimal,
    pub(crate) entries: Vec<String>,
}

/// The month laid out as weeks of seven slots, Monday first. Slots
/// outside the month hold 0 and are never selectable.
pub(crate) fn month_grid(year: i32, month: u32) -> Vec<[u32; 7]> {
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d,
        None => return Vec::new(),
    };
    let lead = first.weekday().num_days_from_monday() as usize;

    let mut weeks = Vec::new();
    let mut week = [0u32; 7];
    let mut slot = lead;
    for day in 1..=days_in_month(year, month) {
        week[slot] = day;
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [0; 7];
            slot = 0;
        }
    }
    if slot > 0 {
        weeks.push(week);
    }
    weeks
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match (first, next) {
        (Some(f), Some(n)) => n.signed_duration_since(f).num_days() as u32,
        _ => 0,
    }
}

/// Bucket every record under its day key. Totals come from the
/// stored amount, never from re-parsing a display string.
pub(crate) fn day_buckets(records: &[IncomeRecord]) -> HashMap<String, DayBucket> {
    let mut buckets: HashMap<String, DayBucket> = HashMap::new();
    for record in records {
        let bucket = buckets.entry(record.day_key().to_string()).or_default();
        bucket.total += record.amount;
        bucket.entries.push(record.entry_line());
    }
    buckets
}

/// The day key for a grid cell, matching `IncomeRecord::day_key`.
pub(crate) fn day_key_for(year: i32, month: u32, day: u32) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}

/// Selectable years for the calendar view: a six-year window ending
/// with the current year. A display constraint, not a data one.
pub(crate) fn year_range() -> RangeInclusive<i32> {
    let year = Local::now().year();
    (year - 5)..=year
}

#[cfg(test)]
#[path = "calendar_tests.rs"]
mod tests;
