#![allow(clippy::unwrap_used)]

use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::IncomeRecord;

fn record(id: u64, day: &str, amount: Decimal, remark: &str) -> IncomeRecord {
    IncomeRecord {
        id,
        timestamp: format!("{day} 09:30:00"),
        amount,
        remark: remark.into(),
    }
}

// ── month_grid ────────────────────────────────────────────────

#[test]
fn test_grid_rows_are_weeks_of_seven() {
    for week in month_grid(2026, 8) {
        assert_eq!(week.len(), 7);
    }
}

#[test]
fn test_grid_contains_every_day_once() {
    let grid = month_grid(2026, 8);
    let mut days: Vec<u32> = grid.iter().flatten().copied().filter(|d| *d != 0).collect();
    days.sort_unstable();
    assert_eq!(days, (1..=31).collect::<Vec<u32>>());
}

#[test]
fn test_grid_monday_first() {
    // 2026-06-01 is a Monday: no leading blanks.
    let grid = month_grid(2026, 6);
    assert_eq!(grid[0][0], 1);

    // 2026-08-01 is a Saturday: five leading blanks.
    let grid = month_grid(2026, 8);
    assert_eq!(grid[0], [0, 0, 0, 0, 0, 1, 2]);
}

#[test]
fn test_grid_trailing_blanks() {
    // 2026-08-31 is a Monday: the last week is 31 then six blanks.
    let grid = month_grid(2026, 8);
    let last = grid.last().unwrap();
    assert_eq!(*last, [31, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn test_grid_february_leap_year() {
    let days: u32 = month_grid(2024, 2).iter().flatten().filter(|d| **d != 0).count() as u32;
    assert_eq!(days, 29);
    assert_eq!(days_in_month(2024, 2), 29);
    assert_eq!(days_in_month(2025, 2), 28);
}

#[test]
fn test_grid_invalid_month_is_empty() {
    assert!(month_grid(2026, 13).is_empty());
    assert!(month_grid(2026, 0).is_empty());
}

// ── day_buckets ───────────────────────────────────────────────

#[test]
fn test_day_total_sums_stored_amounts() {
    let records = vec![
        record(1, "2026-08-05", dec!(10.50), "food"),
        record(2, "2026-08-05", dec!(4.50), ""),
        record(3, "2026-08-06", dec!(7), "books"),
    ];
    let buckets = day_buckets(&records);

    assert_eq!(buckets["2026-08-05"].total, dec!(15.00));
    assert_eq!(buckets["2026-08-06"].total, dec!(7));
    assert!(!buckets.contains_key("2026-08-07"));
}

#[test]
fn test_day_bucket_entries_in_store_order() {
    let records = vec![
        record(1, "2026-08-05", dec!(10.50), "food"),
        record(2, "2026-08-05", dec!(4.50), ""),
    ];
    let buckets = day_buckets(&records);
    assert_eq!(
        buckets["2026-08-05"].entries,
        vec!["$10.50  food".to_string(), "$4.50".to_string()]
    );
}

#[test]
fn test_day_total_not_confused_by_amount_like_remark() {
    // A remark starting with a currency-glyph token must not leak
    // into the day total.
    let records = vec![record(1, "2026-08-05", dec!(2), "$999 voucher resale")];
    let buckets = day_buckets(&records);
    assert_eq!(buckets["2026-08-05"].total, dec!(2));
}

#[test]
fn test_day_buckets_empty_store() {
    assert!(day_buckets(&[]).is_empty());
}

// ── day_key_for ───────────────────────────────────────────────

#[test]
fn test_day_key_for_zero_pads() {
    assert_eq!(day_key_for(2026, 8, 5), "2026-08-05");
    assert_eq!(day_key_for(2026, 12, 31), "2026-12-31");
}

#[test]
fn test_day_key_for_matches_record_day_key() {
    let r = record(1, "2026-08-05", dec!(1), "");
    assert_eq!(r.day_key(), day_key_for(2026, 8, 5));
}

// ── year_range ────────────────────────────────────────────────

#[test]
fn test_year_range_is_six_years_ending_today() {
    let range = year_range();
    assert_eq!(range.end() - range.start(), 5);
    assert_eq!(*range.end(), chrono::Local::now().year());
}
