#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
}

#[test]
fn test_format_amount_no_separator_needed() {
    assert_eq!(format_amount(dec!(999.99)), "$999.99");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50)), "-$42.50");
}

#[test]
fn test_format_amount_millions() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
}

#[test]
fn test_format_amount_pads_cents() {
    assert_eq!(format_amount(dec!(1.5)), "$1.50");
    assert_eq!(format_amount(dec!(5)), "$5.00");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("lunch", 10), "lunch");
    assert_eq!(truncate("lunch", 5), "lunch");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("weekend market stall", 7), "weeken…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("lunch", 0), "");
}

#[test]
fn test_truncate_multibyte() {
    assert_eq!(truncate("收入记录测试", 4), "收入记…");
}

// ── scroll helpers ────────────────────────────────────────────

#[test]
fn test_scroll_down_advances_and_follows() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (9, 7);
    scroll_down(&mut index, &mut scroll, 10, 3);
    assert_eq!(index, 9);
}

#[test]
fn test_scroll_up_follows_cursor() {
    let (mut index, mut scroll) = (5, 5);
    scroll_up(&mut index, &mut scroll);
    assert_eq!(index, 4);
    assert_eq!(scroll, 4);
}

#[test]
fn test_scroll_up_at_top() {
    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!(index, 0);
    assert_eq!(scroll, 0);
}
