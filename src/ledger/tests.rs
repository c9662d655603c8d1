#![allow(clippy::unwrap_used)]

use chrono::Local;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use super::*;

fn temp_ledger() -> (TempDir, Ledger) {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Ledger::open(&dir.path().join("income_records.csv")).unwrap();
    (dir, ledger)
}

// ── Open ──────────────────────────────────────────────────────

#[test]
fn test_open_missing_file_is_empty() {
    let (_dir, ledger) = temp_ledger();
    assert!(ledger.is_empty());
    assert_eq!(ledger.len(), 0);
}

#[test]
fn test_open_zero_byte_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("income_records.csv");
    std::fs::write(&path, "").unwrap();
    let ledger = Ledger::open(&path).unwrap();
    assert!(ledger.is_empty());
}

#[test]
fn test_open_header_only_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("income_records.csv");
    std::fs::write(&path, "timestamp,amount,remark\n").unwrap();
    let ledger = Ledger::open(&path).unwrap();
    assert!(ledger.is_empty());
}

#[test]
fn test_open_backfills_short_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("income_records.csv");
    std::fs::write(
        &path,
        "timestamp,amount,remark\n2026-08-01 09:00:00,10.50\n2026-08-02 10:00:00\n",
    )
    .unwrap();
    let ledger = Ledger::open(&path).unwrap();
    assert_eq!(ledger.len(), 2);

    let records = ledger.records();
    assert_eq!(records[0].amount, dec!(10.50));
    assert_eq!(records[0].remark, "");
    // Missing amount cell loads as zero, not an error.
    assert_eq!(records[1].amount, Decimal::ZERO);
    assert_eq!(records[1].remark, "");
}

#[test]
fn test_open_assigns_ids_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("income_records.csv");
    std::fs::write(
        &path,
        "timestamp,amount,remark\n2026-08-01 09:00:00,1,a\n2026-08-02 10:00:00,2,b\n",
    )
    .unwrap();
    let ledger = Ledger::open(&path).unwrap();
    let ids: Vec<u64> = ledger.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

// ── Append ────────────────────────────────────────────────────

#[test]
fn test_append_grows_store_by_one() {
    let (_dir, mut ledger) = temp_ledger();

    let before = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let id = ledger.append("120.50", "freelance").unwrap();
    let after = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    assert_eq!(ledger.len(), 1);
    let record = &ledger.records()[0];
    assert_eq!(record.id, id);
    assert_eq!(record.amount, dec!(120.50));
    assert_eq!(record.remark, "freelance");
    // Timestamp falls within the call's execution window. The format
    // sorts lexicographically, so plain string compare works.
    assert!(record.timestamp >= before && record.timestamp <= after);
}

#[test]
fn test_append_empty_amount_rejected() {
    let (_dir, mut ledger) = temp_ledger();
    let err = ledger.append("", "salary").unwrap_err();
    assert!(err.to_string().contains("amount is required"));
    assert!(ledger.is_empty());
}

#[test]
fn test_append_whitespace_amount_rejected() {
    let (_dir, mut ledger) = temp_ledger();
    assert!(ledger.append("   ", "salary").is_err());
    assert!(ledger.is_empty());
}

#[test]
fn test_append_non_numeric_amount_rejected() {
    let (_dir, mut ledger) = temp_ledger();
    let err = ledger.append("abc", "salary").unwrap_err();
    assert!(err.to_string().contains("invalid amount"));
    assert!(ledger.is_empty());
}

#[test]
fn test_append_rejection_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("income_records.csv");
    let mut ledger = Ledger::open(&path).unwrap();
    ledger.append("oops", "").unwrap_err();
    assert!(!path.exists());
}

#[test]
fn test_append_accepts_surrounding_whitespace() {
    let (_dir, mut ledger) = temp_ledger();
    ledger.append(" 42.00 ", "tips").unwrap();
    assert_eq!(ledger.records()[0].amount, dec!(42.00));
}

#[test]
fn test_append_ids_are_monotonic() {
    let (_dir, mut ledger) = temp_ledger();
    let a = ledger.append("1", "").unwrap();
    let b = ledger.append("2", "").unwrap();
    let c = ledger.append("3", "").unwrap();
    assert!(a < b && b < c);
}

// ── Delete ────────────────────────────────────────────────────

#[test]
fn test_delete_removes_exactly_one_record() {
    let (_dir, mut ledger) = temp_ledger();
    ledger.append("10", "a").unwrap();
    let target = ledger.append("20", "b").unwrap();
    ledger.append("30", "c").unwrap();

    ledger.delete(target).unwrap();

    assert_eq!(ledger.len(), 2);
    let remarks: Vec<&str> = ledger.records().iter().map(|r| r.remark.as_str()).collect();
    assert_eq!(remarks, vec!["a", "c"]);
}

#[test]
fn test_delete_keeps_remaining_ids_stable() {
    let (_dir, mut ledger) = temp_ledger();
    let first = ledger.append("10", "a").unwrap();
    let second = ledger.append("20", "b").unwrap();
    let third = ledger.append("30", "c").unwrap();

    ledger.delete(second).unwrap();

    let ids: Vec<u64> = ledger.records().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![first, third]);
}

#[test]
fn test_delete_unknown_id_is_error() {
    let (_dir, mut ledger) = temp_ledger();
    ledger.append("10", "a").unwrap();
    let err = ledger.delete(999).unwrap_err();
    assert!(err.to_string().contains("no record with id 999"));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_deleted_id_is_not_reused() {
    let (_dir, mut ledger) = temp_ledger();
    ledger.append("10", "a").unwrap();
    let second = ledger.append("20", "b").unwrap();
    ledger.delete(second).unwrap();
    let third = ledger.append("30", "c").unwrap();
    assert!(third > second);
}

// ── Persistence ───────────────────────────────────────────────

#[test]
fn test_persisted_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("income_records.csv");
    let mut ledger = Ledger::open(&path).unwrap();
    ledger.append("1", "x").unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("timestamp,amount,remark\n"));
}

#[test]
fn test_round_trip_preserves_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("income_records.csv");

    let mut ledger = Ledger::open(&path).unwrap();
    ledger.append("120.50", "freelance").unwrap();
    ledger.append("3", "").unwrap();
    ledger.append("9.99", "sale, used books").unwrap();
    ledger.append("7", "quote \"test\"").unwrap();
    let written: Vec<IncomeRecord> = ledger.records().to_vec();

    let reloaded = Ledger::open(&path).unwrap();
    assert_eq!(reloaded.len(), written.len());
    for (a, b) in written.iter().zip(reloaded.records()) {
        assert_eq!(a.timestamp, b.timestamp);
        assert_eq!(a.amount, b.amount);
        assert_eq!(a.remark, b.remark);
    }
}

#[test]
fn test_delete_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("income_records.csv");

    let mut ledger = Ledger::open(&path).unwrap();
    ledger.append("10", "a").unwrap();
    let target = ledger.append("20", "b").unwrap();
    ledger.delete(target).unwrap();

    let reloaded = Ledger::open(&path).unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.records()[0].remark, "a");
}

// ── Export ────────────────────────────────────────────────────

#[test]
fn test_export_matches_persisted_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("income_records.csv");
    let out = dir.path().join("export.csv");

    let mut ledger = Ledger::open(&path).unwrap();
    ledger.append("10", "a").unwrap();
    ledger.append("20", "b, c").unwrap();

    let count = ledger.export(&out).unwrap();
    assert_eq!(count, 2);
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        std::fs::read_to_string(&out).unwrap()
    );
}

#[test]
fn test_export_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("export.csv");
    let ledger = Ledger::open(&dir.path().join("income_records.csv")).unwrap();

    let count = ledger.export(&out).unwrap();
    assert_eq!(count, 0);
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "timestamp,amount,remark\n"
    );
}

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount_valid() {
    assert_eq!(parse_amount("10").unwrap(), dec!(10));
    assert_eq!(parse_amount("0.01").unwrap(), dec!(0.01));
    assert_eq!(parse_amount("-5.25").unwrap(), dec!(-5.25));
}

#[test]
fn test_parse_amount_invalid() {
    assert!(parse_amount("").is_err());
    assert!(parse_amount("abc").is_err());
    assert!(parse_amount("12.3.4").is_err());
    assert!(parse_amount("$10").is_err());
}
