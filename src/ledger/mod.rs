use anyhow::{Context, Result};
use chrono::Local;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::models::IncomeRecord;

const CSV_HEADER: [&str; 3] = ["timestamp", "amount", "remark"];

/// The CSV-backed income store. Records keep insertion order; every
/// mutation rewrites the whole file. Record ids are assigned per
/// session (file order on load, then monotonically on append) and are
/// not persisted — the file keeps the three-column contract.
pub(crate) struct Ledger {
    path: PathBuf,
    records: Vec<IncomeRecord>,
    next_id: u64,
}

impl Ledger {
    /// Open the ledger at `path`. A missing or empty file yields an
    /// empty store.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let records = load_records(path)?;
        let next_id = records.len() as u64 + 1;
        Ok(Self {
            path: path.to_path_buf(),
            records,
            next_id,
        })
    }

    pub(crate) fn records(&self) -> &[IncomeRecord] {
        &self.records
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record. `amount` is user-entered text and must parse
    /// as a decimal number; empty or non-numeric input is a validation
    /// error and the store is untouched. On success the record gets
    /// the current wall-clock timestamp and the store is persisted.
    /// Returns the new record's id.
    pub(crate) fn append(&mut self, amount: &str, remark: &str) -> Result<u64> {
        let amount = parse_amount(amount)?;
        let record = IncomeRecord {
            id: self.next_id,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            amount,
            remark: remark.to_string(),
        };
        let id = record.id;
        self.records.push(record);
        self.persist()?;
        self.next_id += 1;
        Ok(id)
    }

    /// Delete the record with the given id and persist. Unknown ids
    /// are an error, not a silent no-op.
    pub(crate) fn delete(&mut self, id: u64) -> Result<()> {
        let pos = self
            .records
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| anyhow::anyhow!("no record with id {id}"))?;
        self.records.remove(pos);
        self.persist()
    }

    /// Write the current store to `path` using the same serialization
    /// as the persisted file. Returns the record count.
    pub(crate) fn export(&self, path: &Path) -> Result<usize> {
        write_records(path, &self.records)?;
        Ok(self.records.len())
    }

    fn persist(&self) -> Result<()> {
        write_records(&self.path, &self.records)
    }
}

/// Parse user-entered amount text. Both failure cases are
/// user-visible validation errors, not I/O failures.
pub(crate) fn parse_amount(text: &str) -> Result<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        anyhow::bail!("amount is required");
    }
    Decimal::from_str(trimmed).map_err(|_| anyhow::anyhow!("invalid amount: '{trimmed}'"))
}

fn load_records(path: &Path) -> Result<Vec<IncomeRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open ledger file: {}", path.display()))?;

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = result.with_context(|| format!("Failed to read ledger row {}", i + 1))?;
        // Rows shorter than three columns are backfilled as empty; an
        // unparseable amount cell loads as zero.
        let cell = |n: usize| row.get(n).unwrap_or("").to_string();
        records.push(IncomeRecord {
            id: i as u64 + 1,
            timestamp: cell(0),
            amount: Decimal::from_str(cell(1).trim()).unwrap_or_default(),
            remark: cell(2),
        });
    }
    Ok(records)
}

fn write_records(path: &Path, records: &[IncomeRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to write ledger file: {}", path.display()))?;
    wtr.write_record(CSV_HEADER)?;
    for record in records {
        let amount = record.amount.to_string();
        wtr.write_record([
            record.timestamp.as_str(),
            amount.as_str(),
            record.remark.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests;
