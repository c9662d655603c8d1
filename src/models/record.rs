use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeRecord {
    pub id: u64,
    pub timestamp: String,
    pub amount: Decimal,
    pub remark: String,
}

impl IncomeRecord {
    /// The "YYYY-MM-DD" day this record belongs to: the first ten
    /// characters of the timestamp.
    pub fn day_key(&self) -> &str {
        self.timestamp.get(..10).unwrap_or(&self.timestamp)
    }

    /// Display line used by the calendar drill-down and CLI list,
    /// e.g. `$120.00  freelance`.
    pub fn entry_line(&self) -> String {
        format!("${:.2}  {}", self.amount, self.remark)
            .trim_end()
            .to_string()
    }

    pub fn has_remark(&self) -> bool {
        !self.remark.trim().is_empty()
    }
}
