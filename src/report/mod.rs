pub(crate) mod calendar;

use rust_decimal::Decimal;

use crate::models::IncomeRecord;

/// Group label for records with a blank remark.
pub(crate) const NO_REMARK: &str = "(no remark)";

/// Sum amounts grouped by remark text, blank remarks folded into
/// [`NO_REMARK`]. Groups appear in first-seen scan order and each
/// remark value appears exactly once.
pub(crate) fn remark_summary(records: &[IncomeRecord]) -> Vec<(String, Decimal)> {
    let mut groups: Vec<(String, Decimal)> = Vec::new();
    for record in records {
        let label = if record.has_remark() {
            record.remark.as_str()
        } else {
            NO_REMARK
        };
        match groups.iter_mut().find(|(name, _)| name == label) {
            Some((_, total)) => *total += record.amount,
            None => groups.push((label.to_string(), record.amount)),
        }
    }
    groups
}
