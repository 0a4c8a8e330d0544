//! Aggregation of payroll lines into a batch.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::{HrmsError, HrmsResult};
use crate::models::{BatchStatus, PayrollBatch, PayrollLine, PayrollMonth};

/// Aggregates computed lines into an approved batch for `period`.
///
/// The batch id is derived from the period, `total_amount` is the sum of
/// every line's net salary and `total_employees` is the number of lines.
/// Generated batches skip review and start in [`BatchStatus::Approved`].
///
/// # Errors
///
/// Returns `Internal` if the total overflows [`Decimal`].
pub fn assemble_batch(
    period: &PayrollMonth,
    records: Vec<PayrollLine>,
    generated_at: DateTime<Utc>,
) -> HrmsResult<PayrollBatch> {
    let total_amount = records
        .iter()
        .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.net_salary))
        .ok_or_else(|| HrmsError::Internal {
            message: format!("payroll total out of range for batch {}", period.batch_id()),
        })?;

    Ok(PayrollBatch {
        batch_id: period.batch_id(),
        month: period.month(),
        year: period.year(),
        total_employees: records.len(),
        total_amount,
        records,
        status: BatchStatus::Approved,
        generated_at,
    })
}
