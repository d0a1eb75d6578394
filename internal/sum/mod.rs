use crate::error::{Result, SumcheckError};

/// Sums the configured numbers. Overflow is reported instead of wrapping.
pub fn calculate_sum(numbers: &[i64]) -> Result<i64> {
    numbers
        .iter()
        .try_fold(0i64, |acc, n| acc.checked_add(*n))
        .ok_or(SumcheckError::SumOverflow)
}
