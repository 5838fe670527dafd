//! Small numeric helpers shared by the estimation engines.
//!
//! These return `None` on empty input so missing data never masquerades as a
//! real number.

/// Arithmetic mean of a slice, `None` when empty.
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Index of the first non-finite value, if any.
pub fn first_non_finite(data: &[f64]) -> Option<usize> {
    data.iter().position(|v| !v.is_finite())
}
