/// Simple Moving Average over the fully-covered windows only.
///
/// Returns `data.len() - period + 1` values, the first one covering
/// `data[..period]`. Empty when `period` is zero or exceeds the data.
pub fn sma(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return vec![];
    }

    let mut result = Vec::with_capacity(data.len() - period + 1);
    for i in period - 1..data.len() {
        // Fresh sum per window keeps recomputation bit-identical.
        let window = &data[i + 1 - period..=i];
        let sum: f64 = window.iter().sum();
        let average = if sum.is_finite() {
            sum / period as f64
        } else {
            // Finite closes can still overflow the sum; scale before adding.
            window.iter().map(|x| x / period as f64).sum()
        };
        result.push(average);
    }
    result
}

/// Simple Moving Average aligned to the input.
///
/// Output has one entry per input value. Index `i` holds the mean of
/// `data[i + 1 - period..=i]` when `i >= period - 1`, otherwise `None`.
/// Shorter input than `period` yields all `None`.
pub fn sma_aligned(data: &[f64], period: usize) -> Vec<Option<f64>> {
    let averages = sma(data, period);
    let warmup = data.len() - averages.len();

    let mut result = Vec::with_capacity(data.len());
    result.extend(std::iter::repeat(None).take(warmup));
    result.extend(averages.into_iter().map(Some));
    result
}
