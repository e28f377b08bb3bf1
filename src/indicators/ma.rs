// =============================================================================
// Moving Averages — SMA / EMA series utilities
// =============================================================================
//
// Every indicator in this crate is built on these two smoothing functions.
//
// SMA:
//   SMA = mean of the trailing `period` values
//
// EMA:
//   multiplier = 2 / (period + 1)
//   EMA_t      = value_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The very first EMA value is seeded with the SMA of the first `period` values.
//
// Short series do not fail: when fewer than `period` values exist, both
// functions return the latest value (0.0 for an empty series).  Partial data
// is expected at the start of every series.
// =============================================================================

/// Latest value of the series, or 0.0 when empty.
///
/// The fallback used by every moving average when the window cannot be filled.
pub fn latest_or_zero(values: &[f64]) -> f64 {
    values.last().copied().unwrap_or(0.0)
}

/// Arithmetic mean of the last `period` elements of `values`.
///
/// # Edge cases
/// - `values.len() < period` => the last element (0.0 when empty)
/// - `period == 0` => treated like a short series (the last element)
pub fn sma(values: &[f64], period: usize) -> f64 {
    if period == 0 || values.len() < period {
        return latest_or_zero(values);
    }

    let window = &values[values.len() - period..];
    window.iter().sum::<f64>() / period as f64
}

/// Compute the EMA series for `values` and look-back `period`.
///
/// Each output element corresponds to an input starting at index
/// `period - 1`; the first element is the SMA seed.  Returns an empty `Vec`
/// when the input is shorter than `period` or the period is zero.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let multiplier = 2.0 / (period + 1) as f64;

    // Seed: SMA of the first `period` values.
    let seed = values[..period].iter().sum::<f64>() / period as f64;

    let mut result = Vec::with_capacity(values.len() - period + 1);
    result.push(seed);

    let mut prev = seed;
    for &value in &values[period..] {
        let next = value * multiplier + prev * (1.0 - multiplier);
        result.push(next);
        prev = next;
    }

    result
}

/// Most recent EMA value for `values` and `period`.
///
/// Same short-series degradation as [`sma`].
pub fn ema(values: &[f64], period: usize) -> f64 {
    match ema_series(values, period).last() {
        Some(&value) => value,
        None => latest_or_zero(values),
    }
}
