//! Order statistics over per-trial pull counts.

/// Summary of terminal pull counts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PullStats {
    /// Unrounded arithmetic mean.
    pub mean: f64,
    /// Element at index `n / 2` of the sorted counts.
    pub median: u64,
    /// Element at index `floor(0.9 * n)` of the sorted counts.
    pub percentile_90: u64,
}

/// Sort `pulls` ascending and summarize. `None` when empty.
pub fn summarize(pulls: &mut [u64]) -> Option<PullStats> {
    if pulls.is_empty() {
        return None;
    }
    pulls.sort_unstable();
    let n = pulls.len();
    let sum: u128 = pulls.iter().map(|&p| u128::from(p)).sum();
    let mean = sum as f64 / n as f64;
    let p90_idx = ((n as f64 * 0.9).floor() as usize).min(n - 1);
    Some(PullStats {
        mean,
        median: pulls[n / 2],
        percentile_90: pulls[p90_idx],
    })
}

/// Mean of `values`, 0 when empty.
pub fn mean(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: u128 = values.iter().map(|&v| u128::from(v)).sum();
    sum as f64 / values.len() as f64
}

/// Round to one decimal place, halves away from zero.
pub fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
