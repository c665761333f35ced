//! Weighted statistics primitives
//!
//! These functions never panic: malformed input is reported through
//! [`StatsError`] so callers decide how to contain it.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Length mismatch: x has {x} values, y has {y}")]
    LengthMismatch { x: usize, y: usize },

    #[error("Weight length mismatch: expected {expected}, got {actual}")]
    WeightLengthMismatch { expected: usize, actual: usize },

    #[error("No observations")]
    Empty,

    #[error("Sum of weights is not positive")]
    ZeroWeight,

    #[error("Zero variance in input")]
    ZeroVariance,

    #[error("Result is not finite")]
    NonFinite,
}

/// Weighted arithmetic mean of `values`
pub fn weighted_mean(values: &[f64], weights: &[f64]) -> Result<f64, StatsError> {
    if values.len() != weights.len() {
        return Err(StatsError::WeightLengthMismatch {
            expected: values.len(),
            actual: weights.len(),
        });
    }
    if values.is_empty() {
        return Err(StatsError::Empty);
    }

    let total: f64 = weights.iter().sum();
    if !(total > 0.0) {
        return Err(StatsError::ZeroWeight);
    }

    let sum: f64 = values.iter().zip(weights).map(|(v, w)| v * w).sum();
    Ok(sum / total)
}

/// Weighted Pearson correlation coefficient between `x` and `y`
///
/// Returns a value in [-1, 1]. Constant input has no defined correlation and
/// is reported as [`StatsError::ZeroVariance`].
pub fn weighted_correlation(
    x: &[f64],
    y: &[f64],
    weights: &[f64],
) -> Result<f64, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }

    let mean_x = weighted_mean(x, weights)?;
    let mean_y = weighted_mean(y, weights)?;

    if !mean_x.is_finite() || !mean_y.is_finite() {
        return Err(StatsError::NonFinite);
    }

    // Deviations are scaled into [-1, 1] so the squared sums cannot overflow
    let scale_x = max_deviation(x, mean_x);
    let scale_y = max_deviation(y, mean_y);
    if !scale_x.is_finite() || !scale_y.is_finite() {
        return Err(StatsError::NonFinite);
    }
    if scale_x == 0.0 || scale_y == 0.0 {
        return Err(StatsError::ZeroVariance);
    }

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for ((&xi, &yi), &w) in x.iter().zip(y).zip(weights) {
        let dx = (xi - mean_x) / scale_x;
        let dy = (yi - mean_y) / scale_y;
        sxy += w * dx * dy;
        sxx += w * dx * dx;
        syy += w * dy * dy;
    }

    let den = (sxx * syy).sqrt();
    if den == 0.0 {
        return Err(StatsError::ZeroVariance);
    }

    let r = sxy / den;
    if !r.is_finite() {
        return Err(StatsError::NonFinite);
    }
    // Rounding can push |r| a hair past 1
    Ok(r.clamp(-1.0, 1.0))
}

fn max_deviation(values: &[f64], mean: f64) -> f64 {
    values
        .iter()
        .map(|v| (v - mean).abs())
        .fold(0.0, f64::max)
}
