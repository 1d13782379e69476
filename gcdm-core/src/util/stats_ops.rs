//! summary statistics over sample vectors.

/// arithmetic mean, NaN for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// the `q`-quantile of a set of values using linear interpolation between
/// the closest ranks, matching the conventional "linear" method. returns
/// None for empty input.
///
/// # Arguments
///
/// * `values` - unsorted values
/// * `q` - quantile in [0, 1], clamped if outside
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(quantile_sorted(&sorted, q))
}

/// as [`quantile`] but for values already sorted in ascending order.
/// the input must not be empty.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let q = clip(q, 0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let lo_value = sorted[lo];
    if lo == hi {
        lo_value
    } else {
        lo_value + (h - lo as f64) * (sorted[hi] - lo_value)
    }
}

/// restricts a value to [lower, upper].
pub fn clip(value: f64, lower: f64, upper: f64) -> f64 {
    value.max(lower).min(upper)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_constant() {
        assert_eq!(quantile(&[10.0, 10.0, 10.0], 0.75), Some(10.0));
    }

    #[test]
    fn test_quantile_interpolates() {
        // ranks 0..=3, q=0.75 -> h=2.25 -> 30 + 0.25 * 10
        let result = quantile(&[40.0, 10.0, 30.0, 20.0], 0.75).unwrap();
        assert!((result - 32.5).abs() < 1e-9);
        assert_eq!(quantile(&[1.0, 2.0, 3.0], 0.0), Some(1.0));
        assert_eq!(quantile(&[1.0, 2.0, 3.0], 1.0), Some(3.0));
    }

    #[test]
    fn test_quantile_empty() {
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_clip_and_mean() {
        assert_eq!(clip(1.5, 0.0, 0.9), 0.9);
        assert_eq!(clip(-0.1, 0.0, 0.9), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
        assert!(mean(&[]).is_nan());
    }
}
