//! smooth minimum blending of competing costs.

/// smooth minimum `-1/mu * ln(sum(exp(-mu * v)))`, evaluated with a log-sum-exp
/// shift by the minimum so large costs do not underflow. always <= min(values)
/// and approaches it as mu grows. NaN for empty input.
pub fn softmin(values: &[f64], mu: f64) -> f64 {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    if values.is_empty() || !min.is_finite() {
        return f64::NAN;
    }
    let sum: f64 = values.iter().map(|v| (-mu * (v - min)).exp()).sum();
    min - sum.ln() / mu
}

/// softmin over the finite values only, NaN if none are finite.
pub fn softmin_finite(values: &[f64], mu: f64) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    softmin(&finite, mu)
}

/// minimum ignoring NaN values, NaN if no value is a number.
pub fn nan_min(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f64::NAN, f64::min)
}

/// advantage of the home option over the best alternative, negative when home is cheaper.
/// NaN when either side is not finite.
pub fn delta(home: f64, alternatives: &[f64]) -> f64 {
    let best = nan_min(alternatives);
    if home.is_finite() && best.is_finite() {
        home - best
    } else {
        f64::NAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmin_bounded_by_min() {
        let values = [120.0, 95.5, 300.0];
        for mu in [0.01, 0.1, 1.0, 10.0] {
            assert!(softmin(&values, mu) <= 95.5);
        }
        assert!((softmin(&values, 1000.0) - 95.5).abs() < 1e-6);
    }

    #[test]
    fn test_softmin_stable_for_large_costs() {
        let result = softmin(&[1e6, 1e6], 1.0);
        assert!((result - (1e6 - 2f64.ln())).abs() < 1e-6);
    }

    #[test]
    fn test_softmin_finite_ignores_nan() {
        let result = softmin_finite(&[f64::NAN, 50.0, f64::INFINITY], 0.5);
        assert!((result - 50.0).abs() < 1e-12);
        assert!(softmin_finite(&[f64::NAN], 0.5).is_nan());
        assert!(softmin(&[], 0.5).is_nan());
    }

    #[test]
    fn test_delta() {
        assert_eq!(delta(100.0, &[120.0, f64::NAN, 90.0]), 10.0);
        assert!(delta(f64::NAN, &[120.0]).is_nan());
        assert!(delta(100.0, &[f64::NAN]).is_nan());
        assert!(delta(100.0, &[]).is_nan());
    }
}
