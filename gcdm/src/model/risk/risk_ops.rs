//! Monte Carlo travel time risk: sampling, disruption shocks and CVaR.
use super::RiskError;
use crate::config::RiskConfig;
use gcdm_core::util::stats_ops;
use rand::distributions::Distribution;
use rand::Rng;
use statrs::distribution::Normal;

/// draws `n` independent normal travel times truncated below at `lower`.
/// a non-positive `sd` yields `n` copies of the (truncated) mean.
///
/// # Arguments
///
/// * `mean` - mean travel time in minutes
/// * `sd` - standard deviation in minutes
/// * `n` - number of samples
/// * `lower` - truncation floor, normally 0
/// * `rng` - random source, seeded by the caller for reproducibility
pub fn gaussian_samples<R: Rng + ?Sized>(
    mean: f64,
    sd: f64,
    n: usize,
    lower: f64,
    rng: &mut R,
) -> Result<Vec<f64>, RiskError> {
    if !mean.is_finite() {
        return Err(RiskError::InvalidMean(mean));
    }
    if sd.is_nan() || sd.is_infinite() {
        return Err(RiskError::InvalidStandardDeviation(sd));
    }
    if sd <= 0.0 {
        return Ok(vec![mean.max(lower); n]);
    }
    let dist = Normal::new(mean, sd).map_err(|e| RiskError::DistributionError(e.to_string()))?;
    let samples = (0..n).map(|_| dist.sample(rng).max(lower)).collect();
    Ok(samples)
}

/// adds `minutes` to each sample independently with probability `prob`.
///
/// one uniform draw is taken per sample whatever the parameters, so two runs from
/// the same seed see the same random numbers and shock sets nest as `prob` grows.
pub fn apply_shocks<R: Rng + ?Sized>(samples: &[f64], prob: f64, minutes: f64, rng: &mut R) -> Vec<f64> {
    samples
        .iter()
        .map(|s| {
            let u: f64 = rng.gen();
            if u < prob && minutes > 0.0 {
                s + minutes
            } else {
                *s
            }
        })
        .collect()
}

/// conditional value at risk: mean of the samples at or above the alpha-quantile.
/// 0 for empty input.
pub fn cvar(samples: &[f64], alpha: f64) -> f64 {
    let q = match stats_ops::quantile(samples, alpha) {
        Some(q) => q,
        None => return 0.0,
    };
    let tail: Vec<f64> = samples.iter().copied().filter(|s| *s >= q).collect();
    if tail.is_empty() {
        q
    } else {
        stats_ops::mean(&tail)
    }
}

/// tail premium over the expectation, 0 for empty input.
pub fn cvar_minus_mean(samples: &[f64], alpha: f64) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    cvar(samples, alpha) - stats_ops::mean(samples)
}

/// risk-weighted tail minutes of an access leg plus an airport process leg after
/// injecting incident shocks into access and rail disruption shocks into process.
/// returns `rho * (tail premium of access + tail premium of process)`.
pub fn risk_with_shocks<R: Rng + ?Sized>(
    risk: &RiskConfig,
    access_samples: &[f64],
    process_samples: &[f64],
    rng: &mut R,
) -> f64 {
    let shocks = &risk.shocks;
    let access = apply_shocks(access_samples, shocks.incident_prob, shocks.incident_minutes, rng);
    let process = apply_shocks(
        process_samples,
        shocks.rail_disruption_prob,
        shocks.rail_disruption_minutes,
        rng,
    );
    let delta_access = cvar_minus_mean(&access, risk.alpha);
    let delta_process = cvar_minus_mean(&process, risk.alpha);
    risk.rho * (delta_access + delta_process)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RiskMultipliers, ShockConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn risk_config(prob: f64, minutes: f64) -> RiskConfig {
        RiskConfig {
            alpha: 0.9,
            rho: 1.0,
            multipliers: RiskMultipliers::default(),
            shocks: ShockConfig {
                incident_prob: prob,
                incident_minutes: minutes,
                rail_disruption_prob: prob,
                rail_disruption_minutes: minutes,
            },
            n_samples: 2000,
        }
    }

    #[test]
    fn test_samples_truncated() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = gaussian_samples(5.0, 20.0, 2000, 0.0, &mut rng).expect("test invariant");
        assert_eq!(samples.len(), 2000);
        assert!(samples.iter().all(|s| *s >= 0.0));
        assert!(samples.iter().any(|s| *s == 0.0));
    }

    #[test]
    fn test_degenerate_and_invalid() {
        let mut rng = StdRng::seed_from_u64(7);
        let samples = gaussian_samples(12.0, 0.0, 10, 0.0, &mut rng).expect("test invariant");
        assert!(samples.iter().all(|s| *s == 12.0));
        assert!(gaussian_samples(f64::NAN, 1.0, 10, 0.0, &mut rng).is_err());
        assert!(gaussian_samples(10.0, f64::NAN, 10, 0.0, &mut rng).is_err());
    }

    #[test]
    fn test_cvar_at_least_quantile() {
        let mut rng = StdRng::seed_from_u64(11);
        let samples = gaussian_samples(60.0, 15.0, 2000, 0.0, &mut rng).expect("test invariant");
        for alpha in [0.5, 0.9, 0.95, 0.99] {
            let q = stats_ops::quantile(&samples, alpha).expect("test invariant");
            assert!(cvar(&samples, alpha) >= q);
        }
        assert!(cvar_minus_mean(&samples, 0.9) > 0.0);
    }

    #[test]
    fn test_cvar_edge_cases() {
        assert_eq!(cvar(&[], 0.9), 0.0);
        assert_eq!(cvar_minus_mean(&[], 0.9), 0.0);
        assert_eq!(cvar(&[4.0, 4.0, 4.0], 0.9), 4.0);
        // quantile 3.7, tail {4}
        assert!((cvar(&[1.0, 2.0, 3.0, 4.0], 0.9) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_shocks_consume_one_draw_per_sample() {
        let samples = vec![10.0; 50];
        let mut a = StdRng::seed_from_u64(3);
        let mut b = StdRng::seed_from_u64(3);
        let _ = apply_shocks(&samples, 0.0, 0.0, &mut a);
        let _ = apply_shocks(&samples, 0.5, 30.0, &mut b);
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }

    #[test]
    fn test_risk_monotone_in_shocks() {
        let mut rng = StdRng::seed_from_u64(2025);
        let access = gaussian_samples(60.0, 10.0, 2000, 0.0, &mut rng).expect("test invariant");
        let process = gaussian_samples(25.0, 5.0, 2000, 0.0, &mut rng).expect("test invariant");
        let probs = [0.0, 0.01, 0.03, 0.05];
        let magnitudes = [0.0, 30.0, 60.0, 90.0];
        let risk = |p: f64, m: f64| {
            let mut shock_rng = StdRng::seed_from_u64(99);
            risk_with_shocks(&risk_config(p, m), &access, &process, &mut shock_rng)
        };
        for m in magnitudes {
            for w in probs.windows(2) {
                assert!(risk(w[1], m) >= risk(w[0], m) - 1e-9, "prob {w:?} at {m} minutes");
            }
        }
        for p in probs {
            for w in magnitudes.windows(2) {
                assert!(risk(p, w[1]) >= risk(p, w[0]) - 1e-9, "minutes {w:?} at prob {p}");
            }
        }
    }

    #[test]
    fn test_zero_rho_is_riskless() {
        let mut rng = StdRng::seed_from_u64(5);
        let access = gaussian_samples(60.0, 10.0, 500, 0.0, &mut rng).expect("test invariant");
        let mut conf = risk_config(0.05, 60.0);
        conf.rho = 0.0;
        assert_eq!(risk_with_shocks(&conf, &access, &access, &mut rng), 0.0);
    }
}
