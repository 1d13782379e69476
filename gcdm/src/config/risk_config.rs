use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// tail quantile for CVaR, in (0, 1)
    pub alpha: f64,
    /// risk aversion, scales the tail premium
    pub rho: f64,
    #[serde(default)]
    pub multipliers: RiskMultipliers,
    #[serde(default)]
    pub shocks: ShockConfig,
    /// Monte Carlo samples drawn per leg
    #[serde(default = "RiskConfig::default_n_samples")]
    pub n_samples: usize,
}

impl RiskConfig {
    pub const DEFAULT_N_SAMPLES: usize = 2000;

    fn default_n_samples() -> usize {
        Self::DEFAULT_N_SAMPLES
    }
}

/// static context multipliers applied on top of any live provider signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskMultipliers {
    #[serde(default = "one")]
    pub weather: f64,
    #[serde(default = "one")]
    pub event: f64,
    #[serde(default = "one")]
    pub construction: f64,
}

impl RiskMultipliers {
    pub fn product(&self) -> f64 {
        self.weather * self.event * self.construction
    }
}

impl Default for RiskMultipliers {
    fn default() -> Self {
        Self {
            weather: 1.0,
            event: 1.0,
            construction: 1.0,
        }
    }
}

fn one() -> f64 {
    1.0
}

/// discrete disruption events layered on continuous travel time variability.
/// incidents apply to the access leg, rail disruptions to the process leg.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ShockConfig {
    #[serde(default)]
    pub incident_prob: f64,
    #[serde(default)]
    pub incident_minutes: f64,
    #[serde(default)]
    pub rail_disruption_prob: f64,
    #[serde(default)]
    pub rail_disruption_minutes: f64,
}
