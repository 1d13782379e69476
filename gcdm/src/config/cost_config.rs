use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// mean airport processing times in minutes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessTimesConfig {
    /// keyed by airport code
    #[serde(default)]
    pub security_mean: HashMap<String, f64>,
    /// keyed by luggage class (none, carry, checked)
    #[serde(default)]
    pub bag_drop_mean: HashMap<String, f64>,
    /// keyed by airport code
    #[serde(default)]
    pub walk_mean: HashMap<String, f64>,
    #[serde(default = "ProcessTimesConfig::default_security")]
    pub default_security: f64,
    #[serde(default)]
    pub default_bag_drop: f64,
    #[serde(default = "ProcessTimesConfig::default_walk")]
    pub default_walk: f64,
}

impl ProcessTimesConfig {
    fn default_security() -> f64 {
        15.0
    }
    fn default_walk() -> f64 {
        10.0
    }
}

impl Default for ProcessTimesConfig {
    fn default() -> Self {
        Self {
            security_mean: HashMap::new(),
            bag_drop_mean: HashMap::new(),
            walk_mean: HashMap::new(),
            default_security: Self::default_security(),
            default_bag_drop: 0.0,
            default_walk: Self::default_walk(),
        }
    }
}

/// minutes charged for transfer friction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    #[serde(default = "TransferConfig::default_bag_check_minutes")]
    pub bag_check_minutes: f64,
    /// scaled by risk aversion
    #[serde(default = "TransferConfig::default_bag_risk_minutes")]
    pub bag_risk_minutes: f64,
    /// per access leg
    #[serde(default = "TransferConfig::default_friction_minutes")]
    pub friction_minutes: f64,
}

impl TransferConfig {
    fn default_bag_check_minutes() -> f64 {
        10.0
    }
    fn default_bag_risk_minutes() -> f64 {
        5.0
    }
    fn default_friction_minutes() -> f64 {
        5.0
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            bag_check_minutes: Self::default_bag_check_minutes(),
            bag_risk_minutes: Self::default_bag_risk_minutes(),
            friction_minutes: Self::default_friction_minutes(),
        }
    }
}

/// discomfort multipliers on in-vehicle time. 1.0 is neutral.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComfortConfig {
    #[serde(default = "one")]
    pub omega_peak: f64,
    #[serde(default = "one")]
    pub omega_night: f64,
}

impl Default for ComfortConfig {
    fn default() -> Self {
        Self {
            omega_peak: 1.0,
            omega_night: 1.0,
        }
    }
}

fn one() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarbonConfig {
    #[serde(default)]
    pub enabled: bool,
    /// USD per metric ton CO2
    #[serde(default = "CarbonConfig::default_social_cost")]
    pub social_cost_per_ton: f64,
    /// keyed by mode name, 0 when absent
    #[serde(default)]
    pub emissions_kg_per_mile: HashMap<String, f64>,
}

impl CarbonConfig {
    fn default_social_cost() -> f64 {
        190.0
    }
}

impl Default for CarbonConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            social_cost_per_ton: Self::default_social_cost(),
            emissions_kg_per_mile: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftminConfig {
    /// sharpness of the smooth minimum across modes. larger values approach the hard minimum.
    #[serde(default = "SoftminConfig::default_mu")]
    pub mu: f64,
}

impl SoftminConfig {
    fn default_mu() -> f64 {
        0.1
    }
}

impl Default for SoftminConfig {
    fn default() -> Self {
        Self {
            mu: Self::default_mu(),
        }
    }
}
