use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// per-mode cost tables.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ModesConfig {
    #[serde(default)]
    pub drive: DriveModeConfig,
    #[serde(default)]
    pub ride: RideModeConfig,
    #[serde(default)]
    pub rail: RailModeConfig,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DriveCostConfig {
    /// vehicle operating cost in USD per mile
    #[serde(default)]
    pub cmile: f64,
    #[serde(default)]
    pub remote_lot_fee: f64,
    #[serde(default)]
    pub shuttle_fee: f64,
    #[serde(default)]
    pub fare_risk: f64,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DriveModeConfig {
    #[serde(default)]
    pub cost: DriveCostConfig,
    /// parking rates in USD keyed by airport code
    #[serde(default)]
    pub parking_daily: HashMap<String, f64>,
    #[serde(default)]
    pub parking_weekly: HashMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RideModeConfig {
    #[serde(default = "one")]
    pub surge: f64,
    #[serde(default)]
    pub base_fare: f64,
    #[serde(default)]
    pub per_mile: f64,
    #[serde(default)]
    pub per_minute: f64,
    #[serde(default)]
    pub booking_fee: f64,
    #[serde(default)]
    pub tip_fraction: f64,
    #[serde(default)]
    pub fare_risk: f64,
}

impl Default for RideModeConfig {
    fn default() -> Self {
        Self {
            surge: 1.0,
            base_fare: 0.0,
            per_mile: 0.0,
            per_minute: 0.0,
            booking_fee: 0.0,
            tip_fraction: 0.0,
            fare_risk: 0.0,
        }
    }
}

fn one() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RailModeConfig {
    #[serde(default)]
    pub adult_fare_default: f64,
    #[serde(default)]
    pub child_fare_default: f64,
    #[serde(default)]
    pub transfer_fare: f64,
    /// airport people-mover fares keyed by airport code, 0 when absent
    #[serde(default)]
    pub airtrain: HashMap<String, f64>,
    #[serde(default)]
    pub station_parking: f64,
    #[serde(default)]
    pub miss_prob_base: f64,
    /// change in miss probability per minute of connection slack
    #[serde(default)]
    pub miss_slope: f64,
    #[serde(default = "RailModeConfig::default_miss_slack_minutes")]
    pub miss_slack_minutes: f64,
    #[serde(default = "RailModeConfig::default_headway_minutes")]
    pub headway_minutes: f64,
}

impl RailModeConfig {
    fn default_miss_slack_minutes() -> f64 {
        5.0
    }
    fn default_headway_minutes() -> f64 {
        30.0
    }
}

impl Default for RailModeConfig {
    fn default() -> Self {
        Self {
            adult_fare_default: 0.0,
            child_fare_default: 0.0,
            transfer_fare: 0.0,
            airtrain: HashMap::new(),
            station_parking: 0.0,
            miss_prob_base: 0.0,
            miss_slope: 0.0,
            miss_slack_minutes: Self::default_miss_slack_minutes(),
            headway_minutes: Self::default_headway_minutes(),
        }
    }
}
