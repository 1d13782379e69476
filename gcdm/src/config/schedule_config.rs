use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// acceptable curb arrival interval at an airport, as ISO-8601 timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurbWindowConfig {
    pub tmin: String,
    pub tmax: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// ISO-8601 departure timestamp
    #[serde(default)]
    pub t_depart_iso: Option<String>,
    /// curb windows keyed by airport code
    #[serde(default)]
    pub curb_windows: HashMap<String, CurbWindowConfig>,
    /// USD-equivalent minutes per minute of arriving before the window
    #[serde(default = "ScheduleConfig::default_theta_early")]
    pub theta_early: f64,
    /// USD-equivalent minutes per minute of arriving after the window
    #[serde(default = "ScheduleConfig::default_theta_late")]
    pub theta_late: f64,
}

impl ScheduleConfig {
    fn default_theta_early() -> f64 {
        1.0
    }
    fn default_theta_late() -> f64 {
        2.0
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            t_depart_iso: None,
            curb_windows: HashMap::new(),
            theta_early: Self::default_theta_early(),
            theta_late: Self::default_theta_late(),
        }
    }
}
