use crate::model::travel::TravelMode;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "ProjectConfig::default_name")]
    pub name: String,
    /// seeds all Monte Carlo sampling. when absent, runs are not reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
    /// size of the worker pool used for origins. defaults to the number of cores.
    #[serde(default)]
    pub processes: Option<usize>,
}

impl ProjectConfig {
    fn default_name() -> String {
        String::from("gcdm")
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: Self::default_name(),
            seed: None,
            processes: None,
        }
    }
}

/// the airports and modes under study.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    pub airports: Vec<String>,
    pub modes: Vec<TravelMode>,
    /// airport compared against the best alternative when computing the delta
    #[serde(default = "RegionConfig::default_home_airport")]
    pub home_airport: String,
}

impl RegionConfig {
    fn default_home_airport() -> String {
        String::from("HVN")
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Luggage {
    #[default]
    None,
    Carry,
    Checked,
}

impl Luggage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Luggage::None => "none",
            Luggage::Carry => "carry",
            Luggage::Checked => "checked",
        }
    }
}

impl Display for Luggage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// attributes of the trip being costed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripConfig {
    #[serde(default)]
    pub luggage: Luggage,
    /// number of access legs, 1 for one-way and 2 for a round trip
    #[serde(default = "TripConfig::default_legs")]
    pub legs: u32,
    /// length of stay, used for parking charges
    #[serde(default = "TripConfig::default_duration_days")]
    pub duration_days: f64,
}

impl TripConfig {
    fn default_legs() -> u32 {
        1
    }
    fn default_duration_days() -> f64 {
        3.0
    }
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            luggage: Luggage::None,
            legs: Self::default_legs(),
            duration_days: Self::default_duration_days(),
        }
    }
}
