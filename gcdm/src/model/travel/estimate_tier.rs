use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// source of a travel time estimate. cruder sources carry a wider spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateTier {
    Provider,
    Network,
    StraightLine,
}

impl EstimateTier {
    /// standard deviation as a fraction of the mean for drive-like estimates
    pub fn drive_sd_fraction(&self) -> f64 {
        match self {
            EstimateTier::Provider => 0.20,
            EstimateTier::Network => 0.25,
            EstimateTier::StraightLine => 0.30,
        }
    }
}

impl Display for EstimateTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EstimateTier::Provider => "provider",
            EstimateTier::Network => "network",
            EstimateTier::StraightLine => "straight_line",
        };
        write!(f, "{s}")
    }
}
