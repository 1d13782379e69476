use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// ground access mode from an origin to an airport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Drive,
    Ride,
    Rail,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Drive => "drive",
            TravelMode::Ride => "ride",
            TravelMode::Rail => "rail",
        }
    }
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drive" => Ok(TravelMode::Drive),
            "ride" | "rideshare" => Ok(TravelMode::Ride),
            "rail" => Ok(TravelMode::Rail),
            other => Err(format!("unknown travel mode '{other}'")),
        }
    }
}
