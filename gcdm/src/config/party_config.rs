use serde::{Deserialize, Serialize};

/// the travelling party and its value of time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyConfig {
    pub n_adults: u32,
    #[serde(default)]
    pub n_children: u32,
    pub v_adult_usd_per_hour: f64,
    #[serde(default)]
    pub v_child_usd_per_hour: f64,
    /// weight of a child's time relative to an adult's when missing a connection
    #[serde(default = "PartyConfig::default_lambda_child")]
    pub lambda_child_time_weight: f64,
}

impl PartyConfig {
    fn default_lambda_child() -> f64 {
        1.0
    }

    /// combined value of time of the party, in USD per minute
    pub fn vot_per_minute(&self) -> f64 {
        (self.n_adults as f64 * self.v_adult_usd_per_hour
            + self.n_children as f64 * self.v_child_usd_per_hour)
            / 60.0
    }

    pub fn size(&self) -> u32 {
        self.n_adults + self.n_children
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotBand {
    pub name: String,
    /// USD per minute while travelling in this band
    pub minutes_value: f64,
}

/// time-of-day valuation bands. recognized names are "peak", "offpeak" and "night".
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct VotConfig {
    #[serde(default)]
    pub tod_bands: Vec<VotBand>,
}

impl VotConfig {
    pub fn band_value(&self, name: &str) -> Option<f64> {
        self.tod_bands
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.minutes_value)
    }
}
