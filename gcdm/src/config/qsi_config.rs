use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// parameters of the itinerary scoring engine. every coefficient has a default so that
/// an empty `qsi` section is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QsiConfig {
    /// softmin sharpness across access modes
    pub mu_access: f64,
    pub beta_access: f64,
    pub beta_delay: f64,
    pub beta_variance: f64,
    pub beta_weather: f64,
    pub beta_capacity: f64,
    pub beta_rec: f64,
    /// bonus per alternate flight available for reprotection
    pub xi: f64,
    pub beta_quality: f64,
    pub quality_weights: QualityWeights,
    pub beta_ffp: f64,
    pub beta_lounge: f64,
    pub beta_pre: f64,
    pub beta_scar: f64,
    pub beta_bank: f64,
    pub bank_window_w: f64,
    pub beta_mct: f64,
    pub beta_bag: f64,
    pub beta_connection: f64,
    pub beta_hod: f64,
    pub layover: LayoverParams,
    pub hod: HodParams,
    /// minutes of excess layover per e-fold of the misconnect curve
    pub misconnect_scale_minutes: f64,
    pub default_mct: f64,
    pub default_wx_risk: f64,
    pub default_capacity_risk: f64,
    /// price factor applied when the effective fare exceeds the segment's reservation price
    pub unavailable_factor: f64,
    pub states: Vec<QsiState>,
    pub segments: Vec<QsiSegment>,
    /// keyed by hub airport code
    pub hub_risks: HashMap<String, HubRisk>,
}

impl Default for QsiConfig {
    fn default() -> Self {
        Self {
            mu_access: 0.2,
            beta_access: 0.03,
            beta_delay: 0.02,
            beta_variance: 0.01,
            beta_weather: 0.02,
            beta_capacity: 0.02,
            beta_rec: 0.02,
            xi: 0.15,
            beta_quality: 0.02,
            quality_weights: QualityWeights::default(),
            beta_ffp: 0.01,
            beta_lounge: 0.01,
            beta_pre: 0.01,
            beta_scar: 0.02,
            beta_bank: 0.02,
            bank_window_w: 1.0,
            beta_mct: 0.03,
            beta_bag: 0.02,
            beta_connection: 0.02,
            beta_hod: 0.02,
            layover: LayoverParams::default(),
            hod: HodParams::default(),
            misconnect_scale_minutes: 20.0,
            default_mct: 40.0,
            default_wx_risk: 0.2,
            default_capacity_risk: 0.3,
            unavailable_factor: 0.3,
            states: vec![],
            segments: vec![],
            hub_risks: HashMap::new(),
        }
    }
}

impl QsiConfig {
    /// the configured segment with this name, or the default segment parameters.
    pub fn segment(&self, name: &str) -> QsiSegment {
        self.segments
            .iter()
            .find(|s| s.name == name)
            .cloned()
            .unwrap_or_else(|| QsiSegment::with_defaults(name))
    }

    /// configured market states with weights normalized to sum to 1.
    /// with no states configured, a single neutral base state is used.
    pub fn normalized_states(&self) -> Vec<QsiState> {
        if self.states.is_empty() {
            return vec![QsiState::base()];
        }
        let total: f64 = self.states.iter().map(|s| s.weight).sum();
        let denom = total.max(1e-6);
        self.states
            .iter()
            .map(|s| QsiState {
                weight: s.weight / denom,
                ..s.clone()
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityWeights {
    pub w_seat: f64,
    pub w_wifi: f64,
    pub w_ac: f64,
    pub w_prio: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            w_seat: 0.5,
            w_wifi: 0.2,
            w_ac: 0.2,
            w_prio: 0.1,
        }
    }
}

/// penalty slopes for layovers shorter than L*, longer than U*, and for transfer stress.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoverParams {
    pub alpha_short: f64,
    pub alpha_long: f64,
    pub alpha_stress: f64,
}

impl Default for LayoverParams {
    fn default() -> Self {
        Self {
            alpha_short: 0.03,
            alpha_long: 0.01,
            alpha_stress: 0.02,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HodParams {
    pub eta_red_eye: f64,
    pub eta_curfew: f64,
}

impl Default for HodParams {
    fn default() -> Self {
        Self {
            eta_red_eye: 0.1,
            eta_curfew: 0.05,
        }
    }
}

/// a market condition, e.g. peak season, mixing price and delay adjustments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QsiState {
    pub name: String,
    #[serde(default = "one")]
    pub weight: f64,
    #[serde(default = "one")]
    pub price_multiplier: f64,
    #[serde(default)]
    pub delay_mean_add: f64,
    #[serde(default = "one")]
    pub delay_var_mult: f64,
}

impl QsiState {
    pub fn base() -> QsiState {
        QsiState {
            name: String::from("base"),
            weight: 1.0,
            price_multiplier: 1.0,
            delay_mean_add: 0.0,
            delay_var_mult: 1.0,
        }
    }
}

/// a traveller segment, e.g. business or leisure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QsiSegment {
    pub name: String,
    #[serde(default = "one")]
    pub weight: f64,
    #[serde(default = "QsiSegment::default_beta_price")]
    pub beta_price: f64,
    /// reservation price in USD
    #[serde(default = "QsiSegment::default_p_star")]
    pub p_star: f64,
    #[serde(default = "QsiSegment::default_seats_threshold")]
    pub seats_threshold: u32,
    /// decay per minute of block plus layover time
    #[serde(default = "QsiSegment::default_beta_time")]
    pub beta_time: f64,
}

impl QsiSegment {
    fn default_beta_price() -> f64 {
        0.01
    }
    fn default_p_star() -> f64 {
        300.0
    }
    fn default_seats_threshold() -> u32 {
        2
    }
    fn default_beta_time() -> f64 {
        0.01
    }

    pub fn with_defaults(name: &str) -> QsiSegment {
        QsiSegment {
            name: name.to_string(),
            weight: 1.0,
            beta_price: Self::default_beta_price(),
            p_star: Self::default_p_star(),
            seats_threshold: Self::default_seats_threshold(),
            beta_time: Self::default_beta_time(),
        }
    }
}

fn one() -> f64 {
    1.0
}

/// connection hub risk inputs. absent values fall back to the itinerary's own fields.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct HubRisk {
    #[serde(default)]
    pub wx_risk: Option<f64>,
    #[serde(default)]
    pub capacity_risk: Option<f64>,
    /// minimum connect time in minutes
    #[serde(default)]
    pub mct: Option<f64>,
    /// bank times of day, "HH:MM"
    #[serde(default)]
    pub bank_times: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_weights_normalized() {
        let mut conf = QsiConfig::default();
        conf.states = vec![
            QsiState {
                name: String::from("peak"),
                weight: 3.0,
                price_multiplier: 1.4,
                delay_mean_add: 10.0,
                delay_var_mult: 1.5,
            },
            QsiState {
                weight: 1.0,
                ..QsiState::base()
            },
        ];
        let states = conf.normalized_states();
        assert!((states[0].weight - 0.75).abs() < 1e-12);
        assert!((states[1].weight - 0.25).abs() < 1e-12);
        assert_eq!(states[0].price_multiplier, 1.4);
    }

    #[test]
    fn test_empty_states_use_base() {
        let states = QsiConfig::default().normalized_states();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].name, "base");
        assert_eq!(states[0].weight, 1.0);
    }

    #[test]
    fn test_unknown_segment_defaults() {
        let seg = QsiConfig::default().segment("unknown");
        assert_eq!(seg.weight, 1.0);
        assert_eq!(seg.beta_price, 0.01);
        assert_eq!(seg.p_star, 300.0);
        assert_eq!(seg.seats_threshold, 2);
        assert_eq!(seg.beta_time, 0.01);
    }
}
