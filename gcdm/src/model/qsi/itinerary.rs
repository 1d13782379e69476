use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// a candidate flight path from a study airport through a connecting hub.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub origin_airport: String,
    pub hub: String,
    pub dest: String,
    #[serde(default)]
    pub mode_access: Option<String>,
    pub block_minutes: f64,
    pub layover_minutes: f64,
    /// shortest comfortable layover
    #[serde(alias = "L_star")]
    pub l_star: f64,
    /// longest tolerable layover
    #[serde(alias = "U_star")]
    pub u_star: f64,
    /// transfer stress in [0, 1]
    #[serde(alias = "sk", default)]
    pub stress: f64,
    #[serde(alias = "tdep_iso")]
    pub departure: DateTime<FixedOffset>,
    #[serde(alias = "tarr_iso")]
    pub arrival: DateTime<FixedOffset>,
    pub cancel_rate: f64,
    /// mean positive arrival delay in minutes
    pub delay_pos_mean: f64,
    pub delay_var: f64,
    #[serde(alias = "hub_WxRisk", default)]
    pub hub_wx_risk: Option<f64>,
    #[serde(alias = "hub_CapacityRisk", default)]
    pub hub_capacity_risk: Option<f64>,
    #[serde(alias = "hub_MCT", default)]
    pub hub_mct: Option<f64>,
    #[serde(default)]
    pub hub_bank_times: Vec<String>,
    pub reprotect_time_mean: f64,
    #[serde(default)]
    pub n_alternates_window: u32,
    pub seat_pitch: f64,
    #[serde(default)]
    pub wifi_rel: f64,
    #[serde(deserialize_with = "deserialize_flag", default)]
    pub is_widebody: bool,
    #[serde(deserialize_with = "deserialize_flag", default)]
    pub is_priority: bool,
    #[serde(deserialize_with = "deserialize_flag", default)]
    pub has_lounge: bool,
    #[serde(deserialize_with = "deserialize_flag", default)]
    pub has_precheck: bool,
    pub price_mean: f64,
    #[serde(default)]
    pub price_ancillary: f64,
    #[serde(default)]
    pub price_rebates: f64,
    pub seats_available: u32,
    #[serde(default)]
    pub dupcount: u32,
    #[serde(default)]
    pub loadfactor_risk: f64,
    #[serde(default)]
    pub bag_miss_prob: f64,
}

impl Itinerary {
    /// two example connections out of HVN, used when no itineraries are supplied.
    pub fn demo_itineraries() -> Result<Vec<Itinerary>, serde_json::Error> {
        serde_json::from_str(include_str!("../../resources/demo_itineraries.json"))
    }
}

/// accepts JSON booleans or 0/1 numbers.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Float(f64),
    }
    let flag = match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Int(i) => i != 0,
        Flag::Float(f) => f != 0.0,
    };
    Ok(flag)
}
