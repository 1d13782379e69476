use super::Itinerary;
use crate::config::QsiConfig;
use chrono::NaiveTime;

/// connection hub risk inputs for one itinerary. configured hub values take
/// precedence over those carried by the itinerary, then engine defaults apply.
#[derive(Debug, Clone, PartialEq)]
pub struct HubInputs {
    pub mct: f64,
    pub wx_risk: f64,
    pub capacity_risk: f64,
    pub bank_times: Vec<NaiveTime>,
}

impl HubInputs {
    pub fn resolve(conf: &QsiConfig, itinerary: &Itinerary) -> HubInputs {
        let hub = conf.hub_risks.get(&itinerary.hub.to_uppercase());
        let mct = hub
            .and_then(|h| h.mct)
            .or(itinerary.hub_mct)
            .unwrap_or(conf.default_mct);
        let wx_risk = hub
            .and_then(|h| h.wx_risk)
            .or(itinerary.hub_wx_risk)
            .unwrap_or(conf.default_wx_risk);
        let capacity_risk = hub
            .and_then(|h| h.capacity_risk)
            .or(itinerary.hub_capacity_risk)
            .unwrap_or(conf.default_capacity_risk);
        let bank_strings = match hub {
            Some(h) if !h.bank_times.is_empty() => &h.bank_times,
            _ => &itinerary.hub_bank_times,
        };
        let bank_times = bank_strings
            .iter()
            .filter_map(|s| match parse_time_of_day(s) {
                Some(t) => Some(t),
                None => {
                    log::warn!("ignoring invalid bank time '{s}' at hub {}", itinerary.hub);
                    None
                }
            })
            .collect();
        HubInputs {
            mct,
            wx_risk,
            capacity_risk,
            bank_times,
        }
    }
}

/// "HH:MM" or "HH:MM:SS"
fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value.trim(), "%H:%M:%S"))
        .ok()
}
