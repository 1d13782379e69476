//! multiplicative factors of an itinerary's weight. each factor is 1 for a neutral
//! itinerary and decays with its penalty.
use super::{HubInputs, Itinerary};
use crate::config::{HodParams, LayoverParams, QsiConfig, QsiSegment, QsiState};
use chrono::{DateTime, FixedOffset, Timelike};
use gcdm_core::util::stats_ops;

/// exp(-beta * gc_soft), the share of demand retained after paying the access cost.
pub fn access_factor(beta_access: f64, gc_soft: f64) -> f64 {
    (-beta_access * gc_soft).exp()
}

/// decay with total scheduled time.
pub fn schedule_factor(segment: &QsiSegment, itinerary: &Itinerary) -> f64 {
    (-segment.beta_time * (itinerary.block_minutes + itinerary.layover_minutes)).exp()
}

/// penalty for layovers outside the comfortable band [L*, U*] plus transfer stress.
pub fn layover_penalty(params: &LayoverParams, itinerary: &Itinerary) -> f64 {
    let layover = itinerary.layover_minutes;
    params.alpha_short * (itinerary.l_star - layover).max(0.0)
        + params.alpha_long * (layover - itinerary.u_star).max(0.0)
        + params.alpha_stress * itinerary.stress
}

/// penalty for red-eye arrivals (before 06:00) and departures in curfew hours
/// (before 06:00 or after 22:59), using local wall-clock hours.
pub fn hod_penalty(
    params: &HodParams,
    departure: &DateTime<FixedOffset>,
    arrival: &DateTime<FixedOffset>,
) -> f64 {
    let red_eye = arrival.hour() < 6;
    let curfew = departure.hour() < 6 || departure.hour() > 22;
    let indicator = |b: bool| if b { 1.0 } else { 0.0 };
    params.eta_red_eye * indicator(red_eye) + params.eta_curfew * indicator(curfew)
}

/// probability of misconnecting as a function of the layover's excess over the minimum
/// connect time: `clip(1 - exp(-(L - MCT) / scale), 0, 1)`. zero for layovers at or
/// below the minimum connect time.
pub fn misconnect_probability(layover_minutes: f64, mct: f64, scale_minutes: f64) -> f64 {
    stats_ops::clip(1.0 - (-(layover_minutes - mct) / scale_minutes).exp(), 0.0, 1.0)
}

/// completion, misconnect, delay and hub risk factor under a market state.
pub fn reliability(conf: &QsiConfig, itinerary: &Itinerary, hub: &HubInputs, state: &QsiState) -> f64 {
    let completion = 1.0 - itinerary.cancel_rate;
    let pi_mis = misconnect_probability(itinerary.layover_minutes, hub.mct, conf.misconnect_scale_minutes);
    let delay = (itinerary.delay_pos_mean + state.delay_mean_add).max(0.0);
    let variance = (itinerary.delay_var * state.delay_var_mult).max(0.0);
    let delay_factor = (-conf.beta_delay * delay - conf.beta_variance * variance).exp();
    let hub_factor = (-conf.beta_weather * hub.wx_risk - conf.beta_capacity * hub.capacity_risk).exp();
    completion * (1.0 - pi_mis) * delay_factor * hub_factor
}

/// recovery after disruption: decays with reprotection time, grows with alternates.
pub fn reprotection(conf: &QsiConfig, itinerary: &Itinerary) -> f64 {
    let wait = (-conf.beta_rec * itinerary.reprotect_time_mean.max(0.0)).exp();
    wait * (1.0 + conf.xi * itinerary.n_alternates_window as f64)
}

/// in-flight product quality.
pub fn product_factor(conf: &QsiConfig, itinerary: &Itinerary) -> f64 {
    let w = &conf.quality_weights;
    let flag = |b: bool| if b { 1.0 } else { 0.0 };
    let quality = w.w_seat * itinerary.seat_pitch
        + w.w_wifi * itinerary.wifi_rel
        + w.w_ac * flag(itinerary.is_widebody)
        + w.w_prio * flag(itinerary.is_priority);
    (conf.beta_quality * quality).exp()
}

/// loyalty rebates, lounge access and expedited screening.
pub fn perks_factor(conf: &QsiConfig, itinerary: &Itinerary) -> f64 {
    let flag = |b: bool| if b { 1.0 } else { 0.0 };
    (conf.beta_ffp * itinerary.price_rebates
        + conf.beta_lounge * flag(itinerary.has_lounge)
        + conf.beta_pre * flag(itinerary.has_precheck))
    .exp()
}

/// price sensitivity and seat availability. an itinerary with fewer seats than the
/// segment needs cannot be booked and scores 0. fares above the segment's reservation
/// price are scaled by the configured unavailable factor.
pub fn price_availability(
    conf: &QsiConfig,
    segment: &QsiSegment,
    state: &QsiState,
    itinerary: &Itinerary,
) -> f64 {
    if itinerary.seats_available < segment.seats_threshold {
        return 0.0;
    }
    let effective = itinerary.price_mean * state.price_multiplier + itinerary.price_ancillary
        - itinerary.price_rebates;
    let availability = if effective <= segment.p_star {
        1.0
    } else {
        conf.unavailable_factor
    };
    availability * (-segment.beta_price * effective).exp()
}

/// share split among duplicate offerings and decay with load factor risk.
pub fn scarcity_factor(conf: &QsiConfig, itinerary: &Itinerary) -> f64 {
    let share = 1.0 / (1.0 + itinerary.dupcount as f64);
    share * (-conf.beta_scar * itinerary.loadfactor_risk.max(0.0)).exp()
}

/// alignment of the hub arrival with the nearest connection bank. 1 when the hub has
/// no banks.
pub fn bank_alignment(conf: &QsiConfig, itinerary: &Itinerary, hub: &HubInputs) -> f64 {
    let arrival = itinerary.arrival.time();
    let nearest = hub
        .bank_times
        .iter()
        .map(|bank| (arrival - *bank).num_seconds().abs() as f64 / 60.0)
        .fold(f64::INFINITY, f64::min);
    if !nearest.is_finite() {
        return 1.0;
    }
    (-conf.beta_bank * nearest / conf.bank_window_w.max(1e-3)).exp()
}

/// penalty for layovers shorter than the minimum connect time and for bag misrouting.
pub fn connect_factor(conf: &QsiConfig, itinerary: &Itinerary, hub: &HubInputs) -> f64 {
    let short = (hub.mct - itinerary.layover_minutes).max(0.0);
    (-conf.beta_mct * short).exp() * (-conf.beta_bag * itinerary.bag_miss_prob.max(0.0)).exp()
}

/// weight of one itinerary for a traveller segment under a market state.
pub fn itinerary_weight(
    conf: &QsiConfig,
    itinerary: &Itinerary,
    segment: &QsiSegment,
    state: &QsiState,
) -> f64 {
    let hub = HubInputs::resolve(conf, itinerary);
    let connection = (-conf.beta_connection * layover_penalty(&conf.layover, itinerary)).exp();
    let hod = (-conf.beta_hod * hod_penalty(&conf.hod, &itinerary.departure, &itinerary.arrival)).exp();
    schedule_factor(segment, itinerary)
        * connection
        * hod
        * reliability(conf, itinerary, &hub, state)
        * reprotection(conf, itinerary)
        * product_factor(conf, itinerary)
        * perks_factor(conf, itinerary)
        * price_availability(conf, segment, state, itinerary)
        * scarcity_factor(conf, itinerary)
        * bank_alignment(conf, itinerary, &hub)
        * connect_factor(conf, itinerary, &hub)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn demo_itinerary() -> Itinerary {
        Itinerary::demo_itineraries()
            .expect("test invariant")
            .remove(0)
    }

    fn hub(mct: f64, banks: &[&str]) -> HubInputs {
        HubInputs {
            mct,
            wx_risk: 0.2,
            capacity_risk: 0.3,
            bank_times: banks
                .iter()
                .map(|b| NaiveTime::parse_from_str(b, "%H:%M").expect("test invariant"))
                .collect(),
        }
    }

    #[test]
    fn test_misconnect_probability() {
        assert_eq!(misconnect_probability(30.0, 40.0, 20.0), 0.0);
        assert_eq!(misconnect_probability(40.0, 40.0, 20.0), 0.0);
        let p = misconnect_probability(60.0, 40.0, 20.0);
        assert!((p - (1.0 - (-1.0f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn test_layover_and_hod_penalties() {
        let conf = QsiConfig::default();
        let mut it = demo_itinerary();
        // within [45, 120], only stress 0.2 applies
        assert!((layover_penalty(&conf.layover, &it) - 0.02 * 0.2).abs() < 1e-12);
        it.layover_minutes = 30.0;
        assert!((layover_penalty(&conf.layover, &it) - (0.03 * 15.0 + 0.004)).abs() < 1e-12);
        assert_eq!(hod_penalty(&conf.hod, &it.departure, &it.arrival), 0.0);
        let late = DateTime::parse_from_rfc3339("2025-09-13T23:10:00-04:00").expect("test invariant");
        let early = DateTime::parse_from_rfc3339("2025-09-14T05:20:00-07:00").expect("test invariant");
        assert!((hod_penalty(&conf.hod, &late, &early) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_price_hard_seat_cutoff() {
        let conf = QsiConfig::default();
        let segment = QsiSegment::with_defaults("leisure");
        let state = QsiState::base();
        let mut it = demo_itinerary();
        // 280 + 25 - 10 <= 300
        let open = price_availability(&conf, &segment, &state, &it);
        assert!((open - (-0.01f64 * 295.0).exp()).abs() < 1e-12);
        it.seats_available = 1;
        assert_eq!(price_availability(&conf, &segment, &state, &it), 0.0);
        it.seats_available = 5;
        let peak = QsiState {
            price_multiplier: 1.5,
            ..QsiState::base()
        };
        // 280 * 1.5 + 25 - 10 > 300
        let expensive = price_availability(&conf, &segment, &peak, &it);
        assert!((expensive - 0.3 * (-0.01f64 * 435.0).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_bank_alignment() {
        let conf = QsiConfig::default();
        let it = demo_itinerary();
        assert_eq!(bank_alignment(&conf, &it, &hub(40.0, &[])), 1.0);
        // arrival 13:40 local, nearest bank 12:00 is 100 minutes away
        let factor = bank_alignment(&conf, &it, &hub(40.0, &["08:00", "12:00"]));
        assert!((factor - (-0.02f64 * 100.0).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_state_delay_lowers_reliability() {
        let conf = QsiConfig::default();
        let it = demo_itinerary();
        let h = hub(40.0, &[]);
        let base = reliability(&conf, &it, &h, &QsiState::base());
        let stressed = QsiState {
            delay_mean_add: 15.0,
            delay_var_mult: 2.0,
            ..QsiState::base()
        };
        assert!(reliability(&conf, &it, &h, &stressed) < base);
        assert!(base > 0.0 && base < 1.0);
    }

    #[test]
    fn test_weight_positive_and_bounded_by_price() {
        let conf = QsiConfig::default();
        let it = demo_itinerary();
        let segment = QsiSegment::with_defaults("leisure");
        let w = itinerary_weight(&conf, &it, &segment, &QsiState::base());
        assert!(w > 0.0 && w.is_finite());
        let mut sold_out = it.clone();
        sold_out.seats_available = 0;
        assert_eq!(itinerary_weight(&conf, &sold_out, &segment, &QsiState::base()), 0.0);
    }
}
