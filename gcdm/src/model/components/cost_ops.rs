//! generalized cost terms. every function is pure over the configuration and its
//! arguments. a missing lookup table entry that has no documented default yields NaN.
use crate::config::{GcdmConfig, Luggage, ScheduleConfig};
use crate::model::generalized_cost::CurbWindow;
use crate::model::travel::TravelMode;
use gcdm_core::util::stats_ops;

/// share of access time assumed to fall in the peak band
pub const PEAK_FRACTION: f64 = 0.4;
/// share of access time assumed to fall in the off-peak band
pub const OFFPEAK_FRACTION: f64 = 0.5;
/// share of access time assumed to fall in the night band
pub const NIGHT_FRACTION: f64 = 0.1;
/// rail miss probability never exceeds this
pub const MAX_MISS_PROBABILITY: f64 = 0.9;

/// parking, operating cost and fees of driving and parking for the trip.
/// NaN if the airport has no parking rates.
pub fn cash_drive(conf: &GcdmConfig, airport: &str, distance_miles: f64, duration_days: f64) -> f64 {
    let drive = &conf.modes.drive;
    let (daily, weekly) = match (
        drive.parking_daily.get(airport),
        drive.parking_weekly.get(airport),
    ) {
        (Some(d), Some(w)) => (*d, *w),
        _ => return f64::NAN,
    };
    let days = duration_days.max(1.0);
    let parking = f64::min(days.ceil() * daily, (days / 7.0).ceil() * weekly);
    let operating = drive.cost.cmile * 2.0 * distance_miles;
    parking + operating + drive.cost.remote_lot_fee + drive.cost.shuttle_fee + drive.cost.fare_risk
}

/// round trip rideshare fare including surge, booking fee and tip.
pub fn cash_ride(conf: &GcdmConfig, distance_miles: f64, mean_minutes: f64) -> f64 {
    let ride = &conf.modes.ride;
    let fare = ride.surge
        * (ride.base_fare
            + ride.per_mile * 2.0 * distance_miles
            + ride.per_minute * 2.0 * mean_minutes
            + ride.booking_fee)
        + ride.fare_risk;
    fare * (1.0 + ride.tip_fraction)
}

/// rail fares for the party, per-person transfer and airport people-mover fares, and
/// station parking.
pub fn cash_rail(conf: &GcdmConfig, airport: &str) -> f64 {
    let rail = &conf.modes.rail;
    let party = &conf.party;
    let airtrain = rail.airtrain.get(airport).copied().unwrap_or_default();
    rail.adult_fare_default * party.n_adults as f64
        + rail.child_fare_default * party.n_children as f64
        + party.size() as f64 * (rail.transfer_fare + airtrain)
        + rail.station_parking
}

/// cash cost for a mode.
pub fn cash(
    conf: &GcdmConfig,
    mode: TravelMode,
    airport: &str,
    distance_miles: f64,
    access_mean_minutes: f64,
) -> f64 {
    match mode {
        TravelMode::Drive => cash_drive(conf, airport, distance_miles, conf.trip.duration_days),
        TravelMode::Ride => cash_ride(conf, distance_miles, access_mean_minutes),
        TravelMode::Rail => cash_rail(conf, airport),
    }
}

/// value of a minute blended over time-of-day bands. bands missing from the
/// configuration are valued at the party's value of time.
pub fn tod_value_per_minute(conf: &GcdmConfig) -> f64 {
    let vot = conf.party.vot_per_minute();
    let band = |name: &str| conf.vot.band_value(name).unwrap_or(vot);
    PEAK_FRACTION * band("peak") + OFFPEAK_FRACTION * band("offpeak") + NIGHT_FRACTION * band("night")
}

/// valued access and process time over all legs.
pub fn timeval(conf: &GcdmConfig, legs: u32, access_mean_minutes: f64, process_mean_minutes: f64) -> f64 {
    tod_value_per_minute(conf) * legs as f64 * (access_mean_minutes + process_mean_minutes)
}

/// prices risk-weighted tail minutes (see [`crate::model::risk::risk_ops::risk_with_shocks`])
/// at the party's value of time, over all legs, inflated by the context multiplier.
pub fn risk_cost(conf: &GcdmConfig, legs: u32, tail_minutes: f64, context_multiplier: f64) -> f64 {
    tail_minutes * conf.party.vot_per_minute() * legs as f64 * context_multiplier
}

/// expected penalty for reaching the curb outside the acceptable window. each access
/// sample A gives a curb time U = t_depart - A, penalized by theta_early per minute
/// before the window opens and theta_late per minute after it closes.
pub fn schedule_alignment(
    conf: &GcdmConfig,
    window: &CurbWindow,
    access_samples: &[f64],
) -> f64 {
    if access_samples.is_empty() {
        return 0.0;
    }
    let ScheduleConfig {
        theta_early,
        theta_late,
        ..
    } = conf.schedule;
    let penalties: Vec<f64> = access_samples
        .iter()
        .map(|a| {
            let u = window.t_depart - a;
            let early = (window.tmin - u).max(0.0);
            let late = (u - window.tmax).max(0.0);
            theta_early * early + theta_late * late
        })
        .collect();
    conf.party.vot_per_minute() * stats_ops::mean(&penalties)
}

/// probability of missing a rail connection, from the configured base rate and slack slope.
pub fn rail_miss_probability(conf: &GcdmConfig) -> f64 {
    let rail = &conf.modes.rail;
    stats_ops::clip(
        rail.miss_prob_base + rail.miss_slope * rail.miss_slack_minutes,
        0.0,
        MAX_MISS_PROBABILITY,
    )
}

/// connection, checked bag and interchange friction.
pub fn transfer_handling(conf: &GcdmConfig, luggage: Luggage, legs: u32) -> f64 {
    let vot = conf.party.vot_per_minute();
    let party = &conf.party;
    let transfer = &conf.transfer;
    let effective_party = party.n_adults as f64 + party.lambda_child_time_weight * party.n_children as f64;
    let miss = effective_party * vot * rail_miss_probability(conf) * conf.modes.rail.headway_minutes;
    let bag = match luggage {
        Luggage::Checked => {
            vot * (transfer.bag_check_minutes + conf.risk.rho * transfer.bag_risk_minutes)
        }
        _ => 0.0,
    };
    let friction = vot * legs as f64 * transfer.friction_minutes;
    miss + bag + friction
}

/// discomfort surcharge on access time during peak and night travel.
pub fn comfort(conf: &GcdmConfig, legs: u32, access_mean_minutes: f64) -> f64 {
    let omega = (conf.comfort.omega_peak - 1.0) * PEAK_FRACTION
        + (conf.comfort.omega_night - 1.0) * NIGHT_FRACTION;
    conf.party.vot_per_minute() * legs as f64 * access_mean_minutes * omega
}

/// social cost of round trip emissions, 0 when carbon pricing is disabled.
pub fn carbon(conf: &GcdmConfig, mode: TravelMode, distance_miles: f64) -> f64 {
    let carbon = &conf.carbon;
    if !carbon.enabled {
        return 0.0;
    }
    let kg_per_mile = carbon
        .emissions_kg_per_mile
        .get(mode.as_str())
        .copied()
        .unwrap_or_default();
    carbon.social_cost_per_ton / 1000.0 * kg_per_mile * 2.0 * distance_miles
}

/// mean minutes spent in the airport: security, bag drop and walking.
pub fn process_mean_minutes(conf: &GcdmConfig, airport: &str, luggage: Luggage) -> f64 {
    let p = &conf.process_times;
    let security = p.security_mean.get(airport).copied().unwrap_or(p.default_security);
    let bag = p.bag_drop_mean.get(luggage.as_str()).copied().unwrap_or(p.default_bag_drop);
    let walk = p.walk_mean.get(airport).copied().unwrap_or(p.default_walk);
    security + bag + walk
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;

    #[test]
    fn test_cash_drive_parking_choice() {
        let conf = test_config();
        // 3 days: min(3 * 20, 1 * 100) + 0.5 * 2 * 10 + 5
        assert!((cash_drive(&conf, "HVN", 10.0, 3.0) - 75.0).abs() < 1e-9);
        // 10 days: min(10 * 20, 2 * 100) = 200
        assert!((cash_drive(&conf, "HVN", 10.0, 10.0) - 215.0).abs() < 1e-9);
        // trips shorter than a day pay a full day
        assert!((cash_drive(&conf, "HVN", 0.0, 0.2) - 25.0).abs() < 1e-9);
        assert!(cash_drive(&conf, "XYZ", 10.0, 3.0).is_nan());
    }

    #[test]
    fn test_cash_ride_and_rail() {
        let conf = test_config();
        // (1.0 * (5 + 2 * 2 * 10 + 0.5 * 2 * 20 + 2) + 1) * 1.1
        assert!((cash_ride(&conf, 10.0, 20.0) - 74.8).abs() < 1e-9);
        // 20 * 2 + 5 * 1 + 3 * (2 + 8) + 0
        assert!((cash_rail(&conf, "JFK") - 75.0).abs() < 1e-9);
        assert!((cash_rail(&conf, "HVN") - 51.0).abs() < 1e-9);
    }

    #[test]
    fn test_timeval_uses_bands_and_fallback() {
        let mut conf = test_config();
        // 0.4 * 2 + 0.5 * 1 + 0.1 * 0.5
        assert!((tod_value_per_minute(&conf) - 1.35).abs() < 1e-12);
        assert!((timeval(&conf, 2, 30.0, 10.0) - 108.0).abs() < 1e-9);
        conf.vot.tod_bands.clear();
        let vot = conf.party.vot_per_minute();
        assert!((tod_value_per_minute(&conf) - vot).abs() < 1e-12);
    }

    #[test]
    fn test_schedule_alignment() {
        let conf = test_config();
        let vot = conf.party.vot_per_minute();
        let window = CurbWindow {
            t_depart: 0.0,
            tmin: -90.0,
            tmax: -60.0,
        };
        // inside the window
        assert_eq!(schedule_alignment(&conf, &window, &[70.0, 80.0]), 0.0);
        // 100 min access is 10 early, 40 is 20 late at double weight
        let expected = vot * (10.0 + 40.0) / 2.0;
        assert!((schedule_alignment(&conf, &window, &[100.0, 40.0]) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_transfer_handling() {
        let conf = test_config();
        let vot = conf.party.vot_per_minute();
        let miss = rail_miss_probability(&conf);
        assert!((miss - 0.1).abs() < 1e-12);
        let base = (2.0 + 0.5) * vot * 0.1 * 30.0 + vot * 2.0 * 5.0;
        assert!((transfer_handling(&conf, Luggage::None, 2) - base).abs() < 1e-9);
        let bag = vot * (10.0 + 0.5 * 5.0);
        assert!((transfer_handling(&conf, Luggage::Checked, 2) - base - bag).abs() < 1e-9);
    }

    #[test]
    fn test_comfort_and_carbon() {
        let mut conf = test_config();
        let vot = conf.party.vot_per_minute();
        // (1.2 - 1) * 0.4 + (1.1 - 1) * 0.1 = 0.09
        assert!((comfort(&conf, 1, 100.0) - vot * 9.0).abs() < 1e-9);
        assert_eq!(carbon(&conf, TravelMode::Drive, 10.0), 0.0);
        conf.carbon.enabled = true;
        // 200 / 1000 * 0.4 * 2 * 10
        assert!((carbon(&conf, TravelMode::Drive, 10.0) - 1.6).abs() < 1e-9);
        assert_eq!(carbon(&conf, TravelMode::Rail, 10.0), 0.0);
    }

    #[test]
    fn test_process_time_defaults() {
        let conf = test_config();
        assert!((process_mean_minutes(&conf, "HVN", Luggage::Checked) - 27.0).abs() < 1e-12);
        // 15 + 0 + 10
        assert!((process_mean_minutes(&conf, "EWR", Luggage::None) - 25.0).abs() < 1e-12);
    }
}
