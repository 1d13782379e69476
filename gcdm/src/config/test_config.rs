use super::GcdmConfig;
use config::FileFormat;

/// small configuration with round numbers shared by unit tests. curb windows span the
/// week before departure so that no schedule penalty applies.
const TEST_CONFIG: &str = r#"
project:
  name: test
  seed: 42
  processes: 2
region:
  airports: [HVN, JFK]
  modes: [drive, ride, rail]
  home_airport: HVN
party:
  n_adults: 2
  n_children: 1
  v_adult_usd_per_hour: 30.0
  v_child_usd_per_hour: 12.0
  lambda_child_time_weight: 0.5
schedule:
  t_depart_iso: "2025-09-13T10:00:00-04:00"
  curb_windows:
    HVN:
      tmin: "2025-09-06T10:00:00-04:00"
      tmax: "2025-09-13T10:00:00-04:00"
    JFK:
      tmin: "2025-09-06T10:00:00-04:00"
      tmax: "2025-09-13T10:00:00-04:00"
vot:
  tod_bands:
    - name: peak
      minutes_value: 2.0
    - name: offpeak
      minutes_value: 1.0
    - name: night
      minutes_value: 0.5
risk:
  alpha: 0.9
  rho: 0.5
  n_samples: 1000
modes:
  drive:
    cost:
      cmile: 0.5
      fare_risk: 5.0
    parking_daily:
      HVN: 20.0
      JFK: 30.0
    parking_weekly:
      HVN: 100.0
      JFK: 150.0
  ride:
    surge: 1.0
    base_fare: 5.0
    per_mile: 2.0
    per_minute: 0.5
    booking_fee: 2.0
    tip_fraction: 0.1
    fare_risk: 1.0
  rail:
    adult_fare_default: 20.0
    child_fare_default: 5.0
    transfer_fare: 2.0
    airtrain:
      JFK: 8.0
    miss_prob_base: 0.05
    miss_slope: 0.01
    headway_minutes: 30.0
process_times:
  security_mean:
    HVN: 10.0
  bag_drop_mean:
    checked: 12.0
  walk_mean:
    HVN: 5.0
comfort:
  omega_peak: 1.2
  omega_night: 1.1
carbon:
  enabled: false
  social_cost_per_ton: 200.0
  emissions_kg_per_mile:
    drive: 0.4
softmin:
  mu: 0.1
"#;

pub(crate) fn test_config() -> GcdmConfig {
    match GcdmConfig::try_from_str(TEST_CONFIG, FileFormat::Yaml) {
        Ok(conf) => conf,
        Err(e) => panic!("test configuration is invalid: {e}"),
    }
}
