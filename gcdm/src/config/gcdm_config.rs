use super::{
    CarbonConfig, ComfortConfig, GcdmConfigError, ModesConfig, NetworkConfig, PartyConfig,
    ProcessTimesConfig, ProjectConfig, ProviderConfig, QsiConfig, RegionConfig, RiskConfig,
    ScheduleConfig, SoftminConfig, TransferConfig, TripConfig, VotConfig,
};
use crate::model::travel::TravelMode;
use config::{Config, Environment, File, FileFormat};
use gcdm_core::model::Airport;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// full, validated configuration of a model run. built once at load time and
/// shared read-only by every operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GcdmConfig {
    #[serde(default)]
    pub project: ProjectConfig,
    pub region: RegionConfig,
    /// airport registry, merged over the built-in airports
    #[serde(default)]
    pub airports: HashMap<String, Airport>,
    pub party: PartyConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub vot: VotConfig,
    pub risk: RiskConfig,
    #[serde(default)]
    pub modes: ModesConfig,
    #[serde(default)]
    pub process_times: ProcessTimesConfig,
    #[serde(default)]
    pub transfer: TransferConfig,
    #[serde(default)]
    pub comfort: ComfortConfig,
    #[serde(default)]
    pub carbon: CarbonConfig,
    #[serde(default)]
    pub softmin: SoftminConfig,
    #[serde(default)]
    pub trip: TripConfig,
    #[serde(default)]
    pub providers: ProviderConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub qsi: QsiConfig,
}

impl GcdmConfig {
    /// environment variables with this prefix override file values, using `__`
    /// as the separator, e.g. `GCDM__PROVIDERS__OWM_API_KEY`.
    pub const ENV_PREFIX: &'static str = "GCDM";

    /// upper bound on provider timeouts and retry backoffs, in seconds
    pub const MAX_DURATION_SECONDS: f64 = 3600.0;

    /// reads a configuration from a string, used for testing and embedded configs.
    pub fn try_from_str(contents: &str, format: FileFormat) -> Result<GcdmConfig, GcdmConfigError> {
        let builder = Config::builder().add_source(File::from_str(contents, format));
        let config = builder.build()?;
        let raw = config.try_deserialize::<GcdmConfig>()?;
        raw.finalize()
    }

    /// airport registry entry for a code.
    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airports.get(code)
    }

    /// the study airports other than the home airport.
    pub fn alternative_airports(&self) -> Vec<&String> {
        self.region
            .airports
            .iter()
            .filter(|a| **a != self.region.home_airport)
            .collect()
    }

    pub fn has_mode(&self, mode: TravelMode) -> bool {
        self.region.modes.contains(&mode)
    }

    /// normalizes lookup keys, merges built-in airports and validates.
    fn finalize(mut self) -> Result<GcdmConfig, GcdmConfigError> {
        self.normalize();
        self.validate()?;
        Ok(self)
    }

    fn normalize(&mut self) {
        self.region.airports = self.region.airports.iter().map(|a| a.to_uppercase()).collect();
        self.region.home_airport = self.region.home_airport.to_uppercase();
        self.airports = upper_keys(std::mem::take(&mut self.airports));
        for (code, airport) in Airport::builtin().into_iter() {
            self.airports.entry(code).or_insert(airport);
        }
        self.schedule.curb_windows = upper_keys(std::mem::take(&mut self.schedule.curb_windows));
        let drive = &mut self.modes.drive;
        drive.parking_daily = upper_keys(std::mem::take(&mut drive.parking_daily));
        drive.parking_weekly = upper_keys(std::mem::take(&mut drive.parking_weekly));
        let rail = &mut self.modes.rail;
        rail.airtrain = upper_keys(std::mem::take(&mut rail.airtrain));
        let proc = &mut self.process_times;
        proc.security_mean = upper_keys(std::mem::take(&mut proc.security_mean));
        proc.walk_mean = upper_keys(std::mem::take(&mut proc.walk_mean));
        proc.bag_drop_mean = lower_keys(std::mem::take(&mut proc.bag_drop_mean));
        self.carbon.emissions_kg_per_mile =
            lower_keys(std::mem::take(&mut self.carbon.emissions_kg_per_mile));
        self.qsi.hub_risks = upper_keys(std::mem::take(&mut self.qsi.hub_risks));
    }

    /// checks every constraint, reporting all violations together.
    pub fn validate(&self) -> Result<(), GcdmConfigError> {
        let mut errors: Vec<String> = vec![];

        if self.region.airports.is_empty() {
            errors.push(String::from("region.airports must not be empty"));
        }
        for code in self.region.airports.iter() {
            if !self.airports.contains_key(code) {
                errors.push(format!("airport {code} has no registry entry with coordinates"));
            }
        }
        if !self.region.airports.contains(&self.region.home_airport) {
            errors.push(format!(
                "region.home_airport {} is not one of region.airports",
                self.region.home_airport
            ));
        }
        if self.region.modes.is_empty() {
            errors.push(String::from("region.modes must not be empty"));
        }
        if self.has_mode(TravelMode::Drive) {
            for code in self.region.airports.iter() {
                if !self.modes.drive.parking_daily.contains_key(code) {
                    errors.push(format!("modes.drive.parking_daily is missing airport {code}"));
                }
                if !self.modes.drive.parking_weekly.contains_key(code) {
                    errors.push(format!("modes.drive.parking_weekly is missing airport {code}"));
                }
            }
        }
        if self.project.processes == Some(0) {
            errors.push(String::from("project.processes must be positive"));
        }

        let party = &self.party;
        if party.size() == 0 {
            errors.push(String::from("party must contain at least one traveller"));
        }
        if party.v_adult_usd_per_hour < 0.0 || party.v_child_usd_per_hour < 0.0 {
            errors.push(String::from("party values of time must be non-negative"));
        }
        if party.lambda_child_time_weight < 0.0 {
            errors.push(String::from("party.lambda_child_time_weight must be non-negative"));
        }

        let risk = &self.risk;
        if !(risk.alpha > 0.0 && risk.alpha < 1.0) {
            errors.push(format!("risk.alpha must be in (0, 1), found {}", risk.alpha));
        }
        if !(risk.rho >= 0.0) {
            errors.push(format!("risk.rho must be non-negative, found {}", risk.rho));
        }
        if risk.n_samples == 0 {
            errors.push(String::from("risk.n_samples must be positive"));
        }
        let m = &risk.multipliers;
        if m.weather <= 0.0 || m.event <= 0.0 || m.construction <= 0.0 {
            errors.push(String::from("risk.multipliers must be positive"));
        }
        let shocks = &risk.shocks;
        for (name, p) in [
            ("incident_prob", shocks.incident_prob),
            ("rail_disruption_prob", shocks.rail_disruption_prob),
        ] {
            if !(0.0..=1.0).contains(&p) {
                errors.push(format!("risk.shocks.{name} must be in [0, 1], found {p}"));
            }
        }
        if shocks.incident_minutes < 0.0 || shocks.rail_disruption_minutes < 0.0 {
            errors.push(String::from("risk.shocks minutes must be non-negative"));
        }

        if self.schedule.theta_early < 0.0 || self.schedule.theta_late < 0.0 {
            errors.push(String::from("schedule theta values must be non-negative"));
        }
        if !(self.softmin.mu.is_finite() && self.softmin.mu > 0.0) {
            errors.push(format!(
                "softmin.mu must be finite and positive, found {}",
                self.softmin.mu
            ));
        }
        if !(self.qsi.mu_access.is_finite() && self.qsi.mu_access > 0.0) {
            errors.push(format!(
                "qsi.mu_access must be finite and positive, found {}",
                self.qsi.mu_access
            ));
        }
        if self.qsi.misconnect_scale_minutes <= 0.0 {
            errors.push(String::from("qsi.misconnect_scale_minutes must be positive"));
        }
        if self.qsi.states.iter().any(|s| s.weight < 0.0) {
            errors.push(String::from("qsi.states weights must be non-negative"));
        }
        if self.trip.legs == 0 {
            errors.push(String::from("trip.legs must be at least 1"));
        }
        if self.trip.duration_days < 0.0 {
            errors.push(String::from("trip.duration_days must be non-negative"));
        }

        let retry = &self.providers.retry;
        let backoffs = [retry.initial_backoff_seconds, retry.max_backoff_seconds];
        if backoffs.iter().any(|b| !(0.0..=Self::MAX_DURATION_SECONDS).contains(b))
            || retry.max_backoff_seconds < retry.initial_backoff_seconds
        {
            errors.push(format!(
                "providers.retry backoff must satisfy 0 <= initial_backoff_seconds <= max_backoff_seconds <= {}",
                Self::MAX_DURATION_SECONDS
            ));
        }
        let timeout = self.providers.timeout_seconds;
        if !(timeout > 0.0 && timeout <= Self::MAX_DURATION_SECONDS) {
            errors.push(format!(
                "providers.timeout_seconds must be in (0, {}], found {timeout}",
                Self::MAX_DURATION_SECONDS
            ));
        }
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if self.network.enabled
            && !(positive(self.network.radius_meters) && positive(self.network.default_speed_kph))
        {
            errors.push(String::from(
                "network.radius_meters and network.default_speed_kph must be positive",
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(GcdmConfigError::ValidationError(errors))
        }
    }
}

impl TryFrom<&Path> for GcdmConfig {
    type Error = GcdmConfigError;

    /// reads a YAML, TOML or JSON file (by extension) with environment overrides.
    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("toml") => FileFormat::Toml,
            Some("json") => FileFormat::Json,
            other => {
                return Err(GcdmConfigError::UnsupportedFileType(
                    other.unwrap_or_default().to_string(),
                ))
            }
        };
        let config = Config::builder()
            .add_source(File::from(path).format(format))
            .add_source(
                Environment::with_prefix(Self::ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()
            .map_err(|e| GcdmConfigError::ReadError(path.display().to_string(), e))?;
        let raw = config.try_deserialize::<GcdmConfig>()?;
        log::debug!("loaded configuration from {}", path.display());
        raw.finalize()
    }
}

fn upper_keys<V>(map: HashMap<String, V>) -> HashMap<String, V> {
    map.into_iter().map(|(k, v)| (k.to_uppercase(), v)).collect()
}

fn lower_keys<V>(map: HashMap<String, V>) -> HashMap<String, V> {
    map.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
region:
  airports: [hvn, JFK]
  modes: [drive, rail]
party:
  n_adults: 2
  n_children: 1
  v_adult_usd_per_hour: 30.0
  v_child_usd_per_hour: 12.0
risk:
  alpha: 0.9
  rho: 0.5
modes:
  drive:
    cost:
      cmile: 0.3
    parking_daily:
      HVN: 10.0
      JFK: 30.0
    parking_weekly:
      HVN: 60.0
      JFK: 180.0
"#;

    #[test]
    fn test_minimal_config_defaults() {
        let conf = GcdmConfig::try_from_str(MINIMAL, FileFormat::Yaml).expect("test invariant");
        assert_eq!(conf.region.airports, vec!["HVN", "JFK"]);
        assert_eq!(conf.region.home_airport, "HVN");
        assert_eq!(conf.risk.n_samples, 2000);
        assert_eq!(conf.schedule.theta_late, 2.0);
        assert_eq!(conf.providers.retry.max_retries, 3);
        assert!(!conf.network.enabled);
        assert!(conf.airport("EWR").is_some());
        assert_eq!(conf.alternative_airports(), vec!["JFK"]);
        // (2 * 30 + 12) / 60
        assert!((conf.party.vot_per_minute() - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let bad = MINIMAL
            .replace("alpha: 0.9", "alpha: 1.5")
            .replace("[hvn, JFK]", "[HVN, XYZ]");
        let result = GcdmConfig::try_from_str(&bad, FileFormat::Yaml);
        match result {
            Err(GcdmConfigError::ValidationError(errors)) => {
                assert!(errors.iter().any(|e| e.contains("risk.alpha")));
                assert!(errors.iter().any(|e| e.contains("XYZ")));
                assert!(errors.len() >= 3);
            }
            other => panic!("expected validation error, found {other:?}"),
        }
    }

    #[test]
    fn test_bundled_config_is_valid() {
        let contents = include_str!("../resources/gcdm_config.yaml");
        let conf = GcdmConfig::try_from_str(contents, FileFormat::Yaml).expect("test invariant");
        assert_eq!(conf.region.airports.len(), 4);
        assert_eq!(conf.region.modes.len(), 3);
    }

    fn validation_errors(conf: &GcdmConfig) -> Vec<String> {
        match conf.validate() {
            Err(GcdmConfigError::ValidationError(errors)) => errors,
            other => panic!("expected validation error, found {other:?}"),
        }
    }

    #[test]
    fn test_huge_provider_timeout_rejected() {
        let huge = format!("{MINIMAL}providers:\n  timeout_seconds: 1.0e30\n");
        match GcdmConfig::try_from_str(&huge, FileFormat::Yaml) {
            Err(GcdmConfigError::ValidationError(errors)) => {
                assert!(errors.iter().any(|e| e.contains("providers.timeout_seconds")));
            }
            other => panic!("expected validation error, found {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_durations_rejected() {
        let conf = GcdmConfig::try_from_str(MINIMAL, FileFormat::Yaml).expect("test invariant");
        for value in [f64::INFINITY, f64::NAN, 1.0e30] {
            let mut timeout = conf.clone();
            timeout.providers.timeout_seconds = value;
            let errors = validation_errors(&timeout);
            assert!(errors.iter().any(|e| e.contains("providers.timeout_seconds")));

            let mut backoff = conf.clone();
            backoff.providers.retry.max_backoff_seconds = value;
            let errors = validation_errors(&backoff);
            assert!(errors.iter().any(|e| e.contains("providers.retry")));

            let mut initial = conf.clone();
            initial.providers.retry.initial_backoff_seconds = value;
            let errors = validation_errors(&initial);
            assert!(errors.iter().any(|e| e.contains("providers.retry")));
        }
    }

    #[test]
    fn test_infinite_softmin_rejected() {
        let mut conf = GcdmConfig::try_from_str(MINIMAL, FileFormat::Yaml).expect("test invariant");
        conf.softmin.mu = f64::INFINITY;
        conf.qsi.mu_access = f64::INFINITY;
        let errors = validation_errors(&conf);
        assert!(errors.iter().any(|e| e.contains("softmin.mu")));
        assert!(errors.iter().any(|e| e.contains("qsi.mu_access")));
    }
}
