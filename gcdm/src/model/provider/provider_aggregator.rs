use super::{
    ContextProvider, GoogleDistanceMatrix, MapboxDirections, OpenRouteServiceDirections,
    OpenWeatherMap, ProviderError, RetryPolicy, TicketmasterEvents, TravelTimeProvider,
};
use crate::config::ProviderConfig;
use gcdm_core::util::stats_ops;
use geo::Point;
use std::time::Duration;

/// queries every configured provider and blends the results. failures never escape:
/// drive times degrade to absent and context multipliers to neutral.
pub struct ProviderAggregator {
    drive_providers: Vec<Box<dyn TravelTimeProvider>>,
    context_providers: Vec<Box<dyn ContextProvider>>,
    retry: RetryPolicy,
}

impl ProviderAggregator {
    /// conservative quantile taken across provider drive estimates
    pub const DRIVE_QUANTILE: f64 = 0.75;
    pub const MIN_CONTEXT_MULTIPLIER: f64 = 1.0;
    pub const MAX_CONTEXT_MULTIPLIER: f64 = 2.0;

    pub fn new(
        drive_providers: Vec<Box<dyn TravelTimeProvider>>,
        context_providers: Vec<Box<dyn ContextProvider>>,
        retry: RetryPolicy,
    ) -> ProviderAggregator {
        ProviderAggregator {
            drive_providers,
            context_providers,
            retry,
        }
    }

    /// an aggregator with no providers, which always reports absent drive times and
    /// neutral context.
    pub fn empty() -> ProviderAggregator {
        ProviderAggregator::new(vec![], vec![], RetryPolicy::default())
    }

    /// instantiates each provider that is enabled and has an API key.
    pub fn from_config(conf: &ProviderConfig) -> Result<ProviderAggregator, ProviderError> {
        let timeout = Duration::try_from_secs_f64(conf.timeout_seconds).map_err(|e| {
            ProviderError::ClientBuildError(format!(
                "invalid timeout of {} seconds: {e}",
                conf.timeout_seconds
            ))
        })?;
        let mut drive: Vec<Box<dyn TravelTimeProvider>> = vec![];
        if conf.google_active() {
            drive.push(Box::new(GoogleDistanceMatrix::new(&conf.google_api_key, timeout)?));
        }
        if conf.openrouteservice_active() {
            drive.push(Box::new(OpenRouteServiceDirections::new(&conf.ors_api_key, timeout)?));
        }
        if conf.mapbox_active() {
            drive.push(Box::new(MapboxDirections::new(&conf.mapbox_api_key, timeout)?));
        }
        let mut context: Vec<Box<dyn ContextProvider>> = vec![];
        if conf.weather_active() {
            context.push(Box::new(OpenWeatherMap::new(&conf.owm_api_key, timeout)?));
        }
        if conf.events_active() {
            context.push(Box::new(TicketmasterEvents::new(&conf.ticketmaster_api_key, timeout)?));
        }
        log::info!(
            "providers active: drive [{}], context [{}]",
            drive.iter().map(|p| p.name()).collect::<Vec<_>>().join(", "),
            context.iter().map(|p| p.name()).collect::<Vec<_>>().join(", ")
        );
        Ok(ProviderAggregator::new(drive, context, RetryPolicy::from(&conf.retry)))
    }

    pub fn has_drive_providers(&self) -> bool {
        !self.drive_providers.is_empty()
    }

    /// upper quartile of all successful, positive drive estimates in minutes,
    /// or None if no provider produced one.
    pub fn aggregate_drive_minutes(
        &self,
        origin: &Point<f64>,
        destination: &Point<f64>,
    ) -> Option<f64> {
        let estimates: Vec<f64> = self
            .drive_providers
            .iter()
            .filter_map(|p| {
                match self.retry.run(p.name(), || p.drive_minutes(origin, destination)) {
                    Ok(Some(minutes)) if minutes.is_finite() && minutes > 0.0 => Some(minutes),
                    Ok(_) => None,
                    Err(e) => {
                        log::warn!("drive time provider {} unavailable: {e}", p.name());
                        None
                    }
                }
            })
            .collect();
        stats_ops::quantile(&estimates, Self::DRIVE_QUANTILE)
    }

    /// product of all context multipliers, each clamped to [1, 2]. unavailable
    /// signals contribute 1.
    pub fn aggregate_context_multiplier(&self, origin: &Point<f64>) -> f64 {
        self.context_providers
            .iter()
            .map(|p| match self.retry.run(p.name(), || p.multiplier(origin)) {
                Ok(m) if m.is_finite() => {
                    stats_ops::clip(m, Self::MIN_CONTEXT_MULTIPLIER, Self::MAX_CONTEXT_MULTIPLIER)
                }
                Ok(_) => 1.0,
                Err(e) => {
                    log::warn!("context provider {} unavailable: {e}", p.name());
                    1.0
                }
            })
            .product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct MockDrive {
        minutes: Option<f64>,
        failures_before_success: u32,
        calls: AtomicU32,
    }

    impl MockDrive {
        fn boxed(minutes: Option<f64>, failures_before_success: u32) -> Box<dyn TravelTimeProvider> {
            Box::new(MockDrive {
                minutes,
                failures_before_success,
                calls: AtomicU32::new(0),
            })
        }
    }

    impl TravelTimeProvider for MockDrive {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn drive_minutes(
            &self,
            _origin: &Point<f64>,
            _destination: &Point<f64>,
        ) -> Result<Option<f64>, ProviderError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures_before_success {
                Err(ProviderError::Unavailable {
                    provider: "mock",
                    message: String::from("timeout"),
                })
            } else {
                Ok(self.minutes)
            }
        }
    }

    struct MockContext(Result<f64, ()>);

    impl ContextProvider for MockContext {
        fn name(&self) -> &'static str {
            "mock"
        }

        fn multiplier(&self, _origin: &Point<f64>) -> Result<f64, ProviderError> {
            self.0.map_err(|_| ProviderError::ServiceError {
                provider: "mock",
                message: String::from("unavailable"),
            })
        }
    }

    fn no_wait() -> RetryPolicy {
        RetryPolicy::new(3, Duration::ZERO, Duration::ZERO)
    }

    fn points() -> (Point<f64>, Point<f64>) {
        (Point::new(-72.9, 41.3), Point::new(-73.7781, 40.6413))
    }

    #[test]
    fn test_all_failing_is_absent() {
        let agg = ProviderAggregator::new(
            vec![MockDrive::boxed(Some(30.0), 100), MockDrive::boxed(None, 0)],
            vec![],
            no_wait(),
        );
        let (o, d) = points();
        assert_eq!(agg.aggregate_drive_minutes(&o, &d), None);
    }

    #[test]
    fn test_identical_estimates() {
        let agg = ProviderAggregator::new(
            vec![
                MockDrive::boxed(Some(10.0), 0),
                MockDrive::boxed(Some(10.0), 0),
                MockDrive::boxed(Some(10.0), 0),
            ],
            vec![],
            no_wait(),
        );
        let (o, d) = points();
        assert_eq!(agg.aggregate_drive_minutes(&o, &d), Some(10.0));
    }

    #[test]
    fn test_upper_quartile_ignores_invalid() {
        let agg = ProviderAggregator::new(
            vec![
                MockDrive::boxed(Some(40.0), 0),
                MockDrive::boxed(Some(60.0), 0),
                MockDrive::boxed(Some(0.0), 0),
                MockDrive::boxed(Some(f64::NAN), 0),
            ],
            vec![],
            no_wait(),
        );
        let (o, d) = points();
        let result = agg.aggregate_drive_minutes(&o, &d).expect("test invariant");
        assert!((result - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_transient_failure_recovered() {
        let agg = ProviderAggregator::new(vec![MockDrive::boxed(Some(25.0), 2)], vec![], no_wait());
        let (o, d) = points();
        assert_eq!(agg.aggregate_drive_minutes(&o, &d), Some(25.0));
    }

    #[test]
    fn test_context_clamped_product() {
        let agg = ProviderAggregator::new(
            vec![],
            vec![
                Box::new(MockContext(Ok(1.5))),
                Box::new(MockContext(Ok(0.5))),
                Box::new(MockContext(Ok(3.0))),
                Box::new(MockContext(Err(()))),
            ],
            no_wait(),
        );
        let (o, _) = points();
        assert!((agg.aggregate_context_multiplier(&o) - 3.0).abs() < 1e-12);
        assert_eq!(ProviderAggregator::empty().aggregate_context_multiplier(&o), 1.0);
    }

    #[test]
    fn test_from_config_requires_keys() {
        let mut conf = ProviderConfig::default();
        conf.enable_google = true;
        let agg = ProviderAggregator::from_config(&conf).expect("test invariant");
        assert!(!agg.has_drive_providers());
    }

    #[test]
    fn test_from_config_rejects_unrepresentable_timeout() {
        let conf = ProviderConfig {
            timeout_seconds: f64::INFINITY,
            ..ProviderConfig::default()
        };
        assert!(ProviderAggregator::from_config(&conf).is_err());
    }
}
