use super::{
    softmin_ops, AirportCost, CurbWindow, GeneralizedCostError, ModeCost, OriginResult,
};
use crate::config::GcdmConfig;
use crate::model::components::{cost_ops, Components};
use crate::model::provider::ProviderAggregator;
use crate::model::risk::{risk_ops, RiskError};
use crate::model::travel::{EstimateTier, TravelMode, TravelTimeEstimator};
use gcdm_core::model::{Origin, TravelRV};
use gcdm_core::util::geo_utils;
use gcdm_osm::model::{NetworkRouter, OverpassRouter};
use kdam::{Bar, BarExt};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uom::si::f64::{Length, Velocity};
use uom::si::{length, velocity};

/// floor on the spread of airport process time samples, in minutes
const MIN_PROCESS_SD: f64 = 2.0;
const PROCESS_SD_FRACTION: f64 = 0.2;

/// computes the generalized cost of reaching every study airport by every mode
/// and compares the home airport against the best alternative.
pub struct GeneralizedCostModel {
    conf: GcdmConfig,
    estimator: TravelTimeEstimator,
}

impl GeneralizedCostModel {
    pub fn new(conf: GcdmConfig, estimator: TravelTimeEstimator) -> GeneralizedCostModel {
        GeneralizedCostModel { conf, estimator }
    }

    /// builds the providers and road network router named in the configuration.
    pub fn try_from_config(conf: GcdmConfig) -> Result<GeneralizedCostModel, GeneralizedCostError> {
        let providers = ProviderAggregator::from_config(&conf.providers)?;
        let router: Option<Box<dyn NetworkRouter>> = if conf.network.enabled {
            let router = OverpassRouter::new(
                &conf.network.overpass_url,
                Length::new::<length::meter>(conf.network.radius_meters),
                Velocity::new::<velocity::kilometer_per_hour>(conf.network.default_speed_kph),
                Duration::from_secs(conf.network.timeout_seconds),
            )?;
            Some(Box::new(router))
        } else {
            None
        };
        let estimator = TravelTimeEstimator::new(providers, router);
        Ok(GeneralizedCostModel::new(conf, estimator))
    }

    pub fn config(&self) -> &GcdmConfig {
        &self.conf
    }

    /// evaluates all origins in parallel. each origin draws from its own generator
    /// seeded from `project.seed` plus its index, so results do not depend on
    /// scheduling. output order follows input order.
    pub fn run(&self, origins: &[Origin]) -> Result<Vec<OriginResult>, GeneralizedCostError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.conf.project.processes.unwrap_or_default())
            .build()
            .map_err(|e| GeneralizedCostError::ThreadPoolError(e.to_string()))?;
        let bar = Bar::builder()
            .desc("generalized cost")
            .total(origins.len())
            .build()
            .map_err(GeneralizedCostError::InternalError)?;
        let bar = Arc::new(Mutex::new(bar));
        log::info!(
            "evaluating {} origins against airports [{}] with modes [{}]",
            origins.len(),
            self.conf.region.airports.join(", "),
            self.conf
                .region
                .modes
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        let results = pool.install(|| {
            origins
                .par_iter()
                .enumerate()
                .map(|(index, origin)| {
                    let mut rng = self.origin_rng(index);
                    let result = self.evaluate_origin(origin, &mut rng);
                    if let Ok(mut bar) = bar.lock() {
                        let _ = bar.update(1);
                    }
                    result
                })
                .collect::<Vec<_>>()
        });
        eprintln!();
        Ok(results)
    }

    fn origin_rng(&self, index: usize) -> StdRng {
        match self.conf.project.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
            None => StdRng::from_entropy(),
        }
    }

    /// costs every study airport from one origin.
    pub fn evaluate_origin<R: Rng + ?Sized>(&self, origin: &Origin, rng: &mut R) -> OriginResult {
        let conf = &self.conf;
        let origin_point = origin.point();
        let context = self.estimator.providers().aggregate_context_multiplier(&origin_point)
            * conf.risk.multipliers.product();

        let airports: Vec<AirportCost> = conf
            .region
            .airports
            .iter()
            .map(|code| self.evaluate_airport(origin, code, context, rng))
            .collect();

        let home = airports
            .iter()
            .find(|a| a.airport == conf.region.home_airport)
            .map(|a| a.gc)
            .unwrap_or(f64::NAN);
        let alternatives: Vec<f64> = airports
            .iter()
            .filter(|a| a.airport != conf.region.home_airport)
            .map(|a| a.gc)
            .collect();
        let delta_gc = softmin_ops::delta(home, &alternatives);

        OriginResult {
            origin: origin.clone(),
            delta_gc,
            airports,
        }
    }

    fn evaluate_airport<R: Rng + ?Sized>(
        &self,
        origin: &Origin,
        code: &str,
        context: f64,
        rng: &mut R,
    ) -> AirportCost {
        let conf = &self.conf;
        let airport = match conf.airport(code) {
            Some(a) => a,
            None => {
                log::warn!("airport {code} is not in the registry");
                return AirportCost {
                    airport: code.to_string(),
                    distance_miles: f64::NAN,
                    gc: f64::NAN,
                    by_mode: vec![],
                };
            }
        };
        let origin_point = origin.point();
        let airport_point = airport.point();
        let distance_miles = geo_utils::planar_distance_miles(&origin_point, &airport_point);
        let window = CurbWindow::from_schedule_or_default(&conf.schedule, code);
        let process_mean = cost_ops::process_mean_minutes(conf, code, conf.trip.luggage);

        let needs_drive = conf.has_mode(TravelMode::Drive) || conf.has_mode(TravelMode::Ride);
        let drive = needs_drive.then(|| self.estimator.drive(&origin_point, &airport_point));

        let by_mode: Vec<ModeCost> = conf
            .region
            .modes
            .iter()
            .map(|mode| {
                let (travel, tier) = match (*mode, drive) {
                    (TravelMode::Drive, Some((rv, tier))) => (rv, Some(tier)),
                    (TravelMode::Ride, Some((rv, tier))) => {
                        (TravelTimeEstimator::ride_from_drive(&rv), Some(tier))
                    }
                    _ => (TravelTimeEstimator::rail(&origin_point, &airport_point), None),
                };
                self.evaluate_mode(
                    *mode,
                    code,
                    distance_miles,
                    travel,
                    tier,
                    process_mean,
                    &window,
                    context,
                    rng,
                )
            })
            .collect();

        let totals: Vec<f64> = by_mode.iter().map(|m| m.total).collect();
        let gc = softmin_ops::softmin_finite(&totals, conf.softmin.mu);
        if gc.is_nan() {
            log::warn!("no mode to {code} could be costed from origin {}", origin.id);
        }
        AirportCost {
            airport: code.to_string(),
            distance_miles,
            gc,
            by_mode,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn evaluate_mode<R: Rng + ?Sized>(
        &self,
        mode: TravelMode,
        airport: &str,
        distance_miles: f64,
        travel: TravelRV,
        tier: Option<EstimateTier>,
        process_mean: f64,
        window: &CurbWindow,
        context: f64,
        rng: &mut R,
    ) -> ModeCost {
        let components = self.mode_components(
            mode,
            airport,
            distance_miles,
            &travel,
            process_mean,
            window,
            context,
            rng,
        );
        match components {
            Ok(components) => ModeCost {
                mode,
                travel,
                tier,
                components,
                total: components.total(),
            },
            Err(e) => {
                log::warn!("cannot cost {mode} to {airport}: {e}");
                ModeCost {
                    mode,
                    travel,
                    tier,
                    components: Components::default(),
                    total: f64::NAN,
                }
            }
        }
    }

    /// the seven cost terms of one mode. access samples are shared by the risk
    /// and schedule terms.
    #[allow(clippy::too_many_arguments)]
    fn mode_components<R: Rng + ?Sized>(
        &self,
        mode: TravelMode,
        airport: &str,
        distance_miles: f64,
        travel: &TravelRV,
        process_mean: f64,
        window: &CurbWindow,
        context: f64,
        rng: &mut R,
    ) -> Result<Components, RiskError> {
        let conf = &self.conf;
        let legs = conf.trip.legs;
        let n = conf.risk.n_samples;
        let access = risk_ops::gaussian_samples(travel.mean, travel.sd, n, 0.0, rng)?;
        let process_sd = f64::max(MIN_PROCESS_SD, PROCESS_SD_FRACTION * process_mean);
        let process = risk_ops::gaussian_samples(process_mean, process_sd, n, 0.0, rng)?;
        let tail_minutes = risk_ops::risk_with_shocks(&conf.risk, &access, &process, rng);

        Ok(Components {
            cash: cost_ops::cash(conf, mode, airport, distance_miles, travel.mean),
            timeval: cost_ops::timeval(conf, legs, travel.mean, process_mean),
            risk: cost_ops::risk_cost(conf, legs, tail_minutes, context),
            sched: cost_ops::schedule_alignment(conf, window, &access),
            xfer: cost_ops::transfer_handling(conf, conf.trip.luggage, legs),
            comfort: cost_ops::comfort(conf, legs, travel.mean),
            carbon: cost_ops::carbon(conf, mode, distance_miles),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use gcdm_core::model::Airport;
    use uom::si::length::mile;

    fn model(conf: GcdmConfig) -> GeneralizedCostModel {
        let estimator = TravelTimeEstimator::new(ProviderAggregator::empty(), None);
        GeneralizedCostModel::new(conf, estimator)
    }

    #[test]
    fn test_drive_only_matches_formulas() {
        let mut conf = test_config();
        conf.region.airports = vec![String::from("HVN")];
        conf.region.modes = vec![TravelMode::Drive];
        conf.risk.rho = 0.0;
        let model = model(conf.clone());
        let origin = Origin::new("06511", -72.9, 41.3);
        let mut rng = StdRng::seed_from_u64(1);
        let result = model.evaluate_origin(&origin, &mut rng);

        let hvn = result.airport("HVN").expect("test invariant");
        let mode = &hvn.by_mode[0];
        let miles = geo_utils::geodesic_distance(origin.point(), Airport::builtin()["HVN"].point())
            .get::<mile>();
        let mean = miles / 35.0 * 60.0;
        assert!((mode.travel.mean - mean).abs() < 1e-9);
        assert!((mode.travel.sd - f64::max(5.0, 0.3 * mean)).abs() < 1e-9);
        assert_eq!(mode.tier, Some(EstimateTier::StraightLine));

        let dist = hvn.distance_miles;
        let proc = cost_ops::process_mean_minutes(&conf, "HVN", conf.trip.luggage);
        let expected = cost_ops::cash_drive(&conf, "HVN", dist, conf.trip.duration_days)
            + cost_ops::timeval(&conf, 1, mean, proc)
            + cost_ops::transfer_handling(&conf, conf.trip.luggage, 1)
            + cost_ops::comfort(&conf, 1, mean);
        assert_eq!(mode.components.risk, 0.0);
        assert_eq!(mode.components.sched, 0.0);
        assert_eq!(mode.components.carbon, 0.0);
        assert!((mode.total - expected).abs() < 1e-9);
        // single mode, single airport: blend is the mode cost and there is no alternative
        assert!((hvn.gc - expected).abs() < 1e-9);
        assert!(result.delta_gc.is_nan());
    }

    #[test]
    fn test_equidistant_origin_hard_min_delta() {
        let mut conf = test_config();
        conf.airports.insert(String::from("HVN"), Airport::new("west", -73.0, 41.0));
        conf.airports.insert(String::from("JFK"), Airport::new("east", -72.0, 41.0));
        conf.softmin.mu = 50.0;
        let model = model(conf);
        let origin = Origin::new("mid", -72.5, 41.0);
        let mut rng = StdRng::seed_from_u64(8);
        let result = model.evaluate_origin(&origin, &mut rng);

        let hard_min = |code: &str| {
            result
                .airport(code)
                .expect("test invariant")
                .by_mode
                .iter()
                .map(|m| m.total)
                .fold(f64::INFINITY, f64::min)
        };
        let hvn = result.airport("HVN").expect("test invariant");
        let jfk = result.airport("JFK").expect("test invariant");
        assert!((hvn.distance_miles - jfk.distance_miles).abs() < 1e-9);
        let expected = hard_min("HVN") - hard_min("JFK");
        assert!((result.delta_gc - expected).abs() < 0.1);
        for airport in [hvn, jfk] {
            assert!(airport.gc <= hard_min(&airport.airport));
        }
    }

    #[test]
    fn test_run_is_reproducible() {
        let model = model(test_config());
        let origins = vec![
            Origin::new("a", -72.9, 41.3),
            Origin::new("b", -73.2, 41.2),
            Origin::new("c", -72.6, 41.5),
        ];
        let first = model.run(&origins).expect("test invariant");
        let second = model.run(&origins).expect("test invariant");
        assert_eq!(first.len(), 3);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.origin.id, b.origin.id);
            assert_eq!(a.delta_gc, b.delta_gc);
            assert!(a.delta_gc.is_finite());
        }
        assert_eq!(first[1].origin.id, "b");
    }

    #[test]
    fn test_missing_parking_costs_nan_mode_only() {
        let mut conf = test_config();
        conf.modes.drive.parking_daily.remove("JFK");
        let model = model(conf);
        let mut rng = StdRng::seed_from_u64(3);
        let result = model.evaluate_origin(&Origin::new("a", -72.9, 41.3), &mut rng);
        let jfk = result.airport("JFK").expect("test invariant");
        assert!(jfk.mode_totals()[&TravelMode::Drive].is_nan());
        assert!(jfk.gc.is_finite());
        assert!(result.delta_gc.is_finite());
    }
}
