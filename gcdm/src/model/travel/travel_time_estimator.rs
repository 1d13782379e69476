use super::{EstimateTier, TravelMode};
use crate::model::provider::ProviderAggregator;
use gcdm_core::model::TravelRV;
use gcdm_core::util::geo_utils;
use gcdm_osm::model::NetworkRouter;
use geo::Point;
use uom::si::f64::Velocity;
use uom::si::{length, time, velocity};

/// produces a travel time estimate per mode, falling back from live providers to
/// a road network route to a straight-line heuristic.
pub struct TravelTimeEstimator {
    providers: ProviderAggregator,
    router: Option<Box<dyn NetworkRouter>>,
}

impl TravelTimeEstimator {
    pub const STRAIGHT_LINE_DRIVE_MPH: f64 = 35.0;
    pub const STRAIGHT_LINE_RAIL_MPH: f64 = 30.0;
    pub const RAIL_SD_FRACTION: f64 = 0.20;
    pub const RIDE_MEAN_FACTOR: f64 = 1.05;
    pub const RIDE_SD_FACTOR: f64 = 1.2;

    pub fn new(
        providers: ProviderAggregator,
        router: Option<Box<dyn NetworkRouter>>,
    ) -> TravelTimeEstimator {
        TravelTimeEstimator { providers, router }
    }

    pub fn providers(&self) -> &ProviderAggregator {
        &self.providers
    }

    /// estimate for any mode. ride is derived from a fresh drive estimate; callers
    /// holding a drive estimate should use [`TravelTimeEstimator::ride_from_drive`].
    pub fn estimate(&self, mode: TravelMode, origin: &Point<f64>, destination: &Point<f64>) -> TravelRV {
        match mode {
            TravelMode::Drive => self.drive(origin, destination).0,
            TravelMode::Ride => Self::ride_from_drive(&self.drive(origin, destination).0),
            TravelMode::Rail => Self::rail(origin, destination),
        }
    }

    /// drive estimate and the tier that produced it.
    pub fn drive(&self, origin: &Point<f64>, destination: &Point<f64>) -> (TravelRV, EstimateTier) {
        let (minutes, tier) = self.drive_mean(origin, destination);
        log::debug!(
            "drive ({:.4}, {:.4}) -> ({:.4}, {:.4}): {minutes:.1} min from {tier} tier",
            origin.x(),
            origin.y(),
            destination.x(),
            destination.y()
        );
        (TravelRV::from_mean(minutes, tier.drive_sd_fraction()), tier)
    }

    fn drive_mean(&self, origin: &Point<f64>, destination: &Point<f64>) -> (f64, EstimateTier) {
        if let Some(minutes) = self.providers.aggregate_drive_minutes(origin, destination) {
            return (minutes, EstimateTier::Provider);
        }
        if let Some(router) = &self.router {
            match router.travel_time(*origin, *destination) {
                Ok(t) => {
                    let minutes = t.get::<time::minute>();
                    if minutes.is_finite() && minutes > 0.0 {
                        return (minutes, EstimateTier::Network);
                    }
                    log::warn!("road network route gave {minutes} minutes, using straight line");
                }
                Err(e) => log::warn!("road network route failed, using straight line: {e}"),
            }
        }
        let speed = Velocity::new::<velocity::mile_per_hour>(Self::STRAIGHT_LINE_DRIVE_MPH);
        (straight_line_minutes(origin, destination, speed), EstimateTier::StraightLine)
    }

    /// rideshare uses the road like a private car with more variability.
    pub fn ride_from_drive(drive: &TravelRV) -> TravelRV {
        drive.scale(Self::RIDE_MEAN_FACTOR, Self::RIDE_SD_FACTOR)
    }

    /// rail is always a straight-line heuristic with a slower average speed but
    /// a tighter spread than driving.
    pub fn rail(origin: &Point<f64>, destination: &Point<f64>) -> TravelRV {
        let speed = Velocity::new::<velocity::mile_per_hour>(Self::STRAIGHT_LINE_RAIL_MPH);
        TravelRV::from_mean(
            straight_line_minutes(origin, destination, speed),
            Self::RAIL_SD_FRACTION,
        )
    }
}

/// minutes to cover the geodesic distance at a constant speed.
fn straight_line_minutes(origin: &Point<f64>, destination: &Point<f64>, speed: Velocity) -> f64 {
    let distance = geo_utils::geodesic_distance(*origin, *destination);
    let hours = distance.get::<length::mile>() / speed.get::<velocity::mile_per_hour>();
    hours * 60.0
}
