use super::ProviderError;
use geo::Point;

/// a service estimating drive durations between WGS84 points.
pub trait TravelTimeProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// drive time in minutes. `Ok(None)` when the service has no route between the points.
    fn drive_minutes(
        &self,
        origin: &Point<f64>,
        destination: &Point<f64>,
    ) -> Result<Option<f64>, ProviderError>;
}
