use super::ProviderError;
use geo::Point;

/// a live signal near an origin that inflates travel time risk, as a multiplier where 1.0 is neutral.
pub trait ContextProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn multiplier(&self, origin: &Point<f64>) -> Result<f64, ProviderError>;
}
