mod estimate_tier;
mod travel_mode;
mod travel_time_estimator;

pub use estimate_tier::EstimateTier;
pub use travel_mode::TravelMode;
pub use travel_time_estimator::TravelTimeEstimator;
