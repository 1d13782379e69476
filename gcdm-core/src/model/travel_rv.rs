use serde::{Deserialize, Serialize};

/// Gaussian approximation of a single mode's door-to-curb travel time, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelRV {
    pub mean: f64,
    pub sd: f64,
}

impl TravelRV {
    /// lower bound on the spread of any estimate, in minutes
    pub const MIN_SD_MINUTES: f64 = 5.0;

    /// builds an estimate whose spread is a fraction of the mean, floored
    /// at [`TravelRV::MIN_SD_MINUTES`].
    ///
    /// # Arguments
    ///
    /// * `mean` - mean travel time in minutes
    /// * `sd_fraction` - share of the mean used as the standard deviation. cruder
    ///   estimation methods should use larger fractions.
    pub fn from_mean(mean: f64, sd_fraction: f64) -> TravelRV {
        TravelRV {
            mean,
            sd: f64::max(Self::MIN_SD_MINUTES, sd_fraction * mean),
        }
    }

    /// derives a new estimate by scaling both moments, as done when a mode
    /// shares the road network of another but with additional variability.
    pub fn scale(&self, mean_factor: f64, sd_factor: f64) -> TravelRV {
        TravelRV {
            mean: self.mean * mean_factor,
            sd: self.sd * sd_factor,
        }
    }
}
