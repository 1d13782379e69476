use geo::Point;
use serde::{Deserialize, Serialize};

/// a trip origin, typically the centroid of a ZIP code tabulation area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    #[serde(alias = "zip")]
    pub id: String,
    pub lon: f64,
    pub lat: f64,
}

impl Origin {
    pub fn new(id: &str, lon: f64, lat: f64) -> Origin {
        Origin {
            id: String::from(id),
            lon,
            lat,
        }
    }

    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}
