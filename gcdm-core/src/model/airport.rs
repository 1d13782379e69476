use geo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// an airport that may be reached from an origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub name: String,
    pub lon: f64,
    pub lat: f64,
}

impl Airport {
    pub fn new(name: &str, lon: f64, lat: f64) -> Airport {
        Airport {
            name: String::from(name),
            lon,
            lat,
        }
    }

    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// airports known without any configuration, keyed by IATA code.
    pub fn builtin() -> HashMap<String, Airport> {
        HashMap::from([
            (
                String::from("HVN"),
                Airport::new("Tweed New Haven", -72.887, 41.263),
            ),
            (
                String::from("JFK"),
                Airport::new("John F. Kennedy Intl", -73.7781, 40.6413),
            ),
            (String::from("LGA"), Airport::new("LaGuardia", -73.8733, 40.7769)),
            (
                String::from("EWR"),
                Airport::new("Newark Liberty Intl", -74.1745, 40.6895),
            ),
        ])
    }
}
