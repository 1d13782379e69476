use super::{build_http_client, get_json, ProviderError, TravelTimeProvider};
use geo::Point;
use serde::Deserialize;
use std::time::Duration;

const PROVIDER: &str = "openrouteservice";

/// OpenRouteService directions with the `driving-car` profile.
pub struct OpenRouteServiceDirections {
    api_key: String,
    client: reqwest::blocking::Client,
}

impl OpenRouteServiceDirections {
    pub const ENDPOINT: &'static str = "https://api.openrouteservice.org/v2/directions/driving-car";

    pub fn new(
        api_key: &str,
        timeout: Duration,
    ) -> Result<OpenRouteServiceDirections, ProviderError> {
        Ok(OpenRouteServiceDirections {
            api_key: String::from(api_key),
            client: build_http_client(timeout)?,
        })
    }
}

#[derive(Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    properties: Properties,
}

#[derive(Deserialize)]
struct Properties {
    summary: Summary,
}

#[derive(Deserialize)]
struct Summary {
    /// seconds, omitted by the service for zero-length routes
    #[serde(default)]
    duration: f64,
}

impl TravelTimeProvider for OpenRouteServiceDirections {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn drive_minutes(
        &self,
        origin: &Point<f64>,
        destination: &Point<f64>,
    ) -> Result<Option<f64>, ProviderError> {
        let request = self.client.get(Self::ENDPOINT).query(&[
            ("api_key", self.api_key.clone()),
            ("start", format!("{},{}", origin.x(), origin.y())),
            ("end", format!("{},{}", destination.x(), destination.y())),
        ]);
        let response: DirectionsResponse = get_json(PROVIDER, request)?;
        Ok(response
            .features
            .first()
            .map(|f| f.properties.summary.duration / 60.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_summary() {
        let body = r#"{"type": "FeatureCollection", "features": [{"type": "Feature",
            "properties": {"summary": {"distance": 41234.5, "duration": 2520.0}}}]}"#;
        let response: DirectionsResponse = serde_json::from_str(body).expect("test invariant");
        let minutes = response.features.first().map(|f| f.properties.summary.duration / 60.0);
        assert_eq!(minutes, Some(42.0));
    }
}
