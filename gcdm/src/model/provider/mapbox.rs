use super::{build_http_client, get_json, ProviderError, TravelTimeProvider};
use geo::Point;
use serde::Deserialize;
use std::time::Duration;

const PROVIDER: &str = "mapbox";

/// Mapbox Directions API with the `driving` profile.
pub struct MapboxDirections {
    access_token: String,
    client: reqwest::blocking::Client,
}

impl MapboxDirections {
    pub const ENDPOINT: &'static str = "https://api.mapbox.com/directions/v5/mapbox/driving";

    pub fn new(access_token: &str, timeout: Duration) -> Result<MapboxDirections, ProviderError> {
        Ok(MapboxDirections {
            access_token: String::from(access_token),
            client: build_http_client(timeout)?,
        })
    }
}

#[derive(Deserialize)]
struct DirectionsResponse {
    code: String,
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Deserialize)]
struct Route {
    /// seconds
    duration: f64,
}

fn response_minutes(response: DirectionsResponse) -> Result<Option<f64>, ProviderError> {
    match response.code.as_str() {
        "Ok" => Ok(response.routes.first().map(|r| r.duration / 60.0)),
        "NoRoute" | "NoSegment" => Ok(None),
        other => Err(ProviderError::ServiceError {
            provider: PROVIDER,
            message: other.to_string(),
        }),
    }
}

impl TravelTimeProvider for MapboxDirections {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn drive_minutes(
        &self,
        origin: &Point<f64>,
        destination: &Point<f64>,
    ) -> Result<Option<f64>, ProviderError> {
        // lon,lat pairs
        let url = format!(
            "{}/{},{};{},{}",
            Self::ENDPOINT,
            origin.x(),
            origin.y(),
            destination.x(),
            destination.y()
        );
        let request = self.client.get(url).query(&[
            ("alternatives", "false"),
            ("overview", "false"),
            ("access_token", self.access_token.as_str()),
        ]);
        let response: DirectionsResponse = get_json(PROVIDER, request)?;
        response_minutes(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_route_duration() {
        let body = r#"{"code": "Ok", "routes": [{"duration": 3000.0, "distance": 70000.0},
            {"duration": 3600.0, "distance": 65000.0}]}"#;
        let response: DirectionsResponse = serde_json::from_str(body).expect("test invariant");
        assert_eq!(response_minutes(response).expect("test invariant"), Some(50.0));
    }

    #[test]
    fn test_no_route() {
        let body = r#"{"code": "NoRoute", "routes": []}"#;
        let response: DirectionsResponse = serde_json::from_str(body).expect("test invariant");
        assert_eq!(response_minutes(response).expect("test invariant"), None);
    }
}
