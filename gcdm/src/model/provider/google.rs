use super::{build_http_client, get_json, ProviderError, TravelTimeProvider};
use geo::Point;
use serde::Deserialize;
use std::time::Duration;

const PROVIDER: &str = "google";

/// Google Distance Matrix API, preferring the traffic-aware duration.
pub struct GoogleDistanceMatrix {
    api_key: String,
    client: reqwest::blocking::Client,
}

impl GoogleDistanceMatrix {
    pub const ENDPOINT: &'static str = "https://maps.googleapis.com/maps/api/distancematrix/json";

    pub fn new(api_key: &str, timeout: Duration) -> Result<GoogleDistanceMatrix, ProviderError> {
        Ok(GoogleDistanceMatrix {
            api_key: String::from(api_key),
            client: build_http_client(timeout)?,
        })
    }
}

#[derive(Deserialize)]
struct MatrixResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<MatrixRow>,
}

#[derive(Deserialize)]
struct MatrixRow {
    #[serde(default)]
    elements: Vec<MatrixElement>,
}

#[derive(Deserialize)]
struct MatrixElement {
    status: String,
    duration: Option<MatrixValue>,
    duration_in_traffic: Option<MatrixValue>,
}

#[derive(Deserialize)]
struct MatrixValue {
    value: f64,
}

/// top-level statuses that report a temporary condition
const TRANSIENT_STATUSES: [&str; 2] = ["OVER_QUERY_LIMIT", "UNKNOWN_ERROR"];

fn response_minutes(response: MatrixResponse) -> Result<Option<f64>, ProviderError> {
    if response.status != "OK" {
        let message = format!(
            "{} {}",
            response.status,
            response.error_message.unwrap_or_default()
        );
        return if TRANSIENT_STATUSES.contains(&response.status.as_str()) {
            Err(ProviderError::Unavailable {
                provider: PROVIDER,
                message,
            })
        } else {
            Err(ProviderError::ServiceError {
                provider: PROVIDER,
                message,
            })
        };
    }
    let element = response
        .rows
        .into_iter()
        .next()
        .and_then(|row| row.elements.into_iter().next());
    let minutes = element.and_then(|e| {
        if e.status != "OK" {
            return None;
        }
        e.duration_in_traffic
            .or(e.duration)
            .map(|d| d.value / 60.0)
    });
    Ok(minutes)
}

impl TravelTimeProvider for GoogleDistanceMatrix {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn drive_minutes(
        &self,
        origin: &Point<f64>,
        destination: &Point<f64>,
    ) -> Result<Option<f64>, ProviderError> {
        let request = self.client.get(Self::ENDPOINT).query(&[
            ("origins", format!("{},{}", origin.y(), origin.x())),
            ("destinations", format!("{},{}", destination.y(), destination.x())),
            ("mode", String::from("driving")),
            ("departure_time", String::from("now")),
            ("key", self.api_key.clone()),
        ]);
        let response: MatrixResponse = get_json(PROVIDER, request)?;
        response_minutes(response)
    }
}
