use super::{build_http_client, get_json, ContextProvider, ProviderError};
use geo::Point;
use serde::Deserialize;
use std::time::Duration;

const PROVIDER: &str = "openweathermap";

/// visibility assumed when the service does not report it
const DEFAULT_VISIBILITY_METERS: f64 = 10_000.0;

/// current weather conditions from OpenWeatherMap.
pub struct OpenWeatherMap {
    api_key: String,
    client: reqwest::blocking::Client,
}

impl OpenWeatherMap {
    pub const ENDPOINT: &'static str = "https://api.openweathermap.org/data/2.5/weather";

    pub fn new(api_key: &str, timeout: Duration) -> Result<OpenWeatherMap, ProviderError> {
        Ok(OpenWeatherMap {
            api_key: String::from(api_key),
            client: build_http_client(timeout)?,
        })
    }
}

#[derive(Deserialize)]
struct WeatherResponse {
    #[serde(default)]
    wind: Option<Wind>,
    #[serde(default)]
    rain: Option<serde_json::Value>,
    #[serde(default)]
    snow: Option<serde_json::Value>,
    #[serde(default)]
    visibility: Option<f64>,
}

#[derive(Deserialize)]
struct Wind {
    #[serde(default)]
    speed: f64,
}

impl WeatherResponse {
    fn multiplier(&self) -> f64 {
        weather_multiplier(
            self.wind.as_ref().map(|w| w.speed).unwrap_or_default(),
            self.rain.is_some(),
            self.snow.is_some(),
            self.visibility.unwrap_or(DEFAULT_VISIBILITY_METERS),
        )
    }
}

/// travel time risk multiplier for current weather, in [1, 2].
///
/// # Arguments
///
/// * `wind_mps` - wind speed in meters per second
/// * `rain` - any rain reported
/// * `snow` - any snow reported
/// * `visibility_meters` - reported visibility
pub fn weather_multiplier(wind_mps: f64, rain: bool, snow: bool, visibility_meters: f64) -> f64 {
    let indicator = |b: bool| if b { 1.0 } else { 0.0 };
    let m = 1.0
        + 0.02 * wind_mps
        + 0.3 * indicator(rain)
        + 0.5 * indicator(snow)
        + 0.2 * indicator(visibility_meters < 2000.0);
    m.clamp(1.0, 2.0)
}

impl ContextProvider for OpenWeatherMap {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn multiplier(&self, origin: &Point<f64>) -> Result<f64, ProviderError> {
        let request = self.client.get(Self::ENDPOINT).query(&[
            ("lat", origin.y().to_string()),
            ("lon", origin.x().to_string()),
            ("appid", self.api_key.clone()),
        ]);
        let response: WeatherResponse = get_json(PROVIDER, request)?;
        Ok(response.multiplier())
    }
}
