//! external travel time and context signal providers.
mod context_provider;
mod google;
mod mapbox;
mod openrouteservice;
mod openweather;
mod provider_aggregator;
mod provider_error;
mod retry_policy;
mod ticketmaster;
mod travel_time_provider;

pub use context_provider::ContextProvider;
pub use google::GoogleDistanceMatrix;
pub use mapbox::MapboxDirections;
pub use openrouteservice::OpenRouteServiceDirections;
pub use openweather::{weather_multiplier, OpenWeatherMap};
pub use provider_aggregator::ProviderAggregator;
pub use provider_error::ProviderError;
pub use retry_policy::RetryPolicy;
pub use ticketmaster::{event_multiplier, TicketmasterEvents};
pub use travel_time_provider::TravelTimeProvider;

use std::time::Duration;

/// blocking http client shared by a single provider.
pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::blocking::Client, ProviderError> {
    reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("gcdm/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ProviderError::ClientBuildError(e.to_string()))
}

/// sends a GET request and decodes the JSON body into `T`.
pub(crate) fn get_json<T: serde::de::DeserializeOwned>(
    provider: &'static str,
    request: reqwest::blocking::RequestBuilder,
) -> Result<T, ProviderError> {
    let response = request
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|source| ProviderError::RequestError { provider, source })?;
    let text = response
        .text()
        .map_err(|source| ProviderError::RequestError { provider, source })?;
    serde_json::from_str(&text).map_err(|e| ProviderError::DecodeError {
        provider,
        message: e.to_string(),
    })
}
