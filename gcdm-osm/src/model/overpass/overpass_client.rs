use super::{DriveNetworkQuery, OverpassResponse};
use crate::model::NetworkError;
use std::time::Duration;

/// blocking client for an Overpass API interpreter endpoint.
pub struct OverpassClient {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl OverpassClient {
    pub const DEFAULT_ENDPOINT: &'static str = "https://overpass-api.de/api/interpreter";

    pub fn new(endpoint: &str, timeout: Duration) -> Result<OverpassClient, NetworkError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gcdm-osm/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NetworkError::ClientBuildError(e.to_string()))?;
        Ok(OverpassClient {
            endpoint: String::from(endpoint),
            client,
        })
    }

    /// runs a drive network query, returning the raw node and way elements.
    pub fn fetch(&self, query: &DriveNetworkQuery) -> Result<OverpassResponse, NetworkError> {
        log::debug!("overpass query to {}: {}", self.endpoint, query);
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("data", query.to_string())])
            .send()?
            .error_for_status()?;
        let text = response.text()?;
        serde_json::from_str(&text).map_err(|e| NetworkError::OverpassDecodeError(e.to_string()))
    }
}
