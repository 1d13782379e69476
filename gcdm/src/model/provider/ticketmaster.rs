use super::{build_http_client, get_json, ContextProvider, ProviderError};
use geo::Point;
use serde::Deserialize;
use std::time::Duration;

const PROVIDER: &str = "ticketmaster";

/// event density near an origin from the Ticketmaster Discovery API.
pub struct TicketmasterEvents {
    api_key: String,
    client: reqwest::blocking::Client,
}

impl TicketmasterEvents {
    pub const ENDPOINT: &'static str = "https://app.ticketmaster.com/discovery/v2/events.json";
    pub const RADIUS_MILES: u32 = 30;

    pub fn new(api_key: &str, timeout: Duration) -> Result<TicketmasterEvents, ProviderError> {
        Ok(TicketmasterEvents {
            api_key: String::from(api_key),
            client: build_http_client(timeout)?,
        })
    }
}

#[derive(Deserialize)]
struct EventsResponse {
    #[serde(default)]
    page: Option<Page>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Page {
    #[serde(default)]
    total_elements: u64,
}

/// congestion multiplier for a count of nearby events.
pub fn event_multiplier(event_count: u64) -> f64 {
    match event_count {
        n if n >= 100 => 1.3,
        n if n >= 50 => 1.15,
        n if n >= 10 => 1.05,
        _ => 1.0,
    }
}

impl ContextProvider for TicketmasterEvents {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    fn multiplier(&self, origin: &Point<f64>) -> Result<f64, ProviderError> {
        let request = self.client.get(Self::ENDPOINT).query(&[
            ("apikey", self.api_key.clone()),
            ("latlong", format!("{},{}", origin.y(), origin.x())),
            ("radius", Self::RADIUS_MILES.to_string()),
            ("unit", String::from("miles")),
        ]);
        let response: EventsResponse = get_json(PROVIDER, request)?;
        let count = response.page.map(|p| p.total_elements).unwrap_or_default();
        Ok(event_multiplier(count))
    }
}
