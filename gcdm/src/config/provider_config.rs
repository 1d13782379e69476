use serde::{Deserialize, Serialize};

/// external data providers. a provider is active when its flag is set and its key is non-empty.
/// keys are usually supplied through the environment, e.g. `GCDM__PROVIDERS__GOOGLE_API_KEY`.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub enable_google: bool,
    #[serde(default)]
    pub enable_openrouteservice: bool,
    #[serde(default)]
    pub enable_mapbox: bool,
    #[serde(default)]
    pub enable_weather: bool,
    #[serde(default)]
    pub enable_events: bool,
    #[serde(default)]
    pub google_api_key: String,
    #[serde(default)]
    pub ors_api_key: String,
    #[serde(default)]
    pub mapbox_api_key: String,
    #[serde(default)]
    pub owm_api_key: String,
    #[serde(default)]
    pub ticketmaster_api_key: String,
    #[serde(default = "ProviderConfig::default_timeout_seconds")]
    pub timeout_seconds: f64,
    #[serde(default)]
    pub retry: RetryConfig,
}

impl ProviderConfig {
    fn default_timeout_seconds() -> f64 {
        10.0
    }

    pub fn google_active(&self) -> bool {
        self.enable_google && !self.google_api_key.is_empty()
    }
    pub fn openrouteservice_active(&self) -> bool {
        self.enable_openrouteservice && !self.ors_api_key.is_empty()
    }
    pub fn mapbox_active(&self) -> bool {
        self.enable_mapbox && !self.mapbox_api_key.is_empty()
    }
    pub fn weather_active(&self) -> bool {
        self.enable_weather && !self.owm_api_key.is_empty()
    }
    pub fn events_active(&self) -> bool {
        self.enable_events && !self.ticketmaster_api_key.is_empty()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            enable_google: false,
            enable_openrouteservice: false,
            enable_mapbox: false,
            enable_weather: false,
            enable_events: false,
            google_api_key: String::new(),
            ors_api_key: String::new(),
            mapbox_api_key: String::new(),
            owm_api_key: String::new(),
            ticketmaster_api_key: String::new(),
            timeout_seconds: Self::default_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }
}

// api keys stay out of logs
impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("google", &self.google_active())
            .field("openrouteservice", &self.openrouteservice_active())
            .field("mapbox", &self.mapbox_active())
            .field("weather", &self.weather_active())
            .field("events", &self.events_active())
            .field("timeout_seconds", &self.timeout_seconds)
            .field("retry", &self.retry)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// retries after the first attempt
    #[serde(default = "RetryConfig::default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "RetryConfig::default_initial_backoff")]
    pub initial_backoff_seconds: f64,
    #[serde(default = "RetryConfig::default_max_backoff")]
    pub max_backoff_seconds: f64,
}

impl RetryConfig {
    fn default_max_retries() -> u32 {
        3
    }
    fn default_initial_backoff() -> f64 {
        0.5
    }
    fn default_max_backoff() -> f64 {
        8.0
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: Self::default_max_retries(),
            initial_backoff_seconds: Self::default_initial_backoff(),
            max_backoff_seconds: Self::default_max_backoff(),
        }
    }
}

/// road network tier of the drive time estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "NetworkConfig::default_overpass_url")]
    pub overpass_url: String,
    /// radius of the road network downloaded around each origin
    #[serde(default = "NetworkConfig::default_radius_meters")]
    pub radius_meters: f64,
    /// speed assumed for roads without a usable maxspeed tag
    #[serde(default = "NetworkConfig::default_speed_kph")]
    pub default_speed_kph: f64,
    #[serde(default = "NetworkConfig::default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl NetworkConfig {
    fn default_overpass_url() -> String {
        String::from(gcdm_osm::model::overpass::OverpassClient::DEFAULT_ENDPOINT)
    }
    fn default_radius_meters() -> f64 {
        60_000.0
    }
    fn default_speed_kph() -> f64 {
        50.0
    }
    fn default_timeout_seconds() -> u64 {
        180
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            overpass_url: Self::default_overpass_url(),
            radius_meters: Self::default_radius_meters(),
            default_speed_kph: Self::default_speed_kph(),
            timeout_seconds: Self::default_timeout_seconds(),
        }
    }
}
