mod config_error;
mod cost_config;
mod gcdm_config;
mod mode_config;
mod party_config;
mod project_config;
mod provider_config;
mod qsi_config;
mod risk_config;
mod schedule_config;

pub use config_error::GcdmConfigError;
pub use cost_config::{
    CarbonConfig, ComfortConfig, ProcessTimesConfig, SoftminConfig, TransferConfig,
};
pub use gcdm_config::GcdmConfig;
pub use mode_config::{DriveCostConfig, DriveModeConfig, ModesConfig, RailModeConfig, RideModeConfig};
pub use party_config::{PartyConfig, VotBand, VotConfig};
pub use project_config::{Luggage, ProjectConfig, RegionConfig, TripConfig};
pub use provider_config::{NetworkConfig, ProviderConfig, RetryConfig};
pub use qsi_config::{
    HodParams, HubRisk, LayoverParams, QsiConfig, QsiSegment, QsiState, QualityWeights,
};
pub use risk_config::{RiskConfig, RiskMultipliers, ShockConfig};
pub use schedule_config::{CurbWindowConfig, ScheduleConfig};

#[cfg(test)]
mod test_config;
#[cfg(test)]
pub(crate) use test_config::test_config;
