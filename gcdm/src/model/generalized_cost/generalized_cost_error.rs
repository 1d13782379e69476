use crate::model::provider::ProviderError;
use gcdm_osm::model::NetworkError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneralizedCostError {
    #[error("failure building providers: {source}")]
    ProviderError {
        #[from]
        source: ProviderError,
    },
    #[error("failure building road network router: {source}")]
    NetworkError {
        #[from]
        source: NetworkError,
    },
    #[error("failure building worker pool: {0}")]
    ThreadPoolError(String),
    #[error("{0}")]
    InternalError(String),
}
