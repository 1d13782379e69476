use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("failure building http client: {0}")]
    ClientBuildError(String),
    #[error("{provider} request failed: {source}")]
    RequestError {
        provider: &'static str,
        source: reqwest::Error,
    },
    #[error("{provider} response could not be decoded: {message}")]
    DecodeError {
        provider: &'static str,
        message: String,
    },
    #[error("{provider} reported an error: {message}")]
    ServiceError {
        provider: &'static str,
        message: String,
    },
    #[error("{provider} is temporarily unavailable: {message}")]
    Unavailable {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    /// failures worth retrying: timeouts, connection failures, HTTP 429 and 5xx,
    /// and service statuses reporting a temporary condition.
    pub fn is_transient(&self) -> bool {
        match self {
            ProviderError::RequestError { source, .. } => {
                source.is_timeout()
                    || source.is_connect()
                    || source
                        .status()
                        .map(|s| s.is_server_error() || s.as_u16() == 429)
                        .unwrap_or(false)
            }
            ProviderError::Unavailable { .. } => true,
            ProviderError::ClientBuildError(_)
            | ProviderError::DecodeError { .. }
            | ProviderError::ServiceError { .. } => false,
        }
    }
}
