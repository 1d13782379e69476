use crate::config::GcdmConfigError;
use crate::model::generalized_cost::GeneralizedCostError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GcdmAppError {
    #[error(transparent)]
    ConfigError(#[from] GcdmConfigError),
    #[error(transparent)]
    ModelError(#[from] GeneralizedCostError),
    #[error("failed reading '{filepath}': {error}")]
    ReadError { filepath: String, error: String },
    #[error("failed writing '{filepath}': {error}")]
    WriteError { filepath: String, error: String },
    #[error("origin '{0}' not found in origins file")]
    OriginNotFound(String),
    #[error("no origins found in '{0}'")]
    NoOrigins(String),
    #[error("{0}")]
    InternalError(String),
}
