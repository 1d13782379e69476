use itertools::Itertools;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GcdmConfigError {
    #[error("failure reading configuration from {0}: {1}")]
    ReadError(String, config::ConfigError),
    #[error("failure decoding configuration: {source}")]
    DecodeError {
        #[from]
        source: config::ConfigError,
    },
    #[error("unsupported configuration file type: {0}")]
    UnsupportedFileType(String),
    #[error("invalid configuration:\n  {}", .0.iter().join("\n  "))]
    ValidationError(Vec<String>),
}
