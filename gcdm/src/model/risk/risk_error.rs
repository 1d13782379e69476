use thiserror::Error;

#[derive(Error, Debug)]
pub enum RiskError {
    #[error("cannot sample travel times with non-finite mean {0}")]
    InvalidMean(f64),
    #[error("cannot sample travel times with non-finite standard deviation {0}")]
    InvalidStandardDeviation(f64),
    #[error("failure building sampling distribution: {0}")]
    DistributionError(String),
}
