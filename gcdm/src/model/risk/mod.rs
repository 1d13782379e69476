mod risk_error;
pub mod risk_ops;

pub use risk_error::RiskError;
