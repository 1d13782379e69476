use serde::{Deserialize, Serialize};

/// market score of a set of itineraries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QsiResult {
    #[serde(rename = "A")]
    pub access_factor: f64,
    #[serde(rename = "W_sum")]
    pub w_sum: f64,
    #[serde(rename = "QSI_plus")]
    pub qsi_plus: f64,
}

impl QsiResult {
    pub fn new(access_factor: f64, w_sum: f64) -> QsiResult {
        QsiResult {
            access_factor,
            w_sum,
            qsi_plus: access_factor * w_sum,
        }
    }
}
