use serde::{Deserialize, Serialize};

/// the seven terms of a generalized cost, all in USD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    pub cash: f64,
    pub timeval: f64,
    pub risk: f64,
    pub sched: f64,
    pub xfer: f64,
    pub comfort: f64,
    pub carbon: f64,
}

impl Components {
    pub fn total(&self) -> f64 {
        self.cash + self.timeval + self.risk + self.sched + self.xfer + self.comfort + self.carbon
    }
}
