mod curb_window;
mod generalized_cost_error;
mod generalized_cost_model;
mod origin_result;
pub mod softmin_ops;

pub use curb_window::{CurbWindow, ScheduleParseError};
pub use generalized_cost_error::GeneralizedCostError;
pub use generalized_cost_model::GeneralizedCostModel;
pub use origin_result::{AirportCost, ModeCost, OriginResult};
