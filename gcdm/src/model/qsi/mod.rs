//! itinerary scoring: access cost combined with schedule, reliability, price and
//! product quality into a single desirability index.
mod hub_inputs;
mod itinerary;
pub mod qsi_ops;
mod qsi_plus_engine;
mod qsi_result;

pub use hub_inputs::HubInputs;
pub use itinerary::Itinerary;
pub use qsi_plus_engine::QsiPlusEngine;
pub use qsi_result::QsiResult;
