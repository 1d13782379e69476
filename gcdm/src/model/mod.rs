pub mod components;
pub mod generalized_cost;
pub mod provider;
pub mod qsi;
pub mod risk;
pub mod travel;
