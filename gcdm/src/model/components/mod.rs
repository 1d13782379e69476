mod cost_components;
pub mod cost_ops;

pub use cost_components::Components;
