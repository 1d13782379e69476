pub mod geo_utils;
pub mod stats_ops;
