pub mod graph;
mod network_error;
pub mod overpass;
mod router;

pub use network_error::NetworkError;
pub use router::{GraphCache, NetworkRouter, OverpassRouter};
