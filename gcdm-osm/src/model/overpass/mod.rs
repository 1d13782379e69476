mod overpass_client;
mod overpass_query;
mod overpass_response;

pub use overpass_client::OverpassClient;
pub use overpass_query::DriveNetworkQuery;
pub use overpass_response::{OverpassElement, OverpassResponse};
