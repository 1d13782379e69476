use super::graph::OsmNodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("failure building overpass HTTP client: {0}")]
    ClientBuildError(String),
    #[error("overpass request failed: {source}")]
    OverpassRequestError {
        #[from]
        source: reqwest::Error,
    },
    #[error("failure decoding overpass response: {0}")]
    OverpassDecodeError(String),
    #[error("road network contains no drivable segments")]
    EmptyNetwork,
    #[error("unable to snap point ({0}, {1}) to the road network")]
    SnapFailed(f64, f64),
    #[error("no route found from node '{0}' to node '{1}'")]
    NoRoute(OsmNodeId, OsmNodeId),
    #[error("{0}")]
    InternalError(String),
}
