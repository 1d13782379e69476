use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// OpenStreetMap id of a road network vertex, as returned by Overpass. kept
/// alongside the dense graph index so that routing failures can name the nodes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OsmNodeId(pub i64);

impl From<i64> for OsmNodeId {
    fn from(value: i64) -> Self {
        OsmNodeId(value)
    }
}

impl Display for OsmNodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node/{}", self.0)
    }
}
