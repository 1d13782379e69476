use super::OsmNodeId;
use geo::Point;
use serde::{Deserialize, Serialize};

/// a vertex of the drivable road network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoadNode {
    pub osmid: OsmNodeId,
    pub x: f64,
    pub y: f64,
}

impl RoadNode {
    pub fn new(osmid: i64, x: f64, y: f64) -> RoadNode {
        RoadNode {
            osmid: OsmNodeId::from(osmid),
            x,
            y,
        }
    }

    pub fn get_point(&self) -> Point<f64> {
        Point::new(self.x, self.y)
    }
}
