use crate::model::graph::tag_ops::DRIVABLE_HIGHWAYS;
use geo::Point;
use itertools::Itertools;
use std::fmt::Display;

/// Overpass QL query for the drivable road network within a radius of a point.
/// the query recurses down (`>`) so that all nodes of the matched ways are returned.
///
/// see <https://wiki.openstreetmap.org/wiki/Overpass_API/Language_Guide>
#[derive(Debug, Clone)]
pub struct DriveNetworkQuery {
    pub center: Point<f64>,
    pub radius_meters: f64,
    pub timeout_seconds: u64,
}

impl DriveNetworkQuery {
    pub fn new(center: Point<f64>, radius_meters: f64, timeout_seconds: u64) -> Self {
        Self {
            center,
            radius_meters,
            timeout_seconds,
        }
    }
}

impl Display for DriveNetworkQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let highways = DRIVABLE_HIGHWAYS.iter().join("|");
        write!(
            f,
            "[out:json][timeout:{}];(way[\"highway\"~\"^({})$\"][\"area\"!~\"yes\"][\"access\"!~\"private|no\"](around:{:.0},{},{}););(._;>;);out body;",
            self.timeout_seconds,
            highways,
            self.radius_meters,
            self.center.y(),
            self.center.x()
        )
    }
}
