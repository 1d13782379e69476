use super::{tag_ops, OsmNodeId, RoadEdge, RoadNode};
use crate::model::overpass::{OverpassElement, OverpassResponse};
use crate::model::NetworkError;
use geo::{Distance, Haversine, Point};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use rstar::{primitives::GeomWithData, RTree};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use uom::si::f64::{Length, Time, Velocity};
use uom::si::{length, time};

type NodeEnvelope = GeomWithData<[f64; 2], usize>;

/// a directed, drivable road network with a spatial index over its nodes.
pub struct RoadGraph {
    nodes: Vec<RoadNode>,
    adjacency: Vec<Vec<RoadEdge>>,
    rtree: RTree<NodeEnvelope>,
    default_speed: Velocity,
}

impl RoadGraph {
    /// builds a graph from nodes and directed edges given as (source index, edge).
    ///
    /// # Arguments
    ///
    /// * `nodes` - graph vertices
    /// * `edges` - (source index, edge) pairs. edge destinations index into `nodes`.
    /// * `default_speed` - speed assumed for edges without a posted speed
    pub fn new(
        nodes: Vec<RoadNode>,
        edges: Vec<(usize, RoadEdge)>,
        default_speed: Velocity,
    ) -> Result<RoadGraph, NetworkError> {
        if edges.is_empty() {
            return Err(NetworkError::EmptyNetwork);
        }
        let mut adjacency: Vec<Vec<RoadEdge>> = vec![vec![]; nodes.len()];
        let mut incident = vec![false; nodes.len()];
        for (src, edge) in edges.into_iter() {
            if src >= nodes.len() || edge.dst >= nodes.len() {
                return Err(NetworkError::InternalError(format!(
                    "edge ({src}, {}) references a node outside of the graph with {} nodes",
                    edge.dst,
                    nodes.len()
                )));
            }
            incident[src] = true;
            incident[edge.dst] = true;
            adjacency[src].push(edge);
        }
        // only nodes touching an edge are valid snapping targets
        let envelopes = nodes
            .iter()
            .enumerate()
            .filter(|(idx, _)| incident[*idx])
            .map(|(idx, n)| GeomWithData::new([n.x, n.y], idx))
            .collect_vec();
        let rtree = RTree::bulk_load(envelopes);
        Ok(RoadGraph {
            nodes,
            adjacency,
            rtree,
            default_speed,
        })
    }

    /// builds a graph from the ways and nodes of an Overpass response. each pair of
    /// consecutive way nodes becomes one edge per allowed travel direction. segments
    /// referencing nodes missing from the response are skipped.
    pub fn try_from_overpass(
        response: &OverpassResponse,
        default_speed: Velocity,
    ) -> Result<RoadGraph, NetworkError> {
        let mut nodes: Vec<RoadNode> = vec![];
        let mut node_lookup: HashMap<i64, usize> = HashMap::new();
        for element in response.elements.iter() {
            if let OverpassElement::Node { id, lat, lon } = element {
                node_lookup.insert(*id, nodes.len());
                nodes.push(RoadNode::new(*id, *lon, *lat));
            }
        }

        let mut edges: Vec<(usize, RoadEdge)> = vec![];
        let mut skipped: usize = 0;
        for element in response.elements.iter() {
            let (way_id, way_nodes, tags) = match element {
                OverpassElement::Way { id, nodes, tags } => (id, nodes, tags),
                _ => continue,
            };
            let speed = match tags.get("maxspeed") {
                None => None,
                Some(s) => tag_ops::deserialize_speed(s).unwrap_or_else(|e| {
                    log::debug!("way {way_id} has invalid maxspeed: {e}");
                    None
                }),
            };
            let duration = match tags.get("duration") {
                None => None,
                Some(s) => tag_ops::deserialize_duration(s)
                    .map_err(|e| log::debug!("way {way_id} has invalid duration: {e}"))
                    .ok(),
            };
            let (forward, backward) = tag_ops::travel_directions(
                tags.get("oneway").map(String::as_str),
                tags.get("junction").map(String::as_str),
            );

            let segments = way_nodes
                .iter()
                .tuple_windows()
                .filter_map(|(u, v)| match (node_lookup.get(u), node_lookup.get(v)) {
                    (Some(a), Some(b)) => Some((*a, *b)),
                    _ => {
                        skipped += 1;
                        None
                    }
                })
                .map(|(a, b)| {
                    let meters = Haversine.distance(nodes[a].get_point(), nodes[b].get_point());
                    (a, b, Length::new::<length::meter>(meters))
                })
                .collect_vec();

            // a tagged duration covers the whole way, apportioned to segments by length
            let way_length = segments
                .iter()
                .fold(Length::new::<length::meter>(0.0), |acc, (_, _, l)| acc + *l);
            for (a, b, seg_length) in segments.into_iter() {
                let travel_time = match duration {
                    Some(d) if way_length.value > 0.0 => Some(d * (seg_length.value / way_length.value)),
                    _ => None,
                };
                if forward {
                    edges.push((a, RoadEdge::new(b, seg_length, speed, travel_time)));
                }
                if backward {
                    edges.push((b, RoadEdge::new(a, seg_length, speed, travel_time)));
                }
            }
        }
        if skipped > 0 {
            log::debug!("skipped {skipped} way segments referencing unknown nodes");
        }
        RoadGraph::new(nodes, edges, default_speed)
    }

    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn n_edges(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// finds the index of the network node nearest to a point (x = lon, y = lat).
    pub fn nearest_node(&self, point: &Point<f64>) -> Option<usize> {
        self.rtree
            .nearest_neighbor(&[point.x(), point.y()])
            .map(|n| n.data)
    }

    /// Dijkstra's shortest path by travel time between two node indices.
    pub fn shortest_travel_time(&self, src: usize, dst: usize) -> Result<Time, NetworkError> {
        let n = self.nodes.len();
        if src >= n || dst >= n {
            return Err(NetworkError::InternalError(format!(
                "search from {src} to {dst} outside of graph with {n} nodes"
            )));
        }
        let mut costs = vec![f64::INFINITY; n];
        let mut frontier: BinaryHeap<Reverse<(OrderedFloat<f64>, usize)>> = BinaryHeap::new();
        costs[src] = 0.0;
        frontier.push(Reverse((OrderedFloat(0.0), src)));

        while let Some(Reverse((OrderedFloat(cost), node))) = frontier.pop() {
            if node == dst {
                return Ok(Time::new::<time::second>(cost));
            }
            if cost > costs[node] {
                continue;
            }
            for edge in self.adjacency[node].iter() {
                let next_cost = cost + edge.get_travel_time(self.default_speed).get::<time::second>();
                if next_cost < costs[edge.dst] {
                    costs[edge.dst] = next_cost;
                    frontier.push(Reverse((OrderedFloat(next_cost), edge.dst)));
                }
            }
        }
        Err(NetworkError::NoRoute(
            self.nodes[src].osmid,
            self.nodes[dst].osmid,
        ))
    }

    /// snaps both points to the network and returns the fastest travel time between them.
    pub fn route_travel_time(
        &self,
        origin: &Point<f64>,
        destination: &Point<f64>,
    ) -> Result<Time, NetworkError> {
        let src = self
            .nearest_node(origin)
            .ok_or(NetworkError::SnapFailed(origin.x(), origin.y()))?;
        let dst = self
            .nearest_node(destination)
            .ok_or(NetworkError::SnapFailed(destination.x(), destination.y()))?;
        self.shortest_travel_time(src, dst)
    }

    pub fn get_node_id(&self, index: usize) -> Option<OsmNodeId> {
        self.nodes.get(index).map(|n| n.osmid)
    }
}

#[cfg(test)]
mod tests {
    use super::RoadGraph;
    use crate::model::graph::{RoadEdge, RoadNode};
    use crate::model::overpass::OverpassResponse;
    use geo::Point;
    use uom::si::f64::{Length, Velocity};
    use uom::si::{length, time, velocity};

    fn kph(v: f64) -> Velocity {
        Velocity::new::<velocity::kilometer_per_hour>(v)
    }

    /// a square where the direct edge 0 -> 3 is slow and the detour 0 -> 1 -> 2 -> 3 is fast
    fn create_test_graph() -> RoadGraph {
        let nodes = vec![
            RoadNode::new(100, 0.0, 0.0),
            RoadNode::new(101, 0.0, 0.01),
            RoadNode::new(102, 0.01, 0.01),
            RoadNode::new(103, 0.01, 0.0),
        ];
        let km = |v: f64| Length::new::<length::kilometer>(v);
        let edges = vec![
            (0, RoadEdge::new(3, km(1.0), Some(kph(10.0)), None)), // 6 minutes
            (0, RoadEdge::new(1, km(1.0), Some(kph(60.0)), None)), // 1 minute
            (1, RoadEdge::new(2, km(1.0), Some(kph(60.0)), None)), // 1 minute
            (2, RoadEdge::new(3, km(1.0), Some(kph(60.0)), None)), // 1 minute
        ];
        RoadGraph::new(nodes, edges, kph(50.0)).expect("test graph should build")
    }

    #[test]
    fn test_shortest_path_prefers_fast_detour() {
        let graph = create_test_graph();
        let minutes = graph
            .shortest_travel_time(0, 3)
            .expect("route should exist")
            .get::<time::minute>();
        assert!((minutes - 3.0).abs() < 1e-9, "got {minutes}");
    }

    #[test]
    fn test_no_route_against_direction() {
        let graph = create_test_graph();
        assert!(graph.shortest_travel_time(3, 0).is_err());
    }

    #[test]
    fn test_nearest_node() {
        let graph = create_test_graph();
        assert_eq!(graph.nearest_node(&Point::new(0.0101, 0.0099)), Some(2));
        assert_eq!(graph.get_node_id(2).map(|n| n.0), Some(102));
    }

    #[test]
    fn test_empty_graph_fails() {
        let result = RoadGraph::new(vec![RoadNode::new(1, 0.0, 0.0)], vec![], kph(50.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_overpass() {
        let json = r#"{"elements": [
            {"type": "node", "id": 1, "lat": 41.30, "lon": -72.90},
            {"type": "node", "id": 2, "lat": 41.31, "lon": -72.90},
            {"type": "node", "id": 3, "lat": 41.32, "lon": -72.90},
            {"type": "way", "id": 10, "nodes": [1, 2, 3], "tags": {"highway": "primary", "maxspeed": "30 mph"}},
            {"type": "way", "id": 11, "nodes": [3, 4], "tags": {"highway": "residential"}},
            {"type": "way", "id": 12, "nodes": [2, 3], "tags": {"highway": "primary", "oneway": "yes", "duration": "10"}}
        ]}"#;
        let response: OverpassResponse = serde_json::from_str(json).unwrap();
        let graph = RoadGraph::try_from_overpass(&response, kph(50.0)).expect("should build");
        assert_eq!(graph.n_nodes(), 3);
        // way 10: 2 segments x 2 directions, way 11 skipped, way 12: 1 segment one way
        assert_eq!(graph.n_edges(), 5);

        // 0.02 degrees of latitude is ~2.22 km, ~1.38 miles at 30 mph
        let minutes = graph
            .route_travel_time(&Point::new(-72.9, 41.3), &Point::new(-72.9, 41.32))
            .expect("route should exist")
            .get::<time::minute>();
        assert!(minutes > 2.6 && minutes < 2.9, "got {minutes}");
    }

    #[test]
    fn test_negative_duration_tag_uses_length_and_speed() {
        let json = r#"{"elements": [
            {"type": "node", "id": 1, "lat": 41.30, "lon": -72.90},
            {"type": "node", "id": 2, "lat": 41.31, "lon": -72.90},
            {"type": "way", "id": 10, "nodes": [1, 2], "tags": {"highway": "primary", "duration": "-30"}}
        ]}"#;
        let response: OverpassResponse = serde_json::from_str(json).expect("test invariant");
        let graph = RoadGraph::try_from_overpass(&response, kph(50.0)).expect("test invariant");
        let minutes = graph
            .route_travel_time(&Point::new(-72.9, 41.3), &Point::new(-72.9, 41.31))
            .expect("route should exist")
            .get::<time::minute>();
        // ~1.11 km at the 50 km/h default
        assert!(minutes > 1.2 && minutes < 1.5, "got {minutes}");
    }
}
