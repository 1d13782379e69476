mod osm_node_id;
mod road_edge;
mod road_graph;
mod road_node;
pub mod tag_ops;

pub use osm_node_id::OsmNodeId;
pub use road_edge::RoadEdge;
pub use road_graph::RoadGraph;
pub use road_node::RoadNode;
