use super::graph::RoadGraph;
use super::overpass::{DriveNetworkQuery, OverpassClient};
use super::NetworkError;
use geo::Point;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uom::si::f64::{Length, Time, Velocity};
use uom::si::length;

/// capability to compute a road network travel time between two WGS84 points.
pub trait NetworkRouter: Send + Sync {
    fn travel_time(&self, origin: Point<f64>, destination: Point<f64>)
        -> Result<Time, NetworkError>;
}

/// a pre-built graph routes directly over itself.
impl NetworkRouter for RoadGraph {
    fn travel_time(
        &self,
        origin: Point<f64>,
        destination: Point<f64>,
    ) -> Result<Time, NetworkError> {
        self.route_travel_time(&origin, &destination)
    }
}

/// bounded cache of road graphs keyed by the exact center point. the oldest
/// entry is evicted once `capacity` graphs are held.
pub struct GraphCache {
    capacity: usize,
    graphs: Mutex<VecDeque<((u64, u64), Arc<RoadGraph>)>>,
}

impl GraphCache {
    pub fn new(capacity: usize) -> GraphCache {
        GraphCache {
            capacity: capacity.max(1),
            graphs: Mutex::new(VecDeque::new()),
        }
    }

    /// returns the cached graph for `center`, building it with `build` on a miss.
    /// failed builds are not cached. the lock is not held while building.
    pub fn get_or_try_insert<F>(
        &self,
        center: Point<f64>,
        build: F,
    ) -> Result<Arc<RoadGraph>, NetworkError>
    where
        F: FnOnce() -> Result<RoadGraph, NetworkError>,
    {
        let key = (center.x().to_bits(), center.y().to_bits());
        {
            let graphs = self.lock()?;
            if let Some((_, graph)) = graphs.iter().find(|(k, _)| *k == key) {
                return Ok(graph.clone());
            }
        }
        let graph = Arc::new(build()?);
        let mut graphs = self.lock()?;
        if graphs.len() >= self.capacity {
            graphs.pop_front();
        }
        graphs.push_back((key, graph.clone()));
        Ok(graph)
    }

    pub fn len(&self) -> usize {
        self.graphs.lock().map(|g| g.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, VecDeque<((u64, u64), Arc<RoadGraph>)>>, NetworkError>
    {
        self.graphs
            .lock()
            .map_err(|e| NetworkError::InternalError(format!("graph cache lock poisoned: {e}")))
    }
}

/// downloads the drivable network around each origin from an Overpass API
/// endpoint and routes over it. the graph depends only on the origin, so it is
/// fetched once and reused for every destination.
pub struct OverpassRouter {
    client: OverpassClient,
    radius: Length,
    default_speed: Velocity,
    query_timeout: Duration,
    cache: GraphCache,
}

impl OverpassRouter {
    /// graphs held at once, enough for one origin per worker thread
    pub const GRAPH_CACHE_SIZE: usize = 16;

    pub fn new(
        endpoint: &str,
        radius: Length,
        default_speed: Velocity,
        request_timeout: Duration,
    ) -> Result<OverpassRouter, NetworkError> {
        let client = OverpassClient::new(endpoint, request_timeout)?;
        Ok(OverpassRouter {
            client,
            radius,
            default_speed,
            query_timeout: request_timeout,
            cache: GraphCache::new(Self::GRAPH_CACHE_SIZE),
        })
    }

    /// fetches and builds the road graph surrounding a point.
    pub fn fetch_graph(&self, center: Point<f64>) -> Result<RoadGraph, NetworkError> {
        let query = DriveNetworkQuery::new(
            center,
            self.radius.get::<length::meter>(),
            self.query_timeout.as_secs(),
        );
        let response = self.client.fetch(&query)?;
        let graph = RoadGraph::try_from_overpass(&response, self.default_speed)?;
        log::debug!(
            "road network around ({}, {}) has {} nodes and {} edges",
            center.x(),
            center.y(),
            graph.n_nodes(),
            graph.n_edges()
        );
        Ok(graph)
    }
}

impl NetworkRouter for OverpassRouter {
    fn travel_time(
        &self,
        origin: Point<f64>,
        destination: Point<f64>,
    ) -> Result<Time, NetworkError> {
        let graph = self
            .cache
            .get_or_try_insert(origin, || self.fetch_graph(origin))?;
        graph.route_travel_time(&origin, &destination)
    }
}
