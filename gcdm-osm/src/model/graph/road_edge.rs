use uom::si::f64::{Length, Time, Velocity};

/// a directed road segment between two consecutive way nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadEdge {
    /// index of the destination node in the owning graph
    pub dst: usize,
    pub length: Length,
    /// posted speed, if tagged
    pub speed: Option<Velocity>,
    /// traversal time, if tagged. takes precedence over length / speed.
    pub travel_time: Option<Time>,
}

impl RoadEdge {
    pub fn new(
        dst: usize,
        length: Length,
        speed: Option<Velocity>,
        travel_time: Option<Time>,
    ) -> RoadEdge {
        RoadEdge {
            dst,
            length,
            speed,
            travel_time,
        }
    }

    /// time to traverse this edge. uses the tagged travel time when present and
    /// non-negative, otherwise the length over the posted speed, falling back to
    /// `default_speed` when the segment has no usable speed.
    pub fn get_travel_time(&self, default_speed: Velocity) -> Time {
        if let Some(t) = self.travel_time {
            if t.value.is_finite() && t.value >= 0.0 {
                return t;
            }
        }
        let speed = match self.speed {
            Some(s) if s.value.is_finite() && s.value > 0.0 => s,
            _ => default_speed,
        };
        self.length / speed
    }
}
