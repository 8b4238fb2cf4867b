//! Road network components - intersections, segments and roads

use geo::{LineString, Point};
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::{IntersectionId, Length, RoadId};

/// Road network node
#[derive(Debug, Clone)]
pub struct Intersection {
    /// Identifier from the data source
    pub id: IntersectionId,
    /// Planar or lon/lat position, depending on the metric in use
    pub geometry: Point<f64>,
}

/// Road network edge (one piece of a road between two intersections)
#[derive(Debug, Clone)]
pub struct RoadSegment {
    /// Owning road
    pub road: RoadId,
    /// Declared start, meaningful for one-way roads
    pub start: NodeIndex,
    /// Declared end, a one-way road cannot be left through it
    pub end: NodeIndex,
    /// Length along the segment, never negative
    pub length: Length,
    /// Shape of the segment for drawing and export
    pub geometry: LineString<f64>,
}

impl RoadSegment {
    /// Endpoint opposite to `from`. For a self-loop this is `from` itself.
    pub fn opposite(&self, from: NodeIndex) -> NodeIndex {
        if from == self.start {
            self.end
        } else {
            self.start
        }
    }
}

/// Named chain of segments
#[derive(Debug, Clone)]
pub struct Road {
    pub id: RoadId,
    pub name: String,
    pub one_way: bool,
    /// Segments in the order they were added by the loader
    pub segments: Vec<EdgeIndex>,
}

impl Road {
    /// Whether `segment` (owned by this road) can be entered at `from`.
    pub fn permits(&self, segment: &RoadSegment, from: NodeIndex) -> bool {
        !(self.one_way && segment.end == from)
    }
}
