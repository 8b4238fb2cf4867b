//! Road network graph engine.
//!
//! Holds an immutable road network (intersections, road segments and named
//! roads) and answers two kinds of queries over it: shortest routes between
//! intersections with A* search, and cut vertices (articulation points)
//! of the undirected network.

pub mod algo;
mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;

/// Stable identifier of an intersection, assigned by the data source
pub type IntersectionId = u32;
/// Stable identifier of a road, assigned by the data source
pub type RoadId = u32;
/// Distance along the network, in the units of the segment lengths
pub type Length = f64;

pub use algo::cut_vertices::{AllCutVertices, CutVertexScan, find_all_cut_vertices, find_cut_vertices};
pub use loading::{RoadNetworkBuilder, validate_metric_admissibility};
pub use model::{
    DistanceMetric, GreatCircle, Intersection, Planar, Road, RoadNetwork, RoadSegment,
};
pub use routing::{AStarOptions, RoadLeg, Route, RouteSummary, find_route, route_length_matrix};
