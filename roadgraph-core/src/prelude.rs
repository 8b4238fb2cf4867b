// Re-export key components
pub use crate::algo::cut_vertices::{
    AllCutVertices, CutVertexScan, find_all_cut_vertices, find_cut_vertices,
};
pub use crate::loading::{RoadNetworkBuilder, validate_metric_admissibility};
pub use crate::model::{
    DistanceMetric, GreatCircle, Intersection, Planar, Road, RoadNetwork, RoadSegment,
};
pub use crate::routing::{AStarOptions, RoadLeg, Route, RouteSummary, find_route, route_length_matrix};

// Core types for the road network
pub use crate::Error;
pub use crate::IntersectionId;
pub use crate::Length;
pub use crate::RoadId;
