//! Data model of the road network
//!
//! Contains the graph entities and the straight-line metrics used to
//! estimate remaining distance during search.

pub mod metric;
pub mod network;

pub use metric::{DistanceMetric, GreatCircle, Planar};
pub use network::{Intersection, Road, RoadNetwork, RoadSegment};
