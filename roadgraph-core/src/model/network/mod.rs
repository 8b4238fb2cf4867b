//! Road network: intersections, segments and roads

pub mod components;
pub mod graph;

pub use components::{Intersection, Road, RoadSegment};
pub use graph::{IndexedPoint, RoadNetwork};
