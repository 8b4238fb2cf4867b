//! Assembly of a road network from entities produced by an external loader.

mod builder;

pub use builder::{RoadNetworkBuilder, validate_metric_admissibility};
