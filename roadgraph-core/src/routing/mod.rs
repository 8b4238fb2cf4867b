//! Route search between intersections

pub mod astar;
pub mod matrix;
pub mod route;

pub use astar::{AStarOptions, find_route};
pub use matrix::route_length_matrix;
pub use route::{RoadLeg, Route, RouteSummary};
