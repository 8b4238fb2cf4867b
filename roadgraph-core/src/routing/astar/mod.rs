//! A* search over the road network

mod search;
mod state;

use serde::{Deserialize, Serialize};

pub use search::find_route;
pub(crate) use search::shortest_length;

/// Limits applied to a single search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AStarOptions {
    /// Give up (and report no route) after settling this many intersections
    pub max_expansions: Option<usize>,
}
