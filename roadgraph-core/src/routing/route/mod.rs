//! Route found by the path finder and its per-road summary

mod to_geojson;

use std::fmt;

use hashbrown::HashMap;
use petgraph::graph::EdgeIndex;
use serde::Serialize;

use crate::{IntersectionId, Length, RoadNetwork};

/// Ordered sequence of segments from `start` to `target`
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub start: IntersectionId,
    pub target: IntersectionId,
    /// Segments in travel order, empty when `start == target`
    pub segments: Vec<EdgeIndex>,
    /// Intersections passed, `start` first and `target` last
    pub intersections: Vec<IntersectionId>,
    /// Sum of the segment lengths
    pub length: Length,
}

/// Distance travelled along one named road
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadLeg {
    pub name: String,
    pub length: Length,
}

/// Route distance broken down by road name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary {
    /// One entry per road name, in order of first appearance
    pub legs: Vec<RoadLeg>,
    pub total: Length,
}

impl Route {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Sum the route length per road name. Roads sharing a name (e.g. the
    /// two carriageways of a motorway) are merged into one leg.
    pub fn summary(&self, network: &RoadNetwork) -> RouteSummary {
        let mut legs: Vec<RoadLeg> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for &edge in &self.segments {
            let Some(segment) = network.segment(edge) else {
                continue;
            };
            let name = network
                .road_of(segment)
                .map_or("<unnamed>", |road| road.name.as_str());

            match positions.get(name) {
                Some(&position) => legs[position].length += segment.length,
                None => {
                    positions.insert(name, legs.len());
                    legs.push(RoadLeg {
                        name: name.to_string(),
                        length: segment.length,
                    });
                }
            }
        }

        RouteSummary {
            legs,
            total: self.length,
        }
    }
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for leg in &self.legs {
            writeln!(f, "{}: {:.3}km", leg.name, leg.length)?;
        }
        write!(f, "Total Distance: {:.3}km", self.total)
    }
}
