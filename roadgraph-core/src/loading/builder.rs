use geo::{LineString, Point, line_string};
use hashbrown::{HashMap, hash_map::Entry};
use itertools::Itertools;
use log::{info, warn};
use petgraph::{
    graph::{NodeIndex, UnGraph},
    unionfind::UnionFind,
};

use crate::{
    DistanceMetric, Error, IntersectionId, Length, RoadId,
    model::{Intersection, Road, RoadNetwork, RoadSegment},
};

/// Relative slack allowed before a segment counts as shorter than the
/// straight line between its endpoints
const LENGTH_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone)]
struct PendingSegment {
    road: RoadId,
    start: IntersectionId,
    end: IntersectionId,
    length: Length,
    geometry: Option<LineString<f64>>,
}

/// Collects intersections, roads and segments produced by a loader and
/// assembles them into a validated [`RoadNetwork`].
///
/// Segments may be added before the entities they reference; they are
/// resolved in [`RoadNetworkBuilder::build`].
#[derive(Debug, Default)]
pub struct RoadNetworkBuilder {
    graph: UnGraph<Intersection, RoadSegment>,
    index: HashMap<IntersectionId, NodeIndex>,
    roads: HashMap<RoadId, Road>,
    segments: Vec<PendingSegment>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known network size.
    pub fn with_capacity(intersections: usize, segments: usize, roads: usize) -> Self {
        Self {
            graph: UnGraph::with_capacity(intersections, segments),
            index: HashMap::with_capacity(intersections),
            roads: HashMap::with_capacity(roads),
            segments: Vec::with_capacity(segments),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::DuplicateIntersection`] if the id was already added
    pub fn add_intersection(&mut self, id: IntersectionId, geometry: Point<f64>) -> Result<(), Error> {
        match self.index.entry(id) {
            Entry::Occupied(_) => Err(Error::DuplicateIntersection(id)),
            Entry::Vacant(entry) => {
                entry.insert(self.graph.add_node(Intersection { id, geometry }));
                Ok(())
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::DuplicateRoad`] if the id was already added
    pub fn add_road(&mut self, id: RoadId, name: impl Into<String>, one_way: bool) -> Result<(), Error> {
        match self.roads.entry(id) {
            Entry::Occupied(_) => Err(Error::DuplicateRoad(id)),
            Entry::Vacant(entry) => {
                entry.insert(Road {
                    id,
                    name: name.into(),
                    one_way,
                    segments: Vec::new(),
                });
                Ok(())
            }
        }
    }

    /// Queue a segment of `road` from `start` to `end`. Without explicit
    /// geometry the segment is drawn as a straight line.
    pub fn add_segment(
        &mut self,
        road: RoadId,
        start: IntersectionId,
        end: IntersectionId,
        length: Length,
        geometry: Option<LineString<f64>>,
    ) -> &mut Self {
        self.segments.push(PendingSegment {
            road,
            start,
            end,
            length,
            geometry,
        });
        self
    }

    /// Resolve all queued segments and freeze the network.
    ///
    /// # Errors
    ///
    /// Returns an error if a segment references an unknown road or
    /// intersection, or if its length is negative or not finite
    pub fn build(self) -> Result<RoadNetwork, Error> {
        let Self {
            mut graph,
            index,
            mut roads,
            segments,
        } = self;

        for pending in segments {
            if !pending.length.is_finite() || pending.length < 0.0 {
                return Err(Error::InvalidSegmentLength {
                    road: pending.road,
                    length: pending.length,
                });
            }
            let start = *index
                .get(&pending.start)
                .ok_or(Error::UnknownIntersection(pending.start))?;
            let end = *index
                .get(&pending.end)
                .ok_or(Error::UnknownIntersection(pending.end))?;
            let road = roads
                .get_mut(&pending.road)
                .ok_or(Error::UnknownRoad(pending.road))?;

            let geometry = pending.geometry.unwrap_or_else(|| {
                let (a, b) = (graph[start].geometry, graph[end].geometry);
                line_string![(x: a.x(), y: a.y()), (x: b.x(), y: b.y())]
            });

            let edge = graph.add_edge(
                start,
                end,
                RoadSegment {
                    road: pending.road,
                    start,
                    end,
                    length: pending.length,
                    geometry,
                },
            );
            road.segments.push(edge);
        }

        let network = RoadNetwork::from_parts(graph, index, roads);
        validate_road_chains(&network);

        info!(
            "Road network built: {} intersections, {} segments, {} roads",
            network.intersection_count(),
            network.segment_count(),
            network.road_count()
        );

        Ok(network)
    }
}

/// Warn about roads whose segments do not form one connected chain.
/// Returns the number of such roads.
fn validate_road_chains(network: &RoadNetwork) -> usize {
    let mut broken = 0;

    for road in network.roads() {
        if road.segments.len() < 2 {
            continue;
        }

        let mut local: HashMap<NodeIndex, usize> = HashMap::new();
        let mut pieces: UnionFind<usize> = UnionFind::new(road.segments.len() * 2);
        for segment in road.segments.iter().filter_map(|&edge| network.segment(edge)) {
            let next = local.len();
            let a = *local.entry(segment.start).or_insert(next);
            let next = local.len();
            let b = *local.entry(segment.end).or_insert(next);
            pieces.union(a, b);
        }

        let chains = (0..local.len()).map(|i| pieces.find(i)).unique().count();
        if chains > 1 {
            broken += 1;
            warn!(
                "Road {} ({}) is not a connected chain: its {} segments form {chains} pieces",
                road.id,
                road.name,
                road.segments.len()
            );
        }
    }

    if broken > 0 {
        warn!("{broken} roads are split into several pieces");
    }
    broken
}

/// Warn about segments shorter than the straight line between their
/// endpoints. Such segments make the metric overestimate and A* may then
/// return a route that is not the shortest.
///
/// Returns the number of offending segments.
#[allow(clippy::cast_precision_loss)]
pub fn validate_metric_admissibility<M: DistanceMetric + ?Sized>(
    network: &RoadNetwork,
    metric: &M,
) -> usize {
    let offending = network
        .graph
        .edge_weights()
        .filter(|segment| {
            let straight = metric.distance(
                network.graph[segment.start].geometry,
                network.graph[segment.end].geometry,
            );
            segment.length < straight * (1.0 - LENGTH_TOLERANCE)
        })
        .collect_vec();

    if let Some(first) = offending.first() {
        let total = network.segment_count();
        let percentage = (offending.len() as f64 / total as f64) * 100.0;
        warn!(
            "{} of {total} segments ({percentage:.1}%) are shorter than the straight-line \
            distance between their endpoints (first on road {}). Routes found with this \
            metric may not be the shortest.",
            offending.len(),
            first.road
        );
    }

    offending.len()
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;
    use crate::Planar;

    fn two_points() -> RoadNetworkBuilder {
        let mut builder = RoadNetworkBuilder::new();
        builder.add_intersection(1, Point::new(0.0, 0.0)).unwrap();
        builder.add_intersection(2, Point::new(3.0, 4.0)).unwrap();
        builder.add_road(7, "Lambton Quay", false).unwrap();
        builder
    }

    #[test]
    fn test_build_simple_network() {
        let mut builder = two_points();
        builder.add_segment(7, 1, 2, 5.0, None);
        let network = builder.build().unwrap();

        assert_eq!(network.intersection_count(), 2);
        assert_eq!(network.segment_count(), 1);
        let road = network.road(7).unwrap();
        assert_eq!(road.segments.len(), 1);
        let segment = network.segment(road.segments[0]).unwrap();
        assert_eq!(segment.geometry.0.len(), 2);
        assert_eq!(network.id_of(segment.start), 1);
        assert_eq!(network.id_of(segment.end), 2);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut builder = two_points();
        assert!(matches!(
            builder.add_intersection(1, Point::new(9.0, 9.0)),
            Err(Error::DuplicateIntersection(1))
        ));
        assert!(matches!(
            builder.add_road(7, "Again", true),
            Err(Error::DuplicateRoad(7))
        ));
    }

    #[test]
    fn test_unknown_references_rejected() {
        let mut builder = two_points();
        builder.add_segment(7, 1, 3, 1.0, None);
        assert!(matches!(builder.build(), Err(Error::UnknownIntersection(3))));

        let mut builder = two_points();
        builder.add_segment(8, 1, 2, 5.0, None);
        assert!(matches!(builder.build(), Err(Error::UnknownRoad(8))));
    }

    #[test]
    fn test_invalid_lengths_rejected() {
        for length in [-1.0, f64::NAN, f64::INFINITY] {
            let mut builder = two_points();
            builder.add_segment(7, 1, 2, length, None);
            assert!(matches!(
                builder.build(),
                Err(Error::InvalidSegmentLength { road: 7, .. })
            ));
        }
    }

    #[test]
    fn test_segments_may_precede_their_entities() {
        let mut builder = RoadNetworkBuilder::new();
        builder.add_segment(1, 10, 11, 2.0, None);
        builder.add_road(1, "Cuba Street", false).unwrap();
        builder.add_intersection(10, Point::new(0.0, 0.0)).unwrap();
        builder.add_intersection(11, Point::new(1.0, 0.0)).unwrap();
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_detached_road_pieces_counted() {
        let mut builder = two_points();
        builder.add_intersection(3, Point::new(10.0, 0.0)).unwrap();
        builder.add_intersection(4, Point::new(11.0, 0.0)).unwrap();
        builder.add_segment(7, 1, 2, 5.0, None);
        builder.add_segment(7, 3, 4, 1.0, None);
        let network = builder.build().unwrap();
        assert_eq!(validate_road_chains(&network), 1);

        let mut builder = two_points();
        builder.add_intersection(3, Point::new(3.0, 5.0)).unwrap();
        builder.add_segment(7, 1, 2, 5.0, None);
        builder.add_segment(7, 3, 2, 1.0, None);
        assert_eq!(validate_road_chains(&builder.build().unwrap()), 0);
    }

    #[test]
    fn test_metric_admissibility_counts_short_segments() {
        let mut builder = two_points();
        builder.add_intersection(3, Point::new(3.0, 0.0)).unwrap();
        builder.add_segment(7, 1, 2, 4.0, None);
        builder.add_segment(7, 1, 3, 3.0, None);
        let network = builder.build().unwrap();
        assert_eq!(validate_metric_admissibility(&network, &Planar), 1);
    }
}
