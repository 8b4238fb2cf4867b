use geo::Point;
use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::{
    graph::{EdgeIndex, NodeIndex, UnGraph},
    visit::EdgeRef,
};
use rstar::{RTree, primitives::GeomWithData};

use super::components::{Intersection, Road, RoadSegment};
use crate::{DistanceMetric, Error, IntersectionId, Length, RoadId};

/// Intersection position stored in the spatial index
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Planar neighbours re-ranked by the metric when picking an intersection
pub const NEAREST_CANDIDATES: usize = 8;

/// Immutable road network.
///
/// Segments are stored as undirected edges of a multigraph, parallel
/// segments between the same pair of intersections are kept apart.
/// Direction only matters for segments of one-way roads and is read
/// from [`RoadSegment::start`] / [`RoadSegment::end`], see [`RoadNetwork::outgoing`].
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    pub(crate) graph: UnGraph<Intersection, RoadSegment>,
    pub(crate) index: HashMap<IntersectionId, NodeIndex>,
    pub(crate) roads: HashMap<RoadId, Road>,
    pub(crate) rtree: RTree<IndexedPoint>,
}

impl RoadNetwork {
    pub(crate) fn from_parts(
        graph: UnGraph<Intersection, RoadSegment>,
        index: HashMap<IntersectionId, NodeIndex>,
        roads: HashMap<RoadId, Road>,
    ) -> Self {
        let points = graph
            .node_indices()
            .map(|node| {
                let geometry = graph[node].geometry;
                GeomWithData::new([geometry.x(), geometry.y()], node)
            })
            .collect();

        Self {
            graph,
            index,
            roads,
            rtree: RTree::bulk_load(points),
        }
    }

    pub fn intersection_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn segment_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    pub fn intersection(&self, id: IntersectionId) -> Option<&Intersection> {
        self.index.get(&id).map(|&node| &self.graph[node])
    }

    pub fn intersections(&self) -> impl Iterator<Item = &Intersection> {
        self.graph.node_weights()
    }

    pub fn node_index(&self, id: IntersectionId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    pub(crate) fn require_node(&self, id: IntersectionId) -> Result<NodeIndex, Error> {
        self.node_index(id).ok_or(Error::UnknownIntersection(id))
    }

    pub(crate) fn id_of(&self, node: NodeIndex) -> IntersectionId {
        self.graph[node].id
    }

    pub fn segment(&self, edge: EdgeIndex) -> Option<&RoadSegment> {
        self.graph.edge_weight(edge)
    }

    pub fn road(&self, id: RoadId) -> Option<&Road> {
        self.roads.get(&id)
    }

    pub fn roads(&self) -> impl Iterator<Item = &Road> {
        self.roads.values()
    }

    /// Road owning the given segment
    pub fn road_of(&self, segment: &RoadSegment) -> Option<&Road> {
        self.roads.get(&segment.road)
    }

    /// Segments that can be left from `node`, paired with the intersection
    /// they lead to. Segments of one-way roads are skipped when `node` is
    /// their declared end.
    pub(crate) fn outgoing(
        &self,
        node: NodeIndex,
    ) -> impl Iterator<Item = (EdgeIndex, &RoadSegment, NodeIndex)> + '_ {
        self.graph.edges(node).filter_map(move |edge| {
            let segment = edge.weight();
            let permitted = self
                .road_of(segment)
                .is_none_or(|road| road.permits(segment, node));

            permitted.then(|| (edge.id(), segment, segment.opposite(node)))
        })
    }

    /// Distinct neighbours of `node`, ignoring one-way restrictions
    pub(crate) fn undirected_neighbours(&self, node: NodeIndex) -> Vec<NodeIndex> {
        self.graph.neighbors(node).unique().collect()
    }

    /// Distinct neighbouring intersections, ignoring one-way restrictions
    pub fn neighbours(&self, id: IntersectionId) -> Result<Vec<IntersectionId>, Error> {
        let node = self.require_node(id)?;
        Ok(self
            .undirected_neighbours(node)
            .into_iter()
            .map(|neighbour| self.id_of(neighbour))
            .sorted_unstable()
            .collect())
    }

    /// Any segment joining the two intersections, in either direction
    pub fn segment_between(
        &self,
        a: IntersectionId,
        b: IntersectionId,
    ) -> Result<Option<EdgeIndex>, Error> {
        let a = self.require_node(a)?;
        let b = self.require_node(b)?;
        Ok(self.graph.find_edge(a, b))
    }

    /// Names of the roads meeting at an intersection, sorted and deduplicated
    pub fn road_names_at(&self, id: IntersectionId) -> Result<Vec<&str>, Error> {
        let node = self.require_node(id)?;
        Ok(self
            .graph
            .edges(node)
            .filter_map(|edge| self.road_of(edge.weight()))
            .map(|road| road.name.as_str())
            .unique()
            .sorted_unstable()
            .collect())
    }

    /// Short human-readable description of an intersection
    pub fn describe(&self, id: IntersectionId) -> Result<String, Error> {
        let node = self.require_node(id)?;
        let geometry = self.graph[node].geometry;
        let mut out = format!(
            "ID: {id}  loc: ({:.3}, {:.3})",
            geometry.x(),
            geometry.y()
        );
        let names = self.road_names_at(id)?;
        if !names.is_empty() {
            out.push_str("\nroads: ");
            out.push_str(&names.join(", "));
        }
        Ok(out)
    }

    /// Closest intersection to `point` by planar distance
    pub fn nearest_intersection(&self, point: Point<f64>) -> Option<(IntersectionId, f64)> {
        self.rtree
            .nearest_neighbor_iter_with_distance_2(&[point.x(), point.y()])
            .next()
            .map(|(entry, distance_2)| (self.id_of(entry.data), distance_2.sqrt()))
    }

    /// Closest intersection to `point` if it lies within `max_distance`
    /// under the given metric.
    ///
    /// The R-tree ranks by planar distance, which for lon/lat positions away
    /// from the equator is not the great-circle order. The first
    /// [`NEAREST_CANDIDATES`] planar neighbours are re-ranked by `metric`.
    pub fn nearest_intersection_within<M: DistanceMetric + ?Sized>(
        &self,
        point: Point<f64>,
        max_distance: Length,
        metric: &M,
    ) -> Option<(IntersectionId, Length)> {
        let (intersection, distance) = self
            .rtree
            .nearest_neighbor_iter(&[point.x(), point.y()])
            .take(NEAREST_CANDIDATES)
            .map(|entry| {
                let intersection = &self.graph[entry.data];
                (intersection, metric.distance(point, intersection.geometry))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.id.cmp(&b.0.id)))?;

        if distance <= max_distance {
            Some((intersection.id, distance))
        } else {
            log::trace!(
                "Nearest intersection {} is {distance:.3} away from {point:?} (max: {max_distance})",
                intersection.id
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo::Point;

    use crate::{GreatCircle, Planar, RoadNetworkBuilder};

    fn crossroads() -> crate::RoadNetwork {
        let mut builder = RoadNetworkBuilder::new();
        builder.add_intersection(1, Point::new(0.0, 0.0)).unwrap();
        builder.add_intersection(2, Point::new(1.0, 0.0)).unwrap();
        builder.add_intersection(3, Point::new(0.0, 1.0)).unwrap();
        builder.add_intersection(4, Point::new(5.0, 5.0)).unwrap();
        builder.add_road(10, "Main Street", false).unwrap();
        builder.add_road(20, "Quay Lane", true).unwrap();
        builder.add_segment(10, 1, 2, 1.0, None);
        builder.add_segment(10, 1, 2, 1.5, None);
        builder.add_segment(20, 3, 1, 1.0, None);
        builder.build().unwrap()
    }

    #[test]
    fn test_neighbours_collapse_parallel_segments() {
        let network = crossroads();
        assert_eq!(network.neighbours(1).unwrap(), vec![2, 3]);
        assert_eq!(network.neighbours(4).unwrap(), Vec::<u32>::new());
    }

    #[test]
    fn test_outgoing_respects_one_way() {
        let network = crossroads();
        let from_one = network.node_index(1).unwrap();
        let from_three = network.node_index(3).unwrap();

        // 3 -> 1 is the declared direction of the one-way segment
        let targets: Vec<_> = network
            .outgoing(from_three)
            .map(|(_, _, to)| network.id_of(to))
            .collect();
        assert_eq!(targets, vec![1]);

        let mut targets: Vec<_> = network
            .outgoing(from_one)
            .map(|(_, _, to)| network.id_of(to))
            .collect();
        targets.sort_unstable();
        assert_eq!(targets, vec![2, 2]);
    }

    #[test]
    fn test_road_names_and_describe() {
        let network = crossroads();
        assert_eq!(
            network.road_names_at(1).unwrap(),
            vec!["Main Street", "Quay Lane"]
        );
        let text = network.describe(1).unwrap();
        assert!(text.starts_with("ID: 1  loc: (0.000, 0.000)"));
        assert!(text.ends_with("roads: Main Street, Quay Lane"));
        assert!(network.describe(99).is_err());
    }

    #[test]
    fn test_segment_between() {
        let network = crossroads();
        let edge = network.segment_between(2, 1).unwrap().unwrap();
        assert_eq!(network.segment(edge).unwrap().road, 10);
        assert!(network.segment_between(2, 3).unwrap().is_none());
    }

    #[test]
    fn test_nearest_intersection() {
        let network = crossroads();
        let (id, distance) = network.nearest_intersection(Point::new(0.9, 0.1)).unwrap();
        assert_eq!(id, 2);
        assert_relative_eq!(distance, 0.02_f64.sqrt());

        assert_eq!(
            network
                .nearest_intersection_within(Point::new(4.9, 5.0), 0.15, &Planar)
                .map(|(id, _)| id),
            Some(4)
        );
        assert!(
            network
                .nearest_intersection_within(Point::new(3.0, 3.0), 0.15, &Planar)
                .is_none()
        );
    }

    #[test]
    fn test_nearest_within_reranks_by_metric() {
        // At 60 degrees north a degree of longitude is half a degree of latitude:
        // 2 is nearer in degree space, 1 is nearer on the ground.
        let mut builder = RoadNetworkBuilder::new();
        builder.add_intersection(1, Point::new(10.9, 60.0)).unwrap();
        builder.add_intersection(2, Point::new(10.0, 60.8)).unwrap();
        let network = builder.build().unwrap();
        let click = Point::new(10.0, 60.0);

        assert_eq!(network.nearest_intersection(click).map(|(id, _)| id), Some(2));

        let (id, km) = network
            .nearest_intersection_within(click, 100.0, &GreatCircle)
            .unwrap();
        assert_eq!(id, 1);
        assert!((km - 50.0).abs() < 1.0, "got {km}");
    }
}
