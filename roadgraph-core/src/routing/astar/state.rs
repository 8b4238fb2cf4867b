use std::{cmp::Ordering, collections::BinaryHeap};

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::{IntersectionId, Length};

/// Candidate on the search frontier
#[derive(Copy, Clone, Debug)]
pub(super) struct FrontierEntry {
    /// Estimated total length through this candidate (g + h)
    pub(super) priority: Length,
    /// Length travelled from the start (g)
    pub(super) cost: Length,
    pub(super) node: NodeIndex,
    pub(super) id: IntersectionId,
    /// Predecessor and the segment used to reach the candidate
    pub(super) via: Option<(NodeIndex, EdgeIndex)>,
}

// Min-heap by priority, then by intersection id, then deeper candidates first
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.id.cmp(&self.id))
            .then_with(|| self.cost.total_cmp(&other.cost))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Scratch tables of a single search run.
///
/// Allocated per call so that the network itself stays read-only and
/// several searches may share it.
#[derive(Debug)]
pub(super) struct SearchState {
    pub(super) frontier: BinaryHeap<FrontierEntry>,
    pub(super) finalized: FixedBitSet,
    pub(super) predecessors: HashMap<NodeIndex, (NodeIndex, EdgeIndex)>,
    pub(super) expansions: usize,
}

impl SearchState {
    pub(super) fn new(node_count: usize) -> Self {
        Self {
            frontier: BinaryHeap::with_capacity(node_count.min(1024)),
            finalized: FixedBitSet::with_capacity(node_count),
            predecessors: HashMap::with_capacity(node_count.min(1024)),
            expansions: 0,
        }
    }

    pub(super) fn is_finalized(&self, node: NodeIndex) -> bool {
        self.finalized.contains(node.index())
    }

    /// Walk predecessor links back from `target`. Returns the visited
    /// intersections and the segments between them in start-to-target order.
    pub(super) fn trace_back(
        &self,
        start: NodeIndex,
        target: NodeIndex,
    ) -> (Vec<NodeIndex>, Vec<EdgeIndex>) {
        let mut nodes = vec![target];
        let mut edges = Vec::new();
        let mut current = target;

        while current != start {
            let Some(&(previous, edge)) = self.predecessors.get(&current) else {
                break;
            };
            edges.push(edge);
            nodes.push(previous);
            current = previous;
        }

        nodes.reverse();
        edges.reverse();
        (nodes, edges)
    }
}
