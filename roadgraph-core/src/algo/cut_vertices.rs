//! Cut vertices (articulation points) of the road network.
//!
//! An intersection is a cut vertex when removing it splits its connected
//! component in two or more pieces. The scan treats every segment as
//! two-way: a one-way road still connects its intersections.
//!
//! The depth-first traversal keeps an explicit stack of frames instead of
//! recursing, so very long roads do not exhaust the call stack.

use std::collections::BTreeSet;

use log::{debug, info};
use petgraph::graph::NodeIndex;

use crate::{Error, IntersectionId, RoadNetwork};

/// Cut vertices of the component containing `root`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutVertexScan {
    pub root: IntersectionId,
    pub cut_vertices: BTreeSet<IntersectionId>,
    /// Number of intersections in the scanned component
    pub visited: usize,
}

/// Cut vertices of the whole network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllCutVertices {
    pub cut_vertices: BTreeSet<IntersectionId>,
    /// Number of connected components, isolated intersections included
    pub components: usize,
}

/// Per-run depth-first state, indexed by node
struct ScanState {
    depth: Vec<Option<usize>>,
    reach_back: Vec<usize>,
    cut_vertices: BTreeSet<IntersectionId>,
}

impl ScanState {
    fn new(node_count: usize) -> Self {
        Self {
            depth: vec![None; node_count],
            reach_back: vec![usize::MAX; node_count],
            cut_vertices: BTreeSet::new(),
        }
    }

    fn is_visited(&self, node: NodeIndex) -> bool {
        self.depth[node.index()].is_some()
    }

    fn visited_count(&self) -> usize {
        self.depth.iter().filter(|depth| depth.is_some()).count()
    }
}

struct Frame {
    node: NodeIndex,
    depth: usize,
    parent: NodeIndex,
    /// Neighbours not explored yet, filled on the first visit
    pending: Option<Vec<NodeIndex>>,
}

/// Find the cut vertices of the connected component containing `root`.
///
/// Intersections outside that component are not visited and never reported.
///
/// # Errors
///
/// Returns [`Error::UnknownIntersection`] if `root` is not in the network.
pub fn find_cut_vertices(network: &RoadNetwork, root: IntersectionId) -> Result<CutVertexScan, Error> {
    let root_node = network.require_node(root)?;
    let mut state = ScanState::new(network.intersection_count());

    scan_component(network, root_node, &mut state);

    let scan = CutVertexScan {
        root,
        visited: state.visited_count(),
        cut_vertices: state.cut_vertices,
    };
    debug!(
        "Cut vertex scan from {root}: {} of {} intersections visited, {} cut vertices",
        scan.visited,
        network.intersection_count(),
        scan.cut_vertices.len()
    );
    Ok(scan)
}

/// Find the cut vertices of every connected component.
///
/// Components are scanned in turn, each rooted at its lowest intersection id.
pub fn find_all_cut_vertices(network: &RoadNetwork) -> AllCutVertices {
    let mut state = ScanState::new(network.intersection_count());
    let mut roots: Vec<(IntersectionId, NodeIndex)> = network
        .graph
        .node_indices()
        .map(|node| (network.id_of(node), node))
        .collect();
    roots.sort_unstable();

    let mut components = 0;
    for (_, node) in roots {
        if !state.is_visited(node) {
            scan_component(network, node, &mut state);
            components += 1;
        }
    }

    info!(
        "Found {} cut vertices in {components} components ({} intersections)",
        state.cut_vertices.len(),
        state.visited_count()
    );

    AllCutVertices {
        cut_vertices: state.cut_vertices,
        components,
    }
}

/// The root is a cut vertex exactly when more than one of its neighbours
/// starts a separate depth-first subtree.
fn scan_component(network: &RoadNetwork, root: NodeIndex, state: &mut ScanState) {
    state.depth[root.index()] = Some(0);
    state.reach_back[root.index()] = 0;

    let mut subtrees = 0;
    for neighbour in network.undirected_neighbours(root) {
        if neighbour != root && !state.is_visited(neighbour) {
            scan_subtree(network, neighbour, root, state);
            subtrees += 1;
        }
    }

    if subtrees > 1 {
        state.cut_vertices.insert(network.id_of(root));
    }
}

/// Depth-first scan below one child of the root, tracking for every node the
/// shallowest depth its subtree reaches through a single back-edge.
fn scan_subtree(network: &RoadNetwork, first: NodeIndex, root: NodeIndex, state: &mut ScanState) {
    let mut stack = vec![Frame {
        node: first,
        depth: 1,
        parent: root,
        pending: None,
    }];

    while let Some(frame) = stack.last_mut() {
        let node = frame.node.index();

        if frame.pending.is_none() {
            // First visit
            state.depth[node] = Some(frame.depth);
            state.reach_back[node] = frame.depth;
            let parent = frame.parent;
            frame.pending = Some(
                network
                    .undirected_neighbours(frame.node)
                    .into_iter()
                    .filter(|&neighbour| neighbour != parent)
                    .collect(),
            );
            continue;
        }

        let pending = frame.pending.get_or_insert_with(Vec::new);
        if let Some(child) = pending.pop() {
            match state.depth[child.index()] {
                // Back-edge to an already visited intersection
                Some(child_depth) => {
                    state.reach_back[node] = state.reach_back[node].min(child_depth);
                }
                None => {
                    let child_frame = Frame {
                        node: child,
                        depth: frame.depth + 1,
                        parent: frame.node,
                        pending: None,
                    };
                    stack.push(child_frame);
                }
            }
            continue;
        }

        // Fully explored, hand the reach-back up to the parent
        let (current, parent) = (frame.node, frame.parent);
        if current != first {
            let reach_back = state.reach_back[current.index()];
            let parent_reach = &mut state.reach_back[parent.index()];
            *parent_reach = (*parent_reach).min(reach_back);

            let parent_depth = state.depth[parent.index()].unwrap_or(0);
            if reach_back >= parent_depth {
                state.cut_vertices.insert(network.id_of(parent));
            }
        }
        stack.pop();
    }
}
