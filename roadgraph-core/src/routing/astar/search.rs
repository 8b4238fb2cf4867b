use log::{debug, trace};
use petgraph::graph::NodeIndex;

use super::{AStarOptions, state::FrontierEntry, state::SearchState};
use crate::{DistanceMetric, Error, IntersectionId, Length, RoadNetwork, routing::Route};

/// Shortest route between two intersections.
///
/// Runs A* with the straight-line distance to `target` as heuristic.
/// Segments of one-way roads are never travelled from their end to their start.
///
/// Returns `Ok(None)` when `target` cannot be reached from `start`, or when
/// the search gave up after [`AStarOptions::max_expansions`] expansions.
///
/// # Errors
///
/// Returns [`Error::UnknownIntersection`] if either endpoint is not part of
/// the network. No search is attempted in that case.
pub fn find_route<M: DistanceMetric + ?Sized>(
    network: &RoadNetwork,
    start: IntersectionId,
    target: IntersectionId,
    metric: &M,
    options: &AStarOptions,
) -> Result<Option<Route>, Error> {
    let start_node = network.require_node(start)?;
    let target_node = network.require_node(target)?;

    let Some((length, state)) = astar(network, start_node, target_node, metric, options) else {
        return Ok(None);
    };

    let (nodes, segments) = state.trace_back(start_node, target_node);
    let intersections = nodes.into_iter().map(|node| network.id_of(node)).collect();

    Ok(Some(Route {
        start,
        target,
        segments,
        intersections,
        length,
    }))
}

/// Length of the shortest route, without building the route itself
pub(crate) fn shortest_length<M: DistanceMetric + ?Sized>(
    network: &RoadNetwork,
    start: NodeIndex,
    target: NodeIndex,
    metric: &M,
    options: &AStarOptions,
) -> Option<Length> {
    astar(network, start, target, metric, options).map(|(length, _)| length)
}

fn astar<M: DistanceMetric + ?Sized>(
    network: &RoadNetwork,
    start: NodeIndex,
    target: NodeIndex,
    metric: &M,
    options: &AStarOptions,
) -> Option<(Length, SearchState)> {
    let goal = network.graph[target].geometry;
    let estimate = |node: NodeIndex| metric.distance(network.graph[node].geometry, goal);

    let mut state = SearchState::new(network.intersection_count());
    state.frontier.push(FrontierEntry {
        priority: estimate(start),
        cost: 0.0,
        node: start,
        id: network.id_of(start),
        via: None,
    });

    while let Some(entry) = state.frontier.pop() {
        // Stale duplicate of an already settled intersection
        if state.is_finalized(entry.node) {
            continue;
        }
        state.finalized.insert(entry.node.index());
        if let Some(via) = entry.via {
            state.predecessors.insert(entry.node, via);
        }

        if entry.node == target {
            debug!(
                "Route {} -> {} found: length {:.3} after {} expansions",
                network.id_of(start),
                entry.id,
                entry.cost,
                state.expansions
            );
            return Some((entry.cost, state));
        }

        state.expansions += 1;
        if let Some(max) = options.max_expansions {
            if state.expansions > max {
                debug!(
                    "Search {} -> {} abandoned after {max} expansions",
                    network.id_of(start),
                    network.id_of(target)
                );
                return None;
            }
        }
        trace!("Expanding {} at g={:.3}", entry.id, entry.cost);

        for (edge, segment, next) in network.outgoing(entry.node) {
            if state.is_finalized(next) {
                continue;
            }
            let cost = entry.cost + segment.length;
            state.frontier.push(FrontierEntry {
                priority: cost + estimate(next),
                cost,
                node: next,
                id: network.id_of(next),
                via: Some((entry.node, edge)),
            });
        }
    }

    debug!(
        "No route {} -> {}: frontier exhausted after {} expansions",
        network.id_of(start),
        network.id_of(target),
        state.expansions
    );
    None
}
