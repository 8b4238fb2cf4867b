use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use super::{AStarOptions, astar::shortest_length};
use crate::{DistanceMetric, Error, IntersectionId, Length, RoadNetwork};

/// Shortest route lengths from every origin to every destination.
///
/// Rows follow `origins`, columns follow `destinations`; an entry is `None`
/// when the destination is unreachable (or the search hit its expansion
/// limit). Origins are processed in parallel, each search keeps its own
/// scratch state.
///
/// # Errors
///
/// Returns [`Error::UnknownIntersection`] for the first id that is not part
/// of the network.
pub fn route_length_matrix<M: DistanceMetric + ?Sized>(
    network: &RoadNetwork,
    origins: &[IntersectionId],
    destinations: &[IntersectionId],
    metric: &M,
    options: &AStarOptions,
) -> Result<Vec<Vec<Option<Length>>>, Error> {
    let origins = resolve(network, origins)?;
    let destinations = resolve(network, destinations)?;

    let matrix = origins
        .par_iter()
        .map(|&origin| {
            destinations
                .iter()
                .map(|&destination| shortest_length(network, origin, destination, metric, options))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    Ok(matrix)
}

fn resolve(network: &RoadNetwork, ids: &[IntersectionId]) -> Result<Vec<NodeIndex>, Error> {
    ids.iter().map(|&id| network.require_node(id)).collect()
}
