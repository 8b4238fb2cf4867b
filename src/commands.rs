//! Subcommand implementations. Each returns the text printed to stdout.

use std::path::Path;

use anyhow::{Context, bail};
use geo::Point;
use roadgraph_core::prelude::*;
use tracing::info;

use crate::Config;

/// Shortest route between two intersections, summarised per road
pub fn route(
    network: &RoadNetwork,
    config: &Config,
    from: IntersectionId,
    to: IntersectionId,
    geojson: Option<&Path>,
) -> anyhow::Result<String> {
    let metric = config.network.metric.metric();
    let Some(found) = find_route(network, from, to, &*metric, &config.search)? else {
        return Ok(format!("No route from {from} to {to}"));
    };

    if let Some(path) = geojson {
        let text = found.to_geojson_string(network)?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write route to {}", path.display()))?;
        info!("Route written to {}", path.display());
    }

    Ok(format!(
        "Route {from} -> {to} ({} segments)\n{}",
        found.len(),
        found.summary(network)
    ))
}

/// Route between the intersections closest to two picked points
pub fn route_at(
    network: &RoadNetwork,
    config: &Config,
    from: Point<f64>,
    to: Point<f64>,
    geojson: Option<&Path>,
) -> anyhow::Result<String> {
    let start = pick(network, config, from)?;
    let target = pick(network, config, to)?;
    route(network, config, start, target, geojson)
}

/// Cut vertices of the component of `root`, or of every component
pub fn cut_vertices(network: &RoadNetwork, root: Option<IntersectionId>) -> anyhow::Result<String> {
    let (found, scope) = match root {
        Some(root) => {
            let scan = find_cut_vertices(network, root)?;
            let scope = format!("the component of {root} ({} intersections)", scan.visited);
            (scan.cut_vertices, scope)
        }
        None => {
            let all = find_all_cut_vertices(network);
            (all.cut_vertices, format!("the graph ({} components)", all.components))
        }
    };

    let mut out = format!("There are {} articulation points in {scope}.", found.len());
    if !found.is_empty() {
        let ids: Vec<String> = found.iter().map(ToString::to_string).collect();
        out.push('\n');
        out.push_str(&ids.join(", "));
    }
    Ok(out)
}

/// Closest intersection to a point, with its description
pub fn nearest(network: &RoadNetwork, config: &Config, point: Point<f64>) -> anyhow::Result<String> {
    let id = pick(network, config, point)?;
    Ok(network.describe(id)?)
}

/// Description of one intersection
pub fn info(network: &RoadNetwork, id: IntersectionId) -> anyhow::Result<String> {
    Ok(network.describe(id)?)
}

fn pick(network: &RoadNetwork, config: &Config, point: Point<f64>) -> anyhow::Result<IntersectionId> {
    let metric = config.network.metric.metric();
    match network.nearest_intersection_within(point, config.picking.max_distance, &*metric) {
        Some((id, _)) => Ok(id),
        None => bail!(
            "No intersection within {} of ({}, {})",
            config.picking.max_distance,
            point.x(),
            point.y()
        ),
    }
}
