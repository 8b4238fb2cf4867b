//! JSON network document.
//!
//! ```json
//! {
//!   "intersections": [{ "id": 1, "x": 174.77, "y": -41.28 }],
//!   "roads": [{ "id": 10, "name": "Lambton Quay", "one_way": false }],
//!   "segments": [{ "road": 10, "start": 1, "end": 2, "length": 0.21,
//!                  "geometry": [[174.77, -41.28], [174.78, -41.28]] }]
//! }
//! ```

use std::path::Path;

use anyhow::Context;
use geo::{LineString, Point};
use roadgraph_core::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkDocument {
    pub intersections: Vec<IntersectionRecord>,
    #[serde(default)]
    pub roads: Vec<RoadRecord>,
    #[serde(default)]
    pub segments: Vec<SegmentRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntersectionRecord {
    pub id: IntersectionId,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadRecord {
    pub id: RoadId,
    pub name: String,
    #[serde(default)]
    pub one_way: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    pub road: RoadId,
    pub start: IntersectionId,
    pub end: IntersectionId,
    pub length: Length,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<Vec<[f64; 2]>>,
}

impl NetworkDocument {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Feed every record to a [`RoadNetworkBuilder`]
    pub fn into_network(self) -> Result<RoadNetwork, Error> {
        let mut builder = RoadNetworkBuilder::with_capacity(
            self.intersections.len(),
            self.segments.len(),
            self.roads.len(),
        );

        for record in self.intersections {
            builder.add_intersection(record.id, Point::new(record.x, record.y))?;
        }
        for record in self.roads {
            builder.add_road(record.id, record.name, record.one_way)?;
        }
        for record in self.segments {
            let geometry = record
                .geometry
                .filter(|points| points.len() >= 2)
                .map(LineString::from);
            builder.add_segment(record.road, record.start, record.end, record.length, geometry);
        }

        builder.build()
    }
}

/// Read and build the network stored at `path`, warning about segments
/// shorter than the straight line under `metric`
pub fn load_network<M: DistanceMetric + ?Sized>(
    path: &Path,
    metric: &M,
) -> anyhow::Result<RoadNetwork> {
    info!("Loading road network from {}", path.display());

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read network {}", path.display()))?;
    let document = NetworkDocument::from_json(&text)
        .with_context(|| format!("Malformed network document {}", path.display()))?;
    let network = document
        .into_network()
        .with_context(|| format!("Invalid network {}", path.display()))?;

    let short = validate_metric_admissibility(&network, metric);
    if short > 0 {
        warn!("{short} segments in {} undercut the straight-line distance", path.display());
    }

    Ok(network)
}

#[cfg(test)]
pub(crate) const SAMPLE_DOCUMENT: &str = r#"{
    "intersections": [
        { "id": 1, "x": 0.0, "y": 0.0 },
        { "id": 2, "x": 1.0, "y": 0.0 },
        { "id": 3, "x": 1.0, "y": 1.0 }
    ],
    "roads": [
        { "id": 10, "name": "Lambton Quay" },
        { "id": 20, "name": "Bowen Street", "one_way": true }
    ],
    "segments": [
        { "road": 10, "start": 1, "end": 2, "length": 1.0 },
        { "road": 20, "start": 2, "end": 3, "length": 1.2,
          "geometry": [[1.0, 0.0], [1.1, 0.5], [1.0, 1.0]] }
    ]
}"#;

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_document_builds_network() {
        let network = NetworkDocument::from_json(SAMPLE_DOCUMENT)
            .unwrap()
            .into_network()
            .unwrap();
        assert_eq!(network.intersection_count(), 3);
        assert_eq!(network.segment_count(), 2);
        assert!(network.road(20).unwrap().one_way);
        assert!(!network.road(10).unwrap().one_way);

        let edge = network.road(20).unwrap().segments[0];
        assert_eq!(network.segment(edge).unwrap().geometry.0.len(), 3);
    }

    #[test]
    fn test_document_errors_are_reported() {
        let document = NetworkDocument {
            intersections: vec![IntersectionRecord { id: 1, x: 0.0, y: 0.0 }],
            roads: vec![],
            segments: vec![SegmentRecord {
                road: 1,
                start: 1,
                end: 1,
                length: 1.0,
                geometry: None,
            }],
        };
        assert!(matches!(document.into_network(), Err(Error::UnknownRoad(1))));
        assert!(NetworkDocument::from_json("{\"roads\": []}").is_err());
    }

    #[test]
    fn test_load_network_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_DOCUMENT.as_bytes()).unwrap();

        let network = load_network(file.path(), &Planar).unwrap();
        assert_eq!(network.road_count(), 2);

        let missing = load_network(Path::new("/definitely/not/here.json"), &Planar);
        assert!(missing.is_err());
    }

    #[test]
    fn test_short_segments_are_counted_on_load() {
        let mut document = NetworkDocument::from_json(SAMPLE_DOCUMENT).unwrap();
        // 1 -> 2 is one unit apart
        document.segments[0].length = 0.4;
        let text = serde_json::to_string(&document).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        let network = load_network(file.path(), &Planar).unwrap();

        assert_eq!(validate_metric_admissibility(&network, &Planar), 1);
        let sample = NetworkDocument::from_json(SAMPLE_DOCUMENT)
            .unwrap()
            .into_network()
            .unwrap();
        assert_eq!(validate_metric_admissibility(&sample, &Planar), 0);
    }
}
