use geo::LineString;
use geojson::{Feature, FeatureCollection, Geometry};
use serde_json::json;

use super::Route;
use crate::{Error, RoadNetwork};

impl Route {
    /// Converts the route to a `GeoJSON` `FeatureCollection` with one
    /// `LineString` feature per segment, oriented in travel direction.
    pub fn to_geojson(&self, network: &RoadNetwork) -> Result<FeatureCollection, Error> {
        let mut features = Vec::with_capacity(self.segments.len());

        for (step, (&edge, from)) in self
            .segments
            .iter()
            .zip(&self.intersections)
            .enumerate()
        {
            let segment = network
                .segment(edge)
                .ok_or_else(|| Error::InvalidData(format!("Route segment {edge:?} not in network")))?;
            let road = network.road_of(segment);

            let mut geometry: LineString<f64> = segment.geometry.clone();
            if network.id_of(segment.start) != *from {
                geometry.0.reverse();
            }

            let value = json!({
                "type": "Feature",
                "geometry": Geometry::new((&geometry).into()),
                "properties": {
                    "step": step,
                    "road_id": segment.road,
                    "road": road.map(|road| road.name.as_str()),
                    "one_way": road.is_some_and(|road| road.one_way),
                    "length": segment.length,
                }
            });

            features.push(
                serde_json::from_value::<Feature>(value)
                    .map_err(|e| Error::GeoJsonError(e.to_string()))?,
            );
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self, network: &RoadNetwork) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson(network)?)
            .map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use geo::{Point, line_string};

    use crate::{AStarOptions, Planar, RoadNetworkBuilder, find_route};

    #[test]
    fn test_geojson_orients_segments_in_travel_direction() {
        let mut builder = RoadNetworkBuilder::new();
        builder.add_road(3, "Taranaki Street", false).unwrap();
        builder.add_intersection(1, Point::new(0.0, 0.0)).unwrap();
        builder.add_intersection(2, Point::new(2.0, 0.0)).unwrap();
        builder.add_segment(
            3,
            1,
            2,
            2.5,
            Some(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.5), (x: 2.0, y: 0.0)]),
        );
        let network = builder.build().unwrap();

        let route = find_route(&network, 2, 1, &Planar, &AStarOptions::default())
            .unwrap()
            .unwrap();
        let collection = route.to_geojson(&network).unwrap();
        assert_eq!(collection.features.len(), 1);

        let feature = &collection.features[0];
        assert_eq!(
            feature.property("road").and_then(|v| v.as_str()),
            Some("Taranaki Street")
        );
        assert_eq!(feature.property("length").and_then(|v| v.as_f64()), Some(2.5));

        let text = route.to_geojson_string(&network).unwrap();
        assert!(text.contains("[[2.0,0.0],[1.0,0.5],[0.0,0.0]]"));
    }
}
