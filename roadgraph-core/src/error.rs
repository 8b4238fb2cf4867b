use thiserror::Error;

use crate::{IntersectionId, Length, RoadId};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown intersection {0}")]
    UnknownIntersection(IntersectionId),
    #[error("Unknown road {0}")]
    UnknownRoad(RoadId),
    #[error("Intersection {0} is defined more than once")]
    DuplicateIntersection(IntersectionId),
    #[error("Road {0} is defined more than once")]
    DuplicateRoad(RoadId),
    #[error("Segment of road {road} has invalid length {length}")]
    InvalidSegmentLength { road: RoadId, length: Length },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
