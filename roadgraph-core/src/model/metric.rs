//! Straight-line distance between intersection positions.
//!
//! A* stays exact only while the metric never overestimates the remaining
//! network distance, so the metric has to use the same unit as the segment
//! lengths and satisfy the triangle inequality.

use geo::{Distance, Euclidean, Haversine, Point};

pub trait DistanceMetric: Send + Sync {
    fn distance(&self, from: Point<f64>, to: Point<f64>) -> f64;
}

/// Euclidean distance for networks already projected onto a plane
#[derive(Debug, Clone, Copy, Default)]
pub struct Planar;

impl DistanceMetric for Planar {
    fn distance(&self, from: Point<f64>, to: Point<f64>) -> f64 {
        Euclidean.distance(from, to)
    }
}

/// Haversine distance in kilometres for lon/lat positions
#[derive(Debug, Clone, Copy, Default)]
pub struct GreatCircle;

impl DistanceMetric for GreatCircle {
    fn distance(&self, from: Point<f64>, to: Point<f64>) -> f64 {
        Haversine.distance(from, to) / 1000.0
    }
}

impl<F> DistanceMetric for F
where
    F: Fn(Point<f64>, Point<f64>) -> f64 + Send + Sync,
{
    fn distance(&self, from: Point<f64>, to: Point<f64>) -> f64 {
        self(from, to)
    }
}
