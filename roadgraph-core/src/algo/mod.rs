//! Connectivity analysis of the road network

pub mod cut_vertices;
