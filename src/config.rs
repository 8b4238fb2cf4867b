//! TOML configuration of the command-line tool

use std::path::{Path, PathBuf};

use anyhow::Context;
use roadgraph_core::prelude::*;
use serde::{Deserialize, Serialize};

/// Tool configuration; every section and field may be omitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub network: NetworkConfig,
    pub search: AStarOptions,
    pub picking: PickingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NetworkConfig {
    /// Network document to load, overridden by `--network`
    pub path: Option<PathBuf>,
    pub metric: MetricKind,
}

/// Straight-line metric matching the coordinates of the network document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    /// Coordinates already projected, same unit as segment lengths
    #[default]
    Planar,
    /// Coordinates are lon/lat, segment lengths in kilometres
    GreatCircle,
}

impl MetricKind {
    pub fn metric(self) -> Box<dyn DistanceMetric> {
        match self {
            MetricKind::Planar => Box::new(Planar),
            MetricKind::GreatCircle => Box::new(GreatCircle),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PickingConfig {
    /// How far from an intersection a picked point may be
    pub max_distance: f64,
}

impl Default for PickingConfig {
    fn default() -> Self {
        Self { max_distance: 0.15 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, `RUST_LOG` takes precedence
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
