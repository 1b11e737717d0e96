//! Distance metrics over points.

use serde::{Deserialize, Serialize};

use super::haversine;
use crate::models::Point;

/// Distance between two points.
///
/// Implementations must be symmetric and non-negative. Solvers that use the
/// metric as an A* heuristic additionally rely on it never overestimating the
/// graph distance.
pub trait Metric: Send + Sync {
    /// Distance from `a` to `b`.
    fn distance(&self, a: &Point, b: &Point) -> f64;
}

/// Great-circle distance in meters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Haversine;

impl Metric for Haversine {
    fn distance(&self, a: &Point, b: &Point) -> f64 {
        haversine(a.lat(), a.lon(), b.lat(), b.lon())
    }
}

/// Planar distance treating `(lon, lat)` as `(x, y)`.
///
/// Useful for projected coordinates and for small synthetic instances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Euclidean;

impl Metric for Euclidean {
    fn distance(&self, a: &Point, b: &Point) -> f64 {
        let dx = a.lon() - b.lon();
        let dy = a.lat() - b.lat();
        (dx * dx + dy * dy).sqrt()
    }
}

/// Configuration-selectable metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// [`Haversine`].
    #[default]
    Haversine,
    /// [`Euclidean`].
    Euclidean,
}

impl Metric for MetricKind {
    fn distance(&self, a: &Point, b: &Point) -> f64 {
        match self {
            MetricKind::Haversine => Haversine.distance(a, b),
            MetricKind::Euclidean => Euclidean.distance(a, b),
        }
    }
}
