//! Geographic distance.
//!
//! - [`haversine`] — Great-circle distance in meters
//! - [`Metric`] — Distance between two [`Point`](crate::models::Point)s, with
//!   [`Haversine`] and [`Euclidean`] implementations

mod haversine;
mod metric;

pub use haversine::{haversine, EARTH_RADIUS_M};
pub use metric::{Euclidean, Haversine, Metric, MetricKind};
