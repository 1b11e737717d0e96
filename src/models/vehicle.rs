//! Vehicle type with capacity, speed, and shift length.

use serde::{Deserialize, Serialize};

/// A vehicle that drives a route from the depot and back.
///
/// # Examples
///
/// ```
/// use u_logistics::models::Vehicle;
///
/// let v = Vehicle::new(0, 200).with_speed(12.0).with_max_duration(8.0 * 3600.0);
/// assert_eq!(v.capacity(), 200);
/// assert_eq!(v.travel_time(120.0), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: usize,
    capacity: i32,
    speed_mps: f64,
    max_duration: Option<f64>,
}

impl Vehicle {
    /// Creates a vehicle with speed 1 m/s and no shift limit.
    pub fn new(id: usize, capacity: i32) -> Self {
        Self {
            id,
            capacity,
            speed_mps: 1.0,
            max_duration: None,
        }
    }

    /// Sets the constant travel speed.
    pub fn with_speed(mut self, speed_mps: f64) -> Self {
        self.speed_mps = speed_mps;
        self
    }

    /// Sets the maximum route duration.
    pub fn with_max_duration(mut self, max: f64) -> Self {
        self.max_duration = Some(max);
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum load.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    pub fn speed(&self) -> f64 {
        self.speed_mps
    }

    pub fn max_duration(&self) -> Option<f64> {
        self.max_duration
    }

    /// Seconds needed to cover `distance` meters.
    pub fn travel_time(&self, distance: f64) -> f64 {
        distance / self.speed_mps
    }
}
