//! Point and time window types.

use serde::{Deserialize, Serialize};

/// An arrival time window `[start, end]`, in seconds from route start.
///
/// Arriving before `start` forces a wait; arriving after `end` is
/// infeasible.
///
/// # Examples
///
/// ```
/// use u_logistics::models::TimeWindow;
///
/// let tw = TimeWindow::new(100.0, 200.0).unwrap();
/// assert!(tw.contains(150.0));
/// assert_eq!(tw.wait_before(40.0), 60.0);
/// assert!(tw.is_closed_at(250.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    start: f64,
    end: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `start > end` or either bound is non-finite.
    pub fn new(start: f64, end: f64) -> Option<Self> {
        if !start.is_finite() || !end.is_finite() || start > end {
            return None;
        }
        Some(Self { start, end })
    }

    /// Opening time.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Closing time.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Returns `true` if `time` falls inside the window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }

    /// Time spent waiting for the window to open when arriving at `arrival`.
    pub fn wait_before(&self, arrival: f64) -> f64 {
        (self.start - arrival).max(0.0)
    }

    /// Returns `true` if the window has already closed at `arrival`.
    pub fn is_closed_at(&self, arrival: f64) -> bool {
        arrival > self.end
    }

    /// Remaining time until the window closes, negative once closed.
    pub fn slack(&self, arrival: f64) -> f64 {
        self.end - arrival
    }
}

/// A geographic location to visit: a depot, a stop, a courier, or an order.
///
/// `lat` must lie in `[-90, 90]`, `lon` in `[-180, 180]`, and `demand` must
/// be non-negative; these are checked by the caller, not by the solvers.
///
/// # Examples
///
/// ```
/// use u_logistics::models::{Point, TimeWindow};
///
/// let p = Point::new(7, 37.5665, 126.9780)
///     .with_demand(12)
///     .with_priority(3.0)
///     .with_time_window(TimeWindow::new(0.0, 3600.0).unwrap());
/// assert_eq!(p.id(), 7);
/// assert_eq!(p.demand(), 12);
/// assert_eq!(p.priority(), 3.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    id: usize,
    lat: f64,
    lon: f64,
    #[serde(default)]
    demand: i32,
    #[serde(default)]
    service_duration: f64,
    #[serde(default)]
    time_window: Option<TimeWindow>,
    #[serde(default = "default_priority")]
    priority: f64,
}

fn default_priority() -> f64 {
    1.0
}

impl Point {
    /// Creates a point with no demand, no service time, no window, and
    /// priority 1.
    pub fn new(id: usize, lat: f64, lon: f64) -> Self {
        Self {
            id,
            lat,
            lon,
            demand: 0,
            service_duration: 0.0,
            time_window: None,
            priority: default_priority(),
        }
    }

    /// Sets the demand (units loaded onto the vehicle).
    pub fn with_demand(mut self, demand: i32) -> Self {
        self.demand = demand;
        self
    }

    /// Sets the service duration in seconds.
    pub fn with_service_duration(mut self, seconds: f64) -> Self {
        self.service_duration = seconds;
        self
    }

    /// Sets the arrival time window.
    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = Some(tw);
        self
    }

    /// Sets the priority (values ≥ 1 bias sequencing toward this point).
    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn demand(&self) -> i32 {
        self.demand
    }

    pub fn service_duration(&self) -> f64 {
        self.service_duration
    }

    pub fn time_window(&self) -> Option<&TimeWindow> {
        self.time_window.as_ref()
    }

    pub fn priority(&self) -> f64 {
        self.priority
    }

    /// Priority clamped to at least 1, as used by the sequencing scores.
    pub fn effective_priority(&self) -> f64 {
        if self.priority.is_finite() {
            self.priority.max(1.0)
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_invalid() {
        assert!(TimeWindow::new(20.0, 10.0).is_none());
        assert!(TimeWindow::new(f64::NAN, 10.0).is_none());
        assert!(TimeWindow::new(10.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_time_window_bounds() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert!(tw.contains(10.0));
        assert!(tw.contains(20.0));
        assert!(!tw.contains(20.1));
        assert!(!tw.is_closed_at(20.0));
        assert!(tw.is_closed_at(20.1));
    }

    #[test]
    fn test_time_window_wait_and_slack() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert_eq!(tw.wait_before(4.0), 6.0);
        assert_eq!(tw.wait_before(15.0), 0.0);
        assert_eq!(tw.slack(15.0), 5.0);
        assert!(tw.slack(25.0) < 0.0);
    }

    #[test]
    fn test_point_defaults() {
        let p = Point::new(3, 10.0, 20.0);
        assert_eq!(p.lat(), 10.0);
        assert_eq!(p.lon(), 20.0);
        assert_eq!(p.demand(), 0);
        assert_eq!(p.service_duration(), 0.0);
        assert!(p.time_window().is_none());
        assert_eq!(p.priority(), 1.0);
    }

    #[test]
    fn test_effective_priority_clamped() {
        assert_eq!(Point::new(0, 0.0, 0.0).with_priority(0.2).effective_priority(), 1.0);
        assert_eq!(Point::new(0, 0.0, 0.0).with_priority(4.0).effective_priority(), 4.0);
        assert_eq!(
            Point::new(0, 0.0, 0.0).with_priority(f64::NAN).effective_priority(),
            1.0
        );
    }

    #[test]
    fn test_point_deserialize_defaults() {
        let p: Point = toml::from_str("id = 4\nlat = 1.5\nlon = 2.5\n").expect("valid");
        assert_eq!(p.id(), 4);
        assert_eq!(p.priority(), 1.0);
        assert_eq!(p.demand(), 0);
    }
}
