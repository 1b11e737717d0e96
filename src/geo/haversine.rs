//! Haversine great-circle distance.

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between two latitude/longitude points
/// given in degrees.
///
/// Symmetric, zero for identical points, and never larger than any path
/// along a road graph between the same points, which makes it an admissible
/// A* heuristic.
///
/// # Examples
///
/// ```
/// use u_logistics::geo::haversine;
///
/// // One degree of latitude is roughly 111.2 km.
/// let d = haversine(0.0, 0.0, 1.0, 0.0);
/// assert!((d - 111_194.9).abs() < 1.0);
/// assert_eq!(haversine(37.5, 127.0, 37.5, 127.0), 0.0);
/// ```
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push `a` marginally past 1 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_M * c
}
