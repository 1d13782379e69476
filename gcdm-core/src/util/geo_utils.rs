use geo::{Distance, Geodesic, Point};
use uom::si::f64::Length;
use uom::si::length;

/// miles per degree of longitude, valid near the mid-latitudes
pub const MILES_PER_DEGREE_LON: f64 = 54.6;
/// miles per degree of latitude
pub const MILES_PER_DEGREE_LAT: f64 = 69.0;

/// planar approximation of the distance between two WGS84 points. this
/// is not geodesically exact and should only be used for cost terms that
/// scale with distance, not for travel time estimation.
///
/// # Arguments
///
/// * `src` - origin point (x = longitude, y = latitude)
/// * `dst` - destination point
///
/// # Returns
///
/// distance in miles
pub fn planar_distance_miles(src: &Point<f64>, dst: &Point<f64>) -> f64 {
    let dx = (src.x() - dst.x()) * MILES_PER_DEGREE_LON;
    let dy = (src.y() - dst.y()) * MILES_PER_DEGREE_LAT;
    dx.hypot(dy)
}

/// geodesic distance between two WGS84 points on the ellipsoid.
pub fn geodesic_distance(src: Point<f64>, dst: Point<f64>) -> Length {
    Length::new::<length::meter>(Geodesic.distance(src, dst))
}

#[cfg(test)]
mod tests {
    use geo::Point;
    use uom::si::length::mile;

    #[test]
    fn test_planar_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let c = Point::new(0.0, 1.0);
        assert!((super::planar_distance_miles(&a, &b) - 54.6).abs() < 1e-9);
        assert!((super::planar_distance_miles(&a, &c) - 69.0).abs() < 1e-9);
        assert_eq!(super::planar_distance_miles(&a, &a), 0.0);
    }

    #[test]
    fn test_geodesic_distance_near_planar() {
        // New Haven to Tweed airport, a few miles apart
        let a = Point::new(-72.9, 41.3);
        let b = Point::new(-72.887, 41.263);
        let geodesic = super::geodesic_distance(a, b).get::<mile>();
        let planar = super::planar_distance_miles(&a, &b);
        assert!(geodesic > 2.0 && geodesic < 3.5, "got {geodesic}");
        assert!((geodesic - planar).abs() < 0.25);
    }
}
