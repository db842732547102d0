//! Coordinates and the radius filter used by the restaurant picker.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::EARTH_RADIUS_KM;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    #[schema(example = 24.94097)]
    pub lat: f64,
    #[schema(example = 121.21456)]
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Haversine distance in kilometres from this observer to `candidate`.
    ///
    /// The candidate latitude enters the formula as an absolute value while the
    /// observer latitude does not. Stored query results depend on this exact
    /// expression, so candidates south of the equator are folded onto their
    /// northern mirror image.
    pub fn distance_km(&self, candidate: &Coordinate) -> f64 {
        let candidate_lat = candidate.lat.abs();

        let half_d_lat = ((self.lat - candidate_lat).to_radians() / 2.0).sin();
        let half_d_lng = ((self.lng - candidate.lng).to_radians() / 2.0).sin();

        let a = half_d_lat.powi(2)
            + self.lat.to_radians().cos() * candidate_lat.to_radians().cos() * half_d_lng.powi(2);

        EARTH_RADIUS_KM * 2.0 * a.sqrt().asin()
    }

    /// True iff `candidate` lies within `radius_km` of this observer (inclusive).
    pub fn within(&self, candidate: &Coordinate, radius_km: f64) -> bool {
        self.distance_km(candidate) <= radius_km
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observer() -> Coordinate {
        Coordinate::new(24.94097, 121.21456)
    }

    #[test]
    fn test_nearby_points_are_inside_half_kilometre() {
        let inside = [
            Coordinate::new(24.94093, 121.21433),
            Coordinate::new(24.94112, 121.21438),
            Coordinate::new(24.94057, 121.21526),
        ];

        for candidate in inside {
            assert!(observer().within(&candidate, 0.5), "{:?} should be inside", candidate);
        }
    }

    #[test]
    fn test_far_points_are_outside_half_kilometre() {
        let outside = [
            Coordinate::new(24.98239, 121.26795),
            Coordinate::new(25.00352, 121.16513),
            Coordinate::new(25.04174, 121.07653),
        ];

        for candidate in outside {
            assert!(!observer().within(&candidate, 0.5), "{:?} should be outside", candidate);
        }
    }

    #[test]
    fn test_same_point_is_zero_distance() {
        let here = observer();
        assert_eq!(here.distance_km(&here), 0.0);
        assert!(here.within(&here, 0.0));
    }

    #[test]
    fn test_negative_candidate_latitude_is_folded() {
        let observer = Coordinate::new(10.0, 20.0);
        let mirrored = Coordinate::new(-10.0, 20.0);

        // The southern candidate is treated as if it sat on the observer.
        assert_eq!(observer.distance_km(&mirrored), 0.0);
    }

    #[test]
    fn test_one_degree_of_longitude_on_equator() {
        let origin = Coordinate::new(0.0, 0.0);
        let east = Coordinate::new(0.0, 1.0);
        let km = origin.distance_km(&east);

        assert!((km - 111.19).abs() < 0.01, "got {}", km);
    }
}
