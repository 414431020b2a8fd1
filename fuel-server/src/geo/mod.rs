//! Great-circle distance helpers.
//!
//! Distances are in kilometres on a spherical Earth (R = 6371 km). The
//! point-to-segment distance uses a planar triangle built from three
//! haversine distances rather than a true spherical projection; at
//! corridor scale (single-digit kilometres) the error is negligible, but
//! the result is not geodesically exact for very long segments. This is a
//! deliberate accuracy/simplicity tradeoff, not a defect.

use crate::domain::Coord;

/// Mean Earth radius, in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometres.
///
/// Returns `None` when any input is not a finite number; callers treat
/// that as "cannot compare" and exclude the pair. Never panics.
pub fn haversine_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> Option<f64> {
    if !(lat1.is_finite() && lng1.is_finite() && lat2.is_finite() && lng2.is_finite()) {
        return None;
    }

    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    Some(EARTH_RADIUS_KM * c)
}

/// Minimum distance from a point to a polyline, in kilometres.
///
/// Returns `None` for polylines with fewer than two vertices, or when no
/// segment distance can be determined.
pub fn distance_point_to_polyline_km(point: Coord, vertices: &[Coord]) -> Option<f64> {
    if vertices.len() < 2 {
        return None;
    }

    let mut min_distance: Option<f64> = None;

    for pair in vertices.windows(2) {
        if let Some(d) = point_to_segment_km(point, pair[0], pair[1]) {
            min_distance = Some(match min_distance {
                Some(best) if best <= d => best,
                _ => d,
            });
        }
    }

    min_distance
}

/// Distance from a point to one segment, in kilometres.
///
/// Built from the triangle of three haversine distances (point to each
/// endpoint, plus the segment itself): when the angle at an endpoint is
/// right or obtuse the perpendicular foot falls outside the segment and
/// the nearer endpoint distance is used; otherwise the Heron-area height
/// onto the segment line.
fn point_to_segment_km(point: Coord, seg_start: Coord, seg_end: Coord) -> Option<f64> {
    let a = haversine_distance(point.lat, point.lng, seg_start.lat, seg_start.lng)?;
    let b = haversine_distance(point.lat, point.lng, seg_end.lat, seg_end.lng)?;

    let c = match haversine_distance(seg_start.lat, seg_start.lng, seg_end.lat, seg_end.lng) {
        None => return Some(a),
        Some(c) if c == 0.0 => return Some(a),
        Some(c) => c,
    };

    if a * a >= b * b + c * c {
        return Some(b);
    }
    if b * b >= a * a + c * c {
        return Some(a);
    }

    let s = (a + b + c) / 2.0;
    let area = (s * (s - a) * (s - b) * (s - c)).max(0.0).sqrt();

    Some(2.0 * area / c)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn lat() -> impl Strategy<Value = f64> {
        -90.0f64..90.0
    }

    fn lng() -> impl Strategy<Value = f64> {
        -180.0f64..180.0
    }

    proptest! {
        #[test]
        fn haversine_is_symmetric(a_lat in lat(), a_lng in lng(), b_lat in lat(), b_lng in lng()) {
            let ab = haversine_distance(a_lat, a_lng, b_lat, b_lng).unwrap();
            let ba = haversine_distance(b_lat, b_lng, a_lat, a_lng).unwrap();
            prop_assert!((ab - ba).abs() < 1e-9, "d(A,B)={ab} d(B,A)={ba}");
        }

        #[test]
        fn haversine_identity_is_zero(a_lat in lat(), a_lng in lng()) {
            prop_assert_eq!(haversine_distance(a_lat, a_lng, a_lat, a_lng), Some(0.0));
        }

        #[test]
        fn haversine_is_non_negative_and_bounded(
            a_lat in lat(), a_lng in lng(), b_lat in lat(), b_lng in lng()
        ) {
            let d = haversine_distance(a_lat, a_lng, b_lat, b_lng).unwrap();
            // Half the Earth's circumference is the farthest apart two
            // points can be.
            prop_assert!((0.0..=20_016.0).contains(&d), "got {}", d);
        }

        #[test]
        fn polyline_distance_is_at_most_vertex_distance(
            p_lat in lat(), p_lng in lng(),
            v1_lat in lat(), v1_lng in lng(),
            v2_lat in lat(), v2_lng in lng(),
        ) {
            let point = Coord::new(p_lat, p_lng);
            let polyline = [Coord::new(v1_lat, v1_lng), Coord::new(v2_lat, v2_lng)];
            let d = distance_point_to_polyline_km(point, &polyline).unwrap();
            let to_v1 = haversine_distance(p_lat, p_lng, v1_lat, v1_lng).unwrap();
            let to_v2 = haversine_distance(p_lat, p_lng, v2_lat, v2_lng).unwrap();
            prop_assert!(d <= to_v1.min(to_v2) + 1e-9);
        }
    }
}
