//! Spherical math for route distances.
//!
//! Distances use the spherical law of cosines on a 6371 km sphere, matching
//! the conventions of the airport reference data. Profit figures downstream
//! are tuned against this exact output, so do not swap in haversine or an
//! ellipsoidal model.

use crate::models::Coordinate;
use crate::rules::EARTH_RADIUS_KM;
use serde::{Deserialize, Serialize};

/// Length of the summed unit vectors below which two points count as antipodal.
const ANTIPODAL_EPSILON: f64 = 1e-9;

/// Great-circle distance between two coordinates in kilometres.
///
/// Symmetric, and zero for identical points. The cosine term is clamped so
/// rounding can never push `acos` outside its domain.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }
    let phi1 = a.lat().to_radians();
    let phi2 = b.lat().to_radians();
    let dlambda = (b.lon() - a.lon()).to_radians();
    let cos_c = phi1.sin() * phi2.sin() + phi1.cos() * phi2.cos() * dlambda.cos();
    EARTH_RADIUS_KM * cos_c.clamp(-1.0, 1.0).acos()
}

/// Total and per-leg distance of a multi-leg route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiLegDistance {
    pub total: f64,
    pub legs: Vec<f64>,
}

/// Sum distances between consecutive points.
///
/// Fewer than two points produce an empty route.
pub fn distance_multi(points: &[Coordinate]) -> MultiLegDistance {
    let legs: Vec<f64> = points.windows(2).map(|w| distance(w[0], w[1])).collect();
    let total = legs.iter().sum();
    MultiLegDistance { total, legs }
}

/// Initial bearing from `a` towards `b` in degrees, 0 = north, clockwise.
pub fn bearing(a: Coordinate, b: Coordinate) -> f64 {
    let phi1 = a.lat().to_radians();
    let phi2 = b.lat().to_radians();
    let delta_lambda = (b.lon() - a.lon()).to_radians();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    x.atan2(y).to_degrees().rem_euclid(360.0)
}

/// Point halfway along the great circle between `a` and `b`.
///
/// `None` for antipodal points, where every great circle through both is a
/// shortest path and the midpoint is not unique.
pub fn midpoint(a: Coordinate, b: Coordinate) -> Option<Coordinate> {
    let phi1 = a.lat().to_radians();
    let phi2 = b.lat().to_radians();
    let lambda1 = a.lon().to_radians();
    let delta_lambda = (b.lon() - a.lon()).to_radians();

    let bx = phi2.cos() * delta_lambda.cos();
    let by = phi2.cos() * delta_lambda.sin();
    let sx = phi1.cos() + bx;
    let sz = phi1.sin() + phi2.sin();
    if (sx * sx + by * by + sz * sz).sqrt() < ANTIPODAL_EPSILON {
        return None;
    }
    let phi3 = sz.atan2((sx * sx + by * by).sqrt());
    let lambda3 = lambda1 + by.atan2(sx);

    let lat = phi3.to_degrees().clamp(-90.0, 90.0);
    let lon = (lambda3.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    Coordinate::new(lon, lat).ok()
}
