//! Geographic math used by every place search.
//!
//! Bounding boxes use the flat "1° latitude ≈ 111 km" approximation with a
//! cosine correction on longitude so the box covers roughly the same physical
//! width at any latitude. Distances use the haversine great-circle formula.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Kilometres covered by one degree of latitude.
pub const KM_PER_LAT_DEGREE: f64 = 111.0;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Search radius used when the caller does not pick one.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting values outside the valid WGS84 range.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] if either component is not
    /// finite, `lat` is outside `[-90, 90]`, or `lon` is outside `[-180, 180]`.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoreError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoreError::InvalidCoordinate {
                lat,
                lon,
                reason: "components must be finite".to_string(),
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoreError::InvalidCoordinate {
                lat,
                lon,
                reason: "latitude must be within [-90, 90]".to_string(),
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoreError::InvalidCoordinate {
                lat,
                lon,
                reason: "longitude must be within [-180, 180]".to_string(),
            });
        }
        Ok(Self { lat, lon })
    }

    /// Builds a coordinate from a longitude-first pair as found in `GeoJSON`
    /// geometries. Returns `None` for short or out-of-range pairs.
    #[must_use]
    pub fn from_lon_lat(pair: &[f64]) -> Option<Self> {
        match pair {
            [lon, lat, ..] => Self::new(*lat, *lon).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lon)
    }
}

/// Axis-aligned lon/lat rectangle used as a coarse provider-side filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Renders the box as a `rect:` filter, `minLon,minLat,maxLon,maxLat` order.
    #[must_use]
    pub fn to_rect_filter(&self) -> String {
        format!(
            "rect:{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

/// Derive the bounding box spanning `radius_km` around `center`.
///
/// No clamping is applied: near the poles the longitude span grows without
/// bound and near the antimeridian longitudes may leave `[-180, 180]`.
#[must_use]
pub fn compute_bounding_box(center: Coordinate, radius_km: f64) -> BoundingBox {
    let lat_delta = radius_km / KM_PER_LAT_DEGREE;
    let lon_delta = radius_km / (KM_PER_LAT_DEGREE * center.lat.to_radians().cos());

    BoundingBox {
        min_lon: center.lon - lon_delta,
        min_lat: center.lat - lat_delta,
        max_lon: center.lon + lon_delta,
        max_lat: center.lat + lat_delta,
    }
}

/// Great-circle distance between two coordinates in kilometres.
#[must_use]
pub fn haversine_distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push near-antipodal pairs just past 1
    let h = h.clamp(0.0, 1.0);

    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Human-readable distance: whole metres below 1 km, one decimal above.
#[must_use]
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0} m", (km * 1000.0).round())
    } else {
        format!("{km:.1} km")
    }
}
