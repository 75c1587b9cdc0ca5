//! Normalization from raw provider records to ranked, display-ready places.
//!
//! Category-specific fields come from [`CategoryKind::details`]; this module
//! handles the shared parts: distance, fallbacks, ids, and ordering.

use std::cmp::Ordering;
use std::collections::HashSet;

use nearby_core::{format_distance, haversine_distance_km, Coordinate};
use serde::Serialize;

use crate::category::{CategoryKind, PlaceDetails};
use crate::types::RawPlace;

const ADDRESS_NOT_AVAILABLE: &str = "Address not available";
const DISTANCE_UNKNOWN: &str = "Distance unknown";

/// A normalized place, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlace {
    pub id: String,
    pub name: String,
    pub kind: CategoryKind,
    pub details: PlaceDetails,
    /// Kilometres from the search origin; `None` when the provider sent no
    /// usable coordinate.
    pub distance_km: Option<f64>,
    pub distance_label: String,
    pub coordinate: Option<Coordinate>,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
}

/// Normalizes raw provider records and orders them nearest first.
///
/// Records repeating an earlier provider id are dropped. The sort is stable:
/// equal distances keep their input order, and places without a coordinate
/// follow every located place in input order.
#[must_use]
pub fn normalize(
    raw_places: &[RawPlace],
    origin: Coordinate,
    kind: CategoryKind,
) -> Vec<RankedPlace> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut ranked: Vec<RankedPlace> = raw_places
        .iter()
        .enumerate()
        .filter(|&(index, raw)| match raw.id.as_deref().filter(|id| !id.trim().is_empty()) {
            Some(id) if !seen.insert(id) => {
                tracing::debug!(%kind, id, index, "dropping duplicate place");
                false
            }
            _ => true,
        })
        .map(|(index, raw)| normalize_place(raw, index, origin, kind))
        .collect();

    ranked.sort_by(|a, b| compare_distance(a.distance_km, b.distance_km));
    ranked
}

fn normalize_place(
    raw: &RawPlace,
    index: usize,
    origin: Coordinate,
    kind: CategoryKind,
) -> RankedPlace {
    let coordinate = raw.coordinate();
    let distance_km = coordinate.map(|c| haversine_distance_km(origin, c));
    let distance_label = distance_km.map_or_else(|| DISTANCE_UNKNOWN.to_string(), format_distance);

    let id = first_present(&[raw.id.as_deref()]).unwrap_or_else(|| kind.synthetic_id(index));
    let name =
        first_present(&[raw.name.as_deref()]).unwrap_or_else(|| kind.fallback_name().to_string());
    let address = first_present(&[
        raw.formatted_address.as_deref(),
        raw.address_line1.as_deref(),
    ])
    .unwrap_or_else(|| ADDRESS_NOT_AVAILABLE.to_string());

    RankedPlace {
        id,
        name,
        kind,
        details: kind.details(raw),
        distance_km,
        distance_label,
        coordinate,
        address,
        phone: first_present(&[raw.phone.as_deref(), raw.raw_phone.as_deref()]),
        website: first_present(&[raw.website.as_deref(), raw.raw_website.as_deref()]),
    }
}

/// First candidate that is present and not blank.
fn first_present(candidates: &[Option<&str>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .find(|v| !v.trim().is_empty())
        .map(|v| (*v).to_string())
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
